//! SQLite-based store implementation

use chrono::{DateTime, Local};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, warn};

use brack_core::{ProgressSnapshot, PuzzleDocument};
use brack_util::PuzzleDate;

use crate::{Store, StoreError, StoreResult};

/// Current schema version, recorded under the `schema_version` metadata key
pub const SCHEMA_VERSION: u32 = 1;

/// SQLite-based store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(
            r#"
            -- Schema metadata
            CREATE TABLE IF NOT EXISTS metadata (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            -- Cached puzzle documents
            CREATE TABLE IF NOT EXISTS puzzle_data (
                puzzle_date TEXT PRIMARY KEY,
                completion_text TEXT NOT NULL,
                completion_url TEXT NOT NULL,
                solutions TEXT NOT NULL,
                initial_puzzle TEXT NOT NULL,
                puzzle_solution TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );

            -- Game progress (latest snapshot per date)
            CREATE TABLE IF NOT EXISTS game_state (
                puzzle_date TEXT PRIMARY KEY REFERENCES puzzle_data(puzzle_date),
                state TEXT NOT NULL,
                correct INTEGER NOT NULL,
                incorrect INTEGER NOT NULL,
                chars INTEGER NOT NULL,
                last_played TIMESTAMP NOT NULL,
                completed BOOLEAN NOT NULL
            );
            "#,
        )?;

        let version: Option<String> = conn
            .query_row(
                "SELECT value FROM metadata WHERE key = 'schema_version'",
                [],
                |row| row.get(0),
            )
            .optional()?;

        match version {
            None => {
                conn.execute(
                    "INSERT INTO metadata (key, value) VALUES ('schema_version', ?)",
                    [SCHEMA_VERSION.to_string()],
                )?;
            }
            Some(v) => {
                let found = v.parse::<u32>().unwrap_or(0);
                if found != SCHEMA_VERSION {
                    return Err(StoreError::UnsupportedSchema(found));
                }
                // At version 1 there is nothing to migrate yet
            }
        }

        debug!("Store schema initialized");
        Ok(())
    }
}

impl Store for SqliteStore {
    fn put_puzzle(&self, document: &PuzzleDocument) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        let solutions_json = serde_json::to_string(&document.solutions)?;

        conn.execute(
            r#"
            INSERT INTO puzzle_data (
                puzzle_date, completion_text, completion_url,
                solutions, initial_puzzle, puzzle_solution
            ) VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(puzzle_date)
            DO UPDATE SET
                completion_text = excluded.completion_text,
                completion_url = excluded.completion_url,
                solutions = excluded.solutions,
                initial_puzzle = excluded.initial_puzzle,
                puzzle_solution = excluded.puzzle_solution
            "#,
            params![
                document.puzzle_date.to_string(),
                document.completion_text,
                document.completion_url,
                solutions_json,
                document.initial_puzzle,
                document.puzzle_solution,
            ],
        )?;

        debug!(date = %document.puzzle_date, "Puzzle saved");
        Ok(())
    }

    fn get_puzzle(&self, date: &PuzzleDate) -> StoreResult<PuzzleDocument> {
        let conn = self.conn.lock().unwrap();

        let row: Option<(String, String, String, String, String)> = conn
            .query_row(
                r#"
                SELECT completion_text, completion_url, solutions,
                       initial_puzzle, puzzle_solution
                FROM puzzle_data
                WHERE puzzle_date = ?
                "#,
                [date.to_string()],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                    ))
                },
            )
            .optional()?;

        let (completion_text, completion_url, solutions_json, initial_puzzle, puzzle_solution) =
            row.ok_or_else(|| StoreError::NotFound(format!("puzzle for {date}")))?;

        let solutions: BTreeMap<String, String> = serde_json::from_str(&solutions_json)?;

        Ok(PuzzleDocument {
            puzzle_date: *date,
            initial_puzzle,
            solutions,
            completion_text,
            completion_url,
            puzzle_solution,
        })
    }

    fn has_puzzle(&self, date: &PuzzleDate) -> StoreResult<bool> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM puzzle_data WHERE puzzle_date = ?",
            [date.to_string()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn put_progress(&self, snapshot: &ProgressSnapshot) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            r#"
            INSERT INTO game_state (
                puzzle_date, state, correct, incorrect, chars, last_played, completed
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(puzzle_date)
            DO UPDATE SET
                state = excluded.state,
                correct = excluded.correct,
                incorrect = excluded.incorrect,
                chars = excluded.chars,
                last_played = excluded.last_played,
                completed = excluded.completed
            "#,
            params![
                snapshot.puzzle_date.to_string(),
                snapshot.state,
                snapshot.correct,
                snapshot.incorrect,
                snapshot.chars,
                snapshot.last_played.to_rfc3339(),
                snapshot.completed,
            ],
        )?;

        debug!(date = %snapshot.puzzle_date, correct = snapshot.correct, "Progress saved");
        Ok(())
    }

    fn get_progress(&self, date: &PuzzleDate) -> StoreResult<ProgressSnapshot> {
        let conn = self.conn.lock().unwrap();

        let row: Option<(String, u32, u32, u32, String, bool)> = conn
            .query_row(
                r#"
                SELECT state, correct, incorrect, chars, last_played, completed
                FROM game_state
                WHERE puzzle_date = ?
                "#,
                [date.to_string()],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                    ))
                },
            )
            .optional()?;

        let (state, correct, incorrect, chars, last_played_str, completed) =
            row.ok_or_else(|| StoreError::NotFound(format!("progress for {date}")))?;

        let last_played = DateTime::parse_from_rfc3339(&last_played_str)
            .map(|dt| dt.with_timezone(&Local))
            .unwrap_or_else(|_| brack_util::now());

        Ok(ProgressSnapshot {
            puzzle_date: *date,
            state,
            correct,
            incorrect,
            chars,
            last_played,
            completed,
        })
    }

    fn has_progress(&self, date: &PuzzleDate) -> StoreResult<bool> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM game_state WHERE puzzle_date = ?",
            [date.to_string()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn schema_version(&self) -> StoreResult<u32> {
        let conn = self.conn.lock().unwrap();
        let value: String = conn.query_row(
            "SELECT value FROM metadata WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )?;
        value
            .parse()
            .map_err(|_| StoreError::Database(format!("bad schema_version value: {value}")))
    }

    fn is_healthy(&self) -> bool {
        match self.conn.lock() {
            Ok(conn) => conn.query_row("SELECT 1", [], |_| Ok(())).is_ok(),
            Err(_) => {
                warn!("Store lock poisoned");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_document(date: &str) -> PuzzleDocument {
        PuzzleDocument {
            puzzle_date: PuzzleDate::parse(date).unwrap(),
            initial_puzzle: "The [capital] of France".to_string(),
            solutions: [("capital".to_string(), "Paris".to_string())]
                .into_iter()
                .collect(),
            completion_text: "Bravo".to_string(),
            completion_url: "https://example.com/share".to_string(),
            puzzle_solution: "The Paris of France".to_string(),
        }
    }

    fn make_snapshot(date: &str) -> ProgressSnapshot {
        ProgressSnapshot {
            puzzle_date: PuzzleDate::parse(date).unwrap(),
            state: "The Paris of France".to_string(),
            correct: 1,
            incorrect: 2,
            chars: 11,
            last_played: brack_util::now(),
            completed: true,
        }
    }

    #[test]
    fn test_in_memory_store() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.is_healthy());
        assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_puzzle_round_trip() {
        let store = SqliteStore::in_memory().unwrap();
        let doc = make_document("2025-03-09");

        store.put_puzzle(&doc).unwrap();
        let loaded = store.get_puzzle(&doc.puzzle_date).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_missing_puzzle_is_not_found() {
        let store = SqliteStore::in_memory().unwrap();
        let date = PuzzleDate::parse("2025-03-09").unwrap();

        assert!(!store.has_puzzle(&date).unwrap());
        assert!(matches!(
            store.get_puzzle(&date),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_puzzle_upsert_replaces() {
        let store = SqliteStore::in_memory().unwrap();
        let mut doc = make_document("2025-03-09");
        store.put_puzzle(&doc).unwrap();

        doc.completion_text = "Updated".to_string();
        doc.solutions
            .insert("extra".to_string(), "Answer".to_string());
        store.put_puzzle(&doc).unwrap();

        let loaded = store.get_puzzle(&doc.puzzle_date).unwrap();
        assert_eq!(loaded.completion_text, "Updated");
        assert_eq!(loaded.solutions.len(), 2);
    }

    #[test]
    fn test_progress_round_trip() {
        let store = SqliteStore::in_memory().unwrap();
        store.put_puzzle(&make_document("2025-03-09")).unwrap();

        let snapshot = make_snapshot("2025-03-09");
        store.put_progress(&snapshot).unwrap();

        let loaded = store.get_progress(&snapshot.puzzle_date).unwrap();
        assert_eq!(loaded.state, snapshot.state);
        assert_eq!(loaded.correct, 1);
        assert_eq!(loaded.incorrect, 2);
        assert_eq!(loaded.chars, 11);
        assert!(loaded.completed);
        assert_eq!(
            loaded.last_played.timestamp(),
            snapshot.last_played.timestamp()
        );
    }

    #[test]
    fn test_missing_progress_is_not_found() {
        let store = SqliteStore::in_memory().unwrap();
        let date = PuzzleDate::parse("2025-03-09").unwrap();

        assert!(!store.has_progress(&date).unwrap());
        assert!(matches!(
            store.get_progress(&date),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_progress_latest_write_wins() {
        let store = SqliteStore::in_memory().unwrap();
        store.put_puzzle(&make_document("2025-03-09")).unwrap();

        let mut snapshot = make_snapshot("2025-03-09");
        snapshot.correct = 0;
        snapshot.completed = false;
        store.put_progress(&snapshot).unwrap();

        snapshot.correct = 1;
        snapshot.completed = true;
        store.put_progress(&snapshot).unwrap();

        let loaded = store.get_progress(&snapshot.puzzle_date).unwrap();
        assert_eq!(loaded.correct, 1);
        assert!(loaded.completed);
    }

    #[test]
    fn test_on_disk_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brack.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.put_puzzle(&make_document("2025-03-09")).unwrap();
            store.put_progress(&make_snapshot("2025-03-09")).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let date = PuzzleDate::parse("2025-03-09").unwrap();
        assert!(store.has_puzzle(&date).unwrap());
        assert!(store.has_progress(&date).unwrap());
        assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);
    }
}

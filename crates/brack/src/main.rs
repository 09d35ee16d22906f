//! brack - play Bracket City on the command line
//!
//! Wires together the components:
//! - Store initialization under the user's data directory
//! - Puzzle load (local cache first, remote API on miss)
//! - Session construction, resumed from saved progress when present
//! - Terminal UI

mod app;
mod theme;
mod tui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use brack_fetch::PuzzleClient;
use brack_store::{SqliteStore, Store};
use brack_util::{DB_FILENAME, PuzzleDate, data_dir_without_env, parse_date_arg};

use app::{App, Mode};

/// Play Bracket City, a daily puzzle game published by The Atlantic.
///
/// DATE selects the puzzle to play: an absolute date like 2024-01-02, or a
/// negative number like -1 for "that many days before today". With no DATE
/// the current day's puzzle is played.
#[derive(Parser, Debug)]
#[command(name = "brack")]
#[command(about = "Play Bracket City on the command line", long_about = None)]
struct Args {
    /// Puzzle date: YYYY-MM-DD, or a negative day offset from today
    date: Option<String>,

    /// Open the calendar view
    #[arg(short, long)]
    calendar: bool,

    /// Data directory override (or set BRACK_DATA_DIR env var)
    #[arg(long, env = "BRACK_DATA_DIR", default_value_os_t = data_dir_without_env())]
    data_dir: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging. Logs go to stderr; the TUI owns stdout.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Create data directory and open the store
    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", args.data_dir))?;

    let db_path = args.data_dir.join(DB_FILENAME);
    let store: Arc<dyn Store> = Arc::new(
        SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open database {:?}", db_path))?,
    );

    info!(db_path = %db_path.display(), "Store initialized");

    // Resolve the requested puzzle and build the session
    let date = parse_date_arg(args.date.as_deref(), PuzzleDate::today())?;
    let client = PuzzleClient::new();

    let document = app::load_or_fetch(store.as_ref(), &client, date)?;
    let session = app::resume_session(store.as_ref(), document);

    let mode = if args.calendar {
        Mode::Calendar
    } else {
        Mode::Game
    };

    let mut app = App::new(store, client, session, mode);
    tui::run(&mut app)
}

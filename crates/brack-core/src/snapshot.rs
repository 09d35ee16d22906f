//! Progress snapshot: serializable session progress

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use brack_util::PuzzleDate;

/// Point-in-time copy of a game session, written to the store after every
/// state-changing event. One snapshot is kept per puzzle date; the latest
/// write wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub puzzle_date: PuzzleDate,

    /// Current puzzle text, with solved placeholders already replaced
    pub state: String,

    pub correct: u32,
    pub incorrect: u32,
    pub chars: u32,

    pub last_played: DateTime<Local>,
    pub completed: bool,
}

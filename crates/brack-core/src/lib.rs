//! Core puzzle model for brack
//!
//! Provides:
//! - `PuzzleDocument`: one day's puzzle content, immutable per session
//! - Clue extraction over the current puzzle text
//! - `GameSession`: the guess-submission state machine
//! - `ProgressSnapshot`: serializable progress for persistence and resume

mod clues;
mod document;
mod game;
mod snapshot;

pub use clues::*;
pub use document::*;
pub use game::*;
pub use snapshot::*;

use thiserror::Error;

/// Document validation errors
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("No solution for clue [{0}]")]
    MissingSolution(String),
}

pub type DocumentResult<T> = Result<T, DocumentError>;

//! Store trait definitions

use brack_core::{ProgressSnapshot, PuzzleDocument};
use brack_util::PuzzleDate;

use crate::StoreResult;

/// Main store trait
pub trait Store: Send + Sync {
    // Puzzle documents

    /// Save a puzzle document (insert or full replace)
    fn put_puzzle(&self, document: &PuzzleDocument) -> StoreResult<()>;

    /// Load the puzzle document for a date; `NotFound` if absent
    fn get_puzzle(&self, date: &PuzzleDate) -> StoreResult<PuzzleDocument>;

    /// Check whether a puzzle document exists for a date
    fn has_puzzle(&self, date: &PuzzleDate) -> StoreResult<bool>;

    // Game progress

    /// Save a progress snapshot (insert or full replace)
    fn put_progress(&self, snapshot: &ProgressSnapshot) -> StoreResult<()>;

    /// Load the progress snapshot for a date; `NotFound` if absent
    fn get_progress(&self, date: &PuzzleDate) -> StoreResult<ProgressSnapshot>;

    /// Check whether progress exists for a date
    fn has_progress(&self, date: &PuzzleDate) -> StoreResult<bool>;

    // Schema

    /// Current schema version recorded in the metadata table
    fn schema_version(&self) -> StoreResult<u32>;

    // Health

    /// Check if the store is healthy
    fn is_healthy(&self) -> bool;
}

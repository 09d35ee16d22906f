//! Puzzle document: the immutable content for one date

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use brack_util::PuzzleDate;

use crate::clues::{Segment, segments};
use crate::{DocumentError, DocumentResult};

/// One day's puzzle, as served by the remote API and cached locally.
///
/// Field names mirror the wire format. `solutions` is a `BTreeMap` so that
/// every iteration over clues is in clue-id order; guess matching depends on
/// this for determinism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDocument {
    pub puzzle_date: PuzzleDate,

    /// Template text containing `[clue-id]` placeholders
    pub initial_puzzle: String,

    /// Clue id -> canonical answer text
    pub solutions: BTreeMap<String, String>,

    /// Shown after the puzzle is fully solved
    pub completion_text: String,

    #[serde(rename = "completionURL")]
    pub completion_url: String,

    /// Fully solved text, display-only
    pub puzzle_solution: String,
}

impl PuzzleDocument {
    /// Number of clues that must be answered to finish the puzzle
    pub fn clue_count(&self) -> usize {
        self.solutions.len()
    }

    /// Check that every placeholder reachable from `initial_puzzle` has a
    /// solution entry.
    ///
    /// Answers may themselves contain `[inner]` placeholders that only become
    /// active once the outer clue is solved, so the walk covers the initial
    /// text and every answer string. A missing entry would otherwise leave an
    /// unanswerable placeholder in the puzzle forever.
    pub fn validate(&self) -> DocumentResult<()> {
        for text in std::iter::once(self.initial_puzzle.as_str())
            .chain(self.solutions.values().map(String::as_str))
        {
            for segment in segments(text) {
                if let Segment::Clue(id) = segment
                    && !self.solutions.contains_key(id)
                {
                    return Err(DocumentError::MissingSolution(id.to_string()));
                }
            }
        }
        Ok(())
    }
}

//! Game session state machine
//!
//! One `GameSession` per (puzzle, sitting). The session owns the document
//! and the mutable puzzle text; it advances only through `submit_guess` and,
//! for the keystroke counter, `observe_letter`. Once `done` turns true the
//! session is terminal and the caller stops feeding input.

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::clues::{Segment, active_clues, segments};
use crate::document::PuzzleDocument;
use crate::snapshot::ProgressSnapshot;

/// Result of submitting one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess matched an active clue; `done` reports whether it was the
    /// last one
    Correct { done: bool },

    /// Non-empty guess that matched no active clue
    Incorrect,

    /// Blank input; nothing changed and no snapshot should be written
    Ignored,
}

/// Mutable session state for one puzzle
#[derive(Debug)]
pub struct GameSession {
    document: PuzzleDocument,
    state: String,
    correct: u32,
    incorrect: u32,
    chars: u32,
    done: bool,
}

impl GameSession {
    /// Start a fresh session over a document
    pub fn new(document: PuzzleDocument) -> Self {
        let state = document.initial_puzzle.clone();
        let done = document.clue_count() == 0;
        Self {
            document,
            state,
            correct: 0,
            incorrect: 0,
            chars: 0,
            done,
        }
    }

    /// Resume a session from a stored snapshot.
    ///
    /// The snapshot is trusted only after a consistency check: every
    /// placeholder left in its `state` must still be answerable against this
    /// document's solutions. Puzzle content can change server-side between
    /// sittings, and a stale snapshot would otherwise carry placeholders no
    /// guess can ever clear. On mismatch the session starts fresh.
    pub fn resume(document: PuzzleDocument, snapshot: &ProgressSnapshot) -> Self {
        if !snapshot_consistent(&document, snapshot) {
            warn!(
                date = %document.puzzle_date,
                "Stored progress no longer matches puzzle content, starting fresh"
            );
            return Self::new(document);
        }

        Self {
            document,
            state: snapshot.state.clone(),
            correct: snapshot.correct,
            incorrect: snapshot.incorrect,
            chars: snapshot.chars,
            done: snapshot.completed,
        }
    }

    /// Submit a guess against the currently active clues.
    ///
    /// Blank input is ignored. Otherwise the guess is compared
    /// case-insensitively against every active answer in clue-id order, and
    /// the first match replaces the first occurrence of its placeholder with
    /// the canonical answer text from the document.
    pub fn submit_guess(&mut self, input: &str) -> GuessOutcome {
        if input.trim().is_empty() {
            return GuessOutcome::Ignored;
        }

        let matched = active_clues(&self.document.solutions, &self.state)
            .into_iter()
            .find(|(_, answer)| input.eq_ignore_ascii_case(answer))
            .map(|(id, answer)| (id.to_string(), answer.to_string()));

        match matched {
            Some((id, answer)) => {
                self.correct += 1;
                let placeholder = format!("[{id}]");
                self.state = self.state.replacen(&placeholder, &answer, 1);
                self.done = self.correct as usize == self.document.clue_count();
                debug!(clue = %id, correct = self.correct, done = self.done, "Guess accepted");
                GuessOutcome::Correct { done: self.done }
            }
            None => {
                self.incorrect += 1;
                GuessOutcome::Incorrect
            }
        }
    }

    /// Count a single alphabetic keystroke. Returns whether it counted, so
    /// the caller knows a snapshot write is due. Gameplay state is untouched.
    pub fn observe_letter(&mut self, ch: char) -> bool {
        if ch.is_alphabetic() {
            self.chars += 1;
            true
        } else {
            false
        }
    }

    /// Capture a snapshot of the current progress
    pub fn snapshot(&self, at: DateTime<Local>) -> ProgressSnapshot {
        ProgressSnapshot {
            puzzle_date: self.document.puzzle_date,
            state: self.state.clone(),
            correct: self.correct,
            incorrect: self.incorrect,
            chars: self.chars,
            last_played: at,
            completed: self.done,
        }
    }

    pub fn document(&self) -> &PuzzleDocument {
        &self.document
    }

    /// Current puzzle text, with solved placeholders replaced
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    pub fn chars(&self) -> u32 {
        self.chars
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

/// Every placeholder remaining in the snapshot's state must have a solution
/// entry in the document.
fn snapshot_consistent(document: &PuzzleDocument, snapshot: &ProgressSnapshot) -> bool {
    segments(&snapshot.state).iter().all(|segment| match segment {
        Segment::Clue(id) => document.solutions.contains_key(*id),
        Segment::Text(_) => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::tests::make_document;
    use brack_util::now;

    #[test]
    fn fresh_session_starts_in_progress() {
        let doc = make_document("The [capital] of France", &[("capital", "Paris")]);
        let session = GameSession::new(doc.clone());

        assert_eq!(session.state(), doc.initial_puzzle);
        assert_eq!(session.correct(), 0);
        assert_eq!(session.incorrect(), 0);
        assert_eq!(session.chars(), 0);
        assert!(!session.is_done());
    }

    #[test]
    fn correct_guess_any_casing() {
        let doc = make_document("The [capital] of France", &[("capital", "Paris")]);
        let mut session = GameSession::new(doc);

        let outcome = session.submit_guess("paris");
        assert_eq!(outcome, GuessOutcome::Correct { done: true });
        assert_eq!(session.correct(), 1);
        assert_eq!(session.incorrect(), 0);
        // The canonical answer text is inserted, not the player's casing
        assert_eq!(session.state(), "The Paris of France");
        assert!(session.is_done());
    }

    #[test]
    fn incorrect_guess_leaves_state_unchanged() {
        let doc = make_document("The [capital] of France", &[("capital", "Paris")]);
        let mut session = GameSession::new(doc);

        let outcome = session.submit_guess("london");
        assert_eq!(outcome, GuessOutcome::Incorrect);
        assert_eq!(session.correct(), 0);
        assert_eq!(session.incorrect(), 1);
        assert_eq!(session.state(), "The [capital] of France");
        assert!(!session.is_done());
    }

    #[test]
    fn blank_guess_is_ignored() {
        let doc = make_document("The [capital] of France", &[("capital", "Paris")]);
        let mut session = GameSession::new(doc);

        assert_eq!(session.submit_guess(""), GuessOutcome::Ignored);
        assert_eq!(session.submit_guess("   "), GuessOutcome::Ignored);
        assert_eq!(session.correct(), 0);
        assert_eq!(session.incorrect(), 0);
    }

    #[test]
    fn solving_all_clues_finishes_the_puzzle() {
        let doc = make_document("[a] and [b]", &[("a", "X"), ("b", "Y")]);
        let mut session = GameSession::new(doc);

        assert_eq!(session.submit_guess("x"), GuessOutcome::Correct { done: false });
        assert_eq!(session.state(), "X and [b]");
        assert!(!session.is_done());

        assert_eq!(session.submit_guess("Y"), GuessOutcome::Correct { done: true });
        assert_eq!(session.state(), "X and Y");
        assert!(session.is_done());
        // No placeholders remain
        assert!(active_clues(&session.document().solutions, session.state()).is_empty());
    }

    #[test]
    fn solved_clue_cannot_be_answered_again() {
        let doc = make_document("[a] and [b]", &[("a", "X"), ("b", "Y")]);
        let mut session = GameSession::new(doc);

        session.submit_guess("X");
        // "X" no longer matches anything active
        assert_eq!(session.submit_guess("X"), GuessOutcome::Incorrect);
        assert_eq!(session.correct(), 1);
        assert_eq!(session.incorrect(), 1);
    }

    #[test]
    fn only_first_occurrence_is_replaced() {
        let doc = make_document("[a] then [a]", &[("a", "X")]);
        let mut session = GameSession::new(doc);

        session.submit_guess("x");
        assert_eq!(session.state(), "X then [a]");
    }

    #[test]
    fn nested_placeholder_activates_after_outer_solve() {
        let doc = make_document(
            "Start [outer] end",
            &[("outer", "mid [inner] mid"), ("inner", "deep")],
        );
        let mut session = GameSession::new(doc);

        // "deep" is not active yet: its placeholder is hidden inside outer's answer
        assert_eq!(session.submit_guess("deep"), GuessOutcome::Incorrect);

        assert_eq!(
            session.submit_guess("mid [inner] mid"),
            GuessOutcome::Correct { done: false }
        );
        assert_eq!(session.state(), "Start mid [inner] mid end");

        assert_eq!(session.submit_guess("DEEP"), GuessOutcome::Correct { done: true });
        assert_eq!(session.state(), "Start mid deep mid end");
    }

    #[test]
    fn observe_letter_counts_alphabetic_only() {
        let doc = make_document("The [capital] of France", &[("capital", "Paris")]);
        let mut session = GameSession::new(doc);

        assert!(session.observe_letter('p'));
        assert!(session.observe_letter('A'));
        assert!(!session.observe_letter('3'));
        assert!(!session.observe_letter(' '));
        assert_eq!(session.chars(), 2);
        assert_eq!(session.correct(), 0);
        assert_eq!(session.state(), "The [capital] of France");
    }

    #[test]
    fn snapshot_round_trip() {
        let doc = make_document("[a] and [b]", &[("a", "X"), ("b", "Y")]);
        let mut session = GameSession::new(doc.clone());
        session.observe_letter('x');
        session.submit_guess("x");
        session.submit_guess("wrong");

        let snapshot = session.snapshot(now());
        let restored = GameSession::resume(doc, &snapshot);

        assert_eq!(restored.state(), session.state());
        assert_eq!(restored.correct(), session.correct());
        assert_eq!(restored.incorrect(), session.incorrect());
        assert_eq!(restored.chars(), session.chars());
        assert_eq!(restored.is_done(), session.is_done());
    }

    #[test]
    fn resume_of_completed_puzzle_stays_done() {
        let doc = make_document("The [capital] of France", &[("capital", "Paris")]);
        let mut session = GameSession::new(doc.clone());
        session.submit_guess("paris");

        let snapshot = session.snapshot(now());
        let restored = GameSession::resume(doc, &snapshot);
        assert!(restored.is_done());
        assert_eq!(restored.correct(), 1);
    }

    #[test]
    fn resume_falls_back_on_stale_snapshot() {
        let doc = make_document("The [capital] of France", &[("capital", "Paris")]);
        let mut stale = GameSession::new(doc.clone()).snapshot(now());
        // Simulate progress saved against older puzzle content
        stale.state = "The [kapital] of France".to_string();
        stale.correct = 3;

        let session = GameSession::resume(doc.clone(), &stale);
        assert_eq!(session.state(), doc.initial_puzzle);
        assert_eq!(session.correct(), 0);
        assert!(!session.is_done());
    }
}

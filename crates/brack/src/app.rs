//! Application state and event handling

use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use brack_core::{GameSession, GuessOutcome, PuzzleDocument};
use brack_fetch::PuzzleClient;
use brack_store::{Store, StoreError};
use brack_util::PuzzleDate;

use crate::theme::Theme;
use crate::tui::calendar::CalendarView;
use crate::tui::game::GameView;

/// Which view is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Game,
    Calendar,
}

pub struct App {
    store: Arc<dyn Store>,
    client: PuzzleClient,
    pub theme: Theme,
    pub mode: Mode,
    pub game: GameView,
    pub calendar: CalendarView,
    pub quit: bool,
}

impl App {
    pub fn new(
        store: Arc<dyn Store>,
        client: PuzzleClient,
        session: GameSession,
        mode: Mode,
    ) -> Self {
        let mut calendar = CalendarView::new(PuzzleDate::today().as_naive());
        if mode == Mode::Calendar {
            calendar.refresh(store.as_ref());
        }

        Self {
            store,
            client,
            theme: Theme::default(),
            mode,
            game: GameView::new(session),
            calendar,
            quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl-C quits from anywhere
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        match self.mode {
            Mode::Game => self.handle_game_key(key),
            Mode::Calendar => self.handle_calendar_key(key),
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.open_calendar(),

            // Once the puzzle is solved the session is terminal; stop
            // feeding it input and let 'q' leave
            KeyCode::Char('q') if self.game.session.is_done() => self.quit = true,

            KeyCode::Enter => {
                let guess = std::mem::take(&mut self.game.input);
                if self.game.session.is_done() {
                    return;
                }
                match self.game.session.submit_guess(&guess) {
                    GuessOutcome::Correct { .. } | GuessOutcome::Incorrect => {
                        self.persist_progress();
                    }
                    GuessOutcome::Ignored => {}
                }
            }

            KeyCode::Backspace => {
                self.game.input.pop();
            }

            KeyCode::Char(ch) => {
                if self.game.session.is_done() {
                    return;
                }
                self.game.input.push(ch);
                if self.game.session.observe_letter(ch) {
                    self.persist_progress();
                }
            }

            _ => {}
        }
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Tab | KeyCode::Char('c') => self.mode = Mode::Game,

            KeyCode::Left | KeyCode::Char('h') => self.calendar_move(-1),
            KeyCode::Right | KeyCode::Char('l') => self.calendar_move(1),
            KeyCode::Up | KeyCode::Char('k') => self.calendar_move(-7),
            KeyCode::Down | KeyCode::Char('j') => self.calendar_move(7),

            KeyCode::Enter | KeyCode::Char(' ') => {
                let date = self.calendar.selected_date();
                self.open_date(date);
            }

            _ => {}
        }
    }

    fn open_calendar(&mut self) {
        self.calendar.refresh(self.store.as_ref());
        self.mode = Mode::Calendar;
    }

    fn calendar_move(&mut self, days: i64) {
        if self.calendar.move_by_days(days) {
            self.calendar.refresh(self.store.as_ref());
        }
    }

    /// Load the selected date's puzzle and switch to the game view
    fn open_date(&mut self, date: PuzzleDate) {
        match load_or_fetch(self.store.as_ref(), &self.client, date) {
            Ok(document) => {
                let session = resume_session(self.store.as_ref(), document);
                self.game = GameView::new(session);
                self.mode = Mode::Game;
                self.calendar.flash = None;
            }
            Err(e) => {
                warn!(date = %date, error = %e, "Failed to load puzzle");
                self.calendar.flash = Some(format!("Could not load puzzle for {date}"));
            }
        }
    }

    /// Write the current progress; a save failure must never take down an
    /// in-progress game, so it is logged and play continues.
    fn persist_progress(&mut self) {
        let snapshot = self.game.session.snapshot(brack_util::now());
        if let Err(e) = self.store.put_progress(&snapshot) {
            warn!(date = %snapshot.puzzle_date, error = %e, "Failed to save progress");
        }
    }
}

/// Load a puzzle document from the store, falling back to the remote API.
///
/// A freshly fetched document is cached; a cache write failure is only a
/// warning. Store read errors degrade to a fetch, the same as a miss.
pub fn load_or_fetch(
    store: &dyn Store,
    client: &PuzzleClient,
    date: PuzzleDate,
) -> Result<PuzzleDocument> {
    match store.get_puzzle(&date) {
        Ok(document) => {
            document.validate()?;
            return Ok(document);
        }
        Err(StoreError::NotFound(_)) => {}
        Err(e) => {
            warn!(date = %date, error = %e, "Failed to read cached puzzle, fetching");
        }
    }

    let document = client
        .fetch(&date)
        .with_context(|| format!("Failed to fetch puzzle for {date}"))?;

    if let Err(e) = store.put_puzzle(&document) {
        warn!(date = %date, error = %e, "Failed to cache puzzle");
    }

    Ok(document)
}

/// Build a session for a document, resuming saved progress when present.
/// A missing or unreadable snapshot means a fresh session.
pub fn resume_session(store: &dyn Store, document: PuzzleDocument) -> GameSession {
    match store.get_progress(&document.puzzle_date) {
        Ok(snapshot) => GameSession::resume(document, &snapshot),
        Err(StoreError::NotFound(_)) => GameSession::new(document),
        Err(e) => {
            warn!(
                date = %document.puzzle_date,
                error = %e,
                "Failed to read saved progress, starting fresh"
            );
            GameSession::new(document)
        }
    }
}

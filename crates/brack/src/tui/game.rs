//! Game view: puzzle text with highlighted clues, score line, input line

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use brack_core::{GameSession, Segment, segments};

use crate::theme::Theme;

/// Puzzle text is kept readable by capping the body width
const MAX_BODY_WIDTH: u16 = 100;

pub struct GameView {
    pub session: GameSession,
    pub input: String,
}

impl GameView {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            input: String::new(),
        }
    }
}

pub fn draw(f: &mut Frame, area: Rect, view: &GameView, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(1), // score
            Constraint::Length(1), // separator
            Constraint::Min(1),    // puzzle body
            Constraint::Length(1), // separator
            Constraint::Length(3), // input / completion
        ])
        .split(area);

    let session = &view.session;
    let document = session.document();

    let header = Paragraph::new(format!("[ Bracket City | {} ]", document.puzzle_date))
        .style(theme.header);
    f.render_widget(header, rows[0]);

    let score = Paragraph::new(format!(
        "✅ {} ❌ {} ⌨️ {}",
        session.correct(),
        session.incorrect(),
        session.chars()
    ))
    .style(theme.score);
    f.render_widget(score, rows[1]);

    f.render_widget(Paragraph::new("---"), rows[2]);

    let body_area = Rect {
        width: rows[3].width.min(MAX_BODY_WIDTH),
        ..rows[3]
    };
    let body = Paragraph::new(puzzle_line(session.state(), theme)).wrap(Wrap { trim: false });
    f.render_widget(body, body_area);

    f.render_widget(Paragraph::new("---"), rows[4]);

    if session.is_done() {
        let finish = Paragraph::new(vec![
            Line::styled("🎉 You win! 🎉", theme.banner),
            Line::raw(document.completion_text.clone()),
            Line::raw(format!("URL: {}", document.completion_url)),
        ]);
        f.render_widget(finish, rows[5]);
    } else {
        let input = Paragraph::new(format!("> {}█", view.input));
        f.render_widget(input, rows[5]);
    }
}

/// Puzzle text as one wrapped line, with active clue placeholders styled
fn puzzle_line<'a>(state: &'a str, theme: &Theme) -> Line<'a> {
    let spans: Vec<Span<'a>> = segments(state)
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(text) => Span::raw(text),
            Segment::Clue(id) => Span::styled(format!("[{id}]"), theme.active_clue),
        })
        .collect();
    Line::from(spans)
}

//! Visual styling for the TUI
//!
//! All styles live in one struct owned by the app and passed into the draw
//! functions, so nothing in the rendering path reaches for globals.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub score: Style,
    pub active_clue: Style,
    pub banner: Style,
    pub hint: Style,
    pub flash: Style,

    pub calendar_title: Style,
    pub calendar_header: Style,
    pub day_normal: Style,
    pub day_selected: Style,
    pub day_today: Style,
    pub day_completed: Style,
    pub day_in_progress: Style,
    pub day_future: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Style::new().add_modifier(Modifier::BOLD),
            score: Style::new(),
            active_clue: Style::new()
                .fg(Color::Rgb(0x0f, 0x0f, 0x0f))
                .bg(Color::Rgb(0xe8, 0xc5, 0x66)),
            banner: Style::new().add_modifier(Modifier::BOLD),
            hint: Style::new().fg(Color::DarkGray),
            flash: Style::new().fg(Color::Red),

            calendar_title: Style::new().add_modifier(Modifier::BOLD),
            calendar_header: Style::new().fg(Color::Rgb(0x88, 0x88, 0x88)),
            day_normal: Style::new(),
            day_selected: Style::new().add_modifier(Modifier::UNDERLINED),
            day_today: Style::new().bg(Color::Rgb(0x55, 0x55, 0x55)),
            day_completed: Style::new().fg(Color::Rgb(0x00, 0xaa, 0x00)),
            day_in_progress: Style::new().fg(Color::Rgb(0xaa, 0xaa, 0x00)),
            day_future: Style::new().fg(Color::Rgb(0x55, 0x55, 0x55)),
        }
    }
}

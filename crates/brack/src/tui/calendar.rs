//! Calendar view: month grid for browsing and replaying past puzzles

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, TimeDelta};
use ratatui::layout::Rect;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use tracing::debug;

use brack_store::Store;
use brack_util::PuzzleDate;

use crate::theme::Theme;

/// Play status of a day, looked up from the store when the viewed month
/// changes (not per frame)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayStatus {
    Completed,
    InProgress,
}

pub struct CalendarView {
    cursor: NaiveDate,
    today: NaiveDate,
    view_month: NaiveDate,
    statuses: HashMap<NaiveDate, DayStatus>,
    pub flash: Option<String>,
}

impl CalendarView {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            cursor: today,
            today,
            view_month: first_of_month(today),
            statuses: HashMap::new(),
            flash: None,
        }
    }

    pub fn selected_date(&self) -> PuzzleDate {
        PuzzleDate::new(self.cursor)
    }

    /// Move the cursor by a day count, clamped to `(year >= 2000, <= today]`.
    /// Returns whether the viewed month changed, so the caller knows to
    /// reload day statuses.
    pub fn move_by_days(&mut self, days: i64) -> bool {
        let Some(next) = self.cursor.checked_add_signed(TimeDelta::days(days)) else {
            return false;
        };

        // No puzzles in the future, and none before the site existed
        if next > self.today || next.year() < 2000 {
            return false;
        }

        self.cursor = next;
        let month = first_of_month(next);
        if month != self.view_month {
            self.view_month = month;
            return true;
        }
        false
    }

    /// Reload play statuses for every playable day of the viewed month
    pub fn refresh(&mut self, store: &dyn Store) {
        self.statuses.clear();

        for day in 1..=days_in_month(self.view_month) {
            let Some(date) = NaiveDate::from_ymd_opt(
                self.view_month.year(),
                self.view_month.month(),
                day,
            ) else {
                continue;
            };
            if date > self.today {
                continue;
            }

            let key = PuzzleDate::new(date);
            match store.has_progress(&key) {
                Ok(true) => {
                    let status = match store.get_progress(&key) {
                        Ok(snapshot) if snapshot.completed => DayStatus::Completed,
                        Ok(_) => DayStatus::InProgress,
                        // Unreadable progress is the same as none at all
                        Err(_) => continue,
                    };
                    self.statuses.insert(date, status);
                }
                Ok(false) => {}
                Err(e) => {
                    debug!(date = %key, error = %e, "Failed to check play status");
                }
            }
        }
    }

    fn day_style(&self, date: NaiveDate, theme: &Theme) -> Style {
        let mut style = if date > self.today {
            theme.day_future
        } else {
            match self.statuses.get(&date) {
                Some(DayStatus::Completed) => theme.day_completed,
                Some(DayStatus::InProgress) => theme.day_in_progress,
                None => theme.day_normal,
            }
        };

        if date == self.cursor {
            style = theme.day_selected;
        }
        if date == self.today {
            style = theme.day_today;
        }
        style
    }
}

pub fn draw(f: &mut Frame, area: Rect, view: &CalendarView, theme: &Theme) {
    let mut lines = vec![
        Line::styled(view.view_month.format("%B %Y").to_string(), theme.calendar_title),
        Line::styled("Su Mo Tu We Th Fr Sa", theme.calendar_header),
    ];

    let month = view.view_month;
    let offset = month.weekday().num_days_from_sunday() as usize;

    let mut week: Vec<Span> = Vec::new();
    for _ in 0..offset {
        week.push(Span::raw("   "));
    }

    for day in 1..=days_in_month(month) {
        let Some(date) = NaiveDate::from_ymd_opt(month.year(), month.month(), day) else {
            continue;
        };

        week.push(Span::styled(format!("{day:2}"), view.day_style(date, theme)));
        week.push(Span::raw(" "));

        // Week ends on Saturday
        if (offset + day as usize) % 7 == 0 {
            lines.push(Line::from(std::mem::take(&mut week)));
        }
    }
    if !week.is_empty() {
        lines.push(Line::from(week));
    }

    if let Some(flash) = &view.flash {
        lines.push(Line::raw(""));
        lines.push(Line::styled(flash.clone(), theme.flash));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn days_in_month(month: NaiveDate) -> u32 {
    let next = if month.month() == 12 {
        NaiveDate::from_ymd_opt(month.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(month.year(), month.month() + 1, 1)
    };
    next.and_then(|d| d.pred_opt()).map(|d| d.day()).unwrap_or(30)
}

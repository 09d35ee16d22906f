//! Puzzle date handling
//!
//! Puzzles are keyed by calendar date, formatted `YYYY-MM-DD` everywhere:
//! in the remote API path, in the database, and on screen.

use chrono::{DateTime, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Date format used for API paths, database keys, and display
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors from parsing a date argument
#[derive(Debug, Error)]
pub enum DateArgError {
    #[error("Invalid date '{input}': expected YYYY-MM-DD or a negative day offset")]
    Invalid { input: String },

    #[error("Date '{0}' is out of range")]
    OutOfRange(String),
}

/// Calendar date identifying one day's puzzle
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PuzzleDate(NaiveDate);

impl PuzzleDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's puzzle, in local time
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parse a `YYYY-MM-DD` string
    pub fn parse(s: &str) -> Result<Self, DateArgError> {
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|_| DateArgError::Invalid {
                input: s.to_string(),
            })
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for PuzzleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl From<NaiveDate> for PuzzleDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Resolve an optional CLI date argument against a reference day.
///
/// - `None` or an empty string selects `today`
/// - a negative integer `-n` selects the puzzle `n` days before `today`
/// - anything else must parse as `YYYY-MM-DD`
pub fn parse_date_arg(arg: Option<&str>, today: PuzzleDate) -> Result<PuzzleDate, DateArgError> {
    let s = match arg {
        None => return Ok(today),
        Some(s) if s.is_empty() => return Ok(today),
        Some(s) => s,
    };

    if let Ok(n) = s.parse::<i64>() {
        if n >= 0 {
            return Err(DateArgError::Invalid {
                input: s.to_string(),
            });
        }
        return today
            .as_naive()
            .checked_sub_days(Days::new(n.unsigned_abs()))
            .map(PuzzleDate::new)
            .ok_or_else(|| DateArgError::OutOfRange(s.to_string()));
    }

    PuzzleDate::parse(s)
}

/// Current local time, used to stamp progress snapshots
pub fn now() -> DateTime<Local> {
    Local::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> PuzzleDate {
        PuzzleDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn display_matches_api_format() {
        assert_eq!(day(2024, 1, 2).to_string(), "2024-01-02");
    }

    #[test]
    fn parse_round_trips() {
        let date = PuzzleDate::parse("2025-03-09").unwrap();
        assert_eq!(date.to_string(), "2025-03-09");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(PuzzleDate::parse("not-a-date").is_err());
        assert!(PuzzleDate::parse("2025/03/09").is_err());
        assert!(PuzzleDate::parse("").is_err());
    }

    #[test]
    fn serde_as_plain_string() {
        let date = day(2024, 1, 2);
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-01-02\"");

        let back: PuzzleDate = serde_json::from_str("\"2024-01-02\"").unwrap();
        assert_eq!(back, date);
    }

    #[test]
    fn no_arg_selects_today() {
        let today = day(2025, 6, 15);
        assert_eq!(parse_date_arg(None, today).unwrap(), today);
        assert_eq!(parse_date_arg(Some(""), today).unwrap(), today);
    }

    #[test]
    fn negative_offset_goes_back() {
        let today = day(2025, 6, 15);
        assert_eq!(parse_date_arg(Some("-1"), today).unwrap(), day(2025, 6, 14));
        assert_eq!(parse_date_arg(Some("-15"), today).unwrap(), day(2025, 5, 31));
    }

    #[test]
    fn absolute_date_parses() {
        let today = day(2025, 6, 15);
        assert_eq!(
            parse_date_arg(Some("2024-01-02"), today).unwrap(),
            day(2024, 1, 2)
        );
    }

    #[test]
    fn positive_offset_rejected() {
        let today = day(2025, 6, 15);
        assert!(parse_date_arg(Some("3"), today).is_err());
        assert!(parse_date_arg(Some("0"), today).is_err());
    }
}

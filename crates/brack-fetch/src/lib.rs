//! Remote puzzle source
//!
//! Fetches one day's puzzle document from the Bracket City API. The app is
//! single-threaded and synchronous, so this uses the blocking reqwest client;
//! a fetch simply delays the next input event, which is acceptable at
//! startup and on calendar selection.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use thiserror::Error;
use tracing::{debug, info};

use brack_core::{DocumentError, PuzzleDocument};
use brack_util::PuzzleDate;

/// Default puzzle API endpoint
pub const DEFAULT_ENDPOINT: &str =
    "https://8huadblp0h.execute-api.us-east-2.amazonaws.com/puzzles";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}")]
    Status { status: StatusCode },

    #[error("Malformed puzzle document: {0}")]
    Malformed(#[from] DocumentError),
}

pub type FetchResult<T> = Result<T, FetchError>;

/// HTTP client for the puzzle API
pub struct PuzzleClient {
    client: Client,
    base_url: String,
}

impl PuzzleClient {
    /// Create a client against the default endpoint
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_ENDPOINT)
    }

    /// Create a client against a custom endpoint (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch and validate the puzzle document for a date.
    ///
    /// A document whose text references a clue with no solution entry is
    /// rejected here, at load time, rather than surfacing later as a
    /// placeholder no guess can clear.
    pub fn fetch(&self, date: &PuzzleDate) -> FetchResult<PuzzleDocument> {
        let url = self.puzzle_url(date);
        debug!(url = %url, "Fetching puzzle");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        let document: PuzzleDocument = response.json()?;
        document.validate()?;

        info!(date = %date, clues = document.clue_count(), "Puzzle fetched");
        Ok(document)
    }

    fn puzzle_url(&self, date: &PuzzleDate) -> String {
        format!("{}/{}", self.base_url, date)
    }
}

impl Default for PuzzleClient {
    fn default() -> Self {
        Self::new()
    }
}

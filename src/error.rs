use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Everything that can stop a run. Each variant carries enough context
/// (selector, row index) to diagnose without re-running the browser session.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("robots policy disallows fetching {url}")]
    PolicyDenied { url: String },

    #[error("element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("dropdown option with label {label:?} not found")]
    OptionNotFound { label: String },

    #[error("timed out after {waited:?} waiting for {selector}")]
    WaitTimeout { selector: String, waited: Duration },

    #[error("malformed table row {row}: expected 4 cells, found {cells}")]
    MalformedRow { row: usize, cells: usize },

    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("failed to decode page evaluation result: {0}")]
    Evaluate(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// Process exit code for this failure: 1 for a robots denial, 2 for
    /// everything else. Success (0) never reaches an error value.
    pub fn exit_code(&self) -> u8 {
        match self {
            ScrapeError::PolicyDenied { .. } => 1,
            _ => 2,
        }
    }
}

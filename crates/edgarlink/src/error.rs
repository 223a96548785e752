//! Error types for ticker resolution and filing retrieval.

use thiserror::Error;

/// Result type for edgarlink operations.
pub type Result<T> = std::result::Result<T, EdgarError>;

/// Errors that can occur while resolving a ticker and selecting its filings.
///
/// The `Display` output of every variant is the single message shown to the
/// user when a pipeline run fails.
#[derive(Debug, Error)]
pub enum EdgarError {
    /// Ticker directory has not been loaded
    #[error("Ticker data is not loaded yet")]
    NotLoaded,

    /// Ticker is not present in the directory
    #[error("Ticker '{0}' not found")]
    NotFound(String),

    /// Identifier cannot be rendered in the registry's 10-digit form
    #[error("Invalid CIK {0}: must be between 0 and 9999999999")]
    InvalidIdentifier(i64),

    /// Registry answered with a non-success status
    #[error("Failed to fetch filings for CIK {cik}: HTTP {status}")]
    Retrieval {
        /// Canonical identifier that was requested
        cik: String,
        /// HTTP status code returned by the registry
        status: u16,
    },

    /// Registry response did not have the expected shape
    #[error("Malformed registry response: {0}")]
    MalformedResponse(String),

    /// Blank ticker input
    #[error("Please enter a ticker")]
    EmptyInput,

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Ticker dataset parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error outside of filing retrieval
    #[error("HTTP error: {0}")]
    Http(String),

    /// Chart collaborator failed
    #[error("Chart update failed: {0}")]
    Chart(String),
}

//! Configuration for filing retrieval and selection.

use std::time::Duration;

/// SEC EDGAR API base URL.
pub const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// User agent for SEC EDGAR requests (SEC requires identifying information).
pub const USER_AGENT: &str = "edgarlink/0.1 (contact@example.com)";

/// Form types selected by default: annual, quarterly and current reports.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["10-K", "10-Q", "8-K"];

/// Filings kept per form type by default.
pub const DEFAULT_PER_CATEGORY_LIMIT: usize = 5;

/// Which filings to keep from a filer's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionConfig {
    /// Form types to keep, in output order. Matching is exact and case-sensitive.
    pub categories: Vec<String>,
    /// Maximum filings kept per form type
    pub per_category_limit: usize,
}

impl SelectionConfig {
    /// Create a selection over the given form types.
    pub fn new<I, S>(categories: I, per_category_limit: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            per_category_limit,
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES, DEFAULT_PER_CATEGORY_LIMIT)
    }
}

/// HTTP settings for the EDGAR client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the submissions API
    pub base_url: String,
    /// Identifying User-Agent sent with every request
    pub user_agent: String,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Point the client at a different base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a different User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a per-request timeout.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: EDGAR_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

//! Error types for the search crate.
//!
//! Messages are shown to users inside synthetic results, so they stay short
//! and never include request headers.

/// Errors that can occur while fetching or parsing a result page.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Network-level failure (DNS, connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The request exceeded its timeout.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// The engine answered with a non-success status.
    #[error("HTTP status {status} from {engine}")]
    Status { engine: String, status: u16 },

    /// The page could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for search results.
pub type Result<T> = std::result::Result<T, SearchError>;

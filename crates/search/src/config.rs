//! Search configuration.

use std::time::Duration;

/// Browser-like identification sent with every result-page request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Settings shared by the engine adapters and the orchestrator.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Results returned when the caller does not ask for a specific count.
    pub max_results: usize,
    /// Custom User-Agent; [`DEFAULT_USER_AGENT`] when `None`.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_results: 3,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

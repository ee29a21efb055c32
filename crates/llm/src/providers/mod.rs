//! Provider implementations of [`crate::LlmClient`].

pub mod gemini;
pub mod ollama;

pub use gemini::GeminiClient;
pub use ollama::OllamaClient;

use std::time::Duration;

/// Build the HTTP client shared by the providers, with an optional
/// per-request timeout.
pub(crate) fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client, String> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))
}

//! Error types for Scout.
//!
//! This module defines a unified error enum covering configuration, I/O,
//! generation backend, web search, prompt and serialization failures.

use thiserror::Error;

/// Unified error type for Scout.
///
/// Library functions return `Result<T, AppError>`; the chat pipeline is the
/// only place where an error is turned into user-facing text.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generation backend errors (auth, quota, network)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Web search errors
    #[error("Search error: {0}")]
    Search(String),

    /// Prompt composition errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_display() {
        let err = AppError::Llm("quota exceeded".to_string());
        assert_eq!(err.to_string(), "LLM error: quota exceeded");
    }

    #[test]
    fn test_from_serde_json() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}

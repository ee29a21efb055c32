//! Prompt composition for Scout.
//!
//! This crate turns a user utterance, optional web search context and an
//! optional window of recent conversation turns into the single prompt sent
//! to the generation backend:
//! - Handlebars template rendering (HTML escaping disabled)
//! - Search context injection
//! - Conversation transcript injection

pub mod builder;
pub mod types;

// Re-export main types
pub use builder::PromptComposer;
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptTemplates, Role, Turn};

//! Command handlers for the Scout CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod chat;
pub mod search;
pub mod serve;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use search::SearchCommand;
pub use serve::ServeCommand;

use scout_chat::ChatPipeline;
use scout_core::{config::AppConfig, AppResult};
use std::sync::Arc;

/// Build the shared pipeline for commands that talk to the generation backend.
pub(crate) fn build_pipeline(config: &AppConfig) -> AppResult<Arc<ChatPipeline>> {
    let pipeline = ChatPipeline::from_config(config)?;
    tracing::debug!(
        provider = pipeline.provider_name(),
        model = pipeline.model(),
        "Pipeline built"
    );
    Ok(Arc::new(pipeline))
}

//! Conversation layer for Scout.
//!
//! - [`trigger`] decides whether an utterance needs web results
//! - [`history`] keeps a bounded transcript per conversation
//! - [`pipeline`] runs one turn end to end and owns the error boundary
//! - [`session`] pairs a history with a shared pipeline
//!
//! # Example
//! ```no_run
//! use scout_chat::{ChatPipeline, ChatSession};
//! use scout_core::AppConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> scout_core::AppResult<()> {
//! let config = AppConfig::load()?;
//! let pipeline = Arc::new(ChatPipeline::from_config(&config)?);
//! let mut session = ChatSession::new(pipeline, config.chat.history_capacity);
//! println!("{}", session.handle("今天有什么新闻？").await);
//! # Ok(())
//! # }
//! ```

pub mod history;
pub mod pipeline;
pub mod session;
pub mod trigger;

pub use history::{ConversationHistory, DEFAULT_HISTORY_CAPACITY};
pub use pipeline::{
    apology, search_config, web_search_from_config, ChatPipeline, ChatReply,
    DEFAULT_HISTORY_WINDOW,
};
pub use scout_prompt::{Role, Turn};
pub use session::ChatSession;
pub use trigger::{should_search, KeywordCategory, RetrievalTrigger, KEYWORD_GROUPS};

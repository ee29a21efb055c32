//! Per-conversation state.

use crate::history::ConversationHistory;
use crate::pipeline::{ChatPipeline, ChatReply};
use scout_core::AppResult;
use scout_search::SearchResult;
use std::sync::Arc;

/// One conversation: its own history plus a shared pipeline.
///
/// Turns are processed one at a time; `handle` takes `&mut self`.
pub struct ChatSession {
    pipeline: Arc<ChatPipeline>,
    history: ConversationHistory,
}

impl ChatSession {
    pub fn new(pipeline: Arc<ChatPipeline>, history_capacity: usize) -> Self {
        Self {
            pipeline,
            history: ConversationHistory::with_capacity(history_capacity),
        }
    }

    /// See [`ChatPipeline::handle`].
    pub async fn handle(&mut self, utterance: &str) -> String {
        self.pipeline.handle(&mut self.history, utterance).await
    }

    /// See [`ChatPipeline::respond`].
    pub async fn respond(&mut self, utterance: &str) -> AppResult<ChatReply> {
        self.pipeline.respond(&mut self.history, utterance).await
    }

    pub async fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        self.pipeline.search(query, max_results).await
    }

    pub async fn search_formatted(&self, query: &str) -> String {
        self.pipeline.search_formatted(query).await
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        tracing::debug!("Conversation history cleared");
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn pipeline(&self) -> &Arc<ChatPipeline> {
        &self.pipeline
    }
}

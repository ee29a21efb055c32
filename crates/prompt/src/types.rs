//! Prompt types for Scout.
//!
//! This module defines conversation turns, the template set used by the
//! composer and the composed prompt handed to the generation backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used when the turn is rendered into a prompt transcript.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "用户",
            Role::Assistant => "助手",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

/// One utterance or response in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Handlebars templates used by the composer.
///
/// `search` receives `{{context}}` (formatted search results) and
/// `{{question}}` (the raw utterance). `history` receives `{{history}}`
/// (one `role: content` line per turn) and `{{prompt}}` (the prompt built so
/// far).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTemplates {
    pub search: String,
    pub history: String,
}

pub const DEFAULT_SEARCH_TEMPLATE: &str = "基于以下搜索结果回答用户问题：\n\n{{context}}\n\n用户问题：{{question}}\n\n请根据搜索结果提供准确、有帮助的回答。如果搜索结果不足以回答问题，请说明并提供你已知的相关信息。";

pub const DEFAULT_HISTORY_TEMPLATE: &str = "对话历史：\n{{history}}\n\n当前问题：{{prompt}}";

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            search: DEFAULT_SEARCH_TEMPLATE.to_string(),
            history: DEFAULT_HISTORY_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Replace the defaults with whichever overrides are present.
    pub fn with_overrides(mut self, search: Option<&str>, history: Option<&str>) -> Self {
        if let Some(search) = search {
            self.search = search.to_string();
        }
        if let Some(history) = history {
            self.history = history.to_string();
        }
        self
    }
}

/// A fully built prompt ready for LLM execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// Prompt text sent to the backend
    pub text: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Whether web search results were injected
    #[serde(rename = "searchContextIncluded")]
    pub search_context_included: bool,

    /// Number of conversation turns rendered into the transcript
    #[serde(rename = "historyTurns")]
    pub history_turns: usize,
}

impl BuiltPrompt {
    /// Create a new built prompt.
    pub fn new(text: String, search_context_included: bool, history_turns: usize) -> Self {
        Self {
            text,
            metadata: BuiltPromptMetadata {
                search_context_included,
                history_turns,
            },
        }
    }
}

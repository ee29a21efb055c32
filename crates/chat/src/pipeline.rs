//! End-to-end chat pipeline.
//!
//! One turn runs trigger → search → compose → generate → record. Errors from
//! composing or generating stop at [`ChatPipeline::handle`] and come back as
//! an apology; search failures never get that far because
//! [`WebSearch::search_web`] absorbs them.

use crate::history::ConversationHistory;
use crate::trigger::RetrievalTrigger;
use scout_core::{AppConfig, AppError, AppResult};
use scout_llm::{create_client, LlmClient, LlmRequest, LlmUsage};
use scout_prompt::{PromptComposer, PromptTemplates, Turn};
use scout_search::{format_search_results, SearchConfig, SearchResult, WebSearch};
use std::sync::Arc;
use std::time::Duration;

/// Turns from history rendered into each prompt by default.
pub const DEFAULT_HISTORY_WINDOW: usize = 4;

/// A successful turn.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub text: String,
    pub model: String,
    /// Whether web results were injected into the prompt
    pub search_used: bool,
    pub usage: LlmUsage,
}

/// Shared, immutable collaborators for answering utterances.
///
/// The pipeline holds no conversation state; callers pass the history they
/// own (see [`crate::ChatSession`]).
pub struct ChatPipeline {
    client: Arc<dyn LlmClient>,
    search: WebSearch,
    trigger: RetrievalTrigger,
    composer: PromptComposer,
    model: String,
    history_window: usize,
}

impl ChatPipeline {
    pub fn new(
        client: Arc<dyn LlmClient>,
        search: WebSearch,
        composer: PromptComposer,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            search,
            trigger: RetrievalTrigger::new(),
            composer,
            model: model.into(),
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }

    pub fn with_trigger(mut self, trigger: RetrievalTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Build every collaborator from application configuration.
    ///
    /// # Errors
    /// `AppError::Config` for invalid settings or an unbuildable backend,
    /// `AppError::Search` if the HTTP fetcher cannot be created and
    /// `AppError::Prompt` for malformed template overrides.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        config.validate()?;

        let api_key = config.resolve_api_key(&config.provider);
        let client = create_client(
            &config.provider,
            config.provider_endpoint(),
            api_key.as_deref(),
            config.provider_timeout().map(Duration::from_secs),
        )
        .map_err(AppError::Config)?;

        let search = web_search_from_config(config)?;

        let templates = PromptTemplates::default().with_overrides(
            config.chat.prompts.search.as_deref(),
            config.chat.prompts.history.as_deref(),
        );
        let composer = PromptComposer::new(templates)?;

        let trigger = RetrievalTrigger::new().with_extra_keywords(&config.chat.extra_keywords);

        tracing::debug!(
            provider = client.provider_name(),
            model = %config.model,
            "Chat pipeline ready"
        );

        Ok(Self::new(client, search, composer, &config.model)
            .with_trigger(trigger)
            .with_history_window(config.chat.history_window))
    }

    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Answer one utterance, never failing.
    ///
    /// On success the user and assistant turns are appended to `history`; on
    /// failure `history` is left as it was and an apology is returned.
    pub async fn handle(&self, history: &mut ConversationHistory, utterance: &str) -> String {
        match self.respond(history, utterance).await {
            Ok(reply) => reply.text,
            Err(e) => {
                tracing::error!(error = %e, "Chat turn failed");
                apology(&e)
            }
        }
    }

    /// Answer one utterance, surfacing errors to the caller.
    ///
    /// `history` is only mutated after generation succeeds.
    pub async fn respond(
        &self,
        history: &mut ConversationHistory,
        utterance: &str,
    ) -> AppResult<ChatReply> {
        let context = match self.trigger.matched_category(utterance) {
            Some(category) => {
                tracing::info!(%category, "Retrieval triggered");
                let results = self
                    .search
                    .search_web(utterance, self.search.default_max_results())
                    .await;
                Some(format_search_results(&results))
            }
            None => {
                tracing::debug!("Answering without retrieval");
                None
            }
        };

        let window = history.recent_window(self.history_window);
        let prompt = self
            .composer
            .compose(utterance, context.as_deref(), &window)?;

        let request = LlmRequest::new(prompt.text, &self.model);
        let response = self.client.complete(&request).await?;

        history.append(Turn::user(utterance));
        history.append(Turn::assistant(response.content.clone()));

        Ok(ChatReply {
            text: response.content,
            model: response.model,
            search_used: prompt.metadata.search_context_included,
            usage: response.usage,
        })
    }

    /// Direct web search, bypassing the trigger.
    pub async fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        self.search.search_web(query, max_results).await
    }

    /// Direct web search rendered as text, using the configured result count.
    pub async fn search_formatted(&self, query: &str) -> String {
        let results = self
            .search
            .search_web(query, self.search.default_max_results())
            .await;
        format_search_results(&results)
    }

    pub fn default_max_results(&self) -> usize {
        self.search.default_max_results()
    }
}

/// Search settings from application configuration.
pub fn search_config(config: &AppConfig) -> SearchConfig {
    SearchConfig {
        timeout: Duration::from_secs(config.search.timeout_secs),
        max_results: config.search.max_results,
        user_agent: config.search.user_agent.clone(),
    }
}

/// Live DuckDuckGo/Bing search from application configuration.
pub fn web_search_from_config(config: &AppConfig) -> AppResult<WebSearch> {
    WebSearch::from_config(&search_config(config)).map_err(|e| AppError::Search(e.to_string()))
}

/// User-facing text for a failed turn.
pub fn apology(error: &AppError) -> String {
    format!("抱歉，处理您的请求时出现了错误：{}", error)
}

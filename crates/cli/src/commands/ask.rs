//! Ask command handler.
//!
//! Runs a single conversation turn through the chat pipeline: the same
//! retrieval trigger, web search and prompt composition as `scout chat`,
//! without a REPL.

use clap::Args;
use scout_chat::{apology, ChatSession};
use scout_core::{config::AppConfig, AppError, AppResult};
use std::path::PathBuf;
use std::time::Instant;

use super::build_pipeline;

/// Ask a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub prompt: Option<String>,

    /// Read the question from a file
    #[arg(short, long, conflicts_with = "prompt")]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let prompt = self.get_prompt()?;
        let pipeline = build_pipeline(config)?;
        let mut session = ChatSession::new(pipeline, config.chat.history_capacity);

        let start = Instant::now();
        if self.json {
            let reply = session.respond(&prompt).await?;
            let output = serde_json::json!({
                "answer": reply.text,
                "model": reply.model,
                "provider": config.provider,
                "searchUsed": reply.search_used,
                "responseTime": start.elapsed().as_millis() as u64,
                "usage": {
                    "promptTokens": reply.usage.prompt_tokens,
                    "completionTokens": reply.usage.completion_tokens,
                    "totalTokens": reply.usage.total_tokens
                }
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            match session.respond(&prompt).await {
                Ok(reply) => {
                    println!("{}", reply.text);
                    tracing::debug!(
                        "Token usage - Prompt: {}, Completion: {}, Total: {}",
                        reply.usage.prompt_tokens,
                        reply.usage.completion_tokens,
                        reply.usage.total_tokens
                    );
                }
                Err(e) => {
                    tracing::error!("Generation failed: {}", e);
                    println!("{}", apology(&e));
                }
            }
        }

        tracing::debug!("Answered in {:.2}s", start.elapsed().as_secs_f64());
        Ok(())
    }

    /// Get the prompt text from the argument or the file.
    fn get_prompt(&self) -> AppResult<String> {
        let prompt = match (&self.prompt, &self.file) {
            (Some(prompt), _) => prompt.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)?,
            (None, None) => return Err(AppError::Config("No prompt provided".to_string())),
        };

        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AppError::Config("Prompt is empty".to_string()));
        }
        Ok(prompt.to_string())
    }
}

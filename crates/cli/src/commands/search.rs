//! Search command handler.
//!
//! Queries the web directly (DuckDuckGo, then Bing when DuckDuckGo finds
//! nothing). No generation backend is needed.

use clap::Args;
use scout_chat::web_search_from_config;
use scout_core::{config::AppConfig, AppResult};
use scout_search::format_search_results;
use std::time::Instant;

/// Search the web without asking the model
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Search query
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Maximum number of results (default: search.maxResults)
    #[arg(short = 'n', long)]
    pub max_results: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let query = self.query.join(" ");
        tracing::info!("Executing search command");

        let search = web_search_from_config(config)?;
        let max_results = self
            .max_results
            .unwrap_or_else(|| search.default_max_results());

        let start = Instant::now();
        let results = search.search_web(&query, max_results).await;
        let elapsed = start.elapsed();
        tracing::debug!(count = results.len(), "Search finished in {:?}", elapsed);

        if self.json {
            let output = serde_json::json!({
                "query": query,
                "results": results,
                "responseTime": elapsed.as_millis() as u64,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", format_search_results(&results));
        }

        Ok(())
    }
}

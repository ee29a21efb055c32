//! Serve command handler.

use clap::Args;
use scout_chat::ChatSession;
use scout_core::{config::AppConfig, AppResult};
use std::sync::Arc;

use super::build_pipeline;
use crate::server::{start_server, AppState, SessionFactory};

/// Serve the chat HTTP API
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Address to bind (default: server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (default: server.port or PORT)
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing serve command");

        let host = self.host.as_deref().unwrap_or(&config.server.host);
        let port = self.port.unwrap_or(config.server.port);

        // Built on POST /api/init, not at startup
        let session_config = config.clone();
        let factory: SessionFactory = Arc::new(move || {
            let pipeline = build_pipeline(&session_config)?;
            Ok(ChatSession::new(
                pipeline,
                session_config.chat.history_capacity,
            ))
        });

        println!("🚀 Scout API listening on http://{}:{}", host, port);
        println!("   GET  /api/health         health check");
        println!("   POST /api/init           initialize the chat session");
        println!("   POST /api/chat           send a message");
        println!("   POST /api/search         web search");
        println!("   POST /api/clear-history  clear conversation history");
        println!("   GET  /api/stats          session statistics");

        start_server(AppState::new(factory), host, port).await
    }
}

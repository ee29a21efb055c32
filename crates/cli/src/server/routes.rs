//! Router setup with API routes and middleware.

use axum::routing::{get, post};
use axum::Router;
use scout_core::AppResult;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Create the router with every `/api` route, CORS and request tracing.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/init", post(handlers::init))
        .route("/api/chat", post(handlers::chat))
        .route("/api/search", post(handlers::search))
        .route("/api/clear-history", post(handlers::clear_history))
        .route("/api/stats", get(handlers::stats))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API on `host:port` until Ctrl-C.
pub async fn start_server(state: AppState, host: &str, port: u16) -> AppResult<()> {
    let addr = format!("{}:{}", host, port);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting API server on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

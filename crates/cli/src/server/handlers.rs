//! Route handlers for the JSON API.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::Uri;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use scout_search::SearchResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

use super::error::ApiError;
use super::state::AppState;

/// Capabilities advertised by `POST /api/init`.
const FEATURES: [&str; 3] = ["conversation", "web_search", "context_memory"];

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Non-empty string field from a JSON body, if present.
fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    pub message: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: Option<Value>,
    pub max_results: Option<usize>,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InitResponse {
    pub success: bool,
    pub message: String,
    pub features: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub response_time: u64,
    pub timestamp: String,
    pub history_length: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<SearchResult>,
    pub query: String,
    pub response_time: u64,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub history_length: usize,
    pub initialized: bool,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: Stats,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: timestamp(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /api/init - build (or rebuild) the conversation.
pub async fn init(State(state): State<AppState>) -> Result<Json<InitResponse>, ApiError> {
    let session = (state.factory)().map_err(|e| ApiError::InitializationFailed(e.to_string()))?;
    tracing::info!(
        provider = session.pipeline().provider_name(),
        model = session.pipeline().model(),
        "Chat session initialized"
    );
    *state.session.lock().await = Some(session);

    Ok(Json(InitResponse {
        success: true,
        message: "Chatbot初始化成功".to_string(),
        features: FEATURES.iter().map(|f| f.to_string()).collect(),
    }))
}

/// POST /api/chat - one conversation turn.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let mut guard = state.session.lock().await;
    let session = guard.as_mut().ok_or(ApiError::NotInitialized)?;

    let Json(request) = payload.map_err(|_| ApiError::InvalidMessage)?;
    let message = non_empty_str(request.message.as_ref()).ok_or(ApiError::InvalidMessage)?;

    let start = Instant::now();
    let response = session.handle(message).await;
    let response_time = elapsed_ms(start);
    tracing::debug!(response_time, "Chat turn answered");

    Ok(Json(ChatResponse {
        success: true,
        response,
        response_time,
        timestamp: timestamp(),
        history_length: session.history_len(),
    }))
}

/// POST /api/search - direct web search.
pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    // Searching needs only the shared pipeline; release the session lock
    // before the engine fetches.
    let pipeline = {
        let guard = state.session.lock().await;
        let session = guard.as_ref().ok_or(ApiError::NotInitialized)?;
        session.pipeline().clone()
    };

    let Json(request) = payload.map_err(|_| ApiError::InvalidQuery)?;
    let query = non_empty_str(request.query.as_ref()).ok_or(ApiError::InvalidQuery)?;
    let max_results = request
        .max_results
        .unwrap_or_else(|| pipeline.default_max_results());

    let start = Instant::now();
    let results = pipeline.search(query, max_results).await;

    Ok(Json(SearchResponse {
        success: true,
        results,
        query: query.to_string(),
        response_time: elapsed_ms(start),
        timestamp: timestamp(),
    }))
}

/// POST /api/clear-history
pub async fn clear_history(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut guard = state.session.lock().await;
    let session = guard.as_mut().ok_or(ApiError::NotInitialized)?;
    session.clear_history();

    Ok(Json(MessageResponse {
        success: true,
        message: "对话历史已清空".to_string(),
    }))
}

/// GET /api/stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let guard = state.session.lock().await;
    let session = guard.as_ref().ok_or(ApiError::NotInitialized)?;

    Ok(Json(StatsResponse {
        success: true,
        stats: Stats {
            history_length: session.history_len(),
            initialized: true,
            timestamp: timestamp(),
        },
    }))
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

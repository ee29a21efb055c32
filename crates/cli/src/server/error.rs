//! API error type and JSON error bodies.
//!
//! Every failure leaves the server as `{ "error": <code>, "message": <text> }`
//! with a matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g. "invalid_query").
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Request path, only set for unknown routes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    /// 400, no session has been initialized yet.
    NotInitialized,
    /// 400, missing or empty `message`.
    InvalidMessage,
    /// 400, missing or empty `query`.
    InvalidQuery,
    /// 404, unknown route.
    NotFound(String),
    /// 500, the session could not be built.
    InitializationFailed(String),
}

impl ApiError {
    fn parts(self) -> (StatusCode, &'static str, String, Option<String>) {
        match self {
            ApiError::NotInitialized => (
                StatusCode::BAD_REQUEST,
                "chatbot_not_initialized",
                "请先初始化chatbot".to_string(),
                None,
            ),
            ApiError::InvalidMessage => (
                StatusCode::BAD_REQUEST,
                "invalid_message",
                "消息内容不能为空".to_string(),
                None,
            ),
            ApiError::InvalidQuery => (
                StatusCode::BAD_REQUEST,
                "invalid_query",
                "搜索查询不能为空".to_string(),
                None,
            ),
            ApiError::NotFound(path) => (
                StatusCode::NOT_FOUND,
                "not_found",
                "请求的端点不存在".to_string(),
                Some(path),
            ),
            ApiError::InitializationFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "initialization_failed",
                msg,
                None,
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, path) = self.parts();
        if status.is_server_error() {
            tracing::error!(code, %message, "Request failed");
        } else {
            tracing::debug!(code, %message, "Request rejected");
        }

        let body = ErrorBody {
            error: code.to_string(),
            message,
            path,
        };

        (status, Json(body)).into_response()
    }
}

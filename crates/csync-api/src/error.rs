//! API error types and conversions

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use csync_core::StoreError;
use serde::Serialize;
use serde_json::Value;

/// API error type that converts to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 404 Not Found
    NotFound(String),
    /// 502 Bad Gateway - the store rejected or garbled an outbound call
    BadGateway {
        message: String,
        details: Option<Value>,
    },
    /// 503 Service Unavailable - the store is unreachable
    ServiceUnavailable(String),
    /// 500 Internal Server Error
    Internal(String),
}

/// Standard error response format: `{error, details?}`
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::BadGateway { message, details } => {
                (StatusCode::BAD_GATEWAY, message, details)
            }
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg, None),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
        };

        // Log errors at appropriate levels
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), %message, "API error");
        } else {
            tracing::debug!(status = status.as_u16(), %message, "API client error");
        }

        let body = Json(ErrorResponse {
            error: message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(path) => ApiError::NotFound(format!("not found: {}", path)),
            StoreError::InvalidPath(msg) => ApiError::BadRequest(msg),
            StoreError::Rejected { status, details } => ApiError::BadGateway {
                message: format!("store rejected the request (status {})", status),
                details: Some(details),
            },
            StoreError::Transport(msg) => ApiError::ServiceUnavailable(msg),
            StoreError::Encoding(msg) => ApiError::BadGateway {
                message: msg,
                details: None,
            },
            StoreError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

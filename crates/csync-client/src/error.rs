//! Error types for content sync client operations

use serde_json::Value;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, CsyncClientError>;

/// Errors that can occur when talking to the proxy
#[derive(Error, Debug)]
pub enum CsyncClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Resource not found on the server
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server returned an error response
    #[error("Server error {status}: {message}")]
    ServerError {
        status: u16,
        message: String,
        /// Upstream store body, when the proxy forwarded one
        details: Option<Value>,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

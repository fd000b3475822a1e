//! Common error types for content store operations

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when talking to a content store
#[derive(Debug, Error)]
pub enum StoreError {
    /// No file at the given path
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller-supplied path is unusable (empty, traversal segments, ...)
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The store rejected the call; `details` is its response body, verbatim
    #[error("store rejected the request (status {status})")]
    Rejected {
        status: u16,
        details: serde_json::Value,
    },

    /// The store could not be reached
    #[error("transport error: {0}")]
    Transport(String),

    /// Payload or store response failed to decode
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::NotFound(_) => 404,
            StoreError::InvalidPath(_) => 400,
            StoreError::Rejected { .. } => 502,
            StoreError::Transport(_) => 503,
            StoreError::Encoding(_) => 502,
            StoreError::Internal(_) => 500,
        }
    }
}

//! Application state for the content sync API

use std::sync::Arc;

use axum::http::HeaderValue;
use csync_core::{ContentStore, ContentSyncProxy};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    proxy: Arc<ContentSyncProxy>,
    allowed_origin: Option<HeaderValue>,
}

impl AppState {
    /// State with a permissive CORS policy (tests, local use).
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            proxy: Arc::new(ContentSyncProxy::new(store)),
            allowed_origin: None,
        }
    }

    /// State that restricts CORS to a single front-end origin.
    pub fn with_allowed_origin(store: Arc<dyn ContentStore>, origin: HeaderValue) -> Self {
        Self {
            proxy: Arc::new(ContentSyncProxy::new(store)),
            allowed_origin: Some(origin),
        }
    }

    pub fn proxy(&self) -> &ContentSyncProxy {
        &self.proxy
    }

    pub fn allowed_origin(&self) -> Option<&HeaderValue> {
        self.allowed_origin.as_ref()
    }
}

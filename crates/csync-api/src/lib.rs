//! csync-api - HTTP API layer for the content sync proxy
//!
//! Translates the browser-facing routes into [`csync_core::ContentSyncProxy`]
//! calls. The layer is store-agnostic: anything implementing `ContentStore`
//! can back it.
//!
//! # Usage
//!
//! ```ignore
//! use csync_api::{create_router, AppState};
//! use csync_github::GithubStore;
//!
//! let store = GithubStore::new(&config, &token)?;
//! let state = AppState::new(Arc::new(store));
//! let router = create_router(state);
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// JSON body limit; PDF uploads arrive base64-encoded inside the body.
const MAX_BODY_BYTES: usize = 30 * 1024 * 1024;

/// Create the router with the given application state.
pub fn create_router(state: AppState) -> Router {
    let cors = match state.allowed_origin() {
        Some(origin) => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin.clone()))
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    Router::new()
        // Health check
        .route("/health", get(handlers::health::health))
        // Upload route (contracts and fichas)
        .route("/upload", post(handlers::upload::upload_file))
        // Schedule sync route
        .route("/salvar-agenda", post(handlers::agenda::save_schedule))
        // Read-through routes (no writes)
        .route("/dados/fichas", get(handlers::fichas::list_fichas))
        .route("/dados/fichas/{name}", get(handlers::fichas::get_ficha))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

//! Health check handler

use axum::Json;

use super::OkResponse;

/// GET /health
pub async fn health() -> Json<OkResponse> {
    Json(OkResponse::new())
}

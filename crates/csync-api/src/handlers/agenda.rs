//! Schedule synchronization handler

use axum::extract::State;
use axum::Json;
use csync_core::encoding;
use serde_json::Value;

use super::OkResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Where the front-end's schedule lives in the store
pub const SCHEDULE_PATH: &str = "dados/agendamento.json";

const SCHEDULE_MESSAGE: &str = "Sincronização de agenda";

/// POST /salvar-agenda
///
/// The body is the whole schedule as the front-end keeps it. It is stored
/// pretty-printed so the file stays diffable in the repository history.
pub async fn save_schedule(
    State(state): State<AppState>,
    Json(schedule): Json<Value>,
) -> Result<Json<OkResponse>, ApiError> {
    let pretty = serde_json::to_string_pretty(&schedule)
        .map_err(|e| ApiError::Internal(format!("failed to serialize schedule: {}", e)))?;
    let content = encoding::to_base64(pretty.as_bytes());

    state
        .proxy()
        .upsert(SCHEDULE_PATH, content, SCHEDULE_MESSAGE)
        .await?;

    Ok(Json(OkResponse::new()))
}

//! Read-through handlers for stored fichas
//!
//! These never write; lookups go straight to the store.

use axum::extract::{Path, State};
use axum::Json;
use csync_core::ContentEntry;
use serde::Serialize;

use super::upload::FICHAS_DIR;
use crate::error::ApiError;
use crate::state::AppState;

/// Response for GET /dados/fichas
#[derive(Debug, Serialize)]
pub struct ListFichasResponse {
    pub files: Vec<ContentEntry>,
}

/// Response for GET /dados/fichas/{name}.
/// Field names match the upload wire format.
#[derive(Debug, Serialize)]
pub struct FichaResponse {
    #[serde(rename = "nomeArquivo")]
    pub file_name: String,
    #[serde(rename = "conteudoBase64")]
    pub content_base64: String,
    pub revision: String,
    pub size: u64,
}

/// GET /dados/fichas
pub async fn list_fichas(
    State(state): State<AppState>,
) -> Result<Json<ListFichasResponse>, ApiError> {
    let files = state.proxy().store().list(FICHAS_DIR).await?;
    Ok(Json(ListFichasResponse { files }))
}

/// GET /dados/fichas/{name}
pub async fn get_ficha(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FichaResponse>, ApiError> {
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ApiError::BadRequest(format!(
            "ficha name must be a single path segment, got {:?}",
            name
        )));
    }

    let file = state
        .proxy()
        .store()
        .get(&format!("{}/{}", FICHAS_DIR, name))
        .await?;

    Ok(Json(FichaResponse {
        file_name: file.name,
        content_base64: file.content,
        revision: file.revision,
        size: file.size,
    }))
}

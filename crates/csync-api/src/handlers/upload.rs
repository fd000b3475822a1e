//! Upload handler for signed contracts and fichas

use axum::extract::State;
use axum::Json;
use csync_core::encoding;
use serde::Deserialize;

use super::OkResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Folder for `tipo = "ficha"` uploads
pub const FICHAS_DIR: &str = "dados/fichas";
/// Folder for everything else (signed contracts)
pub const CONTRACTS_DIR: &str = "contratos/contratos-assinados";

/// Request body for POST /upload. Field names match the front-end wire format.
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    #[serde(rename = "nomeArquivo")]
    pub file_name: Option<String>,
    #[serde(rename = "conteudoBase64")]
    pub content_base64: Option<String>,
    #[serde(rename = "tipo", default)]
    pub category: Option<String>,
}

/// POST /upload
///
/// Validates the body, then upserts the payload under the folder selected by
/// `tipo`. All validation happens before any outbound call.
pub async fn upload_file(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let file_name = request
        .file_name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::BadRequest("nomeArquivo is required".to_string()))?;
    let content_base64 = request
        .content_base64
        .filter(|content| !content.is_empty())
        .ok_or_else(|| ApiError::BadRequest("conteudoBase64 is required".to_string()))?;

    if file_name.contains(['/', '\\']) || file_name == "." || file_name == ".." {
        return Err(ApiError::BadRequest(format!(
            "nomeArquivo must be a single path segment, got {:?}",
            file_name
        )));
    }
    // Reject undecodable payloads before touching the store.
    encoding::from_base64(&content_base64)
        .map_err(|_| ApiError::BadRequest("conteudoBase64 is not valid base64".to_string()))?;

    let folder = match request.category.as_deref() {
        Some("ficha") => FICHAS_DIR,
        _ => CONTRACTS_DIR,
    };
    let path = format!("{}/{}", folder, file_name);
    let message = format!("Upload: {}", file_name);

    state.proxy().upsert(&path, content_base64, &message).await?;

    Ok(Json(OkResponse::new()))
}

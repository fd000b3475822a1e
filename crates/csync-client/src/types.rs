//! Response types for the content sync proxy API

use serde::Deserialize;
use serde_json::Value;

pub use csync_core::ContentEntry;

/// `{ok: true}` success body
#[derive(Debug, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// `{error, details?}` failure body
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub details: Option<Value>,
}

/// One stored ficha
#[derive(Debug, Clone, Deserialize)]
pub struct Ficha {
    #[serde(rename = "nomeArquivo")]
    pub file_name: String,
    #[serde(rename = "conteudoBase64")]
    pub content_base64: String,
    pub revision: String,
    #[serde(default)]
    pub size: u64,
}

/// Listing of stored fichas
#[derive(Debug, Deserialize)]
pub struct FichaList {
    pub files: Vec<ContentEntry>,
}

//! HTTP request handlers for the content sync proxy
//!
//! These handlers drive the ContentSyncProxy and are store-agnostic.

pub mod agenda;
pub mod fichas;
pub mod health;
pub mod upload;

use serde::Serialize;

/// Success body shared by the write routes.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub(crate) fn new() -> Self {
        Self { ok: true }
    }
}

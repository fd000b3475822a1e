//! ContentStore trait - the abstraction over remote content stores

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// A file as held by the content store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    /// Slash-delimited logical path (e.g. `dados/agendamento.json`)
    pub path: String,
    /// Final path segment
    pub name: String,
    /// Opaque revision token; required to overwrite this file
    pub revision: String,
    /// Base64-encoded payload as the store returns it (may contain newlines)
    pub content: String,
    /// Decoded size in bytes
    pub size: u64,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    pub revision: String,
    pub size: u64,
    pub kind: EntryKind,
}

/// Kind of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinks, submodules - anything the proxy does not handle
    #[serde(other)]
    Other,
}

/// One create-or-update request. Ephemeral; nothing outlives the call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertRequest {
    pub path: String,
    /// Base64-encoded payload
    pub content_base64: String,
    /// Human-readable commit message
    pub message: String,
}

/// Result of a successful write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteReceipt {
    pub path: String,
    /// Revision token assigned to the new file content
    pub revision: String,
    /// Commit created on the target branch, when the store reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

/// A revision-checked content store.
///
/// A `put` with a stale or missing revision for an existing path is rejected
/// by the store itself; implementations surface that rejection verbatim as
/// [`crate::StoreError::Rejected`]. The proxy relies on the store's check and
/// adds no coordination of its own.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch the file at `path`, including its current revision token.
    async fn get(&self, path: &str) -> StoreResult<StoredFile>;

    /// List the entries directly under the directory at `path`.
    async fn list(&self, path: &str) -> StoreResult<Vec<ContentEntry>>;

    /// Write `request.content_base64` at `request.path` on the target branch.
    ///
    /// `revision` must be the current token when overwriting an existing
    /// file and `None` when creating a new one.
    async fn put(
        &self,
        request: &UpsertRequest,
        revision: Option<&str>,
    ) -> StoreResult<WriteReceipt>;
}

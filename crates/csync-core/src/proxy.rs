//! ContentSyncProxy - the get-revision-then-put upsert protocol.

use std::sync::Arc;

use crate::error::StoreResult;
use crate::store::{ContentStore, UpsertRequest, WriteReceipt};

/// Upserts payloads into a revision-checked content store.
///
/// The proxy never retries and never reconciles conflicts: two concurrent
/// upserts to the same path race on the revision lookup, and the store's own
/// revision check rejects the loser. That rejection reaches the caller
/// verbatim.
pub struct ContentSyncProxy {
    store: Arc<dyn ContentStore>,
}

impl ContentSyncProxy {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Direct access to the underlying store, for the read-through routes.
    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    /// Create the file at `path` or update it in place.
    ///
    /// The revision lookup treats *any* failure as "no existing file": a
    /// missing path is the normal create case, and an unreachable store is
    /// left for the subsequent write to report.
    pub async fn upsert(
        &self,
        path: &str,
        content_base64: String,
        message: &str,
    ) -> StoreResult<WriteReceipt> {
        let revision = match self.store.get(path).await {
            Ok(file) => Some(file.revision),
            Err(err) => {
                tracing::debug!(path = %path, error = %err, "no existing revision, creating");
                None
            }
        };

        let request = UpsertRequest {
            path: path.to_string(),
            content_base64,
            message: message.to_string(),
        };

        let receipt = self.store.put(&request, revision.as_deref()).await?;
        tracing::info!(path = %receipt.path, revision = %receipt.revision, "content upserted");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::to_base64;
    use crate::error::StoreError;
    use crate::testing::MemoryStore;
    use serde_json::json;

    fn proxy(store: Arc<MemoryStore>) -> ContentSyncProxy {
        ContentSyncProxy::new(store)
    }

    #[tokio::test]
    async fn first_write_carries_no_revision() {
        let store = Arc::new(MemoryStore::new());
        let receipt = proxy(store.clone())
            .upsert("dados/a.json", to_base64(b"{}"), "create")
            .await
            .unwrap();

        let puts = store.recorded_puts();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].revision, None);
        assert_eq!(store.revision_of("dados/a.json").unwrap(), receipt.revision);
    }

    #[tokio::test]
    async fn update_carries_the_current_revision() {
        let store = Arc::new(MemoryStore::new());
        let seeded = store.insert("dados/a.json", &to_base64(b"old"));

        proxy(store.clone())
            .upsert("dados/a.json", to_base64(b"new"), "update")
            .await
            .unwrap();

        let puts = store.recorded_puts();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].revision.as_deref(), Some(seeded.as_str()));
        assert_ne!(store.revision_of("dados/a.json").unwrap(), seeded);
    }

    #[tokio::test]
    async fn lookup_failure_still_writes() {
        let store = Arc::new(MemoryStore::new());
        store.fail_reads();

        proxy(store.clone())
            .upsert("dados/a.json", to_base64(b"{}"), "create")
            .await
            .unwrap();

        let puts = store.recorded_puts();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].revision, None);
    }

    #[tokio::test]
    async fn write_failure_surfaces_the_store_body() {
        let store = Arc::new(MemoryStore::new());
        store.reject_writes(422, json!({"message": "Invalid request"}));

        let err = proxy(store)
            .upsert("dados/a.json", to_base64(b"{}"), "create")
            .await
            .unwrap_err();

        match err {
            StoreError::Rejected { status, details } => {
                assert_eq!(status, 422);
                assert_eq!(details["message"], "Invalid request");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn stale_revision_is_rejected_by_the_store() {
        let store = Arc::new(MemoryStore::new());
        store.insert("dados/a.json", &to_base64(b"old"));

        let request = UpsertRequest {
            path: "dados/a.json".to_string(),
            content_base64: to_base64(b"new"),
            message: "update".to_string(),
        };
        let err = store.put(&request, Some("stale")).await.unwrap_err();

        assert!(matches!(err, StoreError::Rejected { status: 409, .. }));
    }
}

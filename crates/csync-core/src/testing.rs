//! Test utilities: an in-memory ContentStore fake.
//!
//! `MemoryStore` mimics the revision semantics of the real store and records
//! every write so tests can assert on the exact revision token a caller sent.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::json;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::store::{
    ContentEntry, ContentStore, EntryKind, StoredFile, UpsertRequest, WriteReceipt,
};

/// One recorded `put` call.
#[derive(Debug, Clone)]
pub struct RecordedPut {
    pub path: String,
    pub revision: Option<String>,
    pub message: String,
    pub content_base64: String,
}

#[derive(Debug, Clone)]
struct FileEntry {
    content_base64: String,
    revision: String,
}

/// In-memory fake content store.
#[derive(Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<String, FileEntry>>,
    puts: Mutex<Vec<RecordedPut>>,
    fail_reads: Mutex<bool>,
    reject_writes: Mutex<Option<(u16, serde_json::Value)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file; returns the revision token it was given.
    pub fn insert(&self, path: &str, content_base64: &str) -> String {
        let revision = next_revision();
        self.files.lock().insert(
            path.to_string(),
            FileEntry {
                content_base64: content_base64.to_string(),
                revision: revision.clone(),
            },
        );
        revision
    }

    /// Make every `get`/`list` fail as a transport error.
    pub fn fail_reads(&self) {
        *self.fail_reads.lock() = true;
    }

    /// Make every `put` fail with the given status and body.
    pub fn reject_writes(&self, status: u16, details: serde_json::Value) {
        *self.reject_writes.lock() = Some((status, details));
    }

    /// All `put` calls seen so far, in order.
    pub fn recorded_puts(&self) -> Vec<RecordedPut> {
        self.puts.lock().clone()
    }

    /// Current revision of `path`, if present.
    pub fn revision_of(&self, path: &str) -> Option<String> {
        self.files.lock().get(path).map(|f| f.revision.clone())
    }

    /// Current content of `path`, if present.
    pub fn content_of(&self, path: &str) -> Option<String> {
        self.files.lock().get(path).map(|f| f.content_base64.clone())
    }
}

fn next_revision() -> String {
    Uuid::new_v4().simple().to_string()
}

fn decoded_size(content_base64: &str) -> u64 {
    crate::encoding::from_base64(content_base64)
        .map(|bytes| bytes.len() as u64)
        .unwrap_or(0)
}

#[async_trait::async_trait]
impl ContentStore for MemoryStore {
    async fn get(&self, path: &str) -> StoreResult<StoredFile> {
        if *self.fail_reads.lock() {
            return Err(StoreError::Transport("injected read failure".into()));
        }
        let files = self.files.lock();
        let entry = files
            .get(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        Ok(StoredFile {
            path: path.to_string(),
            name,
            revision: entry.revision.clone(),
            content: entry.content_base64.clone(),
            size: decoded_size(&entry.content_base64),
        })
    }

    async fn list(&self, path: &str) -> StoreResult<Vec<ContentEntry>> {
        if *self.fail_reads.lock() {
            return Err(StoreError::Transport("injected read failure".into()));
        }
        let prefix = format!("{}/", path.trim_end_matches('/'));
        let files = self.files.lock();
        let mut entries: Vec<ContentEntry> = files
            .iter()
            .filter(|(p, _)| {
                // direct children only, like the real listing
                p.starts_with(&prefix) && !p[prefix.len()..].contains('/')
            })
            .map(|(p, f)| ContentEntry {
                name: p[prefix.len()..].to_string(),
                path: p.clone(),
                revision: f.revision.clone(),
                size: decoded_size(&f.content_base64),
                kind: EntryKind::File,
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn put(
        &self,
        request: &UpsertRequest,
        revision: Option<&str>,
    ) -> StoreResult<WriteReceipt> {
        self.puts.lock().push(RecordedPut {
            path: request.path.clone(),
            revision: revision.map(String::from),
            message: request.message.clone(),
            content_base64: request.content_base64.clone(),
        });

        if let Some((status, details)) = self.reject_writes.lock().clone() {
            return Err(StoreError::Rejected { status, details });
        }

        let mut files = self.files.lock();
        if let Some(existing) = files.get(&request.path) {
            if revision != Some(existing.revision.as_str()) {
                return Err(StoreError::Rejected {
                    status: 409,
                    details: json!({
                        "message": format!(
                            "{} does not match {}",
                            revision.unwrap_or("<none>"),
                            existing.revision
                        ),
                    }),
                });
            }
        }

        let new_revision = next_revision();
        files.insert(
            request.path.clone(),
            FileEntry {
                content_base64: request.content_base64.clone(),
                revision: new_revision.clone(),
            },
        );
        Ok(WriteReceipt {
            path: request.path.clone(),
            revision: new_revision,
            commit: Some(next_revision()),
        })
    }
}

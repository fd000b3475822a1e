//! csync-core - Core traits and types for the content sync proxy
//!
//! This crate provides the abstractions that let the HTTP layer talk to any
//! revision-checked content store (GitHub in production, an in-memory fake
//! in tests), plus the one real protocol in the system: the
//! get-revision-then-put upsert.

pub mod encoding;
pub mod error;
pub mod proxy;
pub mod store;
pub mod testing;

pub use error::{StoreError, StoreResult};
pub use proxy::ContentSyncProxy;
pub use store::{ContentEntry, ContentStore, EntryKind, StoredFile, UpsertRequest, WriteReceipt};

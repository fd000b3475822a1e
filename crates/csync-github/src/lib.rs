//! csync-github - GitHub Contents API backend for the content sync proxy
//!
//! Implements [`csync_core::ContentStore`] over the repository contents
//! endpoint: reads resolve the current blob SHA (the revision token), writes
//! create one commit on the configured branch.

mod config;
mod store;
mod types;

pub use config::GithubConfig;
pub use store::GithubStore;

//! Integration tests for the content sync proxy
//!
//! Full-stack tests over in-process servers:
//! - `api_test.rs` - browser-facing API over the in-memory store fake
//! - `github_store_test.rs` - GithubStore against a fake contents API
//!
//! Run with: cargo test -p csync-tests

// This crate only contains tests, no library code

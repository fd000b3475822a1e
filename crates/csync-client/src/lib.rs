//! Content sync proxy client library
//!
//! Typed HTTP client for the proxy's browser-facing API.
//!
//! # Example
//!
//! ```rust,no_run
//! use csync_client::CsyncClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), csync_client::CsyncClientError> {
//!     let client = CsyncClient::new("http://localhost:3000")?;
//!
//!     client.upload("contrato.pdf", b"%PDF-1.4 ...", None).await?;
//!     client
//!         .save_schedule(&serde_json::json!({"eventos": []}))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod testing;
pub mod types;

pub use client::CsyncClient;
pub use error::{CsyncClientError, Result};
pub use types::{Ficha, FichaList};

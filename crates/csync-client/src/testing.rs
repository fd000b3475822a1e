//! Test utilities for exercising routers over real HTTP
//!
//! Integration tests use [`TestServer`] both for the proxy's own API and for
//! hosting fake upstream stores.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::{CsyncClient, Result};

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: CsyncClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Serve `router` on an ephemeral local port.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use csync_client::testing::TestServer;
    /// use csync_api::{create_router, AppState};
    ///
    /// let state = AppState::new(store);
    /// let server = TestServer::start(create_router(state)).await?;
    ///
    /// server.client().health().await?;
    /// ```
    pub async fn start(router: axum::Router) -> Result<Self> {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        let client = CsyncClient::with_config(
            &format!("http://{}", addr),
            Duration::from_secs(5),
            Duration::from_secs(2),
        )?;

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get a reference to the client
    pub fn client(&self) -> &CsyncClient {
        &self.client
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Send shutdown signal if not already done
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        // Abort the task if still running
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

//! HTTP client for the content sync proxy API

use std::time::Duration;

use csync_core::encoding;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::error::{CsyncClientError, Result};
use crate::types::{ErrorResponse, Ficha, FichaList, OkResponse};

/// URL-encode a file name used as a single path segment.
///
/// Enough for file names: escapes the separator and the characters that
/// would terminate the path part of the URL.
fn encode_path_segment(name: &str) -> String {
    name.replace('%', "%25")
        .replace('/', "%2F")
        .replace('?', "%3F")
        .replace('#', "%23")
        .replace(' ', "%20")
}

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the proxy's browser-facing API.
#[derive(Debug, Clone)]
pub struct CsyncClient {
    client: Client,
    base_url: Url,
}

impl CsyncClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the proxy (e.g., "http://localhost:3000")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new client with custom timeouts
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the underlying HTTP client.
    ///
    /// Useful for making custom requests (e.g. malformed ones in tests)
    /// while reusing the client's connection pool.
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Check server health
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<bool> {
        let url = self.base_url.join("/health")?;
        let response = self.client.get(url).send().await?;
        self.handle_response::<OkResponse>(response)
            .await
            .map(|r| r.ok)
    }

    /// Upload raw bytes; the client handles the base64 wire encoding.
    ///
    /// `categoria` selects the store folder: `Some("ficha")` goes to the
    /// fichas folder, anything else to the signed-contracts folder.
    #[instrument(skip(self, bytes))]
    pub async fn upload(
        &self,
        file_name: &str,
        bytes: &[u8],
        categoria: Option<&str>,
    ) -> Result<()> {
        self.upload_base64(file_name, &encoding::to_base64(bytes), categoria)
            .await
    }

    /// Upload an already base64-encoded payload.
    #[instrument(skip(self, content_base64))]
    pub async fn upload_base64(
        &self,
        file_name: &str,
        content_base64: &str,
        categoria: Option<&str>,
    ) -> Result<()> {
        let url = self.base_url.join("/upload")?;
        let mut body = serde_json::json!({
            "nomeArquivo": file_name,
            "conteudoBase64": content_base64,
        });
        if let Some(categoria) = categoria {
            body["tipo"] = Value::String(categoria.to_string());
        }

        let response = self.client.post(url).json(&body).send().await?;
        self.handle_response::<OkResponse>(response)
            .await
            .map(|_| ())
    }

    /// Push the whole schedule to the store.
    #[instrument(skip(self, schedule))]
    pub async fn save_schedule(&self, schedule: &Value) -> Result<()> {
        let url = self.base_url.join("/salvar-agenda")?;
        let response = self.client.post(url).json(schedule).send().await?;
        self.handle_response::<OkResponse>(response)
            .await
            .map(|_| ())
    }

    /// List stored fichas
    #[instrument(skip(self))]
    pub async fn list_fichas(&self) -> Result<FichaList> {
        let url = self.base_url.join("/dados/fichas")?;
        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    /// Fetch one ficha, still base64-encoded
    #[instrument(skip(self))]
    pub async fn get_ficha(&self, name: &str) -> Result<Ficha> {
        let url = self
            .base_url
            .join(&format!("/dados/fichas/{}", encode_path_segment(name)))?;
        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    /// Fetch one ficha and decode it to raw bytes
    pub async fn get_ficha_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let ficha = self.get_ficha(name).await?;
        encoding::from_base64(&ficha.content_base64)
            .map_err(|e| CsyncClientError::ParseError(e.to_string()))
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CsyncClientError::ParseError(e.to_string()))
        } else {
            Err(self.extract_error(response, status).await)
        }
    }

    /// Extract error from a failed response
    async fn extract_error(
        &self,
        response: reqwest::Response,
        status: StatusCode,
    ) -> CsyncClientError {
        let (message, details) = match response.json::<ErrorResponse>().await {
            Ok(err) => (err.error, err.details),
            Err(_) => (format!("HTTP {}", status), None),
        };

        match status {
            StatusCode::NOT_FOUND => CsyncClientError::NotFound(message),
            _ => CsyncClientError::ServerError {
                status: status.as_u16(),
                message,
                details,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segment_encoding() {
        assert_eq!(encode_path_segment("ficha-ana.pdf"), "ficha-ana.pdf");
        assert_eq!(
            encode_path_segment("ficha da ana #2.pdf"),
            "ficha%20da%20ana%20%232.pdf"
        );
        assert_eq!(encode_path_segment("a/b"), "a%2Fb");
        assert_eq!(encode_path_segment("100%"), "100%25");
    }
}

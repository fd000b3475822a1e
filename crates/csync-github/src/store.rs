//! GithubStore - ContentStore over the GitHub Contents API.

use std::time::Duration;

use async_trait::async_trait;
use csync_core::{
    ContentEntry, ContentStore, EntryKind, StoreError, StoreResult, StoredFile, UpsertRequest,
    WriteReceipt,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};
use url::Url;

use crate::config::GithubConfig;
use crate::types::{ContentsItem, PutRequest, PutResponse};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Content store backed by the GitHub repository contents endpoint.
///
/// Holds the access token in a default request header; the token never
/// appears in any inbound-facing type.
#[derive(Debug, Clone)]
pub struct GithubStore {
    client: Client,
    api_base: Url,
    repo: String,
    branch: String,
}

impl GithubStore {
    /// Create a store for `config`, authenticating every request with `token`.
    pub fn new(config: &GithubConfig, token: &str) -> StoreResult<Self> {
        Self::with_timeouts(config, token, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a store with custom timeouts.
    pub fn with_timeouts(
        config: &GithubConfig,
        token: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> StoreResult<Self> {
        if config.repo.split('/').filter(|s| !s.is_empty()).count() != 2 {
            return Err(StoreError::Internal(format!(
                "repository must be in owner/name form, got {:?}",
                config.repo
            )));
        }

        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("token {}", token)).map_err(|_| {
            StoreError::Internal("access token contains invalid header characters".into())
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("csync/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| StoreError::Internal(format!("failed to build HTTP client: {}", e)))?;

        let api_base = Url::parse(&config.api_base).map_err(|e| {
            StoreError::Internal(format!("invalid api_base {:?}: {}", config.api_base, e))
        })?;

        Ok(Self {
            client,
            api_base,
            repo: config.repo.clone(),
            branch: config.branch.clone(),
        })
    }

    /// Build `{api_base}/repos/{owner}/{repo}/contents/{path}` with every
    /// path segment percent-encoded; the logical path is caller-controlled.
    fn contents_url(&self, path: &str) -> StoreResult<Url> {
        validate_path(path)?;

        let mut url = self.api_base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::Internal("api_base cannot be a base URL".into()))?;
            segments.pop_if_empty();
            segments.push("repos");
            segments.extend(self.repo.split('/'));
            segments.push("contents");
            segments.extend(path.split('/'));
        }
        Ok(url)
    }

    /// Turn a non-2xx response into a `StoreError`, preserving the body.
    async fn rejection(&self, response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let details = match response.text().await {
            Ok(text) => serde_json::from_str(&text)
                .unwrap_or_else(|_| serde_json::json!({ "message": text })),
            Err(e) => serde_json::json!({ "message": format!("unreadable error body: {}", e) }),
        };
        StoreError::Rejected { status, details }
    }
}

fn validate_path(path: &str) -> StoreResult<()> {
    if path.is_empty() {
        return Err(StoreError::InvalidPath("empty path".into()));
    }
    for segment in path.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(StoreError::InvalidPath(format!(
                "bad segment in {:?}",
                path
            )));
        }
    }
    Ok(())
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}

#[async_trait]
impl ContentStore for GithubStore {
    #[instrument(skip(self))]
    async fn get(&self, path: &str) -> StoreResult<StoredFile> {
        let mut url = self.contents_url(path)?;
        url.query_pairs_mut().append_pair("ref", &self.branch);
        debug!(%url, "fetching content metadata");

        let response = self.client.get(url).send().await.map_err(transport)?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(path.to_string())),
            status if status.is_success() => {
                let item: ContentsItem = response.json().await.map_err(|e| {
                    StoreError::Encoding(format!("unexpected content response: {}", e))
                })?;
                let content = item.content.ok_or_else(|| {
                    StoreError::Encoding(format!("{} has no inline content (directory?)", path))
                })?;
                Ok(StoredFile {
                    path: item.path,
                    name: item.name,
                    revision: item.sha,
                    content,
                    size: item.size,
                })
            }
            _ => Err(self.rejection(response).await),
        }
    }

    #[instrument(skip(self))]
    async fn list(&self, path: &str) -> StoreResult<Vec<ContentEntry>> {
        let mut url = self.contents_url(path)?;
        url.query_pairs_mut().append_pair("ref", &self.branch);

        let response = self.client.get(url).send().await.map_err(transport)?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(path.to_string())),
            status if status.is_success() => {
                let items: Vec<ContentsItem> = response.json().await.map_err(|e| {
                    StoreError::Encoding(format!("unexpected listing response: {}", e))
                })?;
                Ok(items
                    .into_iter()
                    .map(|item| ContentEntry {
                        kind: match item.kind.as_str() {
                            "file" => EntryKind::File,
                            "dir" => EntryKind::Dir,
                            _ => EntryKind::Other,
                        },
                        name: item.name,
                        path: item.path,
                        revision: item.sha,
                        size: item.size,
                    })
                    .collect())
            }
            _ => Err(self.rejection(response).await),
        }
    }

    #[instrument(skip(self, request), fields(path = %request.path))]
    async fn put(
        &self,
        request: &UpsertRequest,
        revision: Option<&str>,
    ) -> StoreResult<WriteReceipt> {
        let url = self.contents_url(&request.path)?;
        let body = PutRequest {
            message: &request.message,
            content: &request.content_base64,
            branch: &self.branch,
            sha: revision,
        };

        let response = self
            .client
            .put(url)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(self.rejection(response).await);
        }

        let parsed: PutResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Encoding(format!("unexpected write response: {}", e)))?;
        Ok(WriteReceipt {
            path: parsed.content.path,
            revision: parsed.content.sha,
            commit: parsed.commit.map(|c| c.sha),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> GithubStore {
        GithubStore::new(&GithubConfig::new("owner/repo"), "t0ken").unwrap()
    }

    #[test]
    fn contents_url_encodes_each_segment() {
        let url = store()
            .contents_url("dados/fichas/ficha maria#1.pdf")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/owner/repo/contents/dados/fichas/ficha%20maria%231.pdf"
        );
    }

    #[test]
    fn traversal_paths_are_rejected() {
        for path in ["", "a//b", "../secret", "dados/./x", "dados/.."] {
            assert!(
                matches!(
                    store().contents_url(path),
                    Err(StoreError::InvalidPath(_))
                ),
                "path {:?} should be invalid",
                path
            );
        }
    }

    #[test]
    fn repo_must_be_owner_slash_name() {
        assert!(GithubStore::new(&GithubConfig::new("just-a-name"), "t").is_err());
        assert!(GithubStore::new(&GithubConfig::new("a/b/c"), "t").is_err());
    }

    #[test]
    fn put_body_omits_sha_on_create() {
        let body = PutRequest {
            message: "m",
            content: "Zm9v",
            branch: "main",
            sha: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("sha").is_none());
    }

    #[test]
    fn put_body_carries_sha_on_update() {
        let body = PutRequest {
            message: "m",
            content: "Zm9v",
            branch: "main",
            sha: Some("abc123"),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["sha"], "abc123");
    }
}

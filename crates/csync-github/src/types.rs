//! Wire types for the GitHub Contents API.

use serde::{Deserialize, Serialize};

/// One item from `GET /repos/{owner}/{repo}/contents/{path}`.
///
/// A file response carries `content`/`encoding`; a directory listing returns
/// an array of these without them.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentsItem {
    pub name: String,
    pub path: String,
    pub sha: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Serialize)]
pub struct PutRequest<'a> {
    pub message: &'a str,
    pub content: &'a str,
    pub branch: &'a str,
    /// Current blob SHA; must be omitted entirely when creating a new file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
}

/// Response of a successful contents PUT.
#[derive(Debug, Deserialize)]
pub struct PutResponse {
    pub content: PutContent,
    #[serde(default)]
    pub commit: Option<PutCommit>,
}

#[derive(Debug, Deserialize)]
pub struct PutContent {
    pub name: String,
    pub path: String,
    pub sha: String,
}

#[derive(Debug, Deserialize)]
pub struct PutCommit {
    pub sha: String,
}

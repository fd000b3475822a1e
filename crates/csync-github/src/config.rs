//! Configuration for the GitHub-backed store.

use serde::Deserialize;

/// Target repository identity and API endpoint.
///
/// The access token is deliberately not part of this struct so it never ends
/// up in a config file; it is passed to [`crate::GithubStore::new`] directly.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    /// Repository in `owner/name` form
    pub repo: String,
    /// Branch that receives the commits
    #[serde(default = "default_branch")]
    pub branch: String,
    /// API base URL; point it at an in-process fake in tests or at a
    /// GitHub Enterprise host
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

impl GithubConfig {
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            branch: default_branch(),
            api_base: default_api_base(),
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

//! Daemon configuration: TOML file plus environment overrides.
//!
//! The access token never lives in the file; it is read from `GITHUB_TOKEN`
//! and startup fails fast without it.

use anyhow::{bail, Context};
use csync_github::GithubConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub github: GithubConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Front-end origin allowed by CORS; permissive when unset
    #[serde(default)]
    pub allowed_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            allowed_origin: None,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Config {
    /// Load the optional TOML file, then apply environment overrides.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path))?;
                Self::from_toml(&content)?
            }
            None => {
                // No file: the repository must come from the environment.
                let repo = std::env::var("GITHUB_REPO").map_err(|_| {
                    anyhow::anyhow!("no config file given and GITHUB_REPO is not set")
                })?;
                Config {
                    server: ServerConfig::default(),
                    github: GithubConfig::new(repo),
                }
            }
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("invalid config file")
    }

    fn apply_env(&mut self) -> anyhow::Result<()> {
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {:?}", port))?;
        }
        if let Ok(origin) = std::env::var("FRONTEND_ORIGIN") {
            self.server.allowed_origin = Some(origin);
        }
        if let Ok(repo) = std::env::var("GITHUB_REPO") {
            self.github.repo = repo;
        }
        if let Ok(branch) = std::env::var("GITHUB_BRANCH") {
            self.github.branch = branch;
        }
        Ok(())
    }
}

/// The access token, from the environment only.
pub fn github_token() -> anyhow::Result<String> {
    match std::env::var("GITHUB_TOKEN") {
        Ok(token) if !token.is_empty() => Ok(token),
        _ => bail!("GITHUB_TOKEN is not set; refusing to start without store credentials"),
    }
}

//! csyncd - Content Sync Daemon
//!
//! Backend proxy that relays file-upload and scheduling requests from the
//! browser front-end to the GitHub contents store, keeping the access token
//! server-side.
//!
//! Usage:
//!   csyncd [config.toml]
//!
//! The token always comes from the GITHUB_TOKEN environment variable;
//! PORT, GITHUB_REPO, GITHUB_BRANCH and FRONTEND_ORIGIN override the file.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use csync_api::{create_router, AppState};
use csync_github::GithubStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;

fn print_help() {
    eprintln!(
        r#"csyncd - Content Sync Daemon

Usage: csyncd [OPTIONS] [config.toml]

Options:
  -h, --help    Print this help message

Environment:
  GITHUB_TOKEN     access token for the contents store (required)
  GITHUB_REPO      overrides [github].repo
  GITHUB_BRANCH    overrides [github].branch
  PORT             overrides [server].port
  FRONTEND_ORIGIN  overrides [server].allowed_origin
"#
    );
}

/// Parse command-line arguments; returns the config file path, if given.
fn parse_args() -> Option<String> {
    let mut config_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other if !other.starts_with('-') => config_path = Some(other.to_string()),
            other => tracing::warn!("Unknown argument: {}", other),
        }
    }
    config_path
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "csyncd=info,csync_api=info,csync_github=info,csync_core=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting csyncd (content sync daemon)");

    let config_path = parse_args();
    if let Some(ref path) = config_path {
        tracing::info!("Loading config from: {}", path);
    }
    let config = Config::load(config_path.as_deref())?;

    // Fail fast without credentials
    let token = config::github_token()?;

    tracing::info!(
        repo = %config.github.repo,
        branch = %config.github.branch,
        "Using contents store"
    );

    let store = GithubStore::new(&config.github, &token)?;

    let state = match &config.server.allowed_origin {
        Some(origin) => {
            let origin = HeaderValue::from_str(origin).map_err(|_| {
                anyhow::anyhow!("allowed_origin is not a valid header value: {:?}", origin)
            })?;
            tracing::info!(origin = ?origin, "Restricting CORS to front-end origin");
            AppState::with_allowed_origin(Arc::new(store), origin)
        }
        None => AppState::new(Arc::new(store)),
    };

    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

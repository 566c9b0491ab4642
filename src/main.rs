use anyhow::{Context, Result};
use tokio::net::TcpListener;

use author_feed::config::Config;
use author_feed::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is configured once here and never changed afterwards
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let client = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(
        port = config.port,
        upstream = %config.profile.upstream_url,
        author = %config.profile.author,
        "Starting feed server"
    );

    server::serve(listener, AppState::new(client, config.profile))
        .await
        .context("HTTP server failed")?;

    Ok(())
}

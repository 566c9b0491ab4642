//! HTTP surface.
//!
//! # Routes
//! - `GET /feed/author/rei_notion/index.xml` - filtered RSS feed
//! - `GET /health` - liveness probe, never touches upstream
//! - `GET /` - static information page
//!
//! Anything else falls through to axum's default 404.

mod handlers;
mod pages;

use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::{FeedProfile, FEED_ROUTE};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub profile: Arc<FeedProfile>,
}

impl AppState {
    pub fn new(client: reqwest::Client, profile: FeedProfile) -> Self {
        Self {
            client,
            profile: Arc::new(profile),
        }
    }
}

/// Builds the router with all routes and the request tracing layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(FEED_ROUTE, get(handlers::feed))
        .route("/health", get(handlers::health))
        .route("/", get(handlers::index))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serves `router(state)` on `listener` until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "HTTP server starting");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

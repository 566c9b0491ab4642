use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::pages::INDEX_HTML;
use super::AppState;
use crate::feed::fetch_and_filter;

/// Content type of the filtered feed response.
pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

/// Body sent on any feed failure. Upstream details only go to the log.
pub const FEED_ERROR_BODY: &str = "Error generating feed";

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// `GET` on the feed route: fetches, filters and returns the RSS document,
/// or a generic 500 when any stage fails.
pub async fn feed(State(state): State<AppState>) -> Response {
    match fetch_and_filter(&state.client, &state.profile).await {
        Ok(xml) => ([(header::CONTENT_TYPE, RSS_CONTENT_TYPE)], xml).into_response(),
        Err(e) => {
            tracing::error!(
                error = %e,
                upstream = %state.profile.upstream_url,
                "Failed to generate filtered feed"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, FEED_ERROR_BODY).into_response()
        }
    }
}

/// Liveness probe. Never contacts upstream.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

/// Static landing page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

//! Feed transformation pipeline.
//!
//! One call downloads the upstream feed, keeps the configured author's items
//! and renders them as a new RSS 2.0 document:
//!
//! - [`fetcher`] - single bounded HTTP GET, UTF-8 decoding
//! - [`parser`] - namespace-aware parsing of channel and items
//! - [`filter`] - exact `dc:creator` match
//! - [`builder`] - string-assembled RSS output
//!
//! Nothing is cached; every call starts from a fresh download.

mod builder;
mod fetcher;
mod filter;
mod parser;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::FeedProfile;

pub use builder::build_feed;
pub use fetcher::{fetch_feed, FetchError};
pub use filter::filter_by_creator;
pub use parser::{parse_feed, Guid, ParseError, UpstreamFeed, UpstreamItem};

/// Any failure while producing the filtered feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to fetch upstream feed: {0}")]
    Fetch(#[from] FetchError),
    #[error("Failed to parse upstream feed: {0}")]
    Parse(#[from] ParseError),
}

/// Turns upstream feed text into the filtered feed document.
///
/// Pure: the result depends only on `upstream_xml`, `profile` and `built_at`.
pub fn transform(
    upstream_xml: &str,
    profile: &FeedProfile,
    built_at: DateTime<Utc>,
) -> Result<String, ParseError> {
    let upstream = parse_feed(upstream_xml)?;
    let matched = filter_by_creator(&upstream.items, &profile.author);

    tracing::info!(
        upstream_items = upstream.items.len(),
        matched_items = matched.len(),
        author = %profile.author,
        "Filtered upstream feed"
    );

    Ok(build_feed(
        upstream.title.as_deref(),
        &matched,
        profile,
        built_at,
    ))
}

/// Fetches the upstream feed and returns the filtered document, stamped
/// with the current time.
pub async fn fetch_and_filter(
    client: &reqwest::Client,
    profile: &FeedProfile,
) -> Result<String, FeedError> {
    let upstream_xml = fetch_feed(client, &profile.upstream_url, profile.fetch_timeout).await?;
    Ok(transform(&upstream_xml, profile, Utc::now())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UPSTREAM_FEED_URL;
    use chrono::TimeZone;

    fn profile() -> FeedProfile {
        FeedProfile::with_upstream(UPSTREAM_FEED_URL).unwrap()
    }

    #[test]
    fn test_transform_keeps_only_author_items() {
        let upstream = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
<channel>
<title>ライフハッカー・ジャパン</title>
<item><link>https://example.com/1</link><dc:creator>Rei丨暮らしとNotion。</dc:creator></item>
<item><link>https://example.com/2</link><dc:creator>Other</dc:creator></item>
<item><link>https://example.com/3</link><dc:creator>Rei丨暮らしとNotion。</dc:creator></item>
</channel>
</rss>"#;
        let built_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let xml = transform(upstream, &profile(), built_at).unwrap();
        let output = parse_feed(&xml).unwrap();

        let links: Vec<_> = output
            .items
            .iter()
            .map(|i| i.link.as_deref().unwrap())
            .collect();
        assert_eq!(links, vec!["https://example.com/1", "https://example.com/3"]);
        assert_eq!(
            output.title.as_deref(),
            Some("ライフハッカー・ジャパン - Rei丨暮らしとNotion。")
        );
    }

    #[test]
    fn test_transform_is_deterministic_for_fixed_time() {
        let upstream = "<rss><channel><title>T</title></channel></rss>";
        let built_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            transform(upstream, &profile(), built_at).unwrap(),
            transform(upstream, &profile(), built_at).unwrap()
        );
    }

    #[test]
    fn test_transform_propagates_parse_errors() {
        let built_at = Utc::now();
        assert!(transform("<rss><channel>", &profile(), built_at).is_err());
    }
}

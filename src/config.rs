//! Runtime configuration.
//!
//! The only value read from the environment is `PORT`. Everything describing
//! the upstream feed and the republished channel is fixed at compile time and
//! grouped in [`FeedProfile`], so tests can swap the upstream URL without the
//! binary growing any extra knobs.
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 5000;

/// Multi-author feed that gets filtered.
pub const UPSTREAM_FEED_URL: &str = "https://www.lifehacker.jp/feed/index.xml";

/// Exact `dc:creator` text an item must carry to be republished.
pub const AUTHOR_NAME: &str = "Rei丨暮らしとNotion。";

pub const CHANNEL_DESCRIPTION: &str = "Rei丨暮らしとNotion。の記事のみを配信します。";
pub const CHANNEL_LINK: &str = "https://www.lifehacker.jp/author/rei_notion/";
pub const SELF_LINK: &str = "https://www.lifehacker.jp/feed/author/rei_notion/index.xml";
pub const CHANNEL_LANGUAGE: &str = "ja";

/// Route the filtered feed is served on.
pub const FEED_ROUTE: &str = "/feed/author/rei_notion/index.xml";

/// Upper bound on the upstream request, body included.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid PORT value {0:?}: expected an integer between 0 and 65535")]
    InvalidPort(String),

    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// What to fetch, who to keep, and how to describe the resulting channel.
#[derive(Debug, Clone)]
pub struct FeedProfile {
    pub upstream_url: Url,
    pub author: String,
    pub description: String,
    pub link: String,
    pub self_link: String,
    pub language: String,
    pub fetch_timeout: Duration,
}

impl FeedProfile {
    /// Profile for the built-in author, fetching from `upstream_url`.
    pub fn with_upstream(upstream_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            upstream_url: Url::parse(upstream_url)?,
            author: AUTHOR_NAME.to_string(),
            description: CHANNEL_DESCRIPTION.to_string(),
            link: CHANNEL_LINK.to_string(),
            self_link: SELF_LINK.to_string(),
            language: CHANNEL_LANGUAGE.to_string(),
            fetch_timeout: FETCH_TIMEOUT,
        })
    }

    /// Suffix appended to the upstream channel title.
    pub fn title_suffix(&self) -> String {
        format!(" - {}", self.author)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub profile: FeedProfile,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// - `PORT` unset or empty → [`DEFAULT_PORT`]
    /// - `PORT` not a valid `u16` → `Err(ConfigError::InvalidPort)`
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        Ok(Self {
            port,
            profile: FeedProfile::with_upstream(UPSTREAM_FEED_URL)?,
        })
    }

    /// Listen on every interface.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_defaults_when_unset() {
        assert_eq!(parse_port(None).unwrap(), DEFAULT_PORT);
        assert_eq!(parse_port(Some("")).unwrap(), DEFAULT_PORT);
    }

    #[test]
    fn test_port_parses_value() {
        assert_eq!(parse_port(Some("8080")).unwrap(), 8080);
        assert_eq!(parse_port(Some(" 3000 ")).unwrap(), 3000);
    }

    #[test]
    fn test_port_rejects_garbage() {
        assert!(matches!(
            parse_port(Some("eighty")),
            Err(ConfigError::InvalidPort(v)) if v == "eighty"
        ));
        assert!(matches!(
            parse_port(Some("70000")),
            Err(ConfigError::InvalidPort(_))
        ));
    }

    #[test]
    fn test_bind_addr_is_all_interfaces() {
        let config = Config {
            port: 5000,
            profile: FeedProfile::with_upstream(UPSTREAM_FEED_URL).unwrap(),
        };
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn test_default_profile() {
        let profile = FeedProfile::with_upstream(UPSTREAM_FEED_URL).unwrap();
        assert_eq!(profile.upstream_url.as_str(), UPSTREAM_FEED_URL);
        assert_eq!(profile.author, AUTHOR_NAME);
        assert_eq!(profile.title_suffix(), " - Rei丨暮らしとNotion。");
        assert_eq!(profile.fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_upstream_url() {
        assert!(matches!(
            FeedProfile::with_upstream("not a url"),
            Err(ConfigError::InvalidUrl(_))
        ));
    }
}

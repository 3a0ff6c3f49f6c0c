//! Service Configuration Settings
//!
//! Configuration types for the stocks API, loaded from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use chrono::FixedOffset;
use reqwest::Url;

/// Upstream feed settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    /// Feed URL.
    pub url: Url,
    /// Single-attempt fetch timeout.
    pub timeout: Duration,
    /// Currency code attached to every price.
    pub currency: String,
    /// Exchange offset the feed's as-of time is expressed in.
    pub utc_offset: FixedOffset,
}

impl FeedSettings {
    /// Default fetch timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default price currency.
    pub const DEFAULT_CURRENCY: &'static str = "PHP";
    /// Default exchange offset in minutes east of UTC (+08:00).
    pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 480;
}

/// HTTP listener settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerSettings {
    /// Bind address.
    pub host: IpAddr,
    /// Bind port.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}

impl ServerSettings {
    /// Socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Upstream feed settings.
    pub feed: FeedSettings,
    /// HTTP listener settings.
    pub server: ServerSettings,
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `STOCKS_FEED_URL` is missing, empty or not an
    /// http(s) URL, or if a numeric setting is outside its valid range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable source.
    ///
    /// Unparseable optional values fall back to their defaults.
    ///
    /// # Errors
    ///
    /// See [`ServiceConfig::from_env`].
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("STOCKS_FEED_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("STOCKS_FEED_URL".to_string()))?;
        if raw_url.trim().is_empty() {
            return Err(ConfigError::EmptyValue("STOCKS_FEED_URL".to_string()));
        }
        let url = parse_feed_url(raw_url.trim())?;

        let timeout_secs = parse_u64(
            &lookup,
            "STOCKS_FEED_TIMEOUT_SECS",
            FeedSettings::DEFAULT_TIMEOUT.as_secs(),
        );
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "STOCKS_FEED_TIMEOUT_SECS".to_string(),
                value: "0".to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }

        let currency = lookup("STOCKS_FEED_CURRENCY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| FeedSettings::DEFAULT_CURRENCY.to_string());

        let offset_minutes = parse_i32(
            &lookup,
            "STOCKS_FEED_UTC_OFFSET_MINUTES",
            FeedSettings::DEFAULT_UTC_OFFSET_MINUTES,
        );
        let utc_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "STOCKS_FEED_UTC_OFFSET_MINUTES".to_string(),
                value: offset_minutes.to_string(),
                reason: "offset must be within +/- 1439 minutes".to_string(),
            })?;

        let server = ServerSettings {
            host: lookup("STOCKS_HTTP_HOST")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(ServerSettings::default().host),
            port: parse_u16(&lookup, "STOCKS_HTTP_PORT", ServerSettings::default().port),
        };

        Ok(Self {
            feed: FeedSettings {
                url,
                timeout: Duration::from_secs(timeout_secs),
                currency,
                utc_offset,
            },
            server,
        })
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
    /// Feed URL is not an absolute http(s) URL.
    #[error("invalid feed URL '{url}': {reason}")]
    InvalidUrl {
        /// Raw value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Value parsed but is out of range.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

fn parse_feed_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

fn parse_u16<L: Fn(&str) -> Option<String>>(lookup: &L, key: &str, default: u16) -> u16 {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_u64<L: Fn(&str) -> Option<String>>(lookup: &L, key: &str, default: u64) -> u64 {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_i32<L: Fn(&str) -> Option<String>>(lookup: &L, key: &str, default: i32) -> i32 {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use test_case::test_case;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    const FEED: (&str, &str) = ("STOCKS_FEED_URL", "http://feed.test/stocks.json");

    #[test]
    fn defaults() {
        let config = config(&[FEED]).unwrap();

        assert_eq!(config.feed.url.as_str(), "http://feed.test/stocks.json");
        assert_eq!(config.feed.timeout, Duration::from_secs(10));
        assert_eq!(config.feed.currency, "PHP");
        assert_eq!(config.feed.utc_offset.local_minus_utc(), 8 * 3600);
        assert_eq!(config.server, ServerSettings::default());
        assert_eq!(config.server.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn overrides() {
        let config = config(&[
            FEED,
            ("STOCKS_FEED_TIMEOUT_SECS", "3"),
            ("STOCKS_FEED_CURRENCY", "USD"),
            ("STOCKS_FEED_UTC_OFFSET_MINUTES", "-300"),
            ("STOCKS_HTTP_HOST", "127.0.0.1"),
            ("STOCKS_HTTP_PORT", "9000"),
        ])
        .unwrap();

        assert_eq!(config.feed.timeout, Duration::from_secs(3));
        assert_eq!(config.feed.currency, "USD");
        assert_eq!(config.feed.utc_offset.local_minus_utc(), -5 * 3600);
        assert_eq!(config.server.socket_addr().to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn unparseable_optional_values_fall_back() {
        let config = config(&[
            FEED,
            ("STOCKS_FEED_TIMEOUT_SECS", "soon"),
            ("STOCKS_FEED_UTC_OFFSET_MINUTES", "east"),
            ("STOCKS_HTTP_HOST", "localhost:80"),
            ("STOCKS_HTTP_PORT", "99999"),
            ("STOCKS_FEED_CURRENCY", "  "),
        ])
        .unwrap();

        assert_eq!(config.feed.timeout, Duration::from_secs(10));
        assert_eq!(config.feed.currency, "PHP");
        assert_eq!(config.feed.utc_offset.local_minus_utc(), 8 * 3600);
        assert_eq!(config.server, ServerSettings::default());
    }

    #[test]
    fn missing_feed_url() {
        assert_eq!(
            config(&[]),
            Err(ConfigError::MissingEnvVar("STOCKS_FEED_URL".to_string()))
        );
    }

    #[test]
    fn empty_feed_url() {
        assert_eq!(
            config(&[("STOCKS_FEED_URL", " ")]),
            Err(ConfigError::EmptyValue("STOCKS_FEED_URL".to_string()))
        );
    }

    #[test_case("not a url"; "relative")]
    #[test_case("ftp://feed.test/stocks.json"; "unsupported scheme")]
    fn invalid_feed_url(url: &str) {
        assert!(matches!(
            config(&[("STOCKS_FEED_URL", url)]),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test_case("STOCKS_FEED_TIMEOUT_SECS", "0")]
    #[test_case("STOCKS_FEED_UTC_OFFSET_MINUTES", "1440")]
    #[test_case("STOCKS_FEED_UTC_OFFSET_MINUTES", "-1440")]
    fn out_of_range_values(key: &str, value: &str) {
        match config(&[FEED, (key, value)]) {
            Err(ConfigError::InvalidValue { key: actual, .. }) => assert_eq!(actual, key),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }
}

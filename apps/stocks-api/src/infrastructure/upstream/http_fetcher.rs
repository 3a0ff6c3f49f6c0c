//! HTTP feed fetcher.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{FeedFetcherPort, FetchError};
use crate::infrastructure::metrics::record_fetch_duration;

/// `User-Agent` sent with every upstream request.
pub const USER_AGENT: &str = concat!("stocks-api/", env!("CARGO_PKG_VERSION"));

/// Fetches the feed with a single HTTP GET per call.
#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFeedFetcher {
    /// Create a fetcher whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns the reqwest error if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Configured request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, location: &str, error: &reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                location: location.to_string(),
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            FetchError::Unreachable {
                location: location.to_string(),
                message: error.to_string(),
            }
        }
    }

    async fn get(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|e| self.classify(location, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.classify(location, &e))?;

        Ok(body.to_vec())
    }
}

#[async_trait]
impl FeedFetcherPort for HttpFeedFetcher {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(upstream = %location, "Fetching feed");

        let started = Instant::now();
        let result = self.get(location).await;
        record_fetch_duration(started.elapsed(), result.is_ok());

        match &result {
            Ok(body) => tracing::debug!(upstream = %location, bytes = body.len(), "Feed fetched"),
            Err(e) => tracing::warn!(upstream = %location, error = %e, "Feed fetch failed"),
        }

        result
    }
}

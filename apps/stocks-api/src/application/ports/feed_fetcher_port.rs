//! Feed Fetcher Port (Driven Port)
//!
//! Interface for retrieving the raw upstream feed.

use async_trait::async_trait;

/// Port for fetching the raw feed from an upstream location.
///
/// One attempt per call; implementations must not retry. Dropping the
/// returned future cancels the request and releases its connection.
#[async_trait]
pub trait FeedFetcherPort: Send + Sync {
    /// Fetch the full feed body from `location`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the upstream is unreachable, times out, or
    /// answers with a non-success status.
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError>;
}

/// Upstream fetch failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Connection, transport or body read failure.
    #[error("upstream {location} unreachable: {message}")]
    Unreachable {
        /// Upstream locator.
        location: String,
        /// Underlying cause.
        message: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("upstream {location} timed out after {timeout_ms}ms")]
    Timeout {
        /// Upstream locator.
        location: String,
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The upstream answered with a non-success status.
    #[error("upstream {location} returned status {status}")]
    Status {
        /// Upstream locator.
        location: String,
        /// HTTP status code.
        status: u16,
    },
}

impl FetchError {
    /// Upstream locator the failed request was sent to.
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            Self::Unreachable { location, .. }
            | Self::Timeout { location, .. }
            | Self::Status { location, .. } => location,
        }
    }
}

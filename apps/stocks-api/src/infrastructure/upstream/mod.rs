//! Upstream feed adapters.

mod http_fetcher;

pub use http_fetcher::{HttpFeedFetcher, USER_AGENT};

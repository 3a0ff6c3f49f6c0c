//! Get Stocks Use Case
//!
//! Per-request pipeline: resolve the format, fetch the feed, parse it,
//! check freshness against the client's copy, then render.

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};

use crate::application::format::Format;
use crate::application::ports::{
    FeedFetcherPort, FeedParserPort, FetchError, ParseError, RenderError, RendererPort,
};
use crate::error::ErrorCode;

/// Successful pipeline result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StocksOutcome {
    /// A freshly rendered snapshot.
    Fresh {
        /// Rendered document.
        body: Vec<u8>,
        /// Format the document was rendered in.
        format: Format,
        /// Snapshot as-of time, truncated to whole seconds.
        last_modified: DateTime<Utc>,
    },
    /// The client's copy is at least as recent as the snapshot.
    NotModified {
        /// Snapshot as-of time, truncated to whole seconds.
        last_modified: DateTime<Utc>,
    },
}

impl StocksOutcome {
    /// `Last-Modified` value for the response.
    #[must_use]
    pub const fn last_modified(&self) -> DateTime<Utc> {
        match self {
            Self::Fresh { last_modified, .. } | Self::NotModified { last_modified } => {
                *last_modified
            }
        }
    }
}

/// Pipeline failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StocksError {
    /// The request path does not name a served representation.
    #[error("unsupported format for path '{path}'")]
    UnsupportedFormat {
        /// Requested path.
        path: String,
    },

    /// Fetch stage failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Parse stage failed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Render stage failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl StocksError {
    /// Classify this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedFormat { .. } => ErrorCode::UnsupportedFormat,
            Self::Fetch(_) => ErrorCode::UpstreamUnavailable,
            Self::Parse(_) => ErrorCode::UpstreamDataInvalid,
            Self::Render(_) => ErrorCode::InternalError,
        }
    }
}

/// Use case serving the stocks snapshot.
pub struct GetStocksUseCase<F, P, R>
where
    F: FeedFetcherPort,
    P: FeedParserPort,
    R: RendererPort,
{
    fetcher: Arc<F>,
    parser: Arc<P>,
    renderer: Arc<R>,
    feed_url: String,
}

impl<F, P, R> GetStocksUseCase<F, P, R>
where
    F: FeedFetcherPort,
    P: FeedParserPort,
    R: RendererPort,
{
    /// Create a new `GetStocksUseCase` reading from `feed_url`.
    pub fn new(fetcher: Arc<F>, parser: Arc<P>, renderer: Arc<R>, feed_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            parser,
            renderer,
            feed_url: feed_url.into(),
        }
    }

    /// Upstream feed URL.
    #[must_use]
    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Serve the snapshot for `path`.
    ///
    /// `if_modified_since` is the client's already-parsed conditional
    /// header; `None` means the request is unconditional.
    ///
    /// # Errors
    ///
    /// Returns `StocksError` from the first failing stage. An unsupported
    /// path fails before the upstream is contacted.
    pub async fn execute(
        &self,
        path: &str,
        if_modified_since: Option<DateTime<Utc>>,
    ) -> Result<StocksOutcome, StocksError> {
        // 1. Determine format
        let format = Format::from_path(path).ok_or_else(|| StocksError::UnsupportedFormat {
            path: path.to_string(),
        })?;

        // 2. Fetch
        let feed = self.fetcher.fetch(&self.feed_url).await.inspect_err(|e| {
            tracing::warn!(format = %format, upstream = %self.feed_url, error = %e, "Feed fetch failed");
        })?;

        // 3. Parse
        let stocks = self.parser.parse(&mut feed.as_slice()).inspect_err(|e| {
            tracing::warn!(format = %format, upstream = %self.feed_url, error = %e, "Feed parse failed");
        })?;

        // 4. Check freshness
        let last_modified = stocks.as_of_utc().trunc_subsecs(0);
        if let Some(since) = if_modified_since
            && last_modified <= since
        {
            tracing::debug!(format = %format, %last_modified, "Snapshot not modified");
            return Ok(StocksOutcome::NotModified { last_modified });
        }

        // 5. Render
        let body = self.renderer.render(&stocks, format).inspect_err(|e| {
            tracing::error!(format = %format, upstream = %self.feed_url, error = %e, "Snapshot render failed");
        })?;

        tracing::debug!(
            format = %format,
            stocks = stocks.len(),
            bytes = body.len(),
            %last_modified,
            "Snapshot rendered"
        );

        Ok(StocksOutcome::Fresh {
            body,
            format,
            last_modified,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{FixedOffset, TimeZone};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::quotes::{Price, Stock, Stocks};

    const FEED_URL: &str = "http://upstream.test/feed.json";

    struct StubFetcher {
        result: Result<Vec<u8>, FetchError>,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn returning(result: Result<Vec<u8>, FetchError>) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FeedFetcherPort for StubFetcher {
        async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
            assert_eq!(location, FEED_URL);
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    /// Checks the fetched bytes arrive intact, then returns a canned result.
    struct StubParser {
        expected_feed: Vec<u8>,
        result: Result<Stocks, ParseError>,
        calls: AtomicUsize,
    }

    impl FeedParserPort for StubParser {
        fn parse(&self, feed: &mut dyn Read) -> Result<Stocks, ParseError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut bytes = Vec::new();
            feed.read_to_end(&mut bytes).unwrap();
            assert_eq!(bytes, self.expected_feed);
            self.result.clone()
        }
    }

    struct StubRenderer {
        fail: bool,
    }

    impl RendererPort for StubRenderer {
        fn render(&self, stocks: &Stocks, format: Format) -> Result<Vec<u8>, RenderError> {
            if self.fail {
                return Err(RenderError::Json("boom".to_string()));
            }
            Ok(format!("{format}:{}", stocks.len()).into_bytes())
        }
    }

    fn snapshot() -> Stocks {
        let as_of = FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2012, 10, 15, 15, 20, 0)
            .unwrap();
        Stocks::with_stocks(
            as_of,
            vec![Stock::new("A", "A", Price::new(dec!(100), "PHP"), dec!(0), 100)],
        )
    }

    fn as_of_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2012, 10, 15, 7, 20, 0).unwrap()
    }

    struct Harness {
        fetcher: Arc<StubFetcher>,
        parser: Arc<StubParser>,
        use_case: GetStocksUseCase<StubFetcher, StubParser, StubRenderer>,
    }

    fn harness(
        fetched: Result<Vec<u8>, FetchError>,
        parsed: Result<Stocks, ParseError>,
        render_fails: bool,
    ) -> Harness {
        let fetcher = Arc::new(StubFetcher::returning(fetched));
        let parser = Arc::new(StubParser {
            expected_feed: b"feed".to_vec(),
            result: parsed,
            calls: AtomicUsize::new(0),
        });
        let renderer = Arc::new(StubRenderer { fail: render_fails });
        let use_case =
            GetStocksUseCase::new(Arc::clone(&fetcher), Arc::clone(&parser), renderer, FEED_URL);
        Harness {
            fetcher,
            parser,
            use_case,
        }
    }

    fn healthy() -> Harness {
        harness(Ok(b"feed".to_vec()), Ok(snapshot()), false)
    }

    #[tokio::test]
    async fn renders_requested_format_with_last_modified() {
        let h = healthy();

        let outcome = h.use_case.execute("/stocks.json", None).await.unwrap();

        assert_eq!(
            outcome,
            StocksOutcome::Fresh {
                body: b"json:1".to_vec(),
                format: Format::Json,
                last_modified: as_of_utc(),
            }
        );
        assert_eq!(h.fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.parser.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unsupported_format_never_contacts_upstream() {
        let h = healthy();

        let err = h.use_case.execute("/stocks.csv", None).await.unwrap_err();

        assert_eq!(
            err,
            StocksError::UnsupportedFormat {
                path: "/stocks.csv".to_string()
            }
        );
        assert_eq!(err.code(), ErrorCode::UnsupportedFormat);
        assert_eq!(h.fetcher.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.parser.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fetch_failure_skips_parse() {
        let h = harness(
            Err(FetchError::Status {
                location: FEED_URL.to_string(),
                status: 500,
            }),
            Ok(snapshot()),
            false,
        );

        let err = h.use_case.execute("/stocks.xml", None).await.unwrap_err();

        assert!(matches!(err, StocksError::Fetch(_)));
        assert_eq!(err.code(), ErrorCode::UpstreamUnavailable);
        assert_eq!(h.parser.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn parse_failure_is_upstream_data_invalid() {
        let h = harness(Ok(b"feed".to_vec()), Err(ParseError::MissingAsOf), false);

        let err = h.use_case.execute("/stocks.xml", None).await.unwrap_err();

        assert_eq!(err, StocksError::Parse(ParseError::MissingAsOf));
        assert_eq!(err.code(), ErrorCode::UpstreamDataInvalid);
    }

    #[tokio::test]
    async fn render_failure_is_internal() {
        let h = harness(Ok(b"feed".to_vec()), Ok(snapshot()), true);

        let err = h.use_case.execute("/stocks.json", None).await.unwrap_err();

        assert!(matches!(err, StocksError::Render(_)));
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn not_modified_when_client_copy_is_current() {
        let h = healthy();

        let outcome = h
            .use_case
            .execute("/stocks.xml", Some(as_of_utc()))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            StocksOutcome::NotModified {
                last_modified: as_of_utc()
            }
        );
    }

    #[tokio::test]
    async fn not_modified_when_client_copy_is_newer() {
        let h = healthy();
        let since = as_of_utc() + chrono::Duration::hours(1);

        let outcome = h.use_case.execute("/stocks.xml", Some(since)).await.unwrap();

        assert!(matches!(outcome, StocksOutcome::NotModified { .. }));
    }

    #[tokio::test]
    async fn fresh_when_client_copy_is_older() {
        let h = healthy();
        let since = as_of_utc() - chrono::Duration::seconds(1);

        let outcome = h.use_case.execute("/stocks.xml", Some(since)).await.unwrap();

        assert!(matches!(outcome, StocksOutcome::Fresh { .. }));
        assert_eq!(outcome.last_modified(), as_of_utc());
    }

    #[tokio::test]
    async fn freshness_compares_whole_seconds() {
        let as_of = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2012, 10, 15, 7, 20, 0)
            .unwrap()
            + chrono::Duration::milliseconds(750);
        let h = harness(
            Ok(b"feed".to_vec()),
            Ok(Stocks::with_stocks(as_of, Vec::new())),
            false,
        );

        let outcome = h
            .use_case
            .execute("/stocks.json", Some(as_of_utc()))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            StocksOutcome::NotModified {
                last_modified: as_of_utc()
            }
        );
    }
}

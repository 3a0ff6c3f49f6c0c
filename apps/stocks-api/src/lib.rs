// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Stocks API - Market Snapshot Service
//!
//! Serves the latest stock quote snapshot from an upstream feed as XML or
//! JSON. Every request fetches and parses the feed afresh; the feed's as-of
//! time drives `Last-Modified` and `If-Modified-Since` handling.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: snapshot data types
//!   - `quotes`: `Stocks`, `Stock`, `Price`
//!
//! - **Application**: request pipeline and port definitions
//!   - `format`: the closed set of representation formats
//!   - `ports`: `FeedFetcherPort`, `FeedParserPort`, `RendererPort`
//!   - `use_cases`: `GetStocksUseCase`
//!
//! - **Infrastructure**: adapters and plumbing
//!   - `upstream`: reqwest-based feed fetcher
//!   - `parser`: PSE ticker feed parser
//!   - `render`: quick-xml and serde_json renderers
//!   - `http`: axum router, error responses, HTTP-date handling
//!   - `config`, `telemetry`, `metrics`
//!
//! # Request Flow
//!
//! ```text
//! GET /stocks.{xml,json}
//!   → Format::from_path ──(unknown)──► 404
//!   → FeedFetcherPort::fetch ──(err)──► 503
//!   → FeedParserPort::parse ──(err)──► 502
//!   → If-Modified-Since check ──(fresh)──► 304
//!   → RendererPort::render ──(err)──► 500
//!   → 200 + Content-Type + Last-Modified
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Snapshot types with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// Error codes shared by the pipeline and the HTTP adapter.
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::format::Format;
pub use application::ports::{
    FeedFetcherPort, FeedParserPort, FetchError, ParseError, RenderError, RendererPort,
};
pub use application::use_cases::{GetStocksUseCase, StocksError, StocksOutcome};
pub use domain::quotes::{Price, Stock, Stocks};
pub use error::ErrorCode;
pub use infrastructure::config::{ConfigError, ServiceConfig};
pub use infrastructure::http::{AppState, HttpServer, create_router};
pub use infrastructure::metrics::init_metrics;
pub use infrastructure::parser::PseFeedParser;
pub use infrastructure::render::FormatRenderer;
pub use infrastructure::upstream::HttpFeedFetcher;

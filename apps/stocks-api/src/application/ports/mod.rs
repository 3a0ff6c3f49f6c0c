//! Port Interfaces
//!
//! Contracts the request pipeline depends on. Infrastructure adapters
//! implement them; tests substitute their own doubles.
//!
//! ## Driven Ports (Outbound)
//!
//! - `FeedFetcherPort`: retrieves the raw upstream feed
//! - `FeedParserPort`: turns raw feed bytes into a `Stocks` snapshot
//! - `RendererPort`: serializes a snapshot into a requested format

mod feed_fetcher_port;
mod feed_parser_port;
mod renderer_port;

pub use feed_fetcher_port::{FeedFetcherPort, FetchError};
pub use feed_parser_port::{FeedParserPort, ParseError};
pub use renderer_port::{RenderError, RendererPort};

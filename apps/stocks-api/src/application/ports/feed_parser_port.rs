//! Feed Parser Port (Driven Port)
//!
//! Interface for turning the upstream's native feed into a snapshot.

use std::io::Read;

use crate::domain::quotes::Stocks;

/// Port for parsing a raw feed into a [`Stocks`] snapshot.
///
/// Parsing is all-or-nothing: any malformed entry fails the whole feed.
pub trait FeedParserPort: Send + Sync {
    /// Parse the feed read from `feed`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the feed is malformed, lacks a required
    /// field, or holds a value that does not coerce to its field type.
    fn parse(&self, feed: &mut dyn Read) -> Result<Stocks, ParseError>;
}

/// Feed parse failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The feed is not structurally valid (bad JSON, wrong shape, I/O).
    #[error("malformed feed: {0}")]
    Malformed(String),

    /// The feed has no as-of header entry.
    #[error("feed has no as-of header")]
    MissingAsOf,

    /// The as-of header is present but its timestamp does not parse.
    #[error("invalid as-of timestamp '{value}'")]
    InvalidTimestamp {
        /// Raw timestamp text.
        value: String,
    },

    /// A quote entry lacks a required field.
    #[error("entry {index}: missing field '{field}'")]
    MissingField {
        /// Zero-based position of the entry in the feed.
        index: usize,
        /// Feed field name.
        field: &'static str,
    },

    /// A quote entry holds a value that cannot be coerced.
    #[error("entry {index}: invalid {field} '{value}'")]
    InvalidValue {
        /// Zero-based position of the entry in the feed.
        index: usize,
        /// Feed field name.
        field: &'static str,
        /// Raw value.
        value: String,
    },
}

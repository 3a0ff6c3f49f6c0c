//! Snapshot aggregate.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use super::Stock;

/// A snapshot of quotes as of a single feed generation time.
///
/// `as_of` is required at construction, so a parsed snapshot always has one.
/// Stocks keep the order in which they were added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stocks {
    as_of: DateTime<FixedOffset>,
    stocks: Vec<Stock>,
}

impl Stocks {
    /// Create an empty snapshot.
    #[must_use]
    pub const fn new(as_of: DateTime<FixedOffset>) -> Self {
        Self {
            as_of,
            stocks: Vec::new(),
        }
    }

    /// Create a snapshot from an ordered list of stocks.
    #[must_use]
    pub const fn with_stocks(as_of: DateTime<FixedOffset>, stocks: Vec<Stock>) -> Self {
        Self { as_of, stocks }
    }

    /// Append a stock, keeping feed order.
    pub fn push(&mut self, stock: Stock) {
        self.stocks.push(stock);
    }

    /// Feed generation time, in the exchange's offset.
    #[must_use]
    pub const fn as_of(&self) -> DateTime<FixedOffset> {
        self.as_of
    }

    /// Feed generation time in UTC.
    #[must_use]
    pub fn as_of_utc(&self) -> DateTime<Utc> {
        self.as_of.with_timezone(&Utc)
    }

    /// Stocks in feed order.
    #[must_use]
    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    /// Number of stocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    /// Whether the snapshot has no stocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }
}

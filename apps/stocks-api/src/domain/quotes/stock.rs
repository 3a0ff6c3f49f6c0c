//! Single instrument quote.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Price;

/// One instrument in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    /// Short identifier (e.g. "ALI").
    pub symbol: String,
    /// Display name (e.g. "Ayala Land").
    pub name: String,
    /// Last traded price.
    pub price: Price,
    /// Signed percent change from the previous close.
    #[serde(with = "rust_decimal::serde::str")]
    pub percent_change: Decimal,
    /// Traded volume.
    pub volume: u64,
}

impl Stock {
    /// Create a new stock quote.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        price: Price,
        percent_change: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price,
            percent_change,
            volume,
        }
    }
}

//! Philippine Stock Exchange ticker feed parser.
//!
//! The feed is a JSON array. Its first element is a header row whose
//! `securitySymbol` holds the as-of time in exchange-local
//! `MM/DD/YYYY hh:mm AM|PM`; every following element is one quote.
//!
//! ```text
//! [
//!   {"securityAlias": "Stock Update As of", "securitySymbol": "10/15/2012 03:20 PM", ...},
//!   {"securityAlias": "Ayala Land", "securitySymbol": "ALI",
//!    "lastTradedPrice": "21.50", "percChangeClose": "-1.15", "totalVolume": "12,345,600"}
//! ]
//! ```

use std::io::Read;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::ports::{FeedParserPort, ParseError};
use crate::domain::quotes::{Price, Stock, Stocks};

/// `securityAlias` of the header row.
pub const AS_OF_ALIAS: &str = "Stock Update As of";

const AS_OF_FORMAT: &str = "%m/%d/%Y %I:%M %p";
const DEFAULT_CURRENCY: &str = "PHP";
const DEFAULT_UTC_OFFSET_SECS: i32 = 8 * 3600;

// Feed field names
const SYMBOL: &str = "securitySymbol";
const NAME: &str = "securityAlias";
const PRICE: &str = "lastTradedPrice";
const PERCENT_CHANGE: &str = "percChangeClose";
const VOLUME: &str = "totalVolume";

/// A feed value. Only strings carry exact text; bare JSON numbers have
/// already been through `f64` and are rejected.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(serde_json::Number),
}

impl RawValue {
    /// Trimmed text of a string value, or the token of a non-string one.
    fn into_text(self) -> Result<String, String> {
        match self {
            Self::Text(text) => Ok(text.trim().to_string()),
            Self::Number(number) => Err(number.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    security_symbol: Option<RawValue>,
    security_alias: Option<RawValue>,
    last_traded_price: Option<RawValue>,
    perc_change_close: Option<RawValue>,
    total_volume: Option<RawValue>,
}

/// Parser for the PSE ticker feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PseFeedParser {
    currency: String,
    utc_offset: FixedOffset,
}

impl Default for PseFeedParser {
    fn default() -> Self {
        let utc_offset = FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
        Self::new(DEFAULT_CURRENCY, utc_offset)
    }
}

impl PseFeedParser {
    /// Create a parser attaching `currency` to every price and reading the
    /// as-of time in `utc_offset`.
    pub fn new(currency: impl Into<String>, utc_offset: FixedOffset) -> Self {
        Self {
            currency: currency.into(),
            utc_offset,
        }
    }

    /// Currency attached to prices.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Exchange offset used for the as-of time.
    #[must_use]
    pub const fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    fn parse_as_of(&self, header: Option<RawEntry>) -> Result<DateTime<FixedOffset>, ParseError> {
        let header = header.ok_or(ParseError::MissingAsOf)?;

        let alias = header.security_alias.and_then(|alias| alias.into_text().ok());
        if alias.as_deref() != Some(AS_OF_ALIAS) {
            return Err(ParseError::MissingAsOf);
        }

        let value = header
            .security_symbol
            .ok_or(ParseError::MissingAsOf)?
            .into_text()
            .map_err(|value| ParseError::InvalidTimestamp { value })?;

        NaiveDateTime::parse_from_str(&value, AS_OF_FORMAT)
            .ok()
            .and_then(|local| local.and_local_timezone(self.utc_offset).single())
            .ok_or(ParseError::InvalidTimestamp { value })
    }

    fn parse_stock(&self, index: usize, entry: RawEntry) -> Result<Stock, ParseError> {
        let symbol = required(index, SYMBOL, entry.security_symbol)?;
        let name = required(index, NAME, entry.security_alias)?;

        let amount = parse_decimal(index, PRICE, required(index, PRICE, entry.last_traded_price)?)?;
        let percent_change = parse_decimal(
            index,
            PERCENT_CHANGE,
            required(index, PERCENT_CHANGE, entry.perc_change_close)?,
        )?;
        let volume = parse_volume(index, required(index, VOLUME, entry.total_volume)?)?;

        Ok(Stock::new(
            symbol,
            name,
            Price::new(amount, self.currency.clone()),
            percent_change,
            volume,
        ))
    }
}

impl FeedParserPort for PseFeedParser {
    fn parse(&self, feed: &mut dyn Read) -> Result<Stocks, ParseError> {
        let entries: Vec<RawEntry> =
            serde_json::from_reader(feed).map_err(|e| ParseError::Malformed(e.to_string()))?;

        let mut entries = entries.into_iter().enumerate();
        let as_of = self.parse_as_of(entries.next().map(|(_, header)| header))?;

        let mut stocks = Stocks::new(as_of);
        for (index, entry) in entries {
            stocks.push(self.parse_stock(index, entry)?);
        }

        tracing::debug!(stocks = stocks.len(), as_of = %stocks.as_of(), "Feed parsed");
        Ok(stocks)
    }
}

fn required(index: usize, field: &'static str, value: Option<RawValue>) -> Result<String, ParseError> {
    value
        .ok_or(ParseError::MissingField { index, field })?
        .into_text()
        .map_err(|value| ParseError::InvalidValue { index, field, value })
}

/// Exact decimal. `_` separators and values that would need rounding fail.
fn parse_decimal(index: usize, field: &'static str, value: String) -> Result<Decimal, ParseError> {
    if value.contains('_') {
        return Err(ParseError::InvalidValue { index, field, value });
    }

    Decimal::from_str_exact(&value).map_err(|_| ParseError::InvalidValue { index, field, value })
}

fn parse_volume(index: usize, value: String) -> Result<u64, ParseError> {
    ungroup(&value)
        .and_then(|digits| digits.parse::<u64>().ok())
        .ok_or(ParseError::InvalidValue {
            index,
            field: VOLUME,
            value,
        })
}

/// Digits of `value` with `,` thousands separators removed. Grouped values
/// need a leading group of one to three digits and three digits per group
/// after it.
fn ungroup(value: &str) -> Option<String> {
    let mut groups = value.split(',');
    let lead = groups.next().filter(|lead| is_digits(lead))?;
    if lead.len() > 3 && value.contains(',') {
        return None;
    }

    let mut digits = lead.to_string();
    for group in groups {
        if group.len() != 3 || !is_digits(group) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

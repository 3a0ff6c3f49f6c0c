//! Shared helpers for integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use quick_xml::Reader;
use quick_xml::events::Event;

/// Header row of a PSE feed generated at 2012-10-15 15:20 (+08:00).
pub const PSE_HEADER: &str = r#"{"securityAlias": "Stock Update As of", "securitySymbol": "10/15/2012 03:20 PM", "lastTradedPrice": "", "percChangeClose": "", "totalVolume": "", "indicator": ""}"#;

/// `Last-Modified` for [`PSE_HEADER`].
pub const PSE_LAST_MODIFIED: &str = "Mon, 15 Oct 2012 07:20:00 GMT";

/// One-stock feed: `A`, `A`, 100 PHP, 0%, volume 100.
pub fn single_stock_feed() -> String {
    format!(
        r#"[{PSE_HEADER},{{"securityAlias": "A", "securitySymbol": "A", "lastTradedPrice": "100", "percChangeClose": "0", "totalVolume": "100", "indicator": "U"}}]"#
    )
}

/// Stock fields as read back from a rendered document, all as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockFields {
    pub symbol: String,
    pub name: String,
    pub amount: String,
    pub currency: String,
    pub percent_change: String,
    pub volume: String,
}

/// Read an XML snapshot back into its `asOf` attribute and stock fields.
pub fn read_xml(document: &[u8]) -> (String, Vec<StockFields>) {
    let mut reader = Reader::from_reader(document);
    let mut buf = Vec::new();

    let mut as_of = String::new();
    let mut stocks = Vec::new();
    let mut current: Option<StockFields> = None;
    let mut open: Vec<String> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).unwrap() {
            Event::Start(e) => {
                let name = String::from_utf8(e.local_name().as_ref().to_vec()).unwrap();
                match name.as_str() {
                    "stocks" => {
                        for attr in e.attributes() {
                            let attr = attr.unwrap();
                            if attr.key.as_ref() == b"asOf" {
                                as_of = attr.unescape_value().unwrap().into_owned();
                            }
                        }
                    }
                    "stock" => current = Some(StockFields::default()),
                    _ => {}
                }
                open.push(name);
            }
            Event::End(_) => {
                if open.pop().as_deref() == Some("stock") {
                    stocks.push(current.take().unwrap());
                }
            }
            Event::Text(t) => {
                let text = t.unescape().unwrap().into_owned();
                if let Some(stock) = current.as_mut() {
                    let field = match open.last().map(String::as_str) {
                        Some("symbol") => &mut stock.symbol,
                        Some("name") => &mut stock.name,
                        Some("amount") => &mut stock.amount,
                        Some("currency") => &mut stock.currency,
                        Some("percentChange") => &mut stock.percent_change,
                        Some("volume") => &mut stock.volume,
                        other => panic!("unexpected text in {other:?}"),
                    };
                    field.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    (as_of, stocks)
}

//! Snapshot renderers.
//!
//! [`FormatRenderer`] is the `RendererPort` adapter; it hands the snapshot
//! to the renderer for the requested format.

mod json;
mod xml;

pub use json::JsonRenderer;
pub use xml::XmlRenderer;

use crate::application::format::Format;
use crate::application::ports::{RenderError, RendererPort};
use crate::domain::quotes::Stocks;

/// Dispatches rendering to the XML or JSON renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatRenderer {
    xml: XmlRenderer,
    json: JsonRenderer,
}

impl FormatRenderer {
    /// Create a renderer for all supported formats.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            xml: XmlRenderer,
            json: JsonRenderer,
        }
    }
}

impl RendererPort for FormatRenderer {
    fn render(&self, stocks: &Stocks, format: Format) -> Result<Vec<u8>, RenderError> {
        match format {
            Format::Xml => self.xml.render(stocks),
            Format::Json => self.json.render(stocks),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::quotes::{Price, Stock};

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

    #[test]
    fn dispatches_by_format() {
        let renderer = FormatRenderer::new();
        let stocks = snapshot();

        let xml = renderer.render(&stocks, Format::Xml).unwrap();
        let json = renderer.render(&stocks, Format::Json).unwrap();

        assert!(xml.starts_with(b"<?xml"));
        assert!(json.starts_with(b"{"));
        assert_eq!(xml, XmlRenderer.render(&stocks).unwrap());
        assert_eq!(json, JsonRenderer.render(&stocks).unwrap());
    }
}

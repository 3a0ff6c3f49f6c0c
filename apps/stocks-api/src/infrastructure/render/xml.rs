//! XML renderer.
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <stocks asOf="2012-10-15T15:20:00+08:00">
//!   <stock>
//!     <symbol>ALI</symbol>
//!     <name>Ayala Land</name>
//!     <price><amount>21.50</amount><currency>PHP</currency></price>
//!     <percentChange>-1.15</percentChange>
//!     <volume>12345600</volume>
//!   </stock>
//! </stocks>
//! ```
//!
//! The document is written without indentation.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::application::ports::RenderError;
use crate::domain::quotes::{Stock, Stocks};

/// Renders a snapshot as an XML document.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlRenderer;

impl XmlRenderer {
    /// Render `stocks` as an XML document.
    pub fn render(self, stocks: &Stocks) -> Result<Vec<u8>, RenderError> {
        let mut writer = Writer::new(Vec::new());
        write_document(&mut writer, stocks)?;
        Ok(writer.into_inner())
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), RenderError> {
    writer
        .write_event(event)
        .map_err(|e| RenderError::Xml(e.to_string()))
}

fn write_document(writer: &mut Writer<Vec<u8>>, stocks: &Stocks) -> Result<(), RenderError> {
    emit(writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let as_of = stocks.as_of().to_rfc3339();
    let mut root = BytesStart::new("stocks");
    root.push_attribute(("asOf", as_of.as_str()));
    emit(writer, Event::Start(root))?;

    for stock in stocks.stocks() {
        write_stock(writer, stock)?;
    }

    emit(writer, Event::End(BytesEnd::new("stocks")))
}

fn write_stock(writer: &mut Writer<Vec<u8>>, stock: &Stock) -> Result<(), RenderError> {
    emit(writer, Event::Start(BytesStart::new("stock")))?;

    write_text_element(writer, "symbol", &stock.symbol)?;
    write_text_element(writer, "name", &stock.name)?;

    emit(writer, Event::Start(BytesStart::new("price")))?;
    write_text_element(writer, "amount", &stock.price.amount.to_string())?;
    write_text_element(writer, "currency", &stock.price.currency)?;
    emit(writer, Event::End(BytesEnd::new("price")))?;

    write_text_element(writer, "percentChange", &stock.percent_change.to_string())?;
    write_text_element(writer, "volume", &stock.volume.to_string())?;

    emit(writer, Event::End(BytesEnd::new("stock")))
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), RenderError> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

//! Renderer Port (Driven Port)
//!
//! Interface for serializing a snapshot into a wire format.

use crate::application::format::Format;
use crate::domain::quotes::Stocks;

/// Port for rendering a snapshot in one of the supported formats.
///
/// The returned buffer is complete; nothing is written to the client
/// until rendering has succeeded.
pub trait RendererPort: Send + Sync {
    /// Render `stocks` as `format`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the serializer fails.
    fn render(&self, stocks: &Stocks, format: Format) -> Result<Vec<u8>, RenderError>;
}

/// Rendering failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// XML writer failure.
    #[error("XML rendering failed: {0}")]
    Xml(String),

    /// JSON serializer failure.
    #[error("JSON rendering failed: {0}")]
    Json(String),
}

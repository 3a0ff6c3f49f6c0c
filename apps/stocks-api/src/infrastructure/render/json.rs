//! JSON renderer.

use crate::application::ports::RenderError;
use crate::domain::quotes::Stocks;

/// Renders a snapshot as `{"asOf": ..., "stocks": [...]}`.
///
/// Decimals are emitted as strings holding the exact decimal text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    /// Render `stocks` as a JSON document.
    pub fn render(self, stocks: &Stocks) -> Result<Vec<u8>, RenderError> {
        serde_json::to_vec(stocks).map_err(|e| RenderError::Json(e.to_string()))
    }
}

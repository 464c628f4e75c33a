//! JSON renderer: the assembled model, for tooling and diffing.

use crate::error::{Error, Result};
use crate::model::Document;
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &Document) -> Result<String> {
        let mut out = serde_json::to_string_pretty(doc).map_err(|e| Error::Render(e.to_string()))?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

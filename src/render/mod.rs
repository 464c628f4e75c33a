//! Renderer module: trait-based format dispatch.

pub mod go;
pub mod json;

use crate::error::{Error, Result};
use crate::model::Document;
use crate::GenerateOptions;

/// Trait for rendering an assembled Document into an output format.
pub trait Renderer {
    fn render(&self, doc: &Document) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str, opts: &GenerateOptions) -> Result<Box<dyn Renderer>> {
    match format {
        "go" => Ok(Box::new(go::GoRenderer { width: opts.width })),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(Error::UnknownFormat(format.to_string())),
    }
}

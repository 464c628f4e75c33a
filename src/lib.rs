//! gtkdoc-scaffold: generate ctk source scaffolding from GTK2 reference
//! documentation pages.
//!
//! The pipeline is `source` (fetch or read) → `parser` (locate sections and
//! extract) → `assemble` (defaults and bodies) → `render` (Go or JSON).

pub mod assemble;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod source;
pub mod text;
pub mod types;

pub use error::{Error, Result};

/// Default comment wrap column.
pub const DEFAULT_WIDTH: usize = 76;

/// Run options shared by every pipeline stage.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Target package the source is generated into.
    pub package: String,
    /// Keep properties, signals and functions marked deprecated.
    pub include_deprecated: bool,
    /// Comment wrap column.
    pub width: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            package: types::TOOLKIT_PACKAGE.to_string(),
            include_deprecated: false,
            width: DEFAULT_WIDTH,
        }
    }
}

/// Generated output for one page, with the names needed to place it.
#[derive(Debug)]
pub struct Generated {
    /// Underscore-delimited type name, used as the file stem.
    pub flat: String,
    pub extension: String,
    pub contents: String,
}

/// Assemble `html` and render it in `format`.
pub fn generate(html: &str, format: &str, opts: &GenerateOptions) -> Result<Generated> {
    let renderer = render::create_renderer(format, opts)?;
    let doc = assemble::assemble(html, opts)?;
    let contents = renderer.render(&doc)?;
    Ok(Generated {
        flat: doc.flat,
        extension: renderer.file_extension().to_string(),
        contents,
    })
}

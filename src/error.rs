//! Error taxonomy for a generation run.
//!
//! Extraction gaps are never errors; only input, rendering and output
//! failures abort the run.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no input given: pass a documentation page name, --url or --file")]
    MissingInput,

    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse document: {0}")]
    Parse(String),

    #[error("failed to render: {0}")]
    Render(String),

    #[error("unknown format: {0}. Use go or json")]
    UnknownFormat(String),

    #[error("{} already exists, use --force to overwrite", .0.display())]
    OutputExists(PathBuf),

    #[error("output directory does not exist: {}", .0.display())]
    OutputDir(PathBuf),

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

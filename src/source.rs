//! Input acquisition: a documentation page fetched over HTTP or read from
//! disk.

use crate::error::{Error, Result};
use log::info;
use std::fs;
use std::path::Path;

/// Documentation site the bare page names resolve against.
pub const DEFAULT_URL_TEMPLATE: &str = "https://developer.gnome.org/gtk2/stable/{name}.html";

const NAME_PLACEHOLDER: &str = "{name}";

/// Where the page comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Url(String),
    File(std::path::PathBuf),
}

/// Expand a page identifier into a URL. Identifiers that already are
/// URLs pass through untouched.
pub fn resolve_url(identifier: &str, template: &str) -> String {
    let identifier = identifier.trim();
    if identifier.starts_with("http://") || identifier.starts_with("https://") {
        return identifier.to_string();
    }
    template.replace(NAME_PLACEHOLDER, identifier)
}

/// Classify a positional argument: an existing path is a file, anything
/// else names a page.
pub fn classify(arg: &str, template: &str) -> Input {
    if Path::new(arg).exists() {
        Input::File(arg.into())
    } else {
        Input::Url(resolve_url(arg, template))
    }
}

/// Load the page's HTML.
pub fn load(input: &Input) -> Result<String> {
    match input {
        Input::Url(url) => fetch(url),
        Input::File(path) => {
            info!("reading {}", path.display());
            fs::read_to_string(path).map_err(|source| Error::Read {
                path: path.clone(),
                source,
            })
        }
    }
}

fn fetch(url: &str) -> Result<String> {
    info!("fetching {}", url);
    let response = ureq::get(url).call().map_err(|e| Error::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    response.into_string().map_err(|e| Error::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })
}

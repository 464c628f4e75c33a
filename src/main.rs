//! gtkdoc-scaffold: turn a GTK2 reference page into ctk source scaffolding.
//!
//! ```text
//! gtkdoc-scaffold GtkButton                  # fetch, print to stdout
//! gtkdoc-scaffold --file GtkButton.html -o ctk/   # write ctk/button.go
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use gtkdoc_scaffold::source::{self, Input};
use gtkdoc_scaffold::{Error, GenerateOptions, Generated};
use log::{info, LevelFilter};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "gtkdoc-scaffold",
    about = "Generate ctk source scaffolding from GTK2 reference documentation"
)]
struct Cli {
    /// Page name (GtkButton), URL, or path to a local HTML file
    input: Option<String>,

    /// Fetch this page name or URL
    #[arg(long, conflicts_with_all = ["file", "input"])]
    url: Option<String>,

    /// Read this local HTML file
    #[arg(long, conflicts_with = "input")]
    file: Option<PathBuf>,

    /// Target package name
    #[arg(long, default_value = gtkdoc_scaffold::types::TOOLKIT_PACKAGE)]
    package: String,

    /// Keep deprecated properties, signals and functions
    #[arg(long)]
    include_deprecated: bool,

    /// Output file or directory (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(long)]
    force: bool,

    /// Output format: go (default), json
    #[arg(short = 'f', long, default_value = "go")]
    format: String,

    /// Column at which comments wrap
    #[arg(long, default_value_t = gtkdoc_scaffold::DEFAULT_WIDTH)]
    width: usize,

    /// URL template for page names; {name} is replaced
    #[arg(long, default_value = source::DEFAULT_URL_TEMPLATE)]
    url_template: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let input = select_input(&cli)?;
    let html = source::load(&input)?;

    let opts = GenerateOptions {
        package: cli.package.clone(),
        include_deprecated: cli.include_deprecated,
        width: cli.width,
    };
    let generated = gtkdoc_scaffold::generate(&html, &cli.format, &opts)
        .with_context(|| format!("failed to generate from {}", describe(&input)))?;

    match cli.output.as_deref() {
        None => print!("{}", generated.contents),
        Some(output) => {
            let path = target_path(output, &generated, cli.force)?;
            fs::write(&path, &generated.contents).map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;
            info!("wrote {}", path.display());
        }
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise each `-v` raises the level from warn.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn select_input(cli: &Cli) -> Result<Input, Error> {
    if let Some(url) = &cli.url {
        return Ok(Input::Url(source::resolve_url(url, &cli.url_template)));
    }
    if let Some(file) = &cli.file {
        return Ok(Input::File(file.clone()));
    }
    match &cli.input {
        Some(arg) => Ok(source::classify(arg, &cli.url_template)),
        None => Err(Error::MissingInput),
    }
}

fn describe(input: &Input) -> String {
    match input {
        Input::Url(url) => url.clone(),
        Input::File(path) => path.display().to_string(),
    }
}

/// Resolve where output goes. A directory receives `<flat>.<ext>`; an
/// existing file is only replaced with `force`.
fn target_path(output: &Path, generated: &Generated, force: bool) -> Result<PathBuf, Error> {
    let path = if output.is_dir() {
        output.join(format!("{}.{}", generated.flat, generated.extension))
    } else {
        if output.to_string_lossy().ends_with(std::path::MAIN_SEPARATOR) {
            return Err(Error::OutputDir(output.to_path_buf()));
        }
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(Error::OutputDir(parent.to_path_buf()));
            }
        }
        output.to_path_buf()
    };
    if path.exists() && !force {
        return Err(Error::OutputExists(path));
    }
    Ok(path)
}

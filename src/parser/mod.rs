//! Documentation page parser: locate sections, run one extractor per
//! section against a fresh [`Document`].
//!
//! Extractors never fail: sub-structure they do not recognise is skipped.
//! The only parse error is a page that does not name its type.

pub mod description;
pub mod functions;
pub mod hierarchy;
pub mod interfaces;
pub mod locator;
pub mod properties;
pub mod signals;

use crate::error::{Error, Result};
use crate::model::Document;
use crate::text;
use crate::GenerateOptions;
use locator::SectionKind;
use log::{debug, info};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;

static SEL_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.refentrytitle, title").unwrap());

static SEL_HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").unwrap());

static SEL_CODE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("pre.programlisting, pre").unwrap());

static SEL_WARNING_TEXT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

static SEL_ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

static SEL_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

static RE_TYPE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").unwrap());

// "Flags: Read / Write", "Default value: FALSE", "Since: 2.4"
static RE_TAG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(Flags|Default value|Allowed values|Since|Owner|Returns)\s*:\s*(.*)$").unwrap()
});

// -- Public API ---------------------------------------------------------------

/// Parse a gtk-doc page into an unassembled [`Document`].
pub fn parse(html: &str, opts: &GenerateOptions) -> Result<Document> {
    let page = Html::parse_document(html);
    let prefixed = type_name(&page)
        .ok_or_else(|| Error::Parse("page does not name a documented type".to_string()))?;
    info!("parsing documentation for {}", prefixed);

    let mut doc = Document::new(&prefixed, &opts.package);
    let sections = locator::locate(&page);

    for kind in SectionKind::ALL {
        let Some(section) = sections.get(kind) else {
            debug!("no {} section, skipping", kind);
            continue;
        };
        debug!("extracting {}", kind);
        match kind {
            SectionKind::Hierarchy => hierarchy::extract(&mut doc, section),
            SectionKind::Interfaces => interfaces::extract(&mut doc, section),
            SectionKind::Description => description::extract(&mut doc, section, opts),
            SectionKind::PropertyDetails => properties::extract(&mut doc, section, opts),
            SectionKind::SignalDetails => signals::extract(&mut doc, section, opts),
            SectionKind::FunctionDetails => functions::extract(&mut doc, section, opts),
        }
    }

    Ok(doc)
}

/// The prefixed type name (`GtkButton`) from the page title.
fn type_name(page: &Html) -> Option<String> {
    page.select(&SEL_TITLE).find_map(|el| {
        let title = element_text(el);
        let first = title.split_whitespace().next()?;
        let first = text::strip_quotes(first).trim_end_matches(':');
        RE_TYPE_NAME.is_match(first).then(|| first.to_string())
    })
}

// -- Shared helpers for extractors --------------------------------------------

/// Visible text of an element as plain prose. Markup that leaked into the
/// text as escaped tags is dropped as well.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    text::strip_markup(&el.text().collect::<String>())
}

/// Raw text of an element, line structure preserved.
pub(crate) fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

pub(crate) fn heading(block: ElementRef<'_>) -> Option<String> {
    block.select(&SEL_HEADING).next().map(element_text)
}

pub(crate) fn code_block(block: ElementRef<'_>) -> Option<ElementRef<'_>> {
    block.select(&SEL_CODE).next()
}

fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Deprecation notice of a block, if it carries one.
pub(crate) fn deprecation(block: ElementRef<'_>) -> Option<String> {
    block
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| has_class(*el, "warning"))
        .find_map(|warning| {
            let body: Vec<String> = warning.select(&SEL_WARNING_TEXT).map(element_text).collect();
            let body = if body.is_empty() {
                element_text(warning)
            } else {
                body.join(" ")
            };
            body.to_lowercase()
                .contains("deprecated")
                .then(|| text::rewrite_family_names(&body))
        })
}

/// A documentation paragraph: either a `Label: value` tag line or prose.
#[derive(Debug, PartialEq)]
pub(crate) enum Paragraph {
    Tag(String, String),
    Prose(String),
}

/// Direct `<p>` children of a block, classified.
pub(crate) fn paragraphs(block: ElementRef<'_>) -> Vec<Paragraph> {
    block
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "p")
        .filter_map(|el| {
            let t = element_text(el);
            if t.is_empty() {
                return None;
            }
            if has_class(el, "since") {
                let version = t.trim_start_matches("Since").trim_start_matches(':').trim();
                return Some(Paragraph::Tag("Since".to_string(), version.to_string()));
            }
            Some(match RE_TAG_LINE.captures(&t) {
                Some(caps) => Paragraph::Tag(caps[1].to_string(), caps[2].trim().to_string()),
                None => Paragraph::Prose(t),
            })
        })
        .collect()
}

/// Prose paragraphs only, family names rewritten.
pub(crate) fn prose(block: ElementRef<'_>) -> Vec<String> {
    paragraphs(block)
        .into_iter()
        .filter_map(|p| match p {
            Paragraph::Prose(t) => Some(text::rewrite_family_names(&t)),
            Paragraph::Tag(..) => None,
        })
        .collect()
}

/// `name → description` rows of a block's parameter table.
pub(crate) fn notes_table(block: ElementRef<'_>) -> HashMap<String, String> {
    let mut notes = HashMap::new();
    for row in block.select(&SEL_ROW) {
        let cells: Vec<String> = row.select(&SEL_CELL).map(element_text).collect();
        if cells.len() < 2 {
            continue;
        }
        let name = cells[0].trim_end_matches(':').trim().to_string();
        if !name.is_empty() {
            notes.insert(name, text::rewrite_family_names(&cells[1]));
        }
    }
    notes
}

/// Split one C parameter declaration into `(type, name)`:
/// `const gchar *label` → `("const gchar *", "label")`.
/// A lone token (`void`) yields an empty name.
pub(crate) fn split_c_param(decl: &str) -> Option<(String, String)> {
    let decl = text::collapse_whitespace(decl);
    let mut tokens: Vec<&str> = decl.split_whitespace().collect();
    let last = tokens.pop()?;
    if tokens.is_empty() {
        return Some((last.to_string(), String::new()));
    }
    let name = last.trim_start_matches('*');
    let stars = last.len() - name.len();
    let mut ty = tokens.join(" ");
    if stars > 0 {
        ty.push(' ');
        ty.push_str(&"*".repeat(stars));
    }
    Some((ty, name.trim_end_matches("[]").to_string()))
}

/// A C type with qualifiers and pointer sigils removed: `GtkButton`.
pub(crate) fn base_type(ty: &str) -> String {
    ty.replace('*', " ")
        .split_whitespace()
        .filter(|w| *w != "const")
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join prose and an optional deprecation notice into a comment block.
pub(crate) fn docs_with_notice(prose: Vec<String>, notice: Option<String>, width: usize) -> String {
    let mut paras = prose;
    if let Some(notice) = notice {
        paras.push(format!("Deprecated: {}", notice));
    }
    text::comment_block(&paras.join("\n\n"), width)
}

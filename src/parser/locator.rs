//! Section locator: maps each documentation section kind to its sub-tree.
//!
//! gtk-doc marks every top-level section with a named anchor
//! (`<a name="GtkButton.property-details">`) inside a `div.refsect1`.
//! Extractors receive the located sub-tree and never descend the page
//! themselves.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

static SEL_REFSECT1: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.refsect1").unwrap());

static SEL_NAMED_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[name]").unwrap());

static SEL_REFSECT2: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.refsect2").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hierarchy,
    Interfaces,
    Description,
    PropertyDetails,
    SignalDetails,
    FunctionDetails,
}

impl SectionKind {
    /// Extraction order. Properties and signals must precede functions.
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Hierarchy,
        SectionKind::Interfaces,
        SectionKind::Description,
        SectionKind::PropertyDetails,
        SectionKind::SignalDetails,
        SectionKind::FunctionDetails,
    ];

    /// Kind for an anchor suffix (the part after the last `.`).
    pub fn from_anchor(suffix: &str) -> Option<Self> {
        match suffix {
            "object-hierarchy" => Some(SectionKind::Hierarchy),
            "implemented-interfaces" => Some(SectionKind::Interfaces),
            "description" => Some(SectionKind::Description),
            "property-details" => Some(SectionKind::PropertyDetails),
            "signal-details" => Some(SectionKind::SignalDetails),
            "details" => Some(SectionKind::FunctionDetails),
            _ => None,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionKind::Hierarchy => "object hierarchy",
            SectionKind::Interfaces => "implemented interfaces",
            SectionKind::Description => "description",
            SectionKind::PropertyDetails => "property details",
            SectionKind::SignalDetails => "signal details",
            SectionKind::FunctionDetails => "function details",
        };
        f.write_str(name)
    }
}

/// Located sections of one page. The first section of each kind wins.
pub struct Sections<'a> {
    found: HashMap<SectionKind, ElementRef<'a>>,
}

impl<'a> Sections<'a> {
    pub fn get(&self, kind: SectionKind) -> Option<ElementRef<'a>> {
        self.found.get(&kind).copied()
    }

    pub fn len(&self) -> usize {
        self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }
}

/// Index every labelled top-level section of the page.
pub fn locate(page: &Html) -> Sections<'_> {
    let mut found = HashMap::new();
    for section in page.select(&SEL_REFSECT1) {
        let Some(anchor) = section.select(&SEL_NAMED_ANCHOR).next() else {
            continue;
        };
        let name = anchor.value().attr("name").unwrap_or_default();
        let suffix = name.rsplit('.').next().unwrap_or(name);
        match SectionKind::from_anchor(suffix) {
            Some(kind) => {
                found.entry(kind).or_insert(section);
            }
            None => log::debug!("ignoring section anchor {}", name),
        }
    }
    Sections { found }
}

/// The `div.refsect2` blocks of a section, in document order.
pub fn sub_blocks<'a>(section: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    section.select(&SEL_REFSECT2).collect()
}

//! Implemented interfaces extractor.

use super::element_text;
use crate::model::Document;
use crate::text;
use log::debug;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

static SEL_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p a, a.link").unwrap());

pub fn extract(doc: &mut Document, section: ElementRef<'_>) {
    for link in section.select(&SEL_LINK) {
        let name = element_text(link);
        let name = text::deprefix(text::strip_quotes(&name));
        if name == doc.name {
            continue;
        }
        debug!("implements {}", name);
        doc.add_interface(name);
    }
}

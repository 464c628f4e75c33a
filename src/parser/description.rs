//! Description extractor: page prose to a wrapped comment block.

use super::element_text;
use crate::model::Document;
use crate::text;
use crate::GenerateOptions;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

static SEL_PARA: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

pub fn extract(doc: &mut Document, section: ElementRef<'_>, opts: &GenerateOptions) {
    let paras: Vec<String> = section
        .select(&SEL_PARA)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .map(|t| text::rewrite_family_names(&t.replace(&doc.prefixed, &doc.name)))
        .collect();
    // empty when the section had no prose at all
    doc.description = text::comment_block(&paras.join("\n\n"), opts.width);
}

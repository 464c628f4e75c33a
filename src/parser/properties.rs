//! Property details extractor.
//!
//! Each `div.refsect2` documents one property:
//!
//! ```text
//! The "focus-on-click" property
//!   "focus-on-click"   gboolean   : Read / Write
//! Whether the button grabs focus when it is clicked with the mouse.
//! Default value: TRUE
//! ```

use super::{code_block, deprecation, docs_with_notice, element_text, heading, paragraphs, Paragraph};
use crate::model::{DefaultValue, Document, Property};
use crate::text;
use crate::types;
use crate::GenerateOptions;
use log::{debug, warn};
use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

// The "label" property / The “label” property
static RE_QUOTED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["\x{201c}]([^"\x{201d}]+)["\x{201d}]"#).unwrap());

// "label"   gchar*   : Read / Write / Construct
static RE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^["\x{201c}][^"\x{201d}]+["\x{201d}]\s+(.+?)\s*:\s*(.*)$"#).unwrap()
});

pub fn extract(doc: &mut Document, section: ElementRef<'_>, opts: &GenerateOptions) {
    for block in super::locator::sub_blocks(section) {
        let Some(tag) = heading(block)
            .and_then(|h| RE_QUOTED_NAME.captures(&h).map(|c| c[1].to_string()))
        else {
            debug!("property block without a quoted name, skipping");
            continue;
        };

        let notice = deprecation(block);
        if notice.is_some() && !opts.include_deprecated {
            warn!("dropping deprecated property {:?}", tag);
            continue;
        }

        let declaration = code_block(block).map(element_text).unwrap_or_default();
        let (type_token, declared_flags) = match RE_DECLARATION.captures(&declaration) {
            Some(caps) => (caps[1].to_string(), caps[2].to_string()),
            None => (
                declaration.split_whitespace().nth(1).unwrap_or_default().to_string(),
                String::new(),
            ),
        };

        let mut flags: Option<String> = None;
        let mut default = DefaultValue::Unset;
        let mut prose = Vec::new();
        for para in paragraphs(block) {
            match para {
                Paragraph::Tag(label, value) => match label.as_str() {
                    "Flags" => flags = Some(value),
                    "Default value" => default = DefaultValue::parse(&value),
                    _ => {}
                },
                Paragraph::Prose(t) => prose.push(text::rewrite_family_names(&t)),
            }
        }
        let writable = flags.as_deref().unwrap_or(&declared_flags).contains("Write");

        let property = Property {
            name: text::to_camel(&tag),
            tag: tag.clone(),
            declaration,
            writable,
            ty: types::translate(&doc.package, &type_token),
            default,
            docs: docs_with_notice(prose, notice, opts.width),
        };
        debug!("property {} ({}) writable={}", property.tag, property.ty.name(), property.writable);
        doc.properties.push(property);
    }
}

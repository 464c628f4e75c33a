//! Signal details extractor.
//!
//! Listener arguments come from the callback prototype
//! (`void user_function (GtkButton *button, gpointer user_data)`), notes
//! from the parameter table beneath it.

use super::{base_type, code_block, deprecation, docs_with_notice, heading, notes_table, prose, raw_text, split_c_param};
use crate::model::{Document, Param, Signal};
use crate::text;
use crate::types;
use crate::GenerateOptions;
use log::{debug, warn};
use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

static RE_QUOTED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["\x{201c}]([^"\x{201d}]+)["\x{201d}]"#).unwrap());

static RE_CALLBACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"user_function\s*\(([^)]*)\)").unwrap());

const USER_DATA: &str = "user_data";

pub fn extract(doc: &mut Document, section: ElementRef<'_>, opts: &GenerateOptions) {
    for block in super::locator::sub_blocks(section) {
        let Some(tag) = heading(block)
            .and_then(|h| RE_QUOTED_NAME.captures(&h).map(|c| c[1].to_string()))
        else {
            debug!("signal block without a quoted name, skipping");
            continue;
        };

        let notice = deprecation(block);
        if notice.is_some() && !opts.include_deprecated {
            warn!("dropping deprecated signal {:?}", tag);
            continue;
        }

        let notes = notes_table(block);
        let prototype = code_block(block).map(raw_text).unwrap_or_default();
        let params = listener_params(doc, &prototype)
            .into_iter()
            .map(|(raw_name, mut param)| {
                param.note = notes.get(&raw_name).cloned();
                param
            })
            .collect();

        let signal = Signal {
            name: text::to_camel(&tag),
            tag,
            docs: docs_with_notice(prose(block), notice, opts.width),
            params,
        };
        debug!("signal {} with {} listener args", signal.tag, signal.params.len());
        doc.signals.push(signal);
    }
}

/// Parameters of the callback prototype paired with their raw C names,
/// minus the self argument and `user_data`.
fn listener_params(doc: &Document, prototype: &str) -> Vec<(String, Param)> {
    let Some(caps) = RE_CALLBACK.captures(prototype) else {
        return Vec::new();
    };
    caps[1]
        .split(',')
        .filter_map(split_c_param)
        .filter(|(ty, name)| {
            !name.is_empty() && name != USER_DATA && base_type(ty) != doc.prefixed
        })
        .map(|(ty, name)| {
            let param = Param::new(&name, types::translate(&doc.package, &ty));
            (name, param)
        })
        .collect()
}

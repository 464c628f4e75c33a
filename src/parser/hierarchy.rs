//! Object hierarchy extractor.
//!
//! Reads the preformatted ancestry tree line by line:
//!
//! ```text
//!   GObject
//!    +----GInitiallyUnowned
//!          +----GtkObject
//!                +----GtkWidget
//! ```

use super::{code_block, raw_text};
use crate::model::{Document, INTERFACE_ROOT};
use crate::text;
use log::debug;
use scraper::ElementRef;

/// Toolkit implementation detail; everything up to and including it is dropped.
const RESET_SENTINEL: &str = "GInitiallyUnowned";

const ROOT_RENAMES: [(&str, &str); 2] = [("GObject", "Object"), ("GInterface", INTERFACE_ROOT)];

/// Tree-drawing glyphs used by gtk-doc (old ASCII and newer box drawing).
const TREE_GLYPHS: &[char] = &['+', '-', '|', '`', '\u{2502}', '\u{251c}', '\u{2570}', '\u{2500}', '\u{2514}'];

pub fn extract(doc: &mut Document, section: ElementRef<'_>) {
    let Some(pre) = code_block(section) else {
        debug!("hierarchy section has no tree block");
        return;
    };

    for line in raw_text(pre).lines() {
        let entry = line.trim_matches(|c: char| c.is_whitespace() || TREE_GLYPHS.contains(&c));
        if entry.is_empty() {
            continue;
        }
        if entry == RESET_SENTINEL {
            doc.hierarchy.clear();
            continue;
        }
        let renamed = ROOT_RENAMES
            .iter()
            .find(|(from, _)| *from == entry)
            .map(|(_, to)| to.to_string())
            .unwrap_or_else(|| text::deprefix(entry).to_string());
        doc.hierarchy.push(renamed);
    }

    if let Some(pos) = doc.hierarchy.iter().position(|h| *h == doc.name) {
        if pos > 0 {
            doc.parent = doc.hierarchy[pos - 1].clone();
        }
    }
    debug!("hierarchy {:?}, parent {:?}", doc.hierarchy, doc.parent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn run(prefixed: &str, tree: &str) -> Document {
        let html = format!(
            r#"<div class="refsect1"><a name="X.object-hierarchy"></a><pre class="synopsis">{}</pre></div>"#,
            tree
        );
        let frag = Html::parse_fragment(&html);
        let mut doc = Document::new(prefixed, "ctk");
        extract(&mut doc, frag.root_element());
        doc
    }

    #[test]
    fn sentinel_resets_hierarchy() {
        let doc = run(
            "GtkButton",
            "  GObject\n   +----GInitiallyUnowned\n         +----<a href=\"GtkObject.html\">GtkObject</a>\n               +----GtkWidget\n                     +----GtkButton\n                           +----GtkToggleButton\n",
        );
        assert_eq!(doc.hierarchy, vec!["Object", "Widget", "Button", "ToggleButton"]);
        assert_eq!(doc.parent, "Widget");
    }

    #[test]
    fn box_drawing_glyphs_are_stripped() {
        let doc = run(
            "GtkAccelGroup",
            "GObject\n\u{2570}\u{2500}\u{2500} GtkAccelGroup\n",
        );
        assert_eq!(doc.hierarchy, vec!["Object", "AccelGroup"]);
        assert_eq!(doc.parent, "Object");
    }

    #[test]
    fn interface_root_is_renamed() {
        let doc = run("GtkBuildable", "  GInterface\n   +----GtkBuildable\n");
        assert_eq!(doc.hierarchy, vec!["Interface", "Buildable"]);
        assert!(doc.is_interface());
    }

    #[test]
    fn parent_stays_empty_when_type_absent() {
        let doc = run("GtkButton", "  GObject\n   +----GtkWidget\n");
        assert_eq!(doc.parent, "");
    }

    #[test]
    fn missing_tree_is_a_no_op() {
        let frag = Html::parse_fragment(r#"<div class="refsect1"><p>no tree</p></div>"#);
        let mut doc = Document::new("GtkButton", "ctk");
        extract(&mut doc, frag.root_element());
        assert!(doc.hierarchy.is_empty());
    }
}

//! Name and prose normalization.
//!
//! Pure, order-sensitive text transforms shared by every extractor. The
//! family-name rewrite runs on overlapping text at several stages, so it
//! must be idempotent.

use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static RE_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// gtk_container_add, gdk_window_show
static RE_FAMILY_FN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:gtk|gdk)_([a-z0-9_]+)\b").unwrap());

// GtkContainer, GdkWindow (repeated prefixes collapse in one pass)
static RE_FAMILY_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:Gtk|Gdk)+([A-Z][A-Za-z0-9]*)").unwrap());

/// Marketing name of the source toolkit and its replacement.
const MARKETING_NAME: (&str, &str) = ("GTK+", "CTK");

const QUOTE_GLYPHS: &[char] = &['"', '\'', '\u{201c}', '\u{201d}', '\u{2018}', '\u{2019}'];

// -- Markup -------------------------------------------------------------------

/// Strip inline tags and collapse runs of whitespace into single spaces.
pub fn strip_markup(text: &str) -> String {
    let plain = RE_TAG.replace_all(text, "");
    collapse_whitespace(&plain)
}

/// Collapse all whitespace runs (including newlines) into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    RE_SPACE.replace_all(text.trim(), " ").to_string()
}

/// Decode the handful of entities that can leak through into output.
pub fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

// -- Tokens -------------------------------------------------------------------

/// Strip an overload-numbering suffix: `GtkWidget2` → `GtkWidget`.
pub fn strip_numeric_suffix(token: &str) -> &str {
    let trimmed = token.trim_end_matches(|c: char| c.is_ascii_digit());
    if trimmed.is_empty() {
        token
    } else {
        trimmed
    }
}

/// Strip leading/trailing plain and typographic quotes.
pub fn strip_quotes(text: &str) -> &str {
    text.trim().trim_matches(QUOTE_GLYPHS).trim()
}

/// Remove a toolkit-family prefix from a type name: `GtkButton` → `Button`,
/// `GdkWindow` → `Window`, `GObject` → `Object`.
pub fn deprefix(name: &str) -> &str {
    for prefix in ["Gtk", "Gdk", "G"] {
        if let Some(rest) = name.strip_prefix(prefix) {
            if rest.starts_with(|c: char| c.is_ascii_uppercase()) {
                return rest;
            }
        }
    }
    name
}

// -- Case conversion ----------------------------------------------------------

/// Split an identifier into words on `_`, `-`, spaces and lower→upper
/// case transitions.
fn words(ident: &str) -> Vec<String> {
    let mut out = Vec::new();
    for chunk in ident.split(|c: char| c == '_' || c == '-' || c.is_whitespace()) {
        let mut current = String::new();
        let mut prev_lower = false;
        for c in chunk.chars() {
            if c.is_uppercase() && prev_lower && !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
            current.push(c);
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    out
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `focus-on-click` / `focus_on_click` → `FocusOnClick`
pub fn to_camel(ident: &str) -> String {
    words(ident).iter().map(|w| upper_first(w)).collect()
}

/// `focus-on-click` → `focusOnClick`
pub fn to_lower_camel(ident: &str) -> String {
    lower_first(&to_camel(ident))
}

/// `FocusOnClick` → `focus-on-click`
pub fn to_dash(ident: &str) -> String {
    join_lower(ident, "-")
}

/// `FocusOnClick` → `focus_on_click`
pub fn to_snake(ident: &str) -> String {
    join_lower(ident, "_")
}

fn join_lower(ident: &str, sep: &str) -> String {
    words(ident)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(sep)
}

// -- Prose --------------------------------------------------------------------

/// Greedy word-wrap. Words are never split; a single word longer than
/// `width` gets a line of its own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    // measured in chars; typographic quotes are multi-byte
    let mut line_width = 0;
    for word in text.split_whitespace() {
        let word_width = word.chars().count();
        if line.is_empty() {
            line.push_str(word);
            line_width = word_width;
        } else if line_width + 1 + word_width <= width {
            line.push(' ');
            line.push_str(word);
            line_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_width = word_width;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Wrap paragraphs (separated by blank lines) and prefix every line with
/// `// `. Blank lines between paragraphs become a bare `//`. Returns an
/// empty string when there is no prose at all.
pub fn comment_block(text: &str, width: usize) -> String {
    let body_width = width.saturating_sub(3).max(1);
    let mut out: Vec<String> = Vec::new();
    for para in text.split("\n\n") {
        let lines = wrap(para, body_width);
        if lines.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push("//".to_string());
        }
        out.extend(lines.into_iter().map(|l| format!("// {}", l)));
    }
    out.join("\n")
}

/// Rewrite legacy toolkit symbols to target naming:
/// `gtk_container_add()` → `ContainerAdd()`, `GtkWindow` → `Window`,
/// `GTK+` → `CTK`.
pub fn rewrite_family_names(text: &str) -> String {
    let text = RE_FAMILY_FN.replace_all(text, |caps: &regex::Captures| to_camel(&caps[1]));
    let text = RE_FAMILY_TYPE.replace_all(&text, "$1");
    text.replace(MARKETING_NAME.0, MARKETING_NAME.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_is_stripped_and_collapsed() {
        assert_eq!(
            strip_markup("The <span class=\"type\">GtkButton</span>\n   widget"),
            "The GtkButton widget"
        );
    }

    #[test]
    fn numeric_suffix() {
        assert_eq!(strip_numeric_suffix("GtkWidget2"), "GtkWidget");
        assert_eq!(strip_numeric_suffix("GtkWidget"), "GtkWidget");
        assert_eq!(strip_numeric_suffix("42"), "42");
    }

    #[test]
    fn quotes_are_stripped() {
        assert_eq!(strip_quotes("\u{201c}focus-on-click\u{201d}"), "focus-on-click");
        assert_eq!(strip_quotes(" \"label\" "), "label");
    }

    #[test]
    fn deprefix_family_names() {
        assert_eq!(deprefix("GtkButton"), "Button");
        assert_eq!(deprefix("GdkWindow"), "Window");
        assert_eq!(deprefix("GObject"), "Object");
        assert_eq!(deprefix("Gravity"), "Gravity");
    }

    #[test]
    fn case_conversions() {
        assert_eq!(to_camel("focus-on-click"), "FocusOnClick");
        assert_eq!(to_camel("new_with_label"), "NewWithLabel");
        assert_eq!(to_lower_camel("user_data"), "userData");
        assert_eq!(to_dash("CheckButton"), "check-button");
        assert_eq!(to_snake("HButtonBox"), "hbutton_box");
    }

    #[test]
    fn case_conversions_are_idempotent() {
        for input in ["focus-on-click", "new_with_label", "XFOO", "ab_cD", "HBox", "gint64 value"] {
            let camel = to_camel(input);
            assert_eq!(to_camel(&camel), camel, "camel of {}", input);
            let lower = to_lower_camel(input);
            assert_eq!(to_lower_camel(&lower), lower, "lower camel of {}", input);
            let dash = to_dash(input);
            assert_eq!(to_dash(&dash), dash, "dash of {}", input);
        }
    }

    #[test]
    fn wrap_respects_width_and_words() {
        let text = "The quick brown fox jumps over the lazy dog again and again";
        let lines = wrap(text, 16);
        assert!(lines.iter().all(|l| l.len() <= 16));
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_counts_chars_not_bytes() {
        let text = "\u{201c}quoted\u{201d} \u{201c}words\u{201d}";
        assert_eq!(wrap(text, 16), vec![text]);
        assert_eq!(wrap(text, 15).len(), 2);
    }

    #[test]
    fn wrap_keeps_long_word_whole() {
        let lines = wrap("a supercalifragilistic b", 5);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn comment_block_prefixes_and_separates() {
        let block = comment_block("First para.\n\nSecond para.", 76);
        assert_eq!(block, "// First para.\n//\n// Second para.");
    }

    #[test]
    fn comment_block_drops_blank_prose() {
        assert_eq!(comment_block("   \n\n  ", 76), "");
    }

    #[test]
    fn family_rewrite() {
        assert_eq!(
            rewrite_family_names("Use gtk_container_add() to put a GtkLabel in a GTK+ GtkWindow."),
            "Use ContainerAdd() to put a Label in a CTK Window."
        );
    }

    #[test]
    fn family_rewrite_is_idempotent() {
        for input in [
            "Use gtk_container_add() on GtkGtkFoo",
            "gtk_gtk_widget GTK+ gdk_window_show",
            "gtk_GtkFoo and GdkEvent",
        ] {
            let once = rewrite_family_names(input);
            assert_eq!(rewrite_family_names(&once), once, "input {}", input);
        }
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(unescape_entities("a &lt;b&gt; &amp;amp;"), "a <b> &amp;");
    }
}

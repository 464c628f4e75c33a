//! Function details extractor.
//!
//! Only blocks headed `symbol ()` whose code block is a C prototype are
//! functions; structs, enums and `#define` macros share the section and
//! are skipped.

use super::{
    base_type, code_block, deprecation, docs_with_notice, element_text, heading, notes_table,
    prose, raw_text, split_c_param,
};
use crate::model::{Document, Function, Param};
use crate::text;
use crate::types::{self, TypeDescriptor};
use crate::GenerateOptions;
use log::{debug, warn};
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

static SEL_RETURN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.returnvalue").unwrap());

const FAMILY_FN_PREFIXES: &[&str] = &["gtk_", "gdk_", "g_"];

const VARIADIC_NAME: &str = "argv";

pub fn extract(doc: &mut Document, section: ElementRef<'_>, opts: &GenerateOptions) {
    for block in super::locator::sub_blocks(section) {
        let Some(symbol) = heading(block).and_then(|h| symbol_name(&h)) else {
            continue;
        };
        let Some(pre) = code_block(block) else {
            debug!("{} has no prototype, skipping", symbol);
            continue;
        };
        let prototype = raw_text(pre);
        if prototype.trim_start().starts_with("#define") {
            debug!("{} is a macro, skipping", symbol);
            continue;
        }
        if is_callback_typedef(&prototype, &symbol) {
            debug!("{} is a callback typedef, skipping", symbol);
            continue;
        }

        let notice = deprecation(block);
        if notice.is_some() && !opts.include_deprecated {
            warn!("dropping deprecated function {}", symbol);
            continue;
        }

        let name = text::to_camel(strip_symbol_prefix(doc, &symbol));
        if name.is_empty() {
            continue;
        }

        let mut func = Function::new(&name);
        func.docs = docs_with_notice(prose(block), notice, opts.width);
        func.returns = return_type(doc, pre, &prototype, &symbol);

        let notes = notes_table(block);
        func.params = prototype_params(doc, &prototype, &symbol)
            .into_iter()
            .map(|(raw_name, mut param)| {
                param.note = notes.get(&raw_name).cloned();
                param
            })
            .collect();

        debug!(
            "function {} ({} params) -> {:?}",
            func.name,
            func.params.len(),
            func.returns.name()
        );
        doc.add_function(func);
    }
}

/// `gtk_button_new ()` → `gtk_button_new`. Headings without `()` are not
/// functions, nor are capitalized symbols (`GtkClipboardReceivedFunc ()`).
fn symbol_name(heading: &str) -> Option<String> {
    let symbol = heading.trim().strip_suffix("()")?.trim();
    let is_c_function = symbol.starts_with(|c: char| c.is_ascii_lowercase()) && !symbol.contains(' ');
    is_c_function.then(|| symbol.to_string())
}

/// `void (*GtkClipboardReceivedFunc) (...)` declares a function pointer type.
fn is_callback_typedef(prototype: &str, symbol: &str) -> bool {
    let compact: String = prototype.chars().filter(|c| !c.is_whitespace()).collect();
    compact.contains(&format!("(*{})", symbol))
}

fn strip_symbol_prefix<'a>(doc: &Document, symbol: &'a str) -> &'a str {
    if let Some(rest) = doc.strip_fn_prefix(symbol) {
        return rest;
    }
    FAMILY_FN_PREFIXES
        .iter()
        .find_map(|p| symbol.strip_prefix(p))
        .unwrap_or(symbol)
}

/// Declared return type, preferring the marked `returnvalue` span.
fn return_type(doc: &Document, pre: ElementRef<'_>, prototype: &str, symbol: &str) -> TypeDescriptor {
    let head = prototype.split(symbol).next().unwrap_or_default();
    let token = match pre.select(&SEL_RETURN).next().map(element_text) {
        Some(marked) if head.contains('*') => format!("{} *", marked),
        Some(marked) => marked,
        None => head.to_string(),
    };
    types::translate(&doc.package, &token)
}

/// Prototype parameters in order, paired with raw C names. A leading
/// self-typed or `void` parameter is skipped; `...` becomes `argv`.
fn prototype_params(doc: &Document, prototype: &str, symbol: &str) -> Vec<(String, Param)> {
    let Some(after) = prototype.split_once(symbol).map(|(_, rest)| rest) else {
        return Vec::new();
    };
    let Some(open) = after.find('(') else {
        return Vec::new();
    };
    let Some(close) = after.rfind(')') else {
        return Vec::new();
    };
    if close <= open {
        return Vec::new();
    }

    let mut params = Vec::new();
    for (i, decl) in after[open + 1..close].split(',').enumerate() {
        let decl = decl.trim();
        if decl == "..." {
            params.push((
                VARIADIC_NAME.to_string(),
                Param::new(VARIADIC_NAME, TypeDescriptor::variadic()),
            ));
            continue;
        }
        let Some((ty, name)) = split_c_param(decl) else {
            continue;
        };
        let base = base_type(&ty);
        if i == 0 && (base == doc.prefixed || base == "void") {
            continue;
        }
        if name.is_empty() {
            continue;
        }
        let param = Param::new(&name, types::translate(&doc.package, &ty));
        params.push((name, param));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeKind;
    use scraper::Html;

    const DETAILS: &str = r#"<div class="refsect1"><a name="GtkButton.details"></a><h2>Details</h2>
<div class="refsect2"><a name="GtkButton-struct"></a><h3>struct GtkButton</h3>
<pre class="programlisting">struct GtkButton;</pre></div>
<div class="refsect2"><h3>GTK_BUTTON()</h3>
<pre class="programlisting">#define GTK_BUTTON(obj) (G_TYPE_CHECK_INSTANCE_CAST ((obj), GTK_TYPE_BUTTON, GtkButton))</pre></div>
<div class="refsect2"><a name="gtk-button-new"></a><h3>gtk_button_new ()</h3>
<pre class="programlisting"><a class="link" href="GtkWidget.html"><span class="returnvalue">GtkWidget</span></a> *         gtk_button_new                      (<em class="parameter"><code><span class="type">void</span></code></em>);</pre>
<p>Creates a new <span class="type">GtkButton</span> widget.</p>
<table><tr><td><span class="term"><span class="emphasis"><em>Returns</em></span> :</span></td><td>The newly created GtkButton widget.</td></tr></table>
</div>
<div class="refsect2"><h3>gtk_button_new_with_label ()</h3>
<pre class="programlisting"><span class="returnvalue">GtkWidget</span> *         gtk_button_new_with_label           (<em class="parameter"><code>const <span class="type">gchar</span> *label</code></em>);</pre>
<p>Creates a GtkButton widget with a GtkLabel child.</p>
<table><tr><td>label :</td><td>The text you want the GtkLabel to hold.</td></tr></table>
</div>
<div class="refsect2"><h3>gtk_button_get_label ()</h3>
<pre class="programlisting">const <span class="returnvalue">gchar</span> *       gtk_button_get_label                (<em class="parameter"><code><span class="type">GtkButton</span> *button</code></em>);</pre>
<p>Fetches the text from the label of the button.</p>
<p class="since">Since 2.4</p>
<p>Since: 2.4</p>
</div>
<div class="refsect2"><h3>gtk_button_set_alignment ()</h3>
<pre class="programlisting"><span class="returnvalue">void</span>                gtk_button_set_alignment            (<em class="parameter"><code><span class="type">GtkButton</span> *button</code></em>,
                                                         <em class="parameter"><code><span class="type">gfloat</span> xalign</code></em>,
                                                         <em class="parameter"><code><span class="type">gfloat</span> yalign</code></em>);</pre>
<p>Sets the alignment of the child.</p>
</div>
<div class="refsect2"><a name="GtkButtonActivateFunc"></a><h3>GtkButtonActivateFunc ()</h3>
<pre class="programlisting"><span class="returnvalue">void</span>            (*GtkButtonActivateFunc)            (<em class="parameter"><code><span class="type">GtkButton</span> *button</code></em>,
                                                         <em class="parameter"><code><span class="type">gpointer</span> data</code></em>);</pre>
<p>Called when the button activates.</p>
</div>
<div class="refsect2"><h3>gtk_button_printf ()</h3>
<pre class="programlisting"><span class="returnvalue">void</span> gtk_button_printf (GtkButton *button, const gchar *format, ...);</pre>
</div>
<div class="refsect2"><h3>gtk_button_pressed ()</h3>
<pre class="programlisting"><span class="returnvalue">void</span> gtk_button_pressed (GtkButton *button);</pre>
<div class="warning"><p><code class="literal">gtk_button_pressed</code> has been deprecated since version 2.20 and should not be used in newly-written code.</p></div>
<p>Emits a "pressed" signal.</p>
</div>
</div>"#;

    fn run(include_deprecated: bool) -> Document {
        let frag = Html::parse_fragment(DETAILS);
        let mut doc = Document::new("GtkButton", "ctk");
        let opts = GenerateOptions {
            include_deprecated,
            ..Default::default()
        };
        extract(&mut doc, frag.root_element(), &opts);
        doc
    }

    #[test]
    fn constructor_and_factories_are_separated() {
        let doc = run(false);
        let ctor = doc.constructor.as_ref().unwrap();
        assert_eq!(ctor.name, "New");
        assert!(ctor.params.is_empty());
        assert_eq!(ctor.returns.name(), "Widget");
        assert_eq!(ctor.docs, "// Creates a new Button widget.");

        assert_eq!(doc.factories.len(), 1);
        let factory = &doc.factories[0];
        assert_eq!(factory.name, "NewWithLabel");
        assert_eq!(factory.params.len(), 1);
        assert_eq!(factory.params[0].name, "label");
        assert_eq!(factory.params[0].ty.kind(), TypeKind::String);
        assert_eq!(
            factory.params[0].note.as_deref(),
            Some("The text you want the Label to hold.")
        );
    }

    #[test]
    fn structs_macros_and_callback_typedefs_are_skipped() {
        let doc = run(false);
        let names: Vec<_> = doc.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["GetLabel", "SetAlignment", "Printf"]);
    }

    #[test]
    fn self_param_skipped_and_since_discarded() {
        let doc = run(false);
        let get = &doc.functions[0];
        assert!(get.params.is_empty());
        assert_eq!(get.returns.kind(), TypeKind::String);
        assert_eq!(get.docs, "// Fetches the text from the label of the button.");

        let set = &doc.functions[1];
        assert!(set.returns.is_none());
        let names: Vec<_> = set.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["xalign", "yalign"]);
        assert_eq!(set.params[0].ty.name(), "float64");
    }

    #[test]
    fn ellipsis_becomes_variadic() {
        let doc = run(false);
        let printf = &doc.functions[2];
        assert_eq!(printf.params.len(), 2);
        assert_eq!(printf.params[1].name, "argv");
        assert_eq!(printf.params[1].ty.name(), "...interface{}");
    }

    #[test]
    fn deprecated_function_gated() {
        assert_eq!(run(false).functions.len(), 3);
        let doc = run(true);
        let pressed = doc.functions.last().unwrap();
        assert_eq!(pressed.name, "Pressed");
        assert!(pressed.docs.contains("Deprecated: ButtonPressed has been deprecated"));
    }

    #[test]
    fn symbol_names() {
        assert_eq!(symbol_name("gtk_button_new ()").as_deref(), Some("gtk_button_new"));
        assert_eq!(symbol_name("struct GtkButton"), None);
        assert_eq!(symbol_name("GtkClipboardReceivedFunc ()"), None);
        let doc = Document::new("GtkButton", "ctk");
        assert_eq!(strip_symbol_prefix(&doc, "gtk_widget_show"), "widget_show");
        assert_eq!(strip_symbol_prefix(&doc, "gtk_button_set_label"), "set_label");
    }

    #[test]
    fn lowercase_callback_typedef_detected() {
        assert!(is_callback_typedef(
            "void (* gtk_custom_func ) (GtkWidget *widget);",
            "gtk_custom_func"
        ));
        assert!(!is_callback_typedef(
            "void gtk_button_clicked (GtkButton *button);",
            "gtk_button_clicked"
        ));
    }

    #[test]
    fn acronym_type_functions_are_classified() {
        let frag = Html::parse_fragment(
            r#"<div class="refsect1"><a name="GtkUIManager.details"></a>
<div class="refsect2"><h3>gtk_ui_manager_new ()</h3>
<pre class="programlisting"><span class="returnvalue">GtkUIManager</span> *      gtk_ui_manager_new                  (<em class="parameter"><code><span class="type">void</span></code></em>);</pre></div>
<div class="refsect2"><h3>gtk_ui_manager_get_ui ()</h3>
<pre class="programlisting"><span class="returnvalue">gchar</span> *             gtk_ui_manager_get_ui               (<em class="parameter"><code><span class="type">GtkUIManager</span> *self</code></em>);</pre></div>
</div>"#,
        );
        let mut doc = Document::new("GtkUIManager", "ctk");
        extract(&mut doc, frag.root_element(), &GenerateOptions::default());
        assert_eq!(doc.constructor.as_ref().map(|c| c.name.as_str()), Some("New"));
        let names: Vec<_> = doc.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["GetUi"]);
        assert!(doc.functions[0].params.is_empty());
    }
}

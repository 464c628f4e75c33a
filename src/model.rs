//! Intermediate model extracted from one documentation page.

use crate::text;
use crate::types::{TypeDescriptor, TypeKind};
use serde::Serialize;

/// First hierarchy entry marking an interface-only page.
pub const INTERFACE_ROOT: &str = "Interface";

/// Everything known about the documented type. One per run.
#[derive(Debug, Default, Serialize)]
pub struct Document {
    /// `CheckButton`
    pub name: String,
    /// `GtkCheckButton`
    pub prefixed: String,
    /// `check_button`
    pub flat: String,
    /// `check-button`
    pub tag: String,
    /// Target package the source is generated into
    pub package: String,
    /// Immediate ancestor, empty when unknown
    pub parent: String,
    /// Comment-formatted description, empty when the page has none
    pub description: String,
    /// Ancestors root first, followed by this type and any descendants
    pub hierarchy: Vec<String>,
    /// Implemented interfaces, insertion ordered, no duplicates
    pub implements: Vec<String>,
    pub properties: Vec<Property>,
    pub signals: Vec<Signal>,
    /// Plain functions; constructor and factories are held separately
    pub functions: Vec<Function>,
    pub constructor: Option<Function>,
    pub factories: Vec<Function>,
}

impl Document {
    /// Set up identity from a prefixed type name such as `GtkButton`.
    pub fn new(prefixed: &str, package: &str) -> Self {
        let name = text::deprefix(prefixed).to_string();
        Self {
            flat: text::to_snake(&name),
            tag: text::to_dash(&name),
            prefixed: prefixed.to_string(),
            package: package.to_string(),
            name,
            ..Default::default()
        }
    }

    /// Strip this type's C symbol prefix: `gtk_check_button_set_mode` →
    /// `set_mode`. The type part is matched letter by letter with
    /// underscores ignored, since acronyms split differently in C
    /// (`GtkUIManager` → `gtk_ui_manager_`, `GtkHButtonBox` →
    /// `gtk_hbutton_box_`).
    pub fn strip_fn_prefix<'a>(&self, symbol: &'a str) -> Option<&'a str> {
        let family = &self.prefixed[..self.prefixed.len() - self.name.len()];
        let rest = if family.is_empty() {
            symbol
        } else {
            symbol.strip_prefix(&format!("{}_", family.to_lowercase()))?
        };

        let mut wanted = self.flat.chars().filter(|c| *c != '_').peekable();
        wanted.peek()?;
        for (i, c) in rest.char_indices() {
            match wanted.peek() {
                None if c == '_' => return Some(&rest[i + 1..]),
                None => return None,
                Some(_) if c == '_' => continue,
                Some(&w) if w == c => {
                    wanted.next();
                }
                Some(_) => return None,
            }
        }
        None
    }

    /// Append an interface unless already recorded.
    pub fn add_interface(&mut self, name: &str) {
        if !name.is_empty() && !self.implements.iter().any(|i| i == name) {
            self.implements.push(name.to_string());
        }
    }

    /// Record a function under the constructor/factory/plain rule.
    pub fn add_function(&mut self, func: Function) {
        if func.name == "New" {
            self.constructor = Some(func);
        } else if func.name.starts_with("New") {
            self.factories.push(func);
        } else {
            self.functions.push(func);
        }
    }

    pub fn is_interface(&self) -> bool {
        self.hierarchy.first().map(String::as_str) == Some(INTERFACE_ROOT)
    }

    /// Receiver variable used in generated methods.
    pub fn receiver(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_lowercase().to_string())
            .unwrap_or_else(|| "w".to_string())
    }
}

/// Name form used when matching parameters against properties.
pub fn normalize_name(name: &str) -> String {
    text::to_snake(name)
}

/// A function or listener parameter.
#[derive(Debug, Clone, Serialize)]
pub struct Param {
    /// lowerCamel, pointer sigil stripped
    pub name: String,
    pub ty: TypeDescriptor,
    /// Literal default value, filled in by the assembler
    pub default: Option<String>,
    pub note: Option<String>,
}

impl Param {
    pub fn new(name: &str, ty: TypeDescriptor) -> Self {
        Self {
            name: text::to_lower_camel(name.trim_start_matches('*')),
            ty,
            default: None,
            note: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Function {
    /// CamelCase, type prefix removed: `NewWithLabel`
    pub name: String,
    pub docs: String,
    pub params: Vec<Param>,
    pub returns: TypeDescriptor,
    /// Synthesized by the assembler; empty until then
    pub body: String,
}

impl Function {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            docs: String::new(),
            params: Vec::new(),
            returns: TypeDescriptor::none(),
            body: String::new(),
        }
    }
}

/// Normalized property default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DefaultValue {
    Bool(bool),
    EmptyString,
    Number(String),
    /// Not given, or not a recognisable literal
    Unset,
}

impl DefaultValue {
    /// Normalize a documented default: booleans and numbers survive,
    /// `""` becomes the empty string, anything else is discarded.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw {
            "TRUE" | "true" => DefaultValue::Bool(true),
            "FALSE" | "false" => DefaultValue::Bool(false),
            "\"\"" | "\u{201c}\u{201d}" => DefaultValue::EmptyString,
            _ if raw.chars().any(|c| c.is_ascii_digit()) && raw.parse::<f64>().is_ok() => {
                DefaultValue::Number(raw.to_string())
            }
            _ => DefaultValue::Unset,
        }
    }

    pub fn literal(&self) -> Option<String> {
        match self {
            DefaultValue::Bool(b) => Some(b.to_string()),
            DefaultValue::EmptyString => Some("\"\"".to_string()),
            DefaultValue::Number(n) => Some(n.clone()),
            DefaultValue::Unset => None,
        }
    }

    /// Literal for generated code; `nil` stands in for no default.
    pub fn render(&self) -> String {
        self.literal().unwrap_or_else(|| "nil".to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Property {
    /// CamelCase: `FocusOnClick`
    pub name: String,
    /// As documented: `focus-on-click`
    pub tag: String,
    /// Declaration line from the code block
    pub declaration: String,
    pub writable: bool,
    pub ty: TypeDescriptor,
    pub default: DefaultValue,
    /// Comment-formatted documentation
    pub docs: String,
}

impl Property {
    /// Accessor label (`GetBoolProperty`, `cdk.BoolProperty`); typeless
    /// properties are accessed as structs.
    pub fn accessor_label(&self) -> &'static str {
        match self.ty.label() {
            "" => TypeKind::Any.label(),
            label => label,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Signal {
    pub name: String,
    pub tag: String,
    pub docs: String,
    /// Listener arguments; `user_data` is never kept
    pub params: Vec<Param>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::translate;

    #[test]
    fn identity_from_prefixed_name() {
        let doc = Document::new("GtkCheckButton", "ctk");
        assert_eq!(doc.name, "CheckButton");
        assert_eq!(doc.flat, "check_button");
        assert_eq!(doc.tag, "check-button");
        assert_eq!(doc.strip_fn_prefix("gtk_check_button_set_mode"), Some("set_mode"));
        assert_eq!(doc.receiver(), "c");
    }

    #[test]
    fn fn_prefix_follows_c_word_splits() {
        let ui = Document::new("GtkUIManager", "ctk");
        assert_eq!(ui.flat, "uimanager");
        assert_eq!(ui.strip_fn_prefix("gtk_ui_manager_new"), Some("new"));
        assert_eq!(ui.strip_fn_prefix("gtk_ui_manager_get_ui"), Some("get_ui"));

        let im = Document::new("GtkIMContext", "ctk");
        assert_eq!(im.strip_fn_prefix("gtk_im_context_reset"), Some("reset"));

        let box_ = Document::new("GtkHButtonBox", "ctk");
        assert_eq!(box_.strip_fn_prefix("gtk_hbutton_box_new"), Some("new"));
        assert_eq!(box_.strip_fn_prefix("gtk_hbutton_box_get_spacing_default"), Some("get_spacing_default"));
    }

    #[test]
    fn foreign_symbols_keep_their_prefix() {
        let doc = Document::new("GtkButton", "ctk");
        assert_eq!(doc.strip_fn_prefix("gtk_widget_show"), None);
        assert_eq!(doc.strip_fn_prefix("gtk_buttonx_new"), None);
        assert_eq!(doc.strip_fn_prefix("gtk_button"), None);
        assert_eq!(doc.strip_fn_prefix("gdk_button_new"), None);
    }

    #[test]
    fn typeless_property_accessed_as_struct() {
        let mut prop = Property {
            name: "Data".into(),
            tag: "data".into(),
            declaration: String::new(),
            writable: true,
            ty: translate("ctk", ""),
            default: DefaultValue::Unset,
            docs: String::new(),
        };
        assert_eq!(prop.accessor_label(), "Struct");
        prop.ty = translate("ctk", "gboolean");
        assert_eq!(prop.accessor_label(), "Bool");
    }

    #[test]
    fn interfaces_are_deduplicated_in_order() {
        let mut doc = Document::new("GtkButton", "ctk");
        doc.add_interface("Buildable");
        doc.add_interface("Activatable");
        doc.add_interface("Buildable");
        assert_eq!(doc.implements, vec!["Buildable", "Activatable"]);
    }

    #[test]
    fn functions_are_classified() {
        let mut doc = Document::new("GtkWidget", "ctk");
        doc.add_function(Function::new("New"));
        doc.add_function(Function::new("NewWithLabel"));
        doc.add_function(Function::new("Show"));
        assert!(doc.constructor.is_some());
        assert!(doc.constructor.as_ref().unwrap().params.is_empty());
        assert_eq!(doc.factories.len(), 1);
        assert_eq!(doc.functions.len(), 1);
    }

    #[test]
    fn default_values_normalize() {
        assert_eq!(DefaultValue::parse("FALSE"), DefaultValue::Bool(false));
        assert_eq!(DefaultValue::parse("\"\""), DefaultValue::EmptyString);
        assert_eq!(DefaultValue::parse("-1"), DefaultValue::Number("-1".into()));
        assert_eq!(DefaultValue::parse("0.5"), DefaultValue::Number("0.5".into()));
        assert_eq!(DefaultValue::parse("NULL"), DefaultValue::Unset);
        assert_eq!(DefaultValue::parse("GTK_RELIEF_NORMAL"), DefaultValue::Unset);
        assert_eq!(DefaultValue::Unset.render(), "nil");
    }

    #[test]
    fn param_names_are_normalized() {
        let p = Param::new("*user_data", translate("ctk", "gpointer"));
        assert_eq!(p.name, "userData");
        assert_eq!(normalize_name("focusOnClick"), normalize_name("focus-on-click"));
    }
}

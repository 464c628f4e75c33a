//! C type lowering.
//!
//! Maps a documentation type token (`const gchar *`, `gint`, `GtkWidget *`)
//! to a [`TypeDescriptor`] in the target vocabulary. Total: unknown tokens
//! degrade to an object type rather than failing the run.

use crate::text;
use serde::Serialize;

/// Package that owns `Gtk`-prefixed types.
pub const TOOLKIT_PACKAGE: &str = "ctk";

/// Package that owns `Gdk`- and GLib-prefixed types.
pub const DISPLAY_PACKAGE: &str = "cdk";

const INTEGER_TOKENS: &[&str] = &[
    "gint", "guint", "gint8", "guint8", "gint16", "guint16", "gint32", "guint32", "gint64",
    "guint64", "glong", "gulong", "gshort", "gushort", "gsize", "gssize", "goffset", "gunichar",
    "int", "uint", "unsigned", "unsigned int", "long", "unsigned long", "short",
    "unsigned short", "size_t",
];

const FLOAT_TOKENS: &[&str] = &["gfloat", "gdouble", "float", "double", "long double"];

const STRING_TOKENS: &[&str] = &["gchar", "guchar", "char", "unsigned char", "gchararray"];

const BOOLEAN_TOKENS: &[&str] = &["gboolean", "boolean", "bool"];

const ANY_TOKENS: &[&str] = &["gpointer", "gconstpointer"];

/// Closed set of target type kinds, each with its canonical zero value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Integer,
    Float,
    String,
    Boolean,
    /// `void`: no value, suppresses return synthesis.
    None,
    /// Untyped pointer.
    Any,
    /// Structural/object type named after the source token.
    Object,
}

impl TypeKind {
    pub fn zero(self) -> &'static str {
        match self {
            TypeKind::Integer => "0",
            TypeKind::Float => "0.0",
            TypeKind::String => "\"\"",
            TypeKind::Boolean => "false",
            TypeKind::None => "",
            TypeKind::Any | TypeKind::Object => "nil",
        }
    }

    /// Short label used to build accessor names (`GetBoolProperty`).
    pub fn label(self) -> &'static str {
        match self {
            TypeKind::Integer => "Int",
            TypeKind::Float => "Float",
            TypeKind::String => "String",
            TypeKind::Boolean => "Bool",
            TypeKind::None => "",
            TypeKind::Any | TypeKind::Object => "Struct",
        }
    }

    /// String, integer, float and boolean have literal zero values.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            TypeKind::Integer | TypeKind::Float | TypeKind::String | TypeKind::Boolean
        )
    }
}

/// A lowered type. Only [`translate`] and [`TypeDescriptor::variadic`]
/// construct these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    source: String,
    name: String,
    kind: TypeKind,
}

impl TypeDescriptor {
    fn new(source: &str, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            source: source.to_string(),
            name: name.into(),
            kind,
        }
    }

    /// Descriptor for a C `...` argument list.
    pub fn variadic() -> Self {
        Self::new("...", "...interface{}", TypeKind::Any)
    }

    /// Descriptor for `void`.
    pub fn none() -> Self {
        Self::new("void", "", TypeKind::None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn zero(&self) -> &'static str {
        self.kind.zero()
    }

    pub fn is_none(&self) -> bool {
        self.kind == TypeKind::None
    }
}

/// Lower `token` for code generated into `package`.
pub fn translate(package: &str, token: &str) -> TypeDescriptor {
    let raw = token.trim();
    let pointer = raw.contains('*');
    let base = raw
        .replace('*', " ")
        .split_whitespace()
        .filter(|w| *w != "const")
        .collect::<Vec<_>>()
        .join(" ");
    let base = base.as_str();

    if base.is_empty() {
        return TypeDescriptor::new(raw, "", TypeKind::None);
    }
    if INTEGER_TOKENS.contains(&base) {
        return TypeDescriptor::new(raw, "int", TypeKind::Integer);
    }
    if FLOAT_TOKENS.contains(&base) {
        return TypeDescriptor::new(raw, "float64", TypeKind::Float);
    }
    if STRING_TOKENS.contains(&base) {
        return TypeDescriptor::new(raw, "string", TypeKind::String);
    }
    if BOOLEAN_TOKENS.contains(&base) {
        return TypeDescriptor::new(raw, "bool", TypeKind::Boolean);
    }
    if base == "void" {
        return if pointer {
            TypeDescriptor::new(raw, "interface{}", TypeKind::Any)
        } else {
            TypeDescriptor::new(raw, "", TypeKind::None)
        };
    }
    if ANY_TOKENS.contains(&base) {
        return TypeDescriptor::new(raw, "interface{}", TypeKind::Any);
    }

    let base = text::strip_numeric_suffix(base);
    let (context, bare) = family_context(package, base);
    let name = if context == package {
        bare.to_string()
    } else {
        format!("{}.{}", context, bare)
    };
    TypeDescriptor::new(raw, name, TypeKind::Object)
}

/// Which package a prefixed type belongs to, and its bare name.
/// Unprefixed tokens belong to the package being generated.
fn family_context<'a>(package: &'a str, token: &'a str) -> (&'a str, &'a str) {
    let bare = text::deprefix(token);
    if bare.len() == token.len() {
        return (package, token);
    }
    if token.starts_with("Gtk") {
        (TOOLKIT_PACKAGE, bare)
    } else {
        (DISPLAY_PACKAGE, bare)
    }
}

//! Go source renderer.
//!
//! The output is built as a flat list of top-level declarations which are
//! serialized in order, one blank line apart. Two layouts exist: the full
//! concrete-type file and the interface-only file.

use crate::error::{Error, Result};
use crate::model::{Document, Function, Param, Property, Signal};
use crate::render::Renderer;
use crate::text;
use crate::types::DISPLAY_PACKAGE;
use log::debug;
use std::collections::HashSet;
use std::fmt::Write;

pub struct GoRenderer {
    /// Column at which generated prose comments wrap.
    pub width: usize,
}

impl Default for GoRenderer {
    fn default() -> Self {
        Self {
            width: crate::DEFAULT_WIDTH,
        }
    }
}

const CDK_IMPORT: &str = "github.com/go-curses/cdk";
const ENUMS_IMPORT: &str = "github.com/go-curses/cdk/lib/enums";

impl Renderer for GoRenderer {
    fn render(&self, doc: &Document) -> Result<String> {
        if doc.name.is_empty() {
            return Err(Error::Render("model has no type name".to_string()));
        }
        check_constants(doc)?;

        let file = if doc.is_interface() {
            debug!("{} renders with the interface layout", doc.name);
            interface_file(doc)
        } else {
            concrete_file(doc, self.width)
        };
        let out = file.serialize().map_err(|e| Error::Render(e.to_string()))?;
        Ok(text::unescape_entities(&out))
    }

    fn file_extension(&self) -> &str {
        "go"
    }
}

// -- Declarations --------------------------------------------------------------

/// One top-level item of the generated file.
enum Decl {
    Package(String),
    Imports(Vec<&'static str>),
    Const {
        docs: String,
        name: String,
        ty: String,
        value: String,
    },
    Interface {
        docs: String,
        name: String,
        embeds: Vec<String>,
        methods: Vec<String>,
    },
    Struct {
        docs: String,
        name: String,
        embeds: Vec<String>,
    },
    Func {
        docs: String,
        signature: String,
        body: String,
    },
}

impl Decl {
    fn write_to(&self, out: &mut String) -> std::fmt::Result {
        match self {
            Decl::Package(name) => writeln!(out, "package {}", name),
            Decl::Imports(paths) => match paths.as_slice() {
                [one] => writeln!(out, "import \"{}\"", one),
                _ => {
                    writeln!(out, "import (")?;
                    for path in paths {
                        writeln!(out, "\t\"{}\"", path)?;
                    }
                    writeln!(out, ")")
                }
            },
            Decl::Const { docs, name, ty, value } => {
                write_docs(out, docs)?;
                writeln!(out, "const {} {} = {}", name, ty, value)
            }
            Decl::Interface { docs, name, embeds, methods } => {
                write_docs(out, docs)?;
                writeln!(out, "type {} interface {{", name)?;
                for embed in embeds {
                    writeln!(out, "\t{}", embed)?;
                }
                if !embeds.is_empty() && !methods.is_empty() {
                    writeln!(out)?;
                }
                for method in methods {
                    writeln!(out, "\t{}", method)?;
                }
                writeln!(out, "}}")
            }
            Decl::Struct { docs, name, embeds } => {
                write_docs(out, docs)?;
                writeln!(out, "type {} struct {{", name)?;
                for embed in embeds {
                    writeln!(out, "\t{}", embed)?;
                }
                writeln!(out, "}}")
            }
            Decl::Func { docs, signature, body } => {
                write_docs(out, docs)?;
                writeln!(out, "func {} {{", signature)?;
                if !body.is_empty() {
                    writeln!(out, "{}", body)?;
                }
                writeln!(out, "}}")
            }
        }
    }
}

fn write_docs(out: &mut String, docs: &str) -> std::fmt::Result {
    if docs.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", docs)
}

/// Ordered declarations of one generated file.
#[derive(Default)]
struct SourceFile {
    decls: Vec<Decl>,
}

impl SourceFile {
    fn push(&mut self, decl: Decl) {
        self.decls.push(decl);
    }

    fn serialize(&self) -> std::result::Result<String, std::fmt::Error> {
        let mut out = String::new();
        for (i, decl) in self.decls.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            decl.write_to(&mut out)?;
        }
        Ok(out)
    }
}

// -- Layouts --------------------------------------------------------------------

/// Qualifier for display-layer names; empty when generating into that package.
fn cdk(doc: &Document) -> &'static str {
    if doc.package == DISPLAY_PACKAGE {
        ""
    } else {
        "cdk."
    }
}

fn concrete_file(doc: &Document, width: usize) -> SourceFile {
    let cdk = cdk(doc);
    let r = doc.receiver();
    let concrete = format!("C{}", doc.name);
    let parent = if doc.parent.is_empty() { "Object" } else { doc.parent.as_str() };

    let mut file = SourceFile::default();
    file.push(Decl::Package(doc.package.clone()));
    if let Some(imports) = imports(doc, true) {
        file.push(imports);
    }

    file.push(Decl::Const {
        docs: String::new(),
        name: format!("Type{}", doc.name),
        ty: format!("{}CTypeTag", cdk),
        value: format!("\"{}-{}\"", doc.package, doc.tag),
    });
    file.push(Decl::Func {
        docs: String::new(),
        signature: "init()".to_string(),
        body: format!(
            "\t_ = {}TypesManager.AddType(Type{}, func() interface{{}} {{ return Make{}() }})",
            cdk, doc.name, doc.name
        ),
    });

    let mut methods = vec!["Init() (already bool)".to_string()];
    methods.extend(doc.functions.iter().map(method_signature));
    file.push(Decl::Interface {
        docs: type_docs(doc),
        name: doc.name.clone(),
        embeds: interface_embeds(doc, parent),
        methods,
    });

    file.push(Decl::Struct {
        docs: text::comment_block(
            &format!(
                "The {c} structure implements the {n} interface and is exported to facilitate type embedding with custom implementations. No member variables are exported as the interface methods are the only intended means of interacting with {n} objects.",
                c = concrete,
                n = doc.name
            ),
            width,
        ),
        name: concrete.clone(),
        embeds: vec![format!("C{}", parent)],
    });

    file.push(Decl::Func {
        docs: format!(
            "// Make{n} is used by the Buildable system to construct a new {n}.",
            n = doc.name
        ),
        signature: format!("Make{}() *{}", doc.name, concrete),
        body: make_body(doc, &r, &concrete),
    });

    let ctor = doc.constructor.as_ref();
    let ctor_docs = ctor.map(|c| c.docs.as_str()).unwrap_or_default();
    file.push(Decl::Func {
        docs: join_docs(
            &format!("// New{n} is the constructor for new {n} instances.", n = doc.name),
            ctor_docs,
        ),
        signature: format!(
            "New{}({}) (value *{})",
            doc.name,
            param_list(ctor.map(|c| c.params.as_slice()).unwrap_or_default()),
            concrete
        ),
        body: alloc_body(&r, &concrete),
    });

    for factory in &doc.factories {
        let suffix = factory.name.strip_prefix("New").unwrap_or(&factory.name);
        file.push(Decl::Func {
            docs: factory.docs.clone(),
            signature: format!(
                "New{}{}({}) (value *{})",
                doc.name,
                suffix,
                param_list(&factory.params),
                concrete
            ),
            body: alloc_body(&r, &concrete),
        });
    }

    file.push(Decl::Func {
        docs: text::comment_block(
            &format!(
                "Init initializes a {n} object. This must be called at least once to set up the necessary defaults and allocate any memory structures. Calling this more than once is safe though unnecessary. Only the first call will result in any effect upon the {n} instance. Init is used in the New{n} constructor and only necessary when implementing a derivative {n} type.",
                n = doc.name
            ),
            width,
        ),
        signature: format!("({} *{}) Init() (already bool)", r, concrete),
        body: init_body(doc, &r, parent, cdk),
    });

    for func in &doc.functions {
        file.push(Decl::Func {
            docs: func.docs.clone(),
            signature: format!("({} *{}) {}", r, concrete, method_signature(func)),
            body: func.body.clone(),
        });
    }

    push_constants(&mut file, doc, cdk);
    file
}

fn interface_file(doc: &Document) -> SourceFile {
    let cdk = cdk(doc);
    let mut file = SourceFile::default();
    file.push(Decl::Package(doc.package.clone()));
    if let Some(imports) = imports(doc, false) {
        file.push(imports);
    }
    file.push(Decl::Interface {
        docs: type_docs(doc),
        name: doc.name.clone(),
        embeds: Vec::new(),
        methods: doc.functions.iter().map(method_signature).collect(),
    });
    push_constants(&mut file, doc, cdk);
    file
}

fn imports(doc: &Document, concrete: bool) -> Option<Decl> {
    let mut paths = Vec::new();
    let uses_cdk = concrete || !doc.properties.is_empty() || !doc.signals.is_empty();
    if uses_cdk && doc.package != DISPLAY_PACKAGE {
        paths.push(CDK_IMPORT);
    }
    if concrete && doc.functions.iter().any(|f| f.body.contains("enums.")) {
        paths.push(ENUMS_IMPORT);
    }
    (!paths.is_empty()).then_some(Decl::Imports(paths))
}

fn push_constants(file: &mut SourceFile, doc: &Document, cdk: &str) {
    for prop in &doc.properties {
        file.push(Decl::Const {
            docs: property_docs(prop),
            name: format!("Property{}", prop.name),
            ty: format!("{}Property", cdk),
            value: format!("\"{}\"", prop.tag),
        });
    }
    for signal in &doc.signals {
        file.push(Decl::Const {
            docs: signal_docs(signal),
            name: format!("Signal{}", signal.name),
            ty: format!("{}Signal", cdk),
            value: format!("\"{}\"", signal.tag),
        });
    }
}

// -- Pieces ---------------------------------------------------------------------

fn join_docs(first: &str, rest: &str) -> String {
    if rest.is_empty() {
        return first.to_string();
    }
    format!("{}\n//\n{}", first, rest)
}

/// Hierarchy tree comment followed by the description.
fn type_docs(doc: &Document) -> String {
    let mut lines = Vec::new();
    if !doc.hierarchy.is_empty() {
        lines.push(format!("// {} Hierarchy:", doc.name));
        for (depth, entry) in doc.hierarchy.iter().enumerate() {
            if depth == 0 {
                lines.push(format!("//\t{}", entry));
            } else {
                lines.push(format!("//\t{}+- {}", "  ".repeat(depth), entry));
            }
        }
    }
    if !doc.description.is_empty() {
        if !lines.is_empty() {
            lines.push("//".to_string());
        }
        lines.push(doc.description.clone());
    }
    lines.join("\n")
}

fn interface_embeds(doc: &Document, parent: &str) -> Vec<String> {
    let mut embeds = vec![parent.to_string()];
    embeds.extend(doc.implements.iter().cloned());
    embeds
}

fn param_list(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| format!("{} {}", p.name, p.ty.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn method_signature(func: &Function) -> String {
    let params = param_list(&func.params);
    if func.returns.is_none() {
        format!("{}({})", func.name, params)
    } else {
        format!("{}({}) (value {})", func.name, params, func.returns.name())
    }
}

fn alloc_body(r: &str, concrete: &str) -> String {
    format!("\t{r} := new({c})\n\t{r}.Init()\n\treturn {r}", r = r, c = concrete)
}

fn make_body(doc: &Document, r: &str, concrete: &str) -> String {
    match &doc.constructor {
        Some(ctor) => {
            let args: Vec<&str> = ctor
                .params
                .iter()
                .map(|p| p.default.as_deref().unwrap_or("nil"))
                .collect();
            format!("\treturn New{}({})", doc.name, args.join(", "))
        }
        None => alloc_body(r, concrete),
    }
}

fn init_body(doc: &Document, r: &str, parent: &str, cdk: &str) -> String {
    let mut lines = vec![
        format!("\tif {}.InitTypeItem(Type{}, {}) {{", r, doc.name, r),
        "\t\treturn true".to_string(),
        "\t}".to_string(),
        format!("\t{}.C{}.Init()", r, parent),
    ];
    for prop in &doc.properties {
        lines.push(format!(
            "\t_ = {}.InstallProperty(Property{}, {}{}Property, {}, {})",
            r,
            prop.name,
            cdk,
            prop.accessor_label(),
            prop.writable,
            prop.default.render()
        ));
    }
    lines.push("\treturn false".to_string());
    lines.join("\n")
}

fn property_docs(prop: &Property) -> String {
    let mut lines = Vec::new();
    if !prop.docs.is_empty() {
        lines.push(prop.docs.clone());
    }
    lines.push(format!(
        "// Flags: {}",
        if prop.writable { "Read / Write" } else { "Read" }
    ));
    if let Some(literal) = prop.default.literal() {
        lines.push(format!("// Default value: {}", literal));
    }
    lines.join("\n")
}

fn signal_docs(signal: &Signal) -> String {
    let mut lines = Vec::new();
    if !signal.docs.is_empty() {
        lines.push(signal.docs.clone());
    }
    if !signal.params.is_empty() {
        lines.push("// Listener function arguments:".to_string());
        for p in &signal.params {
            match &p.note {
                Some(note) => lines.push(format!("// \t{} {}\t{}", p.name, p.ty.name(), note)),
                None => lines.push(format!("// \t{} {}", p.name, p.ty.name())),
            }
        }
    }
    lines.join("\n")
}

/// Type, property and signal constants share one Go namespace.
fn check_constants(doc: &Document) -> Result<()> {
    let mut seen = HashSet::new();
    seen.insert(format!("Type{}", doc.name));
    let names = doc
        .properties
        .iter()
        .map(|p| format!("Property{}", p.name))
        .chain(doc.signals.iter().map(|s| format!("Signal{}", s.name)));
    for name in names {
        if !seen.insert(name.clone()) {
            return Err(Error::Render(format!("duplicate constant {}", name)));
        }
    }
    Ok(())
}

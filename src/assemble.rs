//! Model assembly: run the extractors, then link constructor defaults to
//! properties and synthesize function bodies from property/signal names.

use crate::error::Result;
use crate::model::{normalize_name, Document, Function, Param, Property, Signal};
use crate::parser;
use crate::GenerateOptions;
use log::{debug, info};

/// Parse and assemble a documentation page.
pub fn assemble(html: &str, opts: &GenerateOptions) -> Result<Document> {
    let mut doc = parser::parse(html, opts)?;
    info!(
        "{}: {} properties, {} signals, {} functions, {} factories",
        doc.name,
        doc.properties.len(),
        doc.signals.len(),
        doc.functions.len(),
        doc.factories.len()
    );
    link_defaults(&mut doc);
    synthesize_bodies(&mut doc);
    Ok(doc)
}

// -- Default values -----------------------------------------------------------

/// Copy property defaults onto same-named constructor and factory
/// parameters; scalar parameters without one get their zero literal.
pub fn link_defaults(doc: &mut Document) {
    if let Some(ctor) = doc.constructor.as_mut() {
        apply_defaults(&mut ctor.params, &doc.properties);
    }
    for factory in &mut doc.factories {
        apply_defaults(&mut factory.params, &doc.properties);
    }
}

fn apply_defaults(params: &mut [Param], properties: &[Property]) {
    for param in params {
        let key = normalize_name(&param.name);
        if let Some(prop) = properties.iter().find(|p| normalize_name(&p.tag) == key) {
            param.default = prop.default.literal();
        }
        if param.default.is_none() && param.ty.kind().is_scalar() {
            param.default = Some(param.ty.zero().to_string());
        }
    }
}

// -- Body synthesis -----------------------------------------------------------

/// Fill in the body of every plain function.
pub fn synthesize_bodies(doc: &mut Document) {
    let receiver = doc.receiver();
    for func in &mut doc.functions {
        func.body = synthesize(&receiver, func, &doc.properties, &doc.signals);
        if !func.body.is_empty() {
            debug!("synthesized body for {}", func.name);
        }
    }
}

fn synthesize(receiver: &str, func: &Function, properties: &[Property], signals: &[Signal]) -> String {
    for prop in properties {
        if func.name == format!("Get{}", prop.name) {
            return getter_body(receiver, prop);
        }
        if func.name == format!("Set{}", prop.name) {
            if let Some(param) = setter_param(func, prop) {
                return setter_body(receiver, prop, param);
            }
        }
    }
    for signal in signals {
        if func.name == format!("Emit{}", signal.name) {
            return emit_body(receiver, func, signal);
        }
    }
    if !func.returns.is_none() {
        return format!("\treturn {}", func.returns.zero());
    }
    String::new()
}

/// The parameter a setter writes: an exact name match if there is one,
/// otherwise the first whose name overlaps the property's or whose type
/// matches it.
fn setter_param<'a>(func: &'a Function, prop: &Property) -> Option<&'a Param> {
    let prop_key = normalize_name(&prop.tag);
    if let Some(exact) = func.params.iter().find(|p| normalize_name(&p.name) == prop_key) {
        return Some(exact);
    }
    func.params.iter().find(|p| {
        let key = normalize_name(&p.name);
        let overlaps = !key.is_empty() && (key.contains(&prop_key) || prop_key.contains(&key));
        overlaps || p.ty.name() == prop.ty.name()
    })
}

fn getter_body(r: &str, prop: &Property) -> String {
    [
        "\tvar err error".to_string(),
        format!(
            "\tif value, err = {}.Get{}Property(Property{}); err != nil {{",
            r,
            prop.accessor_label(),
            prop.name
        ),
        format!("\t\t{}.LogErr(err)", r),
        "\t}".to_string(),
        "\treturn".to_string(),
    ]
    .join("\n")
}

fn setter_body(r: &str, prop: &Property, param: &Param) -> String {
    [
        format!(
            "\tif err := {}.Set{}Property(Property{}, {}); err != nil {{",
            r,
            prop.accessor_label(),
            prop.name,
            param.name
        ),
        format!("\t\t{}.LogErr(err)", r),
        "\t}".to_string(),
    ]
    .join("\n")
}

fn emit_body(r: &str, func: &Function, signal: &Signal) -> String {
    let mut args = vec![r.to_string()];
    args.extend(func.params.iter().map(|p| p.name.clone()));
    let mut lines = vec![
        format!(
            "\tif f := {}.Emit(Signal{}, {}); f == enums.EVENT_STOP {{",
            r,
            signal.name,
            args.join(", ")
        ),
        format!("\t\t{}.LogInfo(\"{} listener requested EVENT_STOP\")", r, signal.tag),
        "\t}".to_string(),
    ];
    if !func.returns.is_none() {
        lines.push("\treturn".to_string());
    }
    lines.join("\n")
}

//! Declaration assembly: render descriptors as interface syntax, apply the
//! export policy, and join blocks in dependency-first order.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::ir::{DeclBody, Declaration, FieldDecl, TypeDescriptor};

/// Which generated declarations get the `export` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportPolicy {
    /// Every declaration, flagged at creation time.
    All,
    /// Only the declaration matching the root name, applied at assembly.
    #[default]
    Root,
    /// Nothing.
    None,
}

const INDENT: &str = "  ";

/// Join the declaration table into final output text.
///
/// Output order is the reverse of first-registration order, which places
/// leaf declarations before the declarations that reference them and keeps
/// the emit order deterministic.
pub fn assemble(
    decls: IndexMap<String, Option<Declaration>>,
    root_name: &str,
    export: ExportPolicy,
) -> String {
    // Pending slots are all finalized by the time the builders return;
    // `flatten` is a no-op filter here.
    let mut list: Vec<Declaration> = decls.into_values().flatten().collect();
    if export == ExportPolicy::Root {
        for decl in &mut list {
            if decl.name == root_name {
                decl.exported = true;
            }
        }
    }
    list.iter()
        .rev()
        .map(render_declaration)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_declaration(decl: &Declaration) -> String {
    let export = if decl.exported { "export " } else { "" };
    match &decl.body {
        DeclBody::Interface(fields) => format!(
            "{export}interface {} {{\n{}}}",
            decl.name,
            render_fields(fields, 1)
        ),
        DeclBody::IndexSignature(ty) => format!(
            "{export}interface {} {{\n{INDENT}[key: string]: {};\n}}",
            decl.name,
            render_type(ty, 1)
        ),
        DeclBody::Alias(ty) => {
            format!("{export}type {} = {};", decl.name, render_type(ty, 0))
        }
    }
}

fn render_fields(fields: &[FieldDecl], level: usize) -> String {
    let mut out = String::new();
    for field in fields {
        out.push_str(&INDENT.repeat(level));
        if field.readonly {
            out.push_str("readonly ");
        }
        out.push_str(&field.name);
        if field.optional {
            out.push('?');
        }
        out.push_str(": ");
        out.push_str(&render_type(&field.ty, level));
        out.push_str(";\n");
    }
    out
}

pub fn render_type(ty: &TypeDescriptor, level: usize) -> String {
    match ty {
        TypeDescriptor::Any => "any".to_string(),
        TypeDescriptor::Unknown => "unknown".to_string(),
        TypeDescriptor::Primitive(name) => name.clone(),
        TypeDescriptor::LiteralUnion(values) => values
            .iter()
            .map(|v| format!("{v:?}"))
            .collect::<Vec<_>>()
            .join(" | "),
        TypeDescriptor::ArrayOf(inner) => {
            let rendered = render_type(inner, level);
            if needs_parens(inner) {
                format!("({rendered})[]")
            } else {
                format!("{rendered}[]")
            }
        }
        TypeDescriptor::Tuple(items) => {
            let inner = items
                .iter()
                .map(|t| render_type(t, level))
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{inner}]")
        }
        TypeDescriptor::NamedRef(name) => name.clone(),
        TypeDescriptor::InlineBody(fields) => {
            format!(
                "{{\n{}{}}}",
                render_fields(fields, level + 1),
                INDENT.repeat(level)
            )
        }
        TypeDescriptor::Generic { name, params } => {
            if params.is_empty() {
                name.clone()
            } else {
                let inner = params
                    .iter()
                    .map(|t| render_type(t, level))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{name}<{inner}>")
            }
        }
    }
}

// Callable signatures and unions bind looser than the `[]` suffix.
fn needs_parens(ty: &TypeDescriptor) -> bool {
    match ty {
        TypeDescriptor::LiteralUnion(values) => values.len() > 1,
        TypeDescriptor::Primitive(name) => name.contains("=>") || name.contains('|'),
        _ => false,
    }
}

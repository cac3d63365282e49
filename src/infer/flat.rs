//! Flattened record building: one declaration, nested object bodies inlined.
//!
//! Never creates additional named declarations. Visited bookkeeping follows
//! an enter/exit discipline (push on enter, pop after the body renders), so
//! a record reachable through two sibling paths renders fully both times,
//! while a record that contains itself renders the inner occurrence as a
//! fallback `any` instead of recursing forever.

use crate::infer::{field_label, terminal_descriptor, Context, ConvertError};
use crate::ir::{DeclBody, Declaration, FieldDecl, TypeDescriptor};
use crate::value::{identity, RecordRef, Value};

use super::arr;

pub(crate) fn build_root(
    ctx: &mut Context,
    value: &Value,
    root_name: &str,
) -> Result<(), ConvertError> {
    let body = match value {
        Value::Record(record) | Value::Instance { fields: record, .. } => {
            let id = identity(record);
            ctx.visited.insert(id);
            let fields = flat_fields(ctx, record)?;
            ctx.visited.remove(&id);
            DeclBody::Interface(fields)
        }
        Value::Array(_) => DeclBody::Alias(resolve_flat(ctx, value)?),
        other if ctx.options.strict => DeclBody::Alias(resolve_flat(ctx, other)?),
        _ => DeclBody::IndexSignature(TypeDescriptor::Any),
    };
    let exported = ctx.export_all;
    ctx.decls.insert(
        root_name.to_string(),
        Some(Declaration {
            name: root_name.to_string(),
            exported,
            body,
        }),
    );
    Ok(())
}

fn flat_fields(ctx: &mut Context, record: &RecordRef) -> Result<Vec<FieldDecl>, ConvertError> {
    let map = record.borrow();
    let mut out = Vec::with_capacity(map.len());
    for (key, child) in map.iter() {
        let ty = match ctx.options.type_map.get(key) {
            Some(mapped) => TypeDescriptor::Primitive(mapped.clone()),
            None => resolve_flat(ctx, child)?,
        };
        out.push(FieldDecl {
            name: field_label(key, ctx.options),
            ty,
            readonly: ctx.options.readonly_properties,
            optional: ctx.options.optional_properties,
        });
    }
    Ok(out)
}

fn resolve_flat(ctx: &mut Context, value: &Value) -> Result<TypeDescriptor, ConvertError> {
    ctx.enter()?;
    let out = resolve_flat_inner(ctx, value);
    ctx.leave();
    out
}

fn resolve_flat_inner(
    ctx: &mut Context,
    value: &Value,
) -> Result<TypeDescriptor, ConvertError> {
    if let Some(done) = terminal_descriptor(value, ctx.options) {
        return Ok(done);
    }
    match value {
        Value::Record(record) | Value::Instance { fields: record, .. } => {
            inline_record(ctx, record)
        }
        Value::Array(items) => {
            // Arrays with any record element use only the first record's
            // shape, inlined and suffixed with [].
            if let Some(first_record) = items.iter().find_map(|v| match v {
                Value::Record(r) => Some(r),
                _ => None,
            }) {
                let inner = inline_record(ctx, first_record)?;
                return Ok(TypeDescriptor::array_of(inner));
            }
            Ok(arr::classify(
                items,
                ctx.options.array_min_tuple_size,
                ctx.options.array_max_tuple_size,
            ))
        }
        Value::Set(entries) => {
            let param = match entries.first() {
                Some(first) => resolve_flat(ctx, first)?,
                None => TypeDescriptor::Unknown,
            };
            Ok(TypeDescriptor::Generic {
                name: "Set".into(),
                params: vec![param],
            })
        }
        Value::Map(pairs) => {
            let params = match pairs.first() {
                Some((key, val)) => {
                    vec![resolve_flat(ctx, key)?, resolve_flat(ctx, val)?]
                }
                None => vec![TypeDescriptor::Unknown, TypeDescriptor::Unknown],
            };
            Ok(TypeDescriptor::Generic {
                name: "Map".into(),
                params,
            })
        }
        other => Ok(TypeDescriptor::primitive(other.type_of())),
    }
}

fn inline_record(
    ctx: &mut Context,
    record: &RecordRef,
) -> Result<TypeDescriptor, ConvertError> {
    let id = identity(record);
    if ctx.visited.contains(&id) {
        // true ancestor cycle
        return Ok(TypeDescriptor::Any);
    }
    ctx.visited.insert(id);
    let fields = flat_fields(ctx, record);
    ctx.visited.remove(&id);
    Ok(TypeDescriptor::InlineBody(fields?))
}

#[cfg(test)]
mod tests {
    use crate::emit::ExportPolicy;
    use crate::infer::{convert_flat, ConvertError, ConvertOptions, MAX_DEPTH};
    use crate::parse::RawInput;
    use crate::value::{RecordRef, Value};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn text(src: &str) -> RawInput {
        RawInput::Text(src.to_string())
    }

    fn defaults() -> ConvertOptions {
        ConvertOptions::default()
    }

    #[test]
    fn nested_objects_are_inlined_with_indentation() {
        let out = convert_flat(
            text(r#"{"user":{"name":"John","address":{"city":"Oslo"}}}"#),
            "Person",
            ExportPolicy::Root,
            &defaults(),
        )
        .unwrap();
        assert_eq!(
            out,
            "export interface Person {\n  \
               user: {\n    \
                 name: string;\n    \
                 address: {\n      \
                   city: string;\n    \
                 };\n  \
               };\n}"
        );
    }

    #[test]
    fn flat_never_emits_extra_declarations() {
        let out = convert_flat(
            text(r#"{"a":{"b":{"c":1}}}"#),
            "Root",
            ExportPolicy::All,
            &defaults(),
        )
        .unwrap();
        assert_eq!(out.matches("interface").count(), 1);
        assert_eq!(out.matches("export").count(), 1);
    }

    #[test]
    fn diamond_renders_fully_at_both_occurrences() {
        let shared = Rc::new(RefCell::new(indexmap::IndexMap::new()));
        shared
            .borrow_mut()
            .insert("x".to_string(), Value::Number(1.0));
        let root = Value::record([
            ("left".to_string(), Value::Record(shared.clone())),
            ("right".to_string(), Value::Record(shared)),
        ]);
        let out = convert_flat(
            RawInput::Parsed(root),
            "Root",
            ExportPolicy::None,
            &defaults(),
        )
        .unwrap();
        assert_eq!(
            out,
            "interface Root {\n  \
               left: {\n    x: number;\n  };\n  \
               right: {\n    x: number;\n  };\n}"
        );
    }

    #[test]
    fn self_reference_renders_inner_occurrence_as_any() {
        let rec: RecordRef = Rc::new(RefCell::new(indexmap::IndexMap::new()));
        rec.borrow_mut()
            .insert("name".to_string(), Value::String("x".into()));
        rec.borrow_mut()
            .insert("me".to_string(), Value::Record(rec.clone()));
        let out = convert_flat(
            RawInput::Parsed(Value::Record(rec)),
            "Node",
            ExportPolicy::None,
            &defaults(),
        )
        .unwrap();
        assert_eq!(out, "interface Node {\n  name: string;\n  me: any;\n}");
    }

    #[test]
    fn record_arrays_inline_first_shape_with_suffix() {
        let out = convert_flat(
            text(r#"{"items":[{"id":1},{"id":2}]}"#),
            "Cart",
            ExportPolicy::None,
            &defaults(),
        )
        .unwrap();
        assert_eq!(
            out,
            "interface Cart {\n  \
               items: {\n    id: number;\n  }[];\n}"
        );
    }

    #[test]
    fn primitive_arrays_use_the_classifier() {
        let out = convert_flat(
            text(r#"{"pair":[1, "two"], "nums":[1,2,3]}"#),
            "Root",
            ExportPolicy::None,
            &defaults(),
        )
        .unwrap();
        assert_eq!(
            out,
            "interface Root {\n  pair: [number, string];\n  nums: number[];\n}"
        );
    }

    #[test]
    fn strict_scalar_root_becomes_direct_alias() {
        let strict = ConvertOptions { strict: true, ..defaults() };
        let out = convert_flat(text("null"), "Root", ExportPolicy::None, &strict).unwrap();
        assert_eq!(out, "type Root = null;");

        let loose = convert_flat(text("null"), "Root", ExportPolicy::None, &defaults())
            .unwrap();
        assert_eq!(loose, "interface Root {\n  [key: string]: any;\n}");
    }

    #[test]
    fn depth_guard_applies_to_inlining() {
        let mut value = Value::Number(1.0);
        for _ in 0..(MAX_DEPTH + 8) {
            value = Value::record([("a".to_string(), value)]);
        }
        let err = convert_flat(
            RawInput::Parsed(value),
            "Root",
            ExportPolicy::None,
            &defaults(),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::MaxDepthExceeded));
    }

    #[test]
    fn empty_record_renders_empty_body() {
        let out = convert_flat(text("{}"), "Root", ExportPolicy::None, &defaults()).unwrap();
        assert_eq!(out, "interface Root {\n}");
    }
}

//! Array/tuple classification.
//!
//! Tuples are only produced for genuinely heterogeneous arrays whose length
//! falls inside the tuple-size band; homogeneity short-circuits tuple
//! generation, and out-of-band arrays only get an element type when their
//! primitive tags agree.

use std::collections::BTreeSet;

use crate::ir::TypeDescriptor;
use crate::value::Value;

pub fn classify(values: &[Value], min_tuple: usize, max_tuple: usize) -> TypeDescriptor {
    if values.is_empty() {
        return TypeDescriptor::array_of(TypeDescriptor::Any);
    }

    let len = values.len();
    if len < min_tuple || len > max_tuple {
        // Size fallback: only primitive homogeneity is rewarded. Object-typed
        // elements (including null, per host `typeof`) drop out of the vote.
        let tags: BTreeSet<&'static str> =
            values.iter().filter_map(primitive_tag).collect();
        let mut it = tags.into_iter();
        return match (it.next(), it.next()) {
            (Some(tag), None) => {
                TypeDescriptor::array_of(TypeDescriptor::primitive(tag))
            }
            _ => TypeDescriptor::array_of(TypeDescriptor::Any),
        };
    }

    // In-band: one fine tag per position.
    let tags: Vec<&'static str> = values.iter().map(fine_tag).collect();
    let homogeneous = tags.windows(2).all(|w| w[0] == w[1]);
    if homogeneous && tags[0] != "object" && tags[0] != "array" {
        return TypeDescriptor::array_of(TypeDescriptor::primitive(tags[0]));
    }
    TypeDescriptor::Tuple(tags.into_iter().map(tag_descriptor).collect())
}

/// Host `typeof` tag for primitives; `None` for anything object-typed.
fn primitive_tag(v: &Value) -> Option<&'static str> {
    match v.type_of() {
        "object" => None,
        tag => Some(tag),
    }
}

/// Finer per-position classification used inside the tuple-size band.
fn fine_tag(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Undefined => "undefined",
        Value::Array(_) => "array",
        v => match v.type_of() {
            "object" => "object",
            tag => tag,
        },
    }
}

fn tag_descriptor(tag: &'static str) -> TypeDescriptor {
    match tag {
        "array" => TypeDescriptor::array_of(TypeDescriptor::Any),
        "function" => TypeDescriptor::primitive("Function"),
        tag => TypeDescriptor::primitive(tag),
    }
}

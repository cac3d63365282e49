//! Canonical in-memory value model.
//!
//! Covers JSON plus the host-runtime specials the resolver knows how to
//! classify (dates, regexes, typed buffers, keyed collections, functions,
//! class instances). Values are read-only inputs; the engine never mutates
//! them. Records are the one node kind that can be shared between branches
//! or made cyclic, so they sit behind an `Rc` and are tracked by identity.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Shared handle to a record's field map. Cloning is shallow; two clones of
/// the same handle compare equal under [`identity`].
pub type RecordRef = Rc<RefCell<IndexMap<String, Value>>>;

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Undefined,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(String),
    /// A symbol with an optional description.
    Symbol(Option<String>),
    Function { name: String, is_async: bool },
    Date(DateTime<Utc>),
    /// A regular expression, stored as its source pattern.
    Regex(String),
    /// An error value, stored as its message.
    ErrorValue(String),
    Promise,
    Array(Vec<Value>),
    Buffer(BufferKind),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
    WeakSet,
    WeakMap,
    /// Anything iterable that is none of the above.
    Iterable,
    Record(RecordRef),
    /// An object whose runtime type tag is not the bare generic-object tag.
    Instance { class: String, fields: RecordRef },
}

/// Typed buffer variants, each mapped to its own interface-level type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    Int8Array,
    Uint8Array,
    Uint8ClampedArray,
    Int16Array,
    Uint16Array,
    Int32Array,
    Uint32Array,
    Float32Array,
    Float64Array,
    BigInt64Array,
    BigUint64Array,
    ArrayBuffer,
    DataView,
    /// Generic buffer-view fallback.
    View,
}

impl BufferKind {
    pub fn type_name(self) -> &'static str {
        match self {
            BufferKind::Int8Array => "Int8Array",
            BufferKind::Uint8Array => "Uint8Array",
            BufferKind::Uint8ClampedArray => "Uint8ClampedArray",
            BufferKind::Int16Array => "Int16Array",
            BufferKind::Uint16Array => "Uint16Array",
            BufferKind::Int32Array => "Int32Array",
            BufferKind::Uint32Array => "Uint32Array",
            BufferKind::Float32Array => "Float32Array",
            BufferKind::Float64Array => "Float64Array",
            BufferKind::BigInt64Array => "BigInt64Array",
            BufferKind::BigUint64Array => "BigUint64Array",
            BufferKind::ArrayBuffer => "ArrayBuffer",
            BufferKind::DataView => "DataView",
            BufferKind::View => "ArrayBufferView",
        }
    }
}

impl Value {
    /// Build a record from key/value pairs, preserving insertion order.
    pub fn record<I>(entries: I) -> Value
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Value::Record(Rc::new(RefCell::new(entries.into_iter().collect())))
    }

    /// Runtime type tag, following host `typeof` semantics: `null` and every
    /// container/special value report `"object"`.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Function { .. } => "function",
            _ => "object",
        }
    }

    /// Non-null primitives are the only values eligible for exact-value
    /// type-map overrides.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Undefined
                | Value::Bool(_)
                | Value::Number(_)
                | Value::BigInt(_)
                | Value::String(_)
                | Value::Symbol(_)
        )
    }

    /// Display form used as the exact-value key in the type-map table.
    /// Integral floats render without a fractional part so `42` and `42.0`
    /// share a key.
    pub fn literal_key(&self) -> Option<String> {
        match self {
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(fmt_number(*n)),
            Value::BigInt(i) => Some(i.to_string()),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

fn fmt_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

/// Stable identity token for a record, valid for the lifetime of the value
/// graph borrowed by one conversion call.
pub fn identity(record: &RecordRef) -> usize {
    Rc::as_ptr(record) as usize
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(xs) => {
                Value::Array(xs.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(m) => {
                // `preserve_order` keeps the source key order intact.
                Value::record(m.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
        }
    }
}

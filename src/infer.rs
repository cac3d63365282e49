//! Type resolution and interface synthesis.
//!
//! One top-level `convert` call owns a fresh conversion context (declaration
//! table + visited set) threaded through every recursive step; nothing is
//! process-wide. The Referenced strategy lives here: every nested record
//! becomes a separately named, cross-referenced declaration. The Flattened
//! strategy (single inlined declaration) lives in [`flat`].

pub mod arr;
pub mod flat;

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::emit::{self, ExportPolicy};
use crate::ident::{self, CaseType};
use crate::ir::{DeclBody, Declaration, FieldDecl, TypeDescriptor};
use crate::parse::{self, ParseError, RawInput};
use crate::value::{identity, RecordRef, Value};

/// Hard recursion bound; pathological nesting fails loudly instead of
/// exhausting the call stack. Each level costs a handful of stack frames,
/// so the bound must stay well under what a debug-build test thread can
/// hold. 128 also matches the parser's own nesting limit.
pub const MAX_DEPTH: usize = 128;

/// Name used when a key yields nothing identifier-shaped.
const FALLBACK_TYPE_NAME: &str = "AnonymousType";

// ------------------------------- Options ---------------------------------- //

/// Immutable configuration snapshot for one conversion call.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConvertOptions {
    /// Largest array length still considered for tuple synthesis.
    pub array_max_tuple_size: usize,
    /// Smallest array length considered for tuple synthesis.
    pub array_min_tuple_size: usize,
    /// Map absent/ambiguous values to literal `undefined` instead of a
    /// permissive catch-all.
    pub strict: bool,
    /// Overrides keyed by property name, literal scalar value, or runtime
    /// type name; a hit short-circuits inference with the mapped type name.
    pub type_map: IndexMap<String, String>,
    pub property_case: CaseType,
    pub readonly_properties: bool,
    pub optional_properties: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            array_max_tuple_size: 10,
            array_min_tuple_size: 2,
            strict: false,
            type_map: IndexMap::new(),
            property_case: CaseType::Original,
            readonly_properties: false,
            optional_properties: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    /// Programmer error, surfaced hard instead of being folded into the
    /// bad-input path.
    #[error("invalid root type name {0:?}")]
    InvalidRootName(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("maximum nesting depth ({MAX_DEPTH}) exceeded")]
    MaxDepthExceeded,
}

// ------------------------------- Context ---------------------------------- //

/// Per-call conversion state. Created fresh at the top of every `convert`;
/// never shared across invocations.
pub(crate) struct Context<'a> {
    pub(crate) options: &'a ConvertOptions,
    pub(crate) export_all: bool,
    /// Insertion-ordered declaration table. `None` marks a reserved slot
    /// whose body is still being resolved; every slot is finalized before
    /// assembly.
    pub(crate) decls: IndexMap<String, Option<Declaration>>,
    /// Record identities currently on the flattening path; the Flattened
    /// builder's enter/exit bookkeeping. The Referenced strategy detects
    /// revisits through `assigned` instead.
    pub(crate) visited: HashSet<usize>,
    /// identity → declaration name, so revisits reuse the first assignment.
    assigned: HashMap<usize, String>,
    depth: usize,
}

impl<'a> Context<'a> {
    fn new(options: &'a ConvertOptions, export_all: bool) -> Self {
        Self {
            options,
            export_all,
            decls: IndexMap::new(),
            visited: HashSet::new(),
            assigned: HashMap::new(),
            depth: 0,
        }
    }

    pub(crate) fn enter(&mut self) -> Result<(), ConvertError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ConvertError::MaxDepthExceeded);
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Reserve a declaration slot under `base`, suffixing (`User`, `User2`,
    /// ...) when another record already claimed the name.
    fn claim_name(&mut self, base: &str) -> String {
        let name = if self.decls.contains_key(base) {
            let mut n = 2usize;
            loop {
                let candidate = format!("{base}{n}");
                if !self.decls.contains_key(&candidate) {
                    break candidate;
                }
                n += 1;
            }
        } else {
            base.to_string()
        };
        self.decls.insert(name.clone(), None);
        name
    }

    fn finalize(&mut self, decl: Declaration) {
        self.decls.insert(decl.name.clone(), Some(decl));
    }
}

/// Case-transform a property key and quote it if unsafe.
pub(crate) fn field_label(key: &str, options: &ConvertOptions) -> String {
    ident::to_field_name(&ident::format_case(key, options.property_case))
}

// ------------------------------ Front API --------------------------------- //

/// Convert input into cross-referenced named declarations (the Referenced
/// strategy).
pub fn convert(
    input: RawInput,
    root_name: &str,
    export: ExportPolicy,
    options: &ConvertOptions,
) -> Result<String, ConvertError> {
    run(input, root_name, export, options, Strategy::Referenced)
}

/// Convert input into one flattened declaration with nested bodies inlined.
pub fn convert_flat(
    input: RawInput,
    root_name: &str,
    export: ExportPolicy,
    options: &ConvertOptions,
) -> Result<String, ConvertError> {
    run(input, root_name, export, options, Strategy::Flattened)
}

#[derive(Debug, Clone, Copy)]
enum Strategy {
    Referenced,
    Flattened,
}

fn run(
    input: RawInput,
    root_name: &str,
    export: ExportPolicy,
    options: &ConvertOptions,
    strategy: Strategy,
) -> Result<String, ConvertError> {
    if !ident::is_valid_type_name(root_name) {
        return Err(ConvertError::InvalidRootName(root_name.to_string()));
    }
    let value = parse::parse_input(input)?;
    let mut ctx = Context::new(options, export == ExportPolicy::All);
    match strategy {
        Strategy::Referenced => build_root(&mut ctx, &value, root_name)?,
        Strategy::Flattened => flat::build_root(&mut ctx, &value, root_name)?,
    }
    Ok(emit::assemble(ctx.decls, root_name, export))
}

/// Root dispatch: records get an interface, arrays get a type alias, and
/// everything else renders as a permissive index-signature record. The
/// strict-mode direct alias for scalar roots belongs to the Flattened
/// strategy only.
fn build_root(
    ctx: &mut Context,
    value: &Value,
    root_name: &str,
) -> Result<(), ConvertError> {
    match value {
        Value::Record(record) | Value::Instance { fields: record, .. } => {
            build_record(ctx, record, root_name)?;
        }
        Value::Array(_) => {
            // Reserve the root slot first so reverse-order assembly keeps
            // the root declaration last.
            ctx.decls.insert(root_name.to_string(), None);
            let ty = resolve(ctx, value, root_name)?;
            ctx.finalize(Declaration {
                name: root_name.to_string(),
                exported: ctx.export_all,
                body: DeclBody::Alias(ty),
            });
        }
        _ => {
            ctx.decls.insert(root_name.to_string(), None);
            ctx.finalize(Declaration {
                name: root_name.to_string(),
                exported: ctx.export_all,
                body: DeclBody::IndexSignature(TypeDescriptor::Any),
            });
        }
    }
    Ok(())
}

// ---------------------------- Type resolution ------------------------------ //

/// Non-recursive classification: type-map overrides, special host values,
/// and scalar fallbacks. `None` means the value needs recursive handling.
pub(crate) fn terminal_descriptor(
    value: &Value,
    options: &ConvertOptions,
) -> Option<TypeDescriptor> {
    // Custom overrides win outright: exact-value key first, then the
    // runtime-type-name key.
    if value.is_primitive() && !options.type_map.is_empty() {
        if let Some(mapped) = value
            .literal_key()
            .and_then(|key| options.type_map.get(&key))
        {
            return Some(TypeDescriptor::Primitive(mapped.clone()));
        }
        if let Some(mapped) = options.type_map.get(value.type_of()) {
            return Some(TypeDescriptor::Primitive(mapped.clone()));
        }
    }

    let done = match value {
        Value::Date(_) => TypeDescriptor::primitive("Date"),
        Value::Regex(_) => TypeDescriptor::primitive("RegExp"),
        Value::ErrorValue(_) => TypeDescriptor::primitive("Error"),
        Value::Promise => TypeDescriptor::Generic {
            name: "Promise".into(),
            params: vec![TypeDescriptor::Unknown],
        },
        Value::WeakSet => TypeDescriptor::Generic {
            name: "WeakSet".into(),
            params: vec![TypeDescriptor::primitive("object")],
        },
        Value::WeakMap => TypeDescriptor::Generic {
            name: "WeakMap".into(),
            params: vec![TypeDescriptor::primitive("object"), TypeDescriptor::Unknown],
        },
        Value::Buffer(kind) => TypeDescriptor::primitive(kind.type_name()),
        Value::Iterable => TypeDescriptor::Generic {
            name: "Iterable".into(),
            params: vec![TypeDescriptor::Unknown],
        },
        Value::Function { is_async, .. } => TypeDescriptor::primitive(if *is_async {
            "(...args: unknown[]) => Promise<unknown>"
        } else {
            "(...args: unknown[]) => unknown"
        }),
        Value::Symbol(_) => TypeDescriptor::primitive("symbol"),
        Value::BigInt(_) => TypeDescriptor::primitive("bigint"),
        // null stays literal regardless of strict mode
        Value::Null => TypeDescriptor::primitive("null"),
        Value::Undefined => {
            if options.strict {
                TypeDescriptor::primitive("undefined")
            } else {
                TypeDescriptor::Unknown
            }
        }
        Value::Bool(_) => TypeDescriptor::primitive("boolean"),
        Value::Number(_) => TypeDescriptor::primitive("number"),
        Value::String(_) => TypeDescriptor::primitive("string"),
        Value::Array(_)
        | Value::Set(_)
        | Value::Map(_)
        | Value::Record(_)
        | Value::Instance { .. } => return None,
    };
    Some(done)
}

/// Resolve one value to a descriptor, registering declarations for any
/// records encountered along the way (Referenced strategy).
fn resolve(
    ctx: &mut Context,
    value: &Value,
    hint: &str,
) -> Result<TypeDescriptor, ConvertError> {
    ctx.enter()?;
    let out = resolve_inner(ctx, value, hint);
    ctx.leave();
    out
}

fn resolve_inner(
    ctx: &mut Context,
    value: &Value,
    hint: &str,
) -> Result<TypeDescriptor, ConvertError> {
    if let Some(done) = terminal_descriptor(value, ctx.options) {
        return Ok(done);
    }
    match value {
        // Keyed collections: element/key/value types come from the first
        // entry only.
        Value::Set(entries) => {
            let param = match entries.first() {
                Some(first) => resolve(ctx, first, hint)?,
                None => TypeDescriptor::Unknown,
            };
            Ok(TypeDescriptor::Generic {
                name: "Set".into(),
                params: vec![param],
            })
        }
        Value::Map(pairs) => {
            let params = match pairs.first() {
                Some((key, val)) => vec![resolve(ctx, key, hint)?, resolve(ctx, val, hint)?],
                None => vec![TypeDescriptor::Unknown, TypeDescriptor::Unknown],
            };
            Ok(TypeDescriptor::Generic {
                name: "Map".into(),
                params,
            })
        }
        Value::Array(items) => {
            // Mixed primitive/record arrays collapse to an array of the
            // first record's shape.
            if let Some(first_record) = items.iter().find_map(|v| match v {
                Value::Record(r) => Some(r),
                _ => None,
            }) {
                let base = ident::to_type_name(hint, FALLBACK_TYPE_NAME);
                let name = build_record(ctx, first_record, &base)?;
                return Ok(TypeDescriptor::array_of(TypeDescriptor::NamedRef(name)));
            }
            Ok(arr::classify(
                items,
                ctx.options.array_min_tuple_size,
                ctx.options.array_max_tuple_size,
            ))
        }
        Value::Instance { class, fields } => {
            let hinted =
                ident::to_type_name(class, &ident::to_type_name(hint, FALLBACK_TYPE_NAME));
            let name = build_record(ctx, fields, &format!("{hinted}Instance"))?;
            Ok(TypeDescriptor::NamedRef(name))
        }
        Value::Record(record) => {
            let base = ident::to_type_name(hint, FALLBACK_TYPE_NAME);
            let name = build_record(ctx, record, &base)?;
            Ok(TypeDescriptor::NamedRef(name))
        }
        // terminal_descriptor handled every other variant
        other => Ok(TypeDescriptor::primitive(other.type_of())),
    }
}

/// Walk a record's properties into a named declaration and return the name.
///
/// The slot key is reserved before the body is walked; a re-entrant visit of
/// the same record short-circuits to the already-assigned name instead of
/// recursing, so true cycles terminate and the table never exposes a
/// half-built body.
fn build_record(
    ctx: &mut Context,
    record: &RecordRef,
    base_name: &str,
) -> Result<String, ConvertError> {
    let id = identity(record);
    if let Some(existing) = ctx.assigned.get(&id) {
        // once entered, never re-entered for the rest of this conversion
        return Ok(existing.clone());
    }

    let name = ctx.claim_name(base_name);
    ctx.assigned.insert(id, name.clone());

    let mut fields = Vec::new();
    {
        let map = record.borrow();
        for (key, child) in map.iter() {
            // property-name override beats value inference
            let ty = match ctx.options.type_map.get(key) {
                Some(mapped) => TypeDescriptor::Primitive(mapped.clone()),
                None => resolve(ctx, child, key)?,
            };
            fields.push(FieldDecl {
                name: field_label(key, ctx.options),
                ty,
                readonly: ctx.options.readonly_properties,
                optional: ctx.options.optional_properties,
            });
        }
    }

    ctx.finalize(Declaration {
        name: name.clone(),
        exported: ctx.export_all,
        body: DeclBody::Interface(fields),
    });
    Ok(name)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::BufferKind;
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
    fn basic_nested_object_emits_child_first() {
        let out = convert(
            text(r#"{"user":{"name":"John","age":30}}"#),
            "Person",
            ExportPolicy::All,
            &defaults(),
        )
        .unwrap();
        assert_eq!(
            out,
            "export interface User {\n  name: string;\n  age: number;\n}\n\n\
             export interface Person {\n  user: User;\n}"
        );
    }

    #[test]
    fn export_root_marks_exactly_the_root() {
        let input = r#"{"user":{"name":"John"}}"#;
        let out = convert(text(input), "Person", ExportPolicy::Root, &defaults()).unwrap();
        assert_eq!(out.matches("export ").count(), 1);
        assert!(out.contains("export interface Person"));
        assert!(out.contains("interface User"));

        let none = convert(text(input), "Person", ExportPolicy::None, &defaults()).unwrap();
        assert_eq!(none.matches("export").count(), 0);

        let all = convert(text(input), "Person", ExportPolicy::All, &defaults()).unwrap();
        assert_eq!(all.matches("export ").count(), 2);
    }

    #[test]
    fn mixed_array_root_becomes_tuple_alias() {
        let out = convert(
            text(r#"[1, "two", true]"#),
            "RootObject",
            ExportPolicy::Root,
            &defaults(),
        )
        .unwrap();
        assert_eq!(out, "export type RootObject = [number, string, boolean];");
    }

    #[test]
    fn oversized_number_array_falls_back() {
        let src = serde_json::to_string(&vec![1; 15]).unwrap();
        let out = convert(text(&src), "RootObject", ExportPolicy::None, &defaults()).unwrap();
        assert_eq!(out, "type RootObject = number[];");
    }

    #[test]
    fn empty_object_renders_empty_body() {
        let out = convert(text("{}"), "RootObject", ExportPolicy::None, &defaults()).unwrap();
        assert_eq!(out, "interface RootObject {\n}");
    }

    #[test]
    fn invalid_json_surfaces_parse_failed() {
        let err = convert(
            text(r#"{"name": "John""#),
            "RootObject",
            ExportPolicy::Root,
            &defaults(),
        )
        .unwrap_err();
        match err {
            ConvertError::Parse(ParseError::ParseFailed { snippet, .. }) => {
                assert!(snippet.contains("John"));
            }
            other => panic!("expected ParseFailed, got {other:?}"),
        }
    }

    #[test]
    fn invalid_root_name_is_a_hard_error() {
        let err = convert(text("{}"), "not valid!", ExportPolicy::Root, &defaults())
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidRootName(_)));
    }

    #[test]
    fn array_of_records_uses_first_records_shape() {
        let out = convert(
            text(r#"{"items":[{"id":1},{"id":2,"extra":true}]}"#),
            "Cart",
            ExportPolicy::None,
            &defaults(),
        )
        .unwrap();
        assert_eq!(
            out,
            "interface Items {\n  id: number;\n}\n\n\
             interface Cart {\n  items: Items[];\n}"
        );
    }

    #[test]
    fn name_collisions_auto_disambiguate() {
        let out = convert(
            text(r#"{"user":{"a":1},"nested":{"user":{"b":"x"}}}"#),
            "Root",
            ExportPolicy::None,
            &defaults(),
        )
        .unwrap();
        assert!(out.contains("interface User {\n  a: number;\n}"));
        assert!(out.contains("interface User2 {\n  b: string;\n}"));
        assert!(out.contains("user: User2;"));
    }

    #[test]
    fn self_reference_terminates_and_reuses_the_name() {
        let rec: RecordRef = Rc::new(RefCell::new(indexmap::IndexMap::new()));
        rec.borrow_mut()
            .insert("name".to_string(), Value::String("x".into()));
        rec.borrow_mut()
            .insert("me".to_string(), Value::Record(rec.clone()));
        let out = convert(
            RawInput::Parsed(Value::Record(rec)),
            "Node",
            ExportPolicy::None,
            &defaults(),
        )
        .unwrap();
        assert_eq!(out, "interface Node {\n  name: string;\n  me: Node;\n}");
    }

    #[test]
    fn deep_cycle_chain_terminates() {
        // ten records in a ring, each pointing at the next
        let records: Vec<RecordRef> = (0..10)
            .map(|_| Rc::new(RefCell::new(indexmap::IndexMap::new())))
            .collect();
        for i in 0..10 {
            records[i]
                .borrow_mut()
                .insert("next".to_string(), Value::Record(records[(i + 1) % 10].clone()));
        }
        let out = convert(
            RawInput::Parsed(Value::Record(records[0].clone())),
            "Ring",
            ExportPolicy::None,
            &defaults(),
        )
        .unwrap();
        // ten declarations, root last
        assert_eq!(out.matches("interface").count(), 10);
        assert!(out.ends_with("interface Ring {\n  next: Next;\n}"));
    }

    #[test]
    fn shared_record_collapses_to_one_declaration() {
        let shared = Rc::new(RefCell::new(indexmap::IndexMap::new()));
        shared
            .borrow_mut()
            .insert("x".to_string(), Value::Number(1.0));
        let root = Value::record([
            ("left".to_string(), Value::Record(shared.clone())),
            ("right".to_string(), Value::Record(shared)),
        ]);
        let out = convert(
            RawInput::Parsed(root),
            "Root",
            ExportPolicy::None,
            &defaults(),
        )
        .unwrap();
        // one declaration for the shared record; both fields reference it
        assert_eq!(out.matches("interface").count(), 2);
        assert!(out.contains("left: Left;"));
        assert!(out.contains("right: Left;"));
    }

    #[test]
    fn scalar_root_is_permissive_even_in_strict_mode() {
        let out = convert(text("42"), "Root", ExportPolicy::None, &defaults()).unwrap();
        assert_eq!(out, "interface Root {\n  [key: string]: any;\n}");

        // the direct strict-mode alias exists only under the flattened
        // strategy; named declarations keep the permissive record
        let strict = ConvertOptions { strict: true, ..defaults() };
        let out = convert(text("42"), "Root", ExportPolicy::None, &strict).unwrap();
        assert_eq!(out, "interface Root {\n  [key: string]: any;\n}");
    }

    #[test]
    fn null_stays_literal_and_undefined_depends_on_strict() {
        let out = convert(
            text(r#"{"a": null}"#),
            "Root",
            ExportPolicy::None,
            &defaults(),
        )
        .unwrap();
        assert_eq!(out, "interface Root {\n  a: null;\n}");

        let root = Value::record([("b".to_string(), Value::Undefined)]);
        let loose = convert(
            RawInput::Parsed(root.clone()),
            "Root",
            ExportPolicy::None,
            &defaults(),
        )
        .unwrap();
        assert_eq!(loose, "interface Root {\n  b: unknown;\n}");

        let strict = ConvertOptions { strict: true, ..defaults() };
        let tight = convert(RawInput::Parsed(root), "Root", ExportPolicy::None, &strict)
            .unwrap();
        assert_eq!(tight, "interface Root {\n  b: undefined;\n}");
    }

    #[test]
    fn type_map_overrides_values_names_and_runtime_types() {
        let mut options = defaults();
        options.type_map.insert("id".to_string(), "Uuid".to_string());
        options.type_map.insert("42".to_string(), "Answer".to_string());
        options
            .type_map
            .insert("string".to_string(), "Text".to_string());
        let out = convert(
            text(r#"{"id": "abc", "count": 42, "label": "hi", "flag": true}"#),
            "Root",
            ExportPolicy::None,
            &options,
        )
        .unwrap();
        assert_eq!(
            out,
            "interface Root {\n  id: Uuid;\n  count: Answer;\n  label: Text;\n  flag: boolean;\n}"
        );
    }

    #[test]
    fn special_host_values_resolve_to_fixed_names() {
        let root = Value::record([
            ("when".to_string(), Value::Date(chrono::Utc::now())),
            ("pattern".to_string(), Value::Regex("^a+$".into())),
            ("oops".to_string(), Value::ErrorValue("boom".into())),
            ("later".to_string(), Value::Promise),
            ("bytes".to_string(), Value::Buffer(BufferKind::Uint8Array)),
            ("big".to_string(), Value::BigInt(9)),
            (
                "cb".to_string(),
                Value::Function { name: "cb".into(), is_async: true },
            ),
            (
                "tags".to_string(),
                Value::Set(vec![Value::String("a".into())]),
            ),
            (
                "index".to_string(),
                Value::Map(vec![(Value::String("k".into()), Value::Number(1.0))]),
            ),
            ("empty".to_string(), Value::Set(vec![])),
        ]);
        let out = convert(
            RawInput::Parsed(root),
            "Root",
            ExportPolicy::None,
            &defaults(),
        )
        .unwrap();
        assert_eq!(
            out,
            "interface Root {\n  \
               when: Date;\n  \
               pattern: RegExp;\n  \
               oops: Error;\n  \
               later: Promise<unknown>;\n  \
               bytes: Uint8Array;\n  \
               big: bigint;\n  \
               cb: (...args: unknown[]) => Promise<unknown>;\n  \
               tags: Set<string>;\n  \
               index: Map<string, number>;\n  \
               empty: Set<unknown>;\n}"
        );
    }

    #[test]
    fn class_instances_get_an_instance_suffix() {
        let fields = Rc::new(RefCell::new(indexmap::IndexMap::new()));
        fields
            .borrow_mut()
            .insert("radius".to_string(), Value::Number(2.0));
        let root = Value::record([(
            "shape".to_string(),
            Value::Instance { class: "Circle".into(), fields },
        )]);
        let out = convert(
            RawInput::Parsed(root),
            "Root",
            ExportPolicy::None,
            &defaults(),
        )
        .unwrap();
        assert_eq!(
            out,
            "interface CircleInstance {\n  radius: number;\n}\n\n\
             interface Root {\n  shape: CircleInstance;\n}"
        );
    }

    #[test]
    fn readonly_and_optional_modifiers_apply_everywhere() {
        let options = ConvertOptions {
            readonly_properties: true,
            optional_properties: true,
            ..defaults()
        };
        let out = convert(
            text(r#"{"a": 1, "b": {"c": true}}"#),
            "Root",
            ExportPolicy::None,
            &options,
        )
        .unwrap();
        assert_eq!(
            out,
            "interface B {\n  readonly c?: boolean;\n}\n\n\
             interface Root {\n  readonly a?: number;\n  readonly b?: B;\n}"
        );
    }

    #[test]
    fn property_case_applies_before_quoting() {
        let options = ConvertOptions {
            property_case: CaseType::Camel,
            ..defaults()
        };
        let out = convert(
            text(r#"{"user_name": "x", "HTTP-status": 200}"#),
            "Root",
            ExportPolicy::None,
            &options,
        )
        .unwrap();
        assert_eq!(
            out,
            "interface Root {\n  userName: string;\n  httpStatus: number;\n}"
        );
    }

    #[test]
    fn unsafe_keys_are_quoted() {
        let out = convert(
            text(r#"{"1st": 1, "with space": true, "Upper": "x"}"#),
            "Root",
            ExportPolicy::None,
            &defaults(),
        )
        .unwrap();
        assert_eq!(
            out,
            "interface Root {\n  \"1st\": number;\n  \"with space\": boolean;\n  \"Upper\": string;\n}"
        );
    }

    #[test]
    fn depth_guard_fails_instead_of_overflowing() {
        let mut value = Value::Number(1.0);
        for _ in 0..(MAX_DEPTH + 8) {
            value = Value::record([("a".to_string(), value)]);
        }
        let err = convert(
            RawInput::Parsed(value),
            "Root",
            ExportPolicy::None,
            &defaults(),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::MaxDepthExceeded));
    }

    #[test]
    fn custom_tuple_bounds_are_honored() {
        let options = ConvertOptions {
            array_min_tuple_size: 3,
            array_max_tuple_size: 4,
            ..defaults()
        };
        // length 2 < min: degrades to any[] because types differ
        let out = convert(text(r#"[1, "x"]"#), "Root", ExportPolicy::None, &options).unwrap();
        assert_eq!(out, "type Root = any[];");
        // length 3 within band
        let out = convert(
            text(r#"[1, "x", true]"#),
            "Root",
            ExportPolicy::None,
            &options,
        )
        .unwrap();
        assert_eq!(out, "type Root = [number, string, boolean];");
    }
}

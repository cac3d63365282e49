//! Name synthesis: turns arbitrary strings (object keys, fallback labels)
//! into valid, collision-aware type and field identifiers.
//!
//! Policy notes:
//! - Built-in type names (`String`, `Date`, ...) always take a `Type` suffix.
//! - Reserved keywords are disambiguated the same way on *every* path,
//!   including the slow sanitize path.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Property-name casing policies, applied before quoting/validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CaseType {
    #[default]
    Original,
    Camel,
    #[value(name = "lower_snake")]
    LowerSnake,
    Pascal,
    #[value(name = "upper_snake")]
    UpperSnake,
    Kebab,
}

/// Target-language built-in type names that generated declarations must not
/// shadow.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "String", "Number", "Boolean", "Object", "Array", "Function", "Date",
    "RegExp", "Error", "Promise", "Map", "Set", "WeakMap", "WeakSet",
    "Symbol", "BigInt", "any", "unknown", "never", "void", "null", "undefined",
];

const KEYWORDS: &[&str] = &[
    "any", "as", "boolean", "break", "case", "catch", "class", "const",
    "continue", "debugger", "default", "delete", "do", "else", "enum",
    "export", "extends", "false", "finally", "for", "function", "if",
    "implements", "import", "in", "instanceof", "interface", "let", "never",
    "new", "null", "number", "object", "package", "private", "protected",
    "public", "return", "static", "string", "super", "switch", "symbol",
    "this", "throw", "true", "try", "type", "typeof", "undefined", "unknown",
    "var", "void", "while", "with", "yield",
];

static IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

static UNQUOTED_FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-zA-Z0-9_$]*$").unwrap());

pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// True if `s` can be used verbatim as a declaration name.
pub fn is_valid_type_name(s: &str) -> bool {
    IDENT_RE.is_match(s)
}

/// Synthesize an UpperCamel type name from an arbitrary string, falling back
/// to `fallback` when nothing usable survives.
pub fn to_type_name(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }
    if RESERVED_TYPE_NAMES.contains(&trimmed) {
        return format!("{trimmed}Type");
    }

    // Fast path: already UpperCamel and alphanumeric-only.
    if trimmed.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && trimmed.chars().all(|c| c.is_ascii_alphanumeric())
        && !is_keyword(trimmed)
    {
        return trimmed.to_string();
    }

    // Fast path: lower-camel identifier; uppercase the head.
    if trimmed.chars().next().is_some_and(|c| c.is_ascii_lowercase())
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    {
        let mut capitalized = trimmed.to_string();
        capitalized[..1].make_ascii_uppercase();
        if !is_keyword(&capitalized) {
            return capitalized;
        }
        // keyword collision: fall through to the sanitize path
    }

    sanitize_type_name(trimmed, fallback)
}

fn sanitize_type_name(raw: &str, fallback: &str) -> String {
    // `_` and `$` are identifier characters; they ride through tokenization
    // and only a trailing run gets stripped.
    let spaced: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                ' '
            }
        })
        .collect();
    let name: String = spaced.split_whitespace().map(capitalize_token).collect();
    let name = name.trim_end_matches(['_', '$']);
    if name.is_empty()
        || name.starts_with(|c: char| c.is_ascii_digit())
        || !IDENT_RE.is_match(name)
    {
        return fallback.to_string();
    }
    if is_keyword(name) {
        return format!("{name}Type");
    }
    name.to_string()
}

fn capitalize_token(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(head) => {
            head.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
        }
        None => String::new(),
    }
}

/// Emit a field name, quoting it whenever it would not survive as a bare
/// identifier (leading uppercase, digits, punctuation, keywords, empty).
pub fn to_field_name(raw: &str) -> String {
    if !raw.is_empty() && UNQUOTED_FIELD_RE.is_match(raw) && !is_keyword(raw) {
        raw.to_string()
    } else {
        quote(raw)
    }
}

fn quote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// ------------------------- case transformation --------------------------- //

/// Apply a casing policy to a raw property name.
pub fn format_case(raw: &str, policy: CaseType) -> String {
    if policy == CaseType::Original {
        return raw.to_string();
    }
    let words = tokenize(raw);
    if words.is_empty() {
        return raw.to_string();
    }
    match policy {
        CaseType::Original => unreachable!(),
        CaseType::Camel => {
            let mut out = words[0].to_ascii_lowercase();
            for w in &words[1..] {
                out.push_str(&capitalize_token(w));
            }
            out
        }
        CaseType::LowerSnake => words
            .iter()
            .map(|w| w.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join("_"),
        CaseType::Pascal => words.iter().map(|w| capitalize_token(w)).collect(),
        CaseType::UpperSnake => words
            .iter()
            .map(|w| w.to_ascii_uppercase())
            .collect::<Vec<_>>()
            .join("_"),
        CaseType::Kebab => words
            .iter()
            .map(|w| w.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join("-"),
    }
}

/// One canonical tokenizer shared by every joiner: words split on
/// separators, lower→upper transitions, and the tail of acronym runs
/// (`HTTPServer` → `HTTP`, `Server`).
fn tokenize(raw: &str) -> Vec<String> {
    let chars: Vec<char> = raw.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() {
            let prev = chars[i - 1];
            let case_boundary = ((prev.is_lowercase() || prev.is_numeric())
                && c.is_uppercase())
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && chars.get(i + 1).is_some_and(|n| n.is_lowercase()));
            if case_boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

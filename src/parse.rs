//! Input normalization: pre-parsed values pass through untouched, textual
//! input goes through a cheap shape gate before the structural parse.

use thiserror::Error;

use crate::value::Value;

/// What the caller hands to `convert`: either an already-structured value or
/// raw JSON text.
#[derive(Debug)]
pub enum RawInput {
    Parsed(Value),
    Text(String),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("input is empty")]
    InvalidInput,
    #[error("input does not start like a JSON value (found {found:?})")]
    InvalidFormat { found: char },
    #[error("JSON parse failed at line {line}, column {column}: {snippet}")]
    ParseFailed {
        line: usize,
        column: usize,
        snippet: String,
    },
    #[error("input parsed to no value")]
    UndefinedResult,
}

/// Keep diagnostics readable for giant one-line payloads.
const SNIPPET_FULL_LEN: usize = 100;
const SNIPPET_HEAD_LEN: usize = 97;

pub fn parse_input(input: RawInput) -> Result<Value, ParseError> {
    match input {
        // Non-textual input is accepted as-is; no validation performed.
        RawInput::Parsed(value) => Ok(value),
        RawInput::Text(src) => parse_text(&src),
    }
}

pub fn parse_text(src: &str) -> Result<Value, ParseError> {
    let trimmed = src.trim();
    let Some(first) = trimmed.chars().next() else {
        return Err(ParseError::InvalidInput);
    };
    if trimmed == "undefined" {
        // Host runtimes parse this to "no value" rather than rejecting it.
        return Err(ParseError::UndefinedResult);
    }
    if !is_value_start(first) {
        return Err(ParseError::InvalidFormat { found: first });
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(v) => Ok(Value::from(v)),
        Err(err) => Err(ParseError::ParseFailed {
            line: err.line(),
            column: err.column(),
            snippet: snippet(trimmed),
        }),
    }
}

fn is_value_start(c: char) -> bool {
    matches!(c, '{' | '[' | '"' | 't' | 'f' | 'n' | '-' | '0'..='9')
}

// Char-counted so truncation never lands mid-codepoint.
fn snippet(src: &str) -> String {
    if src.chars().count() > SNIPPET_FULL_LEN {
        let head: String = src.chars().take(SNIPPET_HEAD_LEN).collect();
        format!("{head}...")
    } else {
        src.to_string()
    }
}

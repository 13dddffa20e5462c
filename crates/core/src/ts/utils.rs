//! Common utilities for TypeScript output.
//!
//! Key quoting, string escaping and a few type constructors shared by the
//! emitter and the transformers.

use serde_json::Value;

use super::types::{TsLiteral, TsPrimitive, TsType};

/// Indentation unit of generated output.
pub const INDENT: &str = "  ";

/// Check if a name is a valid identifier.
///
/// Returns false if the name:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
pub fn is_identifier(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Check if a name is a plain decimal number usable as a numeric key (`200`).
pub fn is_numeric_key(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_digit())
        && (name.len() == 1 || !name.starts_with('0'))
}

/// Escape a string for use in JavaScript/TypeScript string literals.
/// Escapes backslashes and double quotes.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a string as a TypeScript string literal, trimming surrounding whitespace.
pub fn esc_str(s: &str) -> String {
    format!("\"{}\"", escape_js_string(s.trim()))
}

/// Quote an object key if needed.
/// Identifiers and numeric keys are left bare, everything else is quoted.
pub fn esc_obj_key(name: &str) -> String {
    if is_identifier(name) || is_numeric_key(name) {
        name.to_string()
    } else {
        esc_str(name)
    }
}

/// Create a `Record<string, T>` type.
pub fn make_string_record(value_type: TsType) -> TsType {
    TsType::Generic {
        name: "Record".to_string(),
        args: vec![TsType::Primitive(TsPrimitive::String), value_type],
    }
}

/// Create a `Record<string, unknown>` type (generic open object).
pub fn make_unknown_record() -> TsType {
    make_string_record(TsType::unknown())
}

/// Create a `Record<string, never>` type (object with no known members).
pub fn make_empty_record() -> TsType {
    make_string_record(TsType::never())
}

/// `Pick<T, "a" | "b">`
pub fn ts_pick(root: TsType, keys: &[String]) -> TsType {
    key_projection("Pick", root, keys)
}

/// `Omit<T, "a" | "b">`
pub fn ts_omit(root: TsType, keys: &[String]) -> TsType {
    key_projection("Omit", root, keys)
}

/// `NonNullable<T>`
pub fn ts_non_nullable(inner: TsType) -> TsType {
    TsType::Generic {
        name: "NonNullable".to_string(),
        args: vec![inner],
    }
}

fn key_projection(name: &str, root: TsType, keys: &[String]) -> TsType {
    let keys = keys
        .iter()
        .map(|k| TsType::Literal(TsLiteral::String(k.clone())))
        .collect();
    TsType::Generic {
        name: name.to_string(),
        args: vec![root, TsType::Union(keys)],
    }
}

/// Convert a JSON scalar to a TypeScript literal.
pub fn json_literal(value: &Value) -> Option<TsLiteral> {
    match value {
        Value::Null => Some(TsLiteral::Null),
        Value::Bool(b) => Some(TsLiteral::Bool(*b)),
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => TsLiteral::Int(i),
            None => TsLiteral::Number(n.as_f64().unwrap_or_default()),
        }),
        Value::String(s) => Some(TsLiteral::String(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

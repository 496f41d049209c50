//! Deterministic JSON serialization for hashing and signing.
//!
//! This module implements the JSON Canonicalization Scheme used by the
//! `JcsEd25519Signature2020` suite:
//! - Object keys sorted in code-point order
//! - Array elements kept in their original order
//! - No insignificant whitespace
//! - Primitives rendered exactly as ECMAScript `JSON.stringify` renders them
//!
//! The canonical form is what makes a signature portable: the same document
//! produces identical bytes (and thus identical digests) regardless of the key
//! order or formatting it arrived with.

use serde_json::Value;

/// Serialize a JSON value to its canonical string.
///
/// The function has no side effects and holds no state, so it is safe to
/// call from any number of tasks at once.
pub fn canonicalize(value: &Value) -> String {
    let mut buf = String::new();
    encode_value_to(&mut buf, value);
    buf
}

/// Serialize a JSON value to its canonical UTF-8 bytes.
pub fn canonical_bytes(value: &Value) -> Vec<u8> {
    canonicalize(value).into_bytes()
}

/// Recursively encode a JSON value.
fn encode_value_to(buf: &mut String, value: &Value) {
    match value {
        Value::Array(items) => encode_array(buf, items),
        Value::Object(map) => encode_object(buf, map),
        primitive => encode_primitive(buf, primitive),
    }
}

/// Encode an array, preserving element order.
fn encode_array(buf: &mut String, items: &[Value]) {
    buf.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        encode_value_to(buf, item);
    }
    buf.push(']');
}

/// Encode an object with its keys sorted.
///
/// Rust string ordering is byte order over UTF-8, which coincides with
/// code-point order.
fn encode_object(buf: &mut String, map: &serde_json::Map<String, Value>) {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    buf.push('{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        encode_string(buf, key);
        buf.push(':');
        encode_value_to(buf, value);
    }
    buf.push('}');
}

/// Encode a string literal with JSON escaping.
fn encode_string(buf: &mut String, s: &str) {
    match serde_jcs::to_string(s) {
        Ok(encoded) => buf.push_str(&encoded),
        // Strings always serialize; keep the output well-formed regardless.
        Err(_) => buf.push_str(&Value::String(s.to_owned()).to_string()),
    }
}

/// Encode null, booleans, numbers and strings.
///
/// Numbers go through `serde_jcs`, which renders floats with the shortest
/// round-trip form used by ECMAScript (`1.0` becomes `1`).
fn encode_primitive(buf: &mut String, value: &Value) {
    match serde_jcs::to_string(value) {
        Ok(encoded) => buf.push_str(&encoded),
        // Non-finite numbers cannot be represented; JSON.stringify emits null.
        Err(_) => buf.push_str("null"),
    }
}

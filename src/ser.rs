//! Document serialization.
//!
//! This module renders a [`Value`] tree as canonical block-structured text,
//! the inverse of [`crate::de`] for the supported subset: parsing the output
//! of [`to_string`] reproduces the original value under the crate's equality
//! rule, and the output for a given value is byte-identical across calls.
//!
//! Rendering rules: empty containers print inline as `{}`/`[]`; non-empty
//! containers open a nested block indented two spaces deeper; scalars print
//! as `key: value` or `- value`. Strings are quoted only when leaving them
//! bare would change their meaning on re-parse.
//!
//! ## Usage
//!
//! ```rust
//! use openapi_bundle::{to_string, value};
//!
//! let doc = value!({ "title": "Widgets", "count": 3, "tags": ["a", "b"] });
//! assert_eq!(to_string(&doc), "title: Widgets\ncount: 3\ntags:\n  - a\n  - b");
//! ```

use crate::{Error, Result, Value};
use std::fs;
use std::path::Path;

/// Serializes a [`Value`] to canonical text (no trailing newline).
///
/// Total: every value renders. Two calls on the same value produce
/// byte-identical output.
#[must_use]
pub fn to_string(value: &Value) -> String {
    render(value, 0)
}

/// Serializes a [`Value`] and writes it to `path` with a trailing newline.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
pub fn write_file(path: &Path, value: &Value) -> Result<()> {
    let mut text = to_string(value);
    text.push('\n');
    fs::write(path, text).map_err(|e| Error::io(path, &e))
}

fn render(value: &Value, indent: usize) -> String {
    let prefix = "  ".repeat(indent);
    match value {
        Value::Mapping(map) => {
            if map.is_empty() {
                return format!("{}{{}}", prefix);
            }
            let mut lines = Vec::with_capacity(map.len());
            for (key, entry) in map {
                let formatted_key = format_key(key);
                match entry {
                    Value::Mapping(inner) if inner.is_empty() => {
                        lines.push(format!("{}{}: {{}}", prefix, formatted_key));
                    }
                    Value::Sequence(inner) if inner.is_empty() => {
                        lines.push(format!("{}{}: []", prefix, formatted_key));
                    }
                    Value::Mapping(_) | Value::Sequence(_) => {
                        lines.push(format!("{}{}:", prefix, formatted_key));
                        lines.push(render(entry, indent + 1));
                    }
                    scalar => {
                        lines.push(format!("{}{}: {}", prefix, formatted_key, format_scalar(scalar)));
                    }
                }
            }
            lines.join("\n")
        }
        Value::Sequence(seq) => {
            if seq.is_empty() {
                return format!("{}[]", prefix);
            }
            let mut lines = Vec::with_capacity(seq.len());
            for item in seq {
                match item {
                    Value::Mapping(inner) if inner.is_empty() => {
                        lines.push(format!("{}- {{}}", prefix));
                    }
                    Value::Sequence(inner) if inner.is_empty() => {
                        lines.push(format!("{}- []", prefix));
                    }
                    Value::Mapping(_) | Value::Sequence(_) => {
                        lines.push(format!("{}-", prefix));
                        lines.push(render(item, indent + 1));
                    }
                    scalar => lines.push(format!("{}- {}", prefix, format_scalar(scalar))),
                }
            }
            lines.join("\n")
        }
        scalar => format!("{}{}", prefix, format_scalar(scalar)),
    }
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format_string(s),
        // Containers never reach here; callers render them as blocks or
        // inline empties. Their empty form is still a valid rendering.
        Value::Sequence(_) => "[]".to_string(),
        Value::Mapping(_) => "{}".to_string(),
    }
}

fn format_key(key: &str) -> String {
    format_string(key)
}

fn format_string(s: &str) -> String {
    if needs_quotes(s) {
        quote(s)
    } else {
        s.to_string()
    }
}

/// A string must be quoted when leaving it bare would lose it on re-parse:
/// empty or whitespace-trimmed forms, the fixed literals, tokens opening
/// with a structurally significant character, tokens containing structural
/// characters (quotes and backslashes included, or the key splitter would
/// misread them), control whitespace, and tokens that classify as numbers.
fn needs_quotes(s: &str) -> bool {
    if s.is_empty() || s.trim() != s {
        return true;
    }
    if s.eq_ignore_ascii_case("null") || s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") {
        return true;
    }
    if let Some(first) = s.chars().next() {
        if "-?:[]{}#&,*!|>'\"%@`".contains(first) {
            return true;
        }
    }
    if s.chars().any(|ch| ":#{}[]\"\\\n\r\t".contains(ch)) {
        return true;
    }
    looks_numeric(s)
}

/// Mirrors the parser's numeric classification so quoting keeps strings
/// strings.
fn looks_numeric(s: &str) -> bool {
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s.parse::<f64>().is_ok()
    } else {
        s.parse::<i64>().is_ok()
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            ch if (ch as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", ch as u32));
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

//! Document parsing.
//!
//! This module parses the restricted block-structured text format into a
//! [`Value`] tree. The format is a deliberately small YAML subset: two-space
//! indentation, one list entry or mapping entry per line, double-quoted
//! scalars with JSON-style escaping, and `[]`/`{}` as the only flow
//! collections (both empty). Anchors, aliases, multi-line scalars, and
//! non-empty flow collections are outside the subset; inputs must not rely
//! on them.
//!
//! Parsing is line-oriented: blank and comment-only lines are stripped, each
//! remaining line's indent level is its leading-space count divided by two,
//! and a block at a given level is the run of consecutive lines at exactly
//! that level. The first line of a block fixes whether it is a list or a
//! mapping; mixing the two shapes at one level is a hard error.
//!
//! ## Usage
//!
//! ```rust
//! use openapi_bundle::{parse_str, Value};
//!
//! let doc = parse_str("info:\n  title: Widgets\n  version: \"1.0.0\"\n").unwrap();
//! let info = doc.as_mapping().and_then(|m| m.get("info")).unwrap();
//! assert_eq!(
//!     info.as_mapping().and_then(|m| m.get("title")).and_then(|v| v.as_str()),
//!     Some("Widgets")
//! );
//! ```

use crate::{Error, Map, Number, Result, Value};
use std::fs;
use std::path::Path;

/// Parses document text into a [`Value`].
///
/// # Errors
///
/// Returns [`Error::Syntax`] when indentation is not a multiple of two
/// spaces, when a block mixes list and mapping entries, when a mapping line
/// lacks an unquoted `:` separator, or when a quoted token is malformed.
/// A failed parse never returns a partial value.
pub fn parse_str(input: &str) -> Result<Value> {
    let lines = tokenize(input)?;
    let (value, index) = parse_block(&lines, 0, 0)?;
    if index != lines.len() {
        return Err(Error::syntax(
            lines[index].number,
            "unexpected trailing content",
        ));
    }
    Ok(value)
}

/// Reads and parses the file at `path`, attaching the path to any syntax error.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or [`Error::Syntax`]
/// if its contents do not parse.
pub fn parse_file(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, &e))?;
    parse_str(&text).map_err(|e| e.with_file(path))
}

/// One significant source line: its 1-based number, indent level, and body.
struct Line<'a> {
    number: usize,
    indent: usize,
    content: &'a str,
}

fn tokenize(input: &str) -> Result<Vec<Line<'_>>> {
    let mut lines = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let number = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let content = raw.trim_start_matches(' ');
        if content.starts_with('#') {
            continue;
        }
        let spaces = raw.len() - content.len();
        if spaces % 2 != 0 {
            return Err(Error::syntax(
                number,
                "indentation must be a multiple of two spaces",
            ));
        }
        lines.push(Line {
            number,
            indent: spaces / 2,
            content,
        });
    }
    Ok(lines)
}

#[derive(Clone, Copy, PartialEq)]
enum BlockMode {
    List,
    Mapping,
}

fn parse_block(lines: &[Line<'_>], mut index: usize, indent: usize) -> Result<(Value, usize)> {
    let mut items: Vec<Value> = Vec::new();
    let mut mapping = Map::new();
    let mut mode: Option<BlockMode> = None;

    while index < lines.len() {
        let line = &lines[index];
        if line.indent < indent {
            break;
        }
        if line.indent > indent {
            return Err(Error::syntax(
                line.number,
                format!("unexpected indentation before: {}", line.content),
            ));
        }

        let content = line.content;
        let number = line.number;
        index += 1;

        if content == "-" || content.starts_with("- ") {
            if mode == Some(BlockMode::Mapping) {
                return Err(Error::syntax(
                    number,
                    "cannot mix list and mapping entries at the same level",
                ));
            }
            mode = Some(BlockMode::List);
            let value = if content == "-" {
                let (value, next) = parse_block(lines, index, indent + 1)?;
                index = next;
                value
            } else {
                parse_scalar(content[2..].trim(), number)?
            };
            items.push(value);
            continue;
        }

        let (key_token, rest) = split_mapping_line(content, number)?;
        if mode == Some(BlockMode::List) {
            return Err(Error::syntax(
                number,
                "cannot mix list and mapping entries at the same level",
            ));
        }
        mode = Some(BlockMode::Mapping);

        let key = decode_key(key_token.trim(), number)?;
        let rest = rest.trim();
        let value = if rest.is_empty() {
            let (value, next) = parse_block(lines, index, indent + 1)?;
            index = next;
            value
        } else {
            parse_scalar(rest, number)?
        };
        mapping.insert(key, value);
    }

    match mode {
        None => Ok((Value::Mapping(Map::new()), index)),
        Some(BlockMode::List) => Ok((Value::Sequence(items), index)),
        Some(BlockMode::Mapping) => Ok((Value::Mapping(mapping), index)),
    }
}

/// Splits a mapping line at its first colon outside double quotes.
fn split_mapping_line(content: &str, number: usize) -> Result<(&str, &str)> {
    let mut in_quotes = false;
    let mut escape = false;
    for (idx, ch) in content.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        match ch {
            '\\' => escape = true,
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Ok((&content[..idx], &content[idx + 1..])),
            _ => {}
        }
    }
    Err(Error::syntax(
        number,
        format!("missing ':' in mapping line: {}", content),
    ))
}

fn decode_key(token: &str, number: usize) -> Result<String> {
    // A token opening with a quote must decode fully; unquoted keys are taken
    // literally.
    if token.starts_with('"') {
        decode_quoted(token, number)
    } else {
        Ok(token.to_string())
    }
}

/// The ordered scalar matchers: fixed literals, empty flow collections,
/// quoted strings, then numeric classification, with bare strings last.
fn parse_scalar(token: &str, number: usize) -> Result<Value> {
    match token {
        "" | "null" => return Ok(Value::Null),
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "[]" => return Ok(Value::Sequence(Vec::new())),
        "{}" => return Ok(Value::Mapping(Map::new())),
        _ => {}
    }
    if token.starts_with('"') {
        return Ok(Value::String(decode_quoted(token, number)?));
    }
    Ok(classify_plain(token))
}

/// A token with `.`, `e`, or `E` is a float candidate, everything else an
/// integer candidate; either falls back to a bare string when the numeric
/// parse fails. Leading-zero integer tokens are accepted.
fn classify_plain(token: &str) -> Value {
    if token.contains('.') || token.contains('e') || token.contains('E') {
        if let Ok(f) = token.parse::<f64>() {
            return Value::Number(Number::Float(f));
        }
    } else if let Ok(i) = token.parse::<i64>() {
        return Value::Number(Number::Integer(i));
    }
    Value::String(token.to_string())
}

fn decode_quoted(token: &str, number: usize) -> Result<String> {
    let mut chars = token.chars();
    if chars.next() != Some('"') {
        return Err(Error::syntax(number, "expected quoted token"));
    }
    let mut result = String::new();
    loop {
        match chars.next() {
            None => return Err(Error::syntax(number, "unterminated quoted token")),
            Some('"') => {
                return if chars.next().is_none() {
                    Ok(result)
                } else {
                    Err(Error::syntax(
                        number,
                        "unexpected characters after closing quote",
                    ))
                };
            }
            Some('\\') => match chars.next() {
                Some('"') => result.push('"'),
                Some('\\') => result.push('\\'),
                Some('/') => result.push('/'),
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('b') => result.push('\u{0008}'),
                Some('f') => result.push('\u{000C}'),
                Some('u') => {
                    let mut hex = String::with_capacity(4);
                    for _ in 0..4 {
                        match chars.next() {
                            Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
                            _ => {
                                return Err(Error::syntax(
                                    number,
                                    "invalid unicode escape (expected 4 hex digits)",
                                ))
                            }
                        }
                    }
                    let code = u32::from_str_radix(&hex, 16)
                        .map_err(|_| Error::syntax(number, "invalid hex in unicode escape"))?;
                    let ch = char::from_u32(code)
                        .ok_or_else(|| Error::syntax(number, "invalid unicode code point"))?;
                    result.push(ch);
                }
                // Unknown escape - preserve literally (lenient parsing)
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => return Err(Error::syntax(number, "unterminated quoted token")),
            },
            Some(other) => result.push(other),
        }
    }
}

//! Dynamic value representation for specification documents.
//!
//! This module provides the [`Value`] enum which represents any value in the
//! restricted document format: scalars, sequences, and string-keyed mappings.
//! Every other component of the crate consumes or produces this tree.
//!
//! ## Core Types
//!
//! - [`Value`]: any document value (null, bool, number, string, sequence, mapping)
//! - [`Number`]: an integer or floating-point scalar, distinguished by literal form
//! - [`Reference`]: a parsed `$ref` token, detected from a single-key mapping
//! - [`Document`]: a root value together with the file it was loaded from
//!
//! ## Usage Patterns
//!
//! ```rust
//! use openapi_bundle::{value, Value};
//!
//! let doc = value!({
//!     "openapi": "3.0.3",
//!     "info": { "title": "Widgets", "version": "1.0.0" }
//! });
//!
//! assert!(doc.is_mapping());
//! let info = doc.as_mapping().and_then(|m| m.get("info")).unwrap();
//! assert_eq!(
//!     info.as_mapping().and_then(|m| m.get("title")).and_then(|v| v.as_str()),
//!     Some("Widgets")
//! );
//! ```
//!
//! `Value` also implements serde's `Serialize` and `Deserialize`, so a bundled
//! document converts to JSON (and a composed JSON document converts back) with
//! `serde_json` — that conversion is the boundary consumed by downstream
//! documentation tooling.

use crate::{Map, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// A dynamically-typed representation of any document value.
///
/// # Examples
///
/// ```rust
/// use openapi_bundle::{Number, Value};
///
/// let null = Value::Null;
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Map),
}

/// A numeric scalar, either integer or floating-point.
///
/// The distinction follows the literal form of the token: `7` parses as
/// `Integer`, `7.0` and `7e0` as `Float`. Equality is exact on both the
/// variant and the value, so `Integer(2)` and `Float(2.0)` are not equal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            // A whole-number float keeps its ".0" so the literal form (and
            // with it the Integer/Float distinction) survives a re-parse.
            Number::Float(fl) if fl.is_finite() && fl.fract() == 0.0 => write!(f, "{:.1}", fl),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is a sequence.
    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// Returns `true` if the value is a mapping.
    #[inline]
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer number, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(Number::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a sequence, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    /// If the value is a mapping, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Map> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// If the value is a reference token, returns the parsed reference.
    ///
    /// A reference token is a mapping whose key set is exactly `{"$ref"}` with
    /// a string value. Anything else — including a single-key `$ref` mapping
    /// holding a non-string — is plain data.
    #[inline]
    #[must_use]
    pub fn as_reference(&self) -> Option<Reference> {
        match self {
            Value::Mapping(map) => Reference::detect(map),
            _ => None,
        }
    }
}

/// Rendering a `Value` produces its canonical serialized text.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::ser::to_string(self))
    }
}

/// A parsed `$ref` token: a relative file path plus an optional fragment.
///
/// # Examples
///
/// ```rust
/// use openapi_bundle::value;
///
/// let token = value!({ "$ref": "components/schemas/widget.yaml#/properties/id" });
/// let reference = token.as_reference().unwrap();
///
/// assert_eq!(reference.path(), "components/schemas/widget.yaml");
/// assert_eq!(reference.fragment(), Some("/properties/id"));
/// assert!(!reference.is_inert());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Reference {
    raw: String,
    path: String,
    fragment: Option<String>,
}

impl Reference {
    /// Detects a reference token in a mapping.
    ///
    /// Total and O(1): a single entry keyed `"$ref"` holding a string.
    #[must_use]
    pub fn detect(map: &Map) -> Option<Reference> {
        if map.len() != 1 {
            return None;
        }
        let raw = map.get("$ref")?.as_str()?;
        let (path, fragment) = match raw.split_once('#') {
            Some((path, fragment)) => {
                let fragment = if fragment.is_empty() {
                    None
                } else {
                    Some(fragment.to_string())
                };
                (path.to_string(), fragment)
            }
            None => (raw.to_string(), None),
        };
        Some(Reference {
            raw: raw.to_string(),
            path,
            fragment,
        })
    }

    /// The reference string exactly as written in the document.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The file-path part of the reference (before any `#`).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The fragment part of the reference (after the first `#`), if any.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// The fragment as mapping-key segments, empty segments dropped.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.fragment
            .as_deref()
            .unwrap_or("")
            .split('/')
            .filter(|s| !s.is_empty())
    }

    /// Returns `true` if the resolver must leave this reference untouched:
    /// an empty reference, a pure fragment (`#/...`), or a path carrying a
    /// URL scheme marker (`://`).
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.raw.is_empty() || self.raw.starts_with('#') || self.raw.contains("://")
    }
}

/// A root value together with the file it was loaded from.
///
/// The source location is what relative reference paths resolve against.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub root: Value,
    pub source: PathBuf,
}

impl Document {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: &Path) -> Result<Document> {
        Ok(Document {
            root: crate::de::parse_file(path)?,
            source: path.to_path_buf(),
        })
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(seq) => {
                use serde::ser::SerializeSeq;
                let mut state = serializer.serialize_seq(Some(seq.len()))?;
                for element in seq {
                    state.serialize_element(element)?;
                }
                state.end()
            }
            Value::Mapping(map) => {
                use serde::ser::SerializeMap;
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    state.serialize_entry(k, v)?;
                }
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid document value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E> {
                Ok(Value::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(Value::Number(Number::Integer(value as i64)))
                } else {
                    Ok(Value::Number(Number::Float(value as f64)))
                }
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E> {
                Ok(Value::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut elements = Vec::new();
                while let Some(element) = seq.next_element()? {
                    elements.push(element);
                }
                Ok(Value::Sequence(elements))
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut map = Map::new();
                while let Some((key, value)) = access.next_entry()? {
                    map.insert(key, value);
                }
                Ok(Value::Mapping(map))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

// From implementations for building Values from primitives
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Mapping(value)
    }
}

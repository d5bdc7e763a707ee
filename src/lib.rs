//! # openapi-bundle
//!
//! A bundler and splitter for multi-file OpenAPI specification documents,
//! built on a minimal, deterministic engine for a restricted block-structured
//! YAML subset.
//!
//! ## What it does
//!
//! A large specification document is easier to maintain as many small files:
//! one per path entry, one per schema component, connected by `$ref` tokens
//! from a root index. This crate provides both directions of that workflow:
//!
//! - **Splitting**: decompose a composed document into a linked file tree
//!   under one fixed naming policy.
//! - **Bundling**: resolve every file reference — recursively, with cycle
//!   detection — back into a single self-contained document.
//!
//! The two are inverses: bundling a freshly split tree reproduces the
//! original document exactly.
//!
//! ## The document format
//!
//! Split files use a deliberately small YAML subset sufficient to round-trip
//! one specification document: two-space indentation, line-oriented list and
//! mapping entries, double-quoted strings with JSON-style escaping, and
//! `[]`/`{}` as the only flow collections. There are no anchors, aliases,
//! multi-line scalars, or directives. The serializer is canonical — equal
//! inputs produce byte-identical text — and the parser is its exact inverse
//! for the supported subset.
//!
//! ## Quick Start
//!
//! ```rust
//! use openapi_bundle::{parse_str, to_string, value};
//!
//! let doc = value!({
//!     "openapi": "3.0.3",
//!     "info": { "title": "Widgets", "version": "1.0.0" }
//! });
//!
//! let text = to_string(&doc);
//! assert_eq!(parse_str(&text).unwrap(), doc);
//! ```
//!
//! ### Bundling a split tree
//!
//! ```rust,no_run
//! use openapi_bundle::{bundle, write_bundle};
//! use std::path::Path;
//!
//! // In memory:
//! let document = bundle(Path::new("docs/openapi/index.yaml"))?;
//!
//! // Or straight to a pretty-printed JSON file:
//! write_bundle(
//!     Path::new("docs/openapi/index.yaml"),
//!     Path::new("docs/openapi.json"),
//! )?;
//! # Ok::<(), openapi_bundle::Error>(())
//! ```
//!
//! ### Splitting a composed document
//!
//! ```rust,no_run
//! use openapi_bundle::split_file;
//! use std::path::Path;
//!
//! split_file(Path::new("docs/openapi.json"), Path::new("docs/openapi"))?;
//! # Ok::<(), openapi_bundle::Error>(())
//! ```
//!
//! ## Error reporting
//!
//! Every failure carries structured context: parse errors name the file and
//! line, missing references name the referring file and the resolved target,
//! fragment failures list the keys actually present, and cycles report the
//! whole reference chain. Bundling and splitting are all-or-nothing — no
//! partial output is written on failure.
//!
//! ## Concurrency model
//!
//! Everything is synchronous and batch-oriented. Each call builds its own
//! resolution state and caches nothing, so repeated calls are independent
//! and safe to run from parallel processes.

pub mod bundle;
pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod ser;
pub mod split;
pub mod validate;
pub mod value;

pub use bundle::{
    bundle, bundle_with_options, write_bundle, write_bundle_with_options, BundleOptions,
};
pub use de::{parse_file, parse_str};
pub use error::{Error, Result};
pub use map::Map;
pub use ser::{to_string, write_file};
pub use split::{split, split_file};
pub use validate::validate_components;
pub use value::{Document, Number, Reference, Value};

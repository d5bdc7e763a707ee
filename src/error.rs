//! Error types for parsing, bundling, splitting, and validation.
//!
//! Every failure surfaces as one [`Error`] value carrying enough structured
//! context to locate the offending file without re-running under a debugger:
//! parse errors name the file and line, resolution errors name the referring
//! file and the resolved target, fragment failures list the sibling keys that
//! were actually present, and cycles report the whole reference chain.
//!
//! Nothing is recovered silently: a parse never returns a partial value, and
//! a bundle or split aborts on the first error without writing output.
//!
//! ## Examples
//!
//! ```rust
//! use openapi_bundle::{parse_str, Error};
//!
//! let result = parse_str("key\n");
//! assert!(matches!(result, Err(Error::Syntax { line: 1, .. })));
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Represents all possible errors raised by the document engine.
///
/// The variants fall into the three failure families the tools report:
/// syntax errors from the parser, bundle errors from the reference resolver,
/// and validation errors from the schema-component pre-pass (plus plain I/O).
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Malformed document text: bad indentation, mixed block modes, a missing
    /// `:` separator, or an unterminated quoted token.
    #[error("syntax error{} at line {line}: {msg}", fmt_file(.file))]
    Syntax {
        file: Option<PathBuf>,
        line: usize,
        msg: String,
    },

    /// A reference names a file that does not exist.
    #[error(
        "referenced file not found: {reference:?} (from {}, resolved to {})",
        .referrer.display(),
        .target.display()
    )]
    MissingFile {
        reference: String,
        referrer: PathBuf,
        target: PathBuf,
    },

    /// A fragment segment could not be followed: the key is absent, or the
    /// node at that point is not a mapping.
    #[error(
        "fragment segment {segment:?} not found while resolving {reference:?}; available keys: [{}]",
        .available.join(", ")
    )]
    MissingFragment {
        reference: String,
        segment: String,
        available: Vec<String>,
    },

    /// A (file, fragment) pair referenced itself through its own resolution
    /// chain. The chain lists every pair from the root to the repeat.
    #[error("circular reference: {}", .chain.join(" -> "))]
    Circular { chain: Vec<String> },

    /// A schema-component file failed the indicator-key pre-pass.
    #[error("invalid schema component {}: {detail}", .file.display())]
    Validation { file: PathBuf, detail: String },

    /// File reading or writing failed.
    #[error("IO error for {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// Generic message (serialization plumbing).
    #[error("{0}")]
    Message(String),
}

fn fmt_file(file: &Option<PathBuf>) -> String {
    match file {
        Some(path) => format!(" in {}", path.display()),
        None => String::new(),
    }
}

impl Error {
    /// Creates a syntax error with the 1-based source line.
    pub fn syntax(line: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            file: None,
            line,
            msg: msg.into(),
        }
    }

    /// Creates an I/O error for a path-bound read or write failure.
    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Attaches a file path to a syntax error; other variants pass through.
    #[must_use]
    pub fn with_file(self, path: &Path) -> Self {
        match self {
            Error::Syntax { line, msg, .. } => Error::Syntax {
                file: Some(path.to_path_buf()),
                line,
                msg,
            },
            other => other,
        }
    }

    /// Returns `true` for the parser's syntax errors.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax { .. })
    }

    /// Returns `true` for the resolver's bundle errors.
    #[must_use]
    pub fn is_bundle(&self) -> bool {
        matches!(
            self,
            Error::MissingFile { .. } | Error::MissingFragment { .. } | Error::Circular { .. }
        )
    }

    /// Returns `true` for pre-pass validation errors.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

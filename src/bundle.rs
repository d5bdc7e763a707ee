//! Reference resolution.
//!
//! The bundler walks a parsed document tree and replaces every live
//! reference token with the content it points at, recursively, until the
//! result is a single self-contained value. References resolve relative to
//! the directory of the file they appear in; a fragment addresses a position
//! inside the referenced document by mapping keys.
//!
//! Inert references — a pure fragment (`#/...`) or a URL-schemed path — are
//! left untouched. Everything else must resolve: a missing file, an
//! unresolvable fragment segment, or a circular reference aborts the whole
//! bundle with structured context.
//!
//! Cycle detection uses an explicit resolution stack of `(file, fragment)`
//! pairs threaded through every call. Membership means "currently being
//! resolved on the active call path", so two sibling references to the same
//! shared component are fine; only genuine ancestry trips the check. The
//! stack's order is the chain reported in the error.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use openapi_bundle::bundle;
//! use std::path::Path;
//!
//! let document = bundle(Path::new("docs/openapi/index.yaml"))?;
//! assert!(document.is_mapping());
//! # Ok::<(), openapi_bundle::Error>(())
//! ```

use crate::{Document, Error, Map, Reference, Result, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Configuration for a bundle run.
///
/// # Examples
///
/// ```rust
/// use openapi_bundle::BundleOptions;
///
/// let options = BundleOptions::new().skip_validation(true);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BundleOptions {
    skip_validation: bool,
}

impl BundleOptions {
    /// Creates default options (schema-component validation runs).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to skip the schema-component validation pre-pass.
    #[must_use]
    pub fn skip_validation(mut self, skip: bool) -> Self {
        self.skip_validation = skip;
        self
    }
}

/// The set of `(file, fragment)` pairs on the active resolution call path.
///
/// Constructed fresh for every bundle call; nothing persists between calls.
struct ResolutionStack {
    frames: Vec<(PathBuf, Option<String>)>,
}

impl ResolutionStack {
    fn new() -> Self {
        ResolutionStack { frames: Vec::new() }
    }

    fn contains(&self, key: &(PathBuf, Option<String>)) -> bool {
        self.frames.contains(key)
    }

    fn push(&mut self, key: (PathBuf, Option<String>)) {
        self.frames.push(key);
    }

    fn pop(&mut self) {
        self.frames.pop();
    }

    /// The full chain from the root to (and including) the repeated pair.
    fn chain_with(&self, key: &(PathBuf, Option<String>)) -> Vec<String> {
        self.frames
            .iter()
            .chain(std::iter::once(key))
            .map(frame_label)
            .collect()
    }
}

fn frame_label((path, fragment): &(PathBuf, Option<String>)) -> String {
    match fragment {
        Some(fragment) => format!("{}#{}", path.display(), fragment),
        None => path.display().to_string(),
    }
}

/// Bundles the document rooted at `root` into a single self-contained value.
///
/// Runs the schema-component validation pre-pass first; use
/// [`bundle_with_options`] to skip it.
///
/// # Errors
///
/// Returns a validation error from the pre-pass, a syntax error from any
/// referenced file, or a bundle error (missing file, missing fragment,
/// circular reference) from resolution.
pub fn bundle(root: &Path) -> Result<Value> {
    bundle_with_options(root, &BundleOptions::new())
}

/// Bundles the document rooted at `root` with explicit options.
///
/// # Errors
///
/// See [`bundle`].
pub fn bundle_with_options(root: &Path, options: &BundleOptions) -> Result<Value> {
    if !options.skip_validation {
        let root_dir = root.parent().unwrap_or_else(|| Path::new("."));
        crate::validate::validate_components(root_dir)?;
    }

    let source = root.canonicalize().map_err(|e| Error::io(root, &e))?;
    let document = Document::load(&source)?;
    let mut stack = ResolutionStack::new();
    resolve(&document.root, &document.source, &mut stack)
}

/// Bundles `source` and writes the result to `destination` as pretty-printed
/// JSON with a trailing newline.
///
/// # Errors
///
/// See [`bundle`]; additionally returns an I/O error if the destination
/// cannot be written. Nothing is written when bundling fails.
pub fn write_bundle(source: &Path, destination: &Path) -> Result<()> {
    write_bundle_with_options(source, destination, &BundleOptions::new())
}

/// Bundles `source` with explicit options and writes JSON to `destination`.
///
/// # Errors
///
/// See [`write_bundle`].
pub fn write_bundle_with_options(
    source: &Path,
    destination: &Path,
    options: &BundleOptions,
) -> Result<()> {
    let bundled = bundle_with_options(source, options)?;
    let mut json =
        serde_json::to_string_pretty(&bundled).map_err(|e| Error::Message(e.to_string()))?;
    json.push('\n');
    fs::write(destination, json).map_err(|e| Error::io(destination, &e))?;
    debug!(destination = %destination.display(), "bundled document written");
    Ok(())
}

fn resolve(value: &Value, current_file: &Path, stack: &mut ResolutionStack) -> Result<Value> {
    match value {
        Value::Mapping(map) => {
            if let Some(reference) = Reference::detect(map) {
                if reference.is_inert() {
                    trace!(reference = reference.raw(), "leaving inert reference");
                    return Ok(value.clone());
                }
                return resolve_reference(&reference, current_file, stack);
            }
            let mut resolved = Map::with_capacity(map.len());
            for (key, entry) in map {
                resolved.insert(key.clone(), resolve(entry, current_file, stack)?);
            }
            Ok(Value::Mapping(resolved))
        }
        Value::Sequence(seq) => {
            let mut resolved = Vec::with_capacity(seq.len());
            for item in seq {
                resolved.push(resolve(item, current_file, stack)?);
            }
            Ok(Value::Sequence(resolved))
        }
        scalar => Ok(scalar.clone()),
    }
}

fn resolve_reference(
    reference: &Reference,
    current_file: &Path,
    stack: &mut ResolutionStack,
) -> Result<Value> {
    let referrer_dir = current_file.parent().unwrap_or_else(|| Path::new("."));
    let joined = referrer_dir.join(reference.path());
    if !joined.exists() {
        return Err(Error::MissingFile {
            reference: reference.raw().to_string(),
            referrer: current_file.to_path_buf(),
            target: joined,
        });
    }
    let target = joined.canonicalize().map_err(|e| Error::io(&joined, &e))?;

    let key = (target.clone(), reference.fragment().map(str::to_string));
    if stack.contains(&key) {
        return Err(Error::Circular {
            chain: stack.chain_with(&key),
        });
    }

    debug!(
        reference = reference.raw(),
        file = %target.display(),
        "loading referenced document"
    );
    let document = Document::load(&target)?;

    stack.push(key);
    let result = resolve_loaded(reference, &document, stack);
    stack.pop();
    result
}

fn resolve_loaded(
    reference: &Reference,
    document: &Document,
    stack: &mut ResolutionStack,
) -> Result<Value> {
    // References inside the target inline first, so a fragment walks fully
    // resolved content.
    let resolved = resolve(&document.root, &document.source, stack)?;
    let extracted = if reference.fragment().is_some() {
        extract_fragment(&resolved, reference)?
    } else {
        resolved
    };
    // The extracted subtree may itself still contain references.
    resolve(&extracted, &document.source, stack)
}

fn extract_fragment(resolved: &Value, reference: &Reference) -> Result<Value> {
    let mut current = resolved;
    for segment in reference.segments() {
        match current.as_mapping().and_then(|map| map.get(segment)) {
            Some(next) => {
                trace!(segment, "descending fragment segment");
                current = next;
            }
            None => {
                let available = current
                    .as_mapping()
                    .map(|map| map.keys().cloned().collect())
                    .unwrap_or_default();
                return Err(Error::MissingFragment {
                    reference: reference.raw().to_string(),
                    segment: segment.to_string(),
                    available,
                });
            }
        }
    }
    Ok(current.clone())
}

//! Schema-component pre-pass validation.
//!
//! Before any resolution work, every schema component file under a split
//! tree's `components/schemas` directory must look like a schema: either a
//! pure reference token, or a mapping carrying at least one of the indicator
//! keys below. This catches stray or truncated component files up front,
//! with a validation error distinct from the resolver's bundle errors.
//!
//! The pre-pass is on by default and skipped via
//! [`BundleOptions::skip_validation`](crate::BundleOptions::skip_validation).

use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Keys whose presence marks a mapping as a plausible schema definition.
pub const INDICATOR_KEYS: [&str; 7] = [
    "type",
    "properties",
    "anyOf",
    "oneOf",
    "allOf",
    "$ref",
    "enum",
];

/// Validates every `.yaml` file under `<root_dir>/components/schemas`.
///
/// Files are checked in name order so failures are deterministic. A missing
/// schemas directory is not an error (the tree may simply have no schemas).
///
/// # Errors
///
/// Returns [`Error::Validation`] for the first file that is neither a
/// reference token nor a mapping with an indicator key; parse and I/O
/// failures propagate as their own variants.
pub fn validate_components(root_dir: &Path) -> Result<()> {
    let schemas_dir = root_dir.join("components").join("schemas");
    if !schemas_dir.is_dir() {
        return Ok(());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(&schemas_dir)
        .map_err(|e| Error::io(&schemas_dir, &e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("yaml")
        })
        .collect();
    files.sort();

    for path in files {
        let value = crate::de::parse_file(&path)?;
        if value.as_reference().is_some() {
            continue;
        }
        let has_indicator = value
            .as_mapping()
            .map(|map| INDICATOR_KEYS.iter().any(|key| map.contains_key(key)))
            .unwrap_or(false);
        if !has_indicator {
            return Err(Error::Validation {
                file: path,
                detail: format!(
                    "expected a reference token or a mapping with one of: {}",
                    INDICATOR_KEYS.join(", ")
                ),
            });
        }
        debug!(file = %path.display(), "schema component validated");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn missing_schemas_directory_is_fine() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(validate_components(tmp.path()).is_ok());
    }

    #[test]
    fn accepts_schema_shapes_and_references() {
        let tmp = tempfile::tempdir().unwrap();
        let schemas = tmp.path().join("components").join("schemas");
        fs::create_dir_all(&schemas).unwrap();
        write(&schemas, "widget.yaml", "type: object\nproperties:\n  id:\n    type: integer\n");
        write(&schemas, "alias.yaml", "$ref: ./widget.yaml\n");
        write(&schemas, "choice.yaml", "oneOf:\n  - type: string\n  - type: integer\n");
        assert!(validate_components(tmp.path()).is_ok());
    }

    #[test]
    fn rejects_file_without_indicator_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let schemas = tmp.path().join("components").join("schemas");
        fs::create_dir_all(&schemas).unwrap();
        write(&schemas, "stray.yaml", "description: not a schema\n");

        let err = validate_components(tmp.path()).unwrap_err();
        assert!(err.is_validation(), "{err}");
        assert!(err.to_string().contains("stray.yaml"));
    }

    #[test]
    fn reports_first_failure_in_name_order() {
        let tmp = tempfile::tempdir().unwrap();
        let schemas = tmp.path().join("components").join("schemas");
        fs::create_dir_all(&schemas).unwrap();
        write(&schemas, "b-bad.yaml", "note: nope\n");
        write(&schemas, "a-bad.yaml", "note: nope\n");

        let err = validate_components(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("a-bad.yaml"), "{err}");
    }
}

//! Document splitting.
//!
//! The splitter is the bundler's structural inverse under one fixed naming
//! policy: it decomposes a composed specification document into one file per
//! path entry, one per schema component, one per security-scheme component,
//! and a root index whose entries point at those files with reference
//! tokens. Bundling the index reproduces the original document.
//!
//! Output is deterministic: filenames derive from slugs in the input's
//! iteration order, with `-2`, `-3`, … suffixes on collisions, tracked
//! independently for paths, schemas, and security schemes. All file contents
//! are computed before the first write, so a planning failure leaves the
//! output root untouched.

use crate::{ser, Error, Map, Result, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level metadata copied from the composed document into the index,
/// in this order, when present.
const METADATA_KEYS: [&str; 6] = ["openapi", "info", "servers", "tags", "security", "x-tagGroups"];

/// Splits a composed document into a linked file tree rooted at `out_root`.
///
/// Writes `index.yaml`, `paths/<slug>.yaml`, `components/schemas/<slug>.yaml`
/// and `components/securitySchemes/<slug>.yaml`.
///
/// # Errors
///
/// Returns an error if the document is not a mapping at the root or if any
/// directory or file cannot be written.
pub fn split(document: &Value, out_root: &Path) -> Result<()> {
    let root = document
        .as_mapping()
        .ok_or_else(|| Error::Message("composed document root must be a mapping".to_string()))?;

    let paths_dir = out_root.join("paths");
    let schemas_dir = out_root.join("components").join("schemas");
    let security_dir = out_root.join("components").join("securitySchemes");

    let mut plan: Vec<(PathBuf, Value)> = Vec::new();
    let mut index = Map::new();

    for key in METADATA_KEYS {
        if let Some(entry) = root.get(key) {
            index.insert(key.to_string(), entry.clone());
        }
    }

    let mut path_counts = HashMap::new();
    let mut index_paths = Map::new();
    if let Some(Value::Mapping(paths)) = root.get("paths") {
        for (route, definition) in paths {
            let filename = next_filename(route, &mut path_counts);
            index_paths.insert(route.clone(), ref_token(&format!("./paths/{}", filename)));
            plan.push((paths_dir.join(filename), definition.clone()));
        }
    }
    if !index_paths.is_empty() {
        index.insert("paths".to_string(), Value::Mapping(index_paths));
    }

    let components = root.get("components").and_then(Value::as_mapping);

    let mut schema_counts = HashMap::new();
    let mut index_schemas = Map::new();
    if let Some(Value::Mapping(schemas)) = components.and_then(|c| c.get("schemas")) {
        for (name, definition) in schemas {
            let filename = next_filename(name, &mut schema_counts);
            index_schemas.insert(
                name.clone(),
                ref_token(&format!("./components/schemas/{}", filename)),
            );
            plan.push((schemas_dir.join(filename), definition.clone()));
        }
    }

    let mut security_counts = HashMap::new();
    let mut index_security = Map::new();
    if let Some(Value::Mapping(schemes)) = components.and_then(|c| c.get("securitySchemes")) {
        for (name, definition) in schemes {
            let filename = next_filename(name, &mut security_counts);
            index_security.insert(
                name.clone(),
                ref_token(&format!("./components/securitySchemes/{}", filename)),
            );
            plan.push((security_dir.join(filename), definition.clone()));
        }
    }

    let mut index_components = Map::new();
    if !index_schemas.is_empty() {
        index_components.insert("schemas".to_string(), Value::Mapping(index_schemas));
    }
    if !index_security.is_empty() {
        index_components.insert("securitySchemes".to_string(), Value::Mapping(index_security));
    }
    if !index_components.is_empty() {
        index.insert("components".to_string(), Value::Mapping(index_components));
    }

    plan.push((out_root.join("index.yaml"), Value::Mapping(index)));

    for dir in [out_root, &paths_dir, &schemas_dir, &security_dir] {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, &e))?;
    }
    for (path, value) in &plan {
        ser::write_file(path, value)?;
        debug!(file = %path.display(), "split file written");
    }
    Ok(())
}

/// Reads a composed JSON document from `source` and splits it under
/// `out_root`.
///
/// # Errors
///
/// See [`split`]; additionally returns an error if `source` cannot be read
/// or is not valid JSON.
pub fn split_file(source: &Path, out_root: &Path) -> Result<()> {
    let text = fs::read_to_string(source).map_err(|e| Error::io(source, &e))?;
    let document: Value = serde_json::from_str(&text)
        .map_err(|e| Error::Message(format!("invalid JSON in {}: {}", source.display(), e)))?;
    split(&document, out_root)
}

fn ref_token(target: &str) -> Value {
    let mut map = Map::new();
    map.insert("$ref".to_string(), Value::from(target));
    Value::Mapping(map)
}

/// Derives `<slug>.yaml`, appending `-2`, `-3`, … on repeated slugs.
fn next_filename(name: &str, counts: &mut HashMap<String, usize>) -> String {
    let base = slugify(name);
    let count = counts.entry(base.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        format!("{}.yaml", base)
    } else {
        format!("{}-{}.yaml", base, count)
    }
}

/// Lowercases, collapses every run of non `[a-z0-9]` characters to one
/// hyphen, trims leading/trailing hyphens, and falls back to `"root"`.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    if slug.is_empty() {
        "root".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basics() {
        assert_eq!(slugify("/widgets"), "widgets");
        assert_eq!(slugify("/widgets/{id}"), "widgets-id");
        assert_eq!(slugify("ApiKeyAuth"), "apikeyauth");
        assert_eq!(slugify("Widget List"), "widget-list");
        assert_eq!(slugify("/"), "root");
        assert_eq!(slugify(""), "root");
        assert_eq!(slugify("--x--"), "x");
    }

    #[test]
    fn collisions_count_per_slug_in_first_seen_order() {
        let mut counts = HashMap::new();
        assert_eq!(next_filename("/foo", &mut counts), "foo.yaml");
        assert_eq!(next_filename("/foo!", &mut counts), "foo-2.yaml");
        assert_eq!(next_filename("/foo?", &mut counts), "foo-3.yaml");
        assert_eq!(next_filename("/bar", &mut counts), "bar.yaml");
    }

    #[test]
    fn ref_token_shape() {
        let token = ref_token("./paths/widgets.yaml");
        let reference = token.as_reference().unwrap();
        assert_eq!(reference.raw(), "./paths/widgets.yaml");
    }
}

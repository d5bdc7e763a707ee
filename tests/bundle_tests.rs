//! Reference resolution scenarios over on-disk fixture trees.

use openapi_bundle::{bundle, bundle_with_options, value, BundleOptions, Error};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Writes `contents` at `relative` under the fixture root, creating parents.
fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[test]
fn bundles_a_split_tree_into_one_document() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(
        root,
        "index.yaml",
        "openapi: 3.0.3\n\
         info:\n  title: Widgets\n  version: 1.0.0\n\
         paths:\n  /widgets:\n    $ref: ./paths/widgets.yaml\n\
         components:\n  schemas:\n    Widget:\n      $ref: ./components/schemas/widget.yaml\n",
    );
    write(
        root,
        "paths/widgets.yaml",
        "get:\n  summary: List widgets\n  responses:\n    \"200\":\n      description: OK\n",
    );
    write(
        root,
        "components/schemas/widget.yaml",
        "type: object\nproperties:\n  id:\n    type: integer\n",
    );

    let bundled = bundle(&root.join("index.yaml")).unwrap();
    let expected = value!({
        "openapi": "3.0.3",
        "info": { "title": "Widgets", "version": "1.0.0" },
        "paths": {
            "/widgets": {
                "get": {
                    "summary": "List widgets",
                    "responses": { "200": { "description": "OK" } }
                }
            }
        },
        "components": {
            "schemas": {
                "Widget": {
                    "type": "object",
                    "properties": { "id": { "type": "integer" } }
                }
            }
        }
    });
    assert_eq!(bundled, expected);
}

#[test]
fn references_resolve_relative_to_their_own_file() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(
        root,
        "index.yaml",
        "paths:\n  /widgets:\n    $ref: ./paths/widgets.yaml\n",
    );
    // this reference climbs out of paths/ — it must resolve against paths/,
    // not against the index
    write(
        root,
        "paths/widgets.yaml",
        "get:\n  responses:\n    \"200\":\n      schema:\n        $ref: ../components/schemas/widget.yaml\n",
    );
    write(
        root,
        "components/schemas/widget.yaml",
        "type: object\n",
    );

    let bundled = bundle(&root.join("index.yaml")).unwrap();
    let expected = value!({
        "paths": {
            "/widgets": {
                "get": {
                    "responses": { "200": { "schema": { "type": "object" } } }
                }
            }
        }
    });
    assert_eq!(bundled, expected);
}

#[test]
fn fragment_extracts_a_subtree() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(
        root,
        "index.yaml",
        "id_schema:\n  $ref: ./components/schemas/widget.yaml#/properties/id\n",
    );
    write(
        root,
        "components/schemas/widget.yaml",
        "type: object\nproperties:\n  id:\n    type: integer\n",
    );

    let bundled = bundle(&root.join("index.yaml")).unwrap();
    assert_eq!(bundled, value!({ "id_schema": { "type": "integer" } }));
}

#[test]
fn inert_references_pass_through_untouched() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(
        root,
        "index.yaml",
        "local:\n  \"$ref\": \"#/components/schemas/Widget\"\n\
         remote:\n  $ref: \"https://example.com/spec.yaml#/x\"\n",
    );

    let bundled = bundle(&root.join("index.yaml")).unwrap();
    let expected = value!({
        "local": { "$ref": "#/components/schemas/Widget" },
        "remote": { "$ref": "https://example.com/spec.yaml#/x" }
    });
    assert_eq!(bundled, expected);
}

#[test]
fn ref_mapping_with_extra_keys_is_plain_data() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(
        root,
        "index.yaml",
        "annotated:\n  $ref: ./missing.yaml\n  description: not a reference token\n",
    );

    // two keys, so nothing resolves and the missing file is never touched
    let bundled = bundle(&root.join("index.yaml")).unwrap();
    let expected = value!({
        "annotated": {
            "$ref": "./missing.yaml",
            "description": "not a reference token"
        }
    });
    assert_eq!(bundled, expected);
}

#[test]
fn missing_file_reports_reference_and_referrer() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(root, "index.yaml", "entry:\n  $ref: ./paths/nowhere.yaml\n");

    let err = bundle(&root.join("index.yaml")).unwrap_err();
    assert!(matches!(err, Error::MissingFile { .. }), "{err}");
    let text = err.to_string();
    assert!(text.contains("./paths/nowhere.yaml"), "{text}");
    assert!(text.contains("index.yaml"), "{text}");
}

#[test]
fn missing_fragment_lists_available_keys() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(
        root,
        "index.yaml",
        "entry:\n  $ref: ./components/schemas/widget.yaml#/properties/missing\n",
    );
    write(
        root,
        "components/schemas/widget.yaml",
        "type: object\nproperties:\n  id:\n    type: integer\n  name:\n    type: string\n",
    );

    let err = bundle(&root.join("index.yaml")).unwrap_err();
    assert!(matches!(err, Error::MissingFragment { .. }), "{err}");
    let text = err.to_string();
    assert!(text.contains("missing"), "{text}");
    assert!(text.contains("id") && text.contains("name"), "{text}");
}

#[test]
fn fragment_through_a_scalar_fails() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(root, "index.yaml", "entry:\n  $ref: ./other.yaml#/title/deep\n");
    write(root, "other.yaml", "title: just a string\n");

    let err = bundle(&root.join("index.yaml")).unwrap_err();
    assert!(matches!(err, Error::MissingFragment { .. }), "{err}");
    assert!(err.to_string().contains("deep"), "{err}");
}

#[test]
fn direct_cycle_reports_both_files() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(root, "a.yaml", "$ref: ./b.yaml\n");
    write(root, "b.yaml", "$ref: ./a.yaml\n");

    let err = bundle(&root.join("a.yaml")).unwrap_err();
    assert!(matches!(err, Error::Circular { .. }), "{err}");
    let text = err.to_string();
    assert!(text.contains("a.yaml") && text.contains("b.yaml"), "{text}");
}

#[test]
fn fragment_mediated_cycle_is_detected() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(
        root,
        "a.yaml",
        "wrapper:\n  $ref: ./b.yaml#/inner\n",
    );
    write(
        root,
        "b.yaml",
        "inner:\n  $ref: ./a.yaml\n",
    );

    let err = bundle(&root.join("a.yaml")).unwrap_err();
    assert!(matches!(err, Error::Circular { .. }), "{err}");
    let text = err.to_string();
    assert!(text.contains("a.yaml") && text.contains("b.yaml"), "{text}");
}

#[test]
fn diamond_dependencies_are_not_cycles() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(
        root,
        "index.yaml",
        "first:\n  $ref: ./shared.yaml\nsecond:\n  $ref: ./shared.yaml\n",
    );
    write(root, "shared.yaml", "type: string\n");

    let bundled = bundle(&root.join("index.yaml")).unwrap();
    let expected = value!({
        "first": { "type": "string" },
        "second": { "type": "string" }
    });
    assert_eq!(bundled, expected);
}

#[test]
fn extracted_fragment_may_contain_further_references() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(root, "index.yaml", "entry:\n  $ref: ./outer.yaml#/pick\n");
    write(root, "outer.yaml", "pick:\n  $ref: ./leaf.yaml\nignore: 1\n");
    write(root, "leaf.yaml", "type: integer\n");

    let bundled = bundle(&root.join("index.yaml")).unwrap();
    assert_eq!(bundled, value!({ "entry": { "type": "integer" } }));
}

#[test]
fn validation_pre_pass_runs_before_resolution() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    // index never references the stray file, but the pre-pass still flags it
    write(root, "index.yaml", "openapi: 3.0.3\n");
    write(root, "components/schemas/stray.yaml", "note: not a schema\n");

    let err = bundle(&root.join("index.yaml")).unwrap_err();
    assert!(err.is_validation(), "{err}");
    assert!(err.to_string().contains("stray.yaml"), "{err}");

    let options = BundleOptions::new().skip_validation(true);
    let bundled = bundle_with_options(&root.join("index.yaml"), &options).unwrap();
    assert_eq!(bundled, value!({ "openapi": "3.0.3" }));
}

#[test]
fn syntax_error_in_referenced_file_names_that_file() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(root, "index.yaml", "entry:\n  $ref: ./broken.yaml\n");
    write(root, "broken.yaml", "key: 1\n   odd: 2\n");

    let err = bundle(&root.join("index.yaml")).unwrap_err();
    assert!(err.is_syntax(), "{err}");
    assert!(err.to_string().contains("broken.yaml"), "{err}");
}

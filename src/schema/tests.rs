//! Tests for schema decoding and reference resolution.
//!
//! Validation behavior is covered by the integration suite; these tests pin
//! down the decode shapes, pointer handling, and the resolver's rewrite and
//! failure semantics.

use serde_json::{Value, json};

use super::types::{EmbeddedSchemas, Schema};
use crate::error::SchemaError;
use crate::validators::Validator;

fn compile(value: Value) -> Schema {
    Schema::from_value(&value).expect("schema should decode")
}

fn resolved(value: Value) -> Schema {
    let mut schema = compile(value);
    schema.resolve_refs(false);
    schema
}

#[test]
fn embedded_schemas_from_array() {
    let embedded =
        EmbeddedSchemas::from_value(&json!([{"type": "string"}, {"type": "number"}])).unwrap();
    assert_eq!(embedded.len(), 2);
    assert!(embedded.get("0").is_some());
    assert!(embedded.get("1").is_some());
    assert!(embedded.get("").is_none());
}

#[test]
fn embedded_schemas_from_object_also_populate_single() {
    // An object of schemas is valid in two shapes at once: per-name entries
    // from the object attempt and the whole value under "".
    let embedded = EmbeddedSchemas::from_value(&json!({"a": {}, "b": {}})).unwrap();
    assert_eq!(embedded.len(), 3);
    assert!(embedded.get("a").is_some());
    assert!(embedded.get("b").is_some());
    assert!(embedded.get("").is_some());
}

#[test]
fn embedded_schemas_single_only() {
    let embedded = EmbeddedSchemas::from_value(&json!({"type": "string"})).unwrap();
    assert_eq!(embedded.len(), 1);
    assert!(embedded.get("").is_some());
}

#[test]
fn embedded_schemas_reject_scalars() {
    let result = EmbeddedSchemas::from_value(&json!(5));
    assert!(matches!(result, Err(SchemaError::NoEmbeddedSchemas)));
}

#[test]
fn unknown_keyword_keeps_embedded_schemas() {
    let schema = compile(json!({"definitions": {"a": {"type": "string"}}}));
    let node = schema.node("definitions").expect("node");
    assert!(matches!(node.validator(), Validator::Annotation));
    assert!(node.embedded().get("a").is_some());
}

#[test]
fn negative_bound_is_a_decode_error() {
    let result = Schema::from_value(&json!({"maxProperties": -1}));
    assert!(matches!(result, Err(SchemaError::NegativeBound { .. })));
}

#[test]
fn non_string_ref_is_a_decode_error() {
    let result = Schema::from_value(&json!({"$ref": 5}));
    assert!(matches!(result, Err(SchemaError::InvalidKeyword { .. })));
}

#[test]
fn schema_must_be_an_object() {
    let result = Schema::from_value(&json!([1, 2]));
    assert!(matches!(result, Err(SchemaError::NotAnObject)));
}

#[test]
fn resolution_without_refs_is_a_noop() {
    let mut schema = compile(json!({"properties": {"a": {"type": "string"}}}));
    let keywords: Vec<String> = schema.iter().map(|(k, _)| k.clone()).collect();
    schema.resolve_refs(false);

    assert!(schema.resolved);
    let after: Vec<String> = schema.iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(keywords, after);
    assert!(schema.validate(&json!({"a": "ok"})).is_empty());
}

#[test]
fn resolved_markers_are_set_below() {
    let schema = resolved(json!({"definitions": {"a": {"type": "string"}}}));
    assert!(schema.resolved);
    let below = schema.node("definitions").unwrap().embedded().get("a").unwrap();
    assert!(below.resolved);
}

#[test]
fn one_segment_pointer_resolves_to_unnamed_schema() {
    let schema = resolved(json!({
        "foo": {"type": "integer"},
        "definitions": {"bar": {"$ref": "#/foo"}}
    }));
    let target = schema.node("definitions").unwrap().embedded().get("bar").unwrap();
    assert!(target.node("type").is_some());
    assert!(target.node("$ref").is_none());
}

#[test]
fn two_segment_pointer_resolves_and_is_idempotent() {
    let mut schema = compile(json!({
        "definitions": {"positive": {"minimum": 1}},
        "properties": {"a": {"$ref": "#/definitions/positive"}}
    }));
    schema.resolve_refs(false);
    assert_eq!(schema.validate(&json!({"a": 0})).len(), 1);

    // A second pass over the already-resolved tree changes nothing.
    schema.resolve_refs(false);
    assert_eq!(schema.validate(&json!({"a": 0})).len(), 1);
    assert!(schema.validate(&json!({"a": 2})).is_empty());
}

#[test]
fn pointer_segments_are_unescaped() {
    let schema = resolved(json!({
        "properties": {"a/b~c": {"type": "integer"}},
        "definitions": {"x": {"$ref": "#/properties/a~1b~0c"}}
    }));
    let target = schema.node("definitions").unwrap().embedded().get("x").unwrap();
    assert!(target.node("type").is_some());
}

#[test]
fn percent_escape_is_decoded() {
    let schema = resolved(json!({
        "definitions": {
            "100%": {"type": "boolean"},
            "x": {"$ref": "#/definitions/100%25"}
        }
    }));
    let target = schema.node("definitions").unwrap().embedded().get("x").unwrap();
    assert!(target.node("type").is_some());
}

#[test]
fn deep_pointers_are_unsupported_and_left_in_place() {
    let schema = resolved(json!({
        "a": {"b": {"c": {"type": "string"}}},
        "definitions": {"x": {"$ref": "#/a/b/c"}}
    }));
    let target = schema.node("definitions").unwrap().embedded().get("x").unwrap();
    assert!(matches!(
        target.node("$ref").unwrap().validator(),
        Validator::Ref(_)
    ));
}

#[test]
fn missing_pointer_target_is_left_in_place() {
    let schema = resolved(json!({
        "definitions": {"x": {"$ref": "#/definitions/missing"}}
    }));
    let target = schema.node("definitions").unwrap().embedded().get("x").unwrap();
    assert!(matches!(
        target.node("$ref").unwrap().validator(),
        Validator::Ref(_)
    ));
}

#[test]
fn cyclic_reference_chain_terminates() {
    let schema = resolved(json!({
        "definitions": {
            "a": {"$ref": "#/definitions/b"},
            "b": {"$ref": "#/definitions/a"}
        }
    }));
    // The chain stops when a target repeats; whichever copy the node holds
    // by then, it is still a placeholder.
    let target = schema.node("definitions").unwrap().embedded().get("a").unwrap();
    assert!(matches!(
        target.node("$ref").unwrap().validator(),
        Validator::Ref(_)
    ));
}

#[test]
fn top_level_self_reference_terminates() {
    let mut schema = compile(json!({"$ref": "#"}));
    schema.resolve_refs(false);
    assert!(schema.node("$ref").is_some());
}

#[test]
fn reference_chains_resolve_to_the_terminal_schema() {
    let schema = resolved(json!({
        "definitions": {
            "a": {"$ref": "#/definitions/b"},
            "b": {"$ref": "#/definitions/c"},
            "c": {"type": "null"}
        },
        "properties": {"p": {"$ref": "#/definitions/a"}}
    }));
    assert!(schema.validate(&json!({"p": null})).is_empty());
    assert_eq!(schema.validate(&json!({"p": 1})).len(), 1);
}

#[test]
fn external_reference_with_loading_disabled_stays_put() {
    let schema = resolved(json!({
        "definitions": {
            "x": {"$ref": "http://localhost:9/schema.json#/definitions/y"}
        }
    }));
    let target = schema.node("definitions").unwrap().embedded().get("x").unwrap();
    assert!(matches!(
        target.node("$ref").unwrap().validator(),
        Validator::Ref(_)
    ));
}

#[test]
fn references_resolve_inside_items() {
    let mut schema = compile(json!({
        "items": {"$ref": "#/definitions/str"},
        "definitions": {"str": {"type": "string"}}
    }));
    schema.resolve_refs(false);
    assert!(schema.validate(&json!(["a", "b"])).is_empty());
    assert_eq!(schema.validate(&json!(["a", 5])).len(), 1);
}

#[test]
fn parse_decodes_and_resolves() {
    let raw = br##"{
        "definitions": {"name": {"minLength": 2}},
        "properties": {"name": {"$ref": "#/definitions/name"}}
    }"##;
    let schema = crate::parse(&raw[..], false).expect("parse");
    assert!(schema.resolved);
    assert_eq!(schema.validate(&json!({"name": "x"})).len(), 1);
}

//! Decode-level tests for the keyword validators.
//!
//! Behavior against instances is covered by the integration suite; these pin
//! down the dual-interpretation decode attempts and the structural errors.

use serde_json::json;

use crate::error::SchemaError;
use crate::schema::Schema;
use crate::validators::Validator;

#[test]
fn multiple_of_must_be_positive() {
    for raw in [json!({"multipleOf": 0}), json!({"multipleOf": -2})] {
        let result = Schema::from_value(&raw);
        assert!(matches!(result, Err(SchemaError::InvalidKeyword { .. })));
    }
}

#[test]
fn length_bounds_reject_negatives() {
    let result = Schema::from_value(&json!({"minLength": -1}));
    assert!(matches!(result, Err(SchemaError::NegativeBound { .. })));
}

#[test]
fn bad_pattern_is_rejected_even_when_superseded() {
    // A properties neighbor suppresses the standalone registration but the
    // pattern still has to compile.
    let result = Schema::from_value(&json!({
        "properties": {"a": {}},
        "patternProperties": {"[unclosed": {}}
    }));
    assert!(matches!(result, Err(SchemaError::InvalidPattern { .. })));
}

#[test]
fn pattern_properties_standalone_registers() {
    let schema = Schema::from_value(&json!({"patternProperties": {"^x": {}}})).unwrap();
    assert!(matches!(
        schema.node("patternProperties").unwrap().validator(),
        Validator::PatternProperties(_)
    ));
}

#[test]
fn pattern_properties_superseded_by_properties_neighbor() {
    let schema = Schema::from_value(&json!({
        "properties": {"a": {}},
        "patternProperties": {"^x": {}}
    }))
    .unwrap();
    assert!(matches!(
        schema.node("patternProperties").unwrap().validator(),
        Validator::Annotation
    ));
}

#[test]
fn dependencies_need_at_least_one_valid_entry() {
    let result = Schema::from_value(&json!({"dependencies": {"a": 5}}));
    assert!(matches!(result, Err(SchemaError::InvalidKeyword { .. })));
}

#[test]
fn dependencies_skip_undecodable_keys() {
    // "a" decodes as neither a schema nor a property set; "b" carries the
    // validator alone.
    let schema = Schema::from_value(&json!({"dependencies": {"a": 5, "b": ["c"]}})).unwrap();
    let errors = schema.validate(&json!({"a": 1, "b": 2}));
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("'c'"));
}

#[test]
fn required_rejects_non_string_entries() {
    let result = Schema::from_value(&json!({"required": ["a", 5]}));
    assert!(matches!(result, Err(SchemaError::InvalidKeyword { .. })));
}

#[test]
fn type_rejects_unknown_names() {
    let result = Schema::from_value(&json!({"type": "float"}));
    assert!(matches!(result, Err(SchemaError::InvalidKeyword { .. })));
}

#[test]
fn additional_properties_garbage_is_permissive() {
    // Neither decode attempt succeeds, which leaves the permissive default.
    let schema = Schema::from_value(&json!({
        "properties": {"a": {}},
        "additionalProperties": "garbage"
    }))
    .unwrap();
    assert!(schema.validate(&json!({"b": 1})).is_empty());
}

#[test]
fn additional_properties_schema_form_wins() {
    let schema = Schema::from_value(&json!({
        "properties": {"a": {}},
        "additionalProperties": {"type": "string"}
    }))
    .unwrap();
    assert!(schema.validate(&json!({"b": "ok"})).is_empty());
    assert_eq!(schema.validate(&json!({"b": 3})).len(), 1);
}

#[test]
fn unknown_keywords_validate_nothing() {
    let schema = Schema::from_value(&json!({"fooBar": 17, "title": "x"})).unwrap();
    assert!(schema.validate(&json!({"anything": true})).is_empty());
    assert!(schema.validate(&json!(null)).is_empty());
}

//! Keyword-table decoding of JSON values into schema trees.
//!
//! Every property of a schema object becomes a node, known keyword or not.
//! Unknown keywords carry no behavior but keep their embedded schemas, which
//! is what lets a pointer like `#/definitions/address` traverse them.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::types::{EmbeddedSchemas, Node, Schema};
use crate::error::{SchemaError, SchemaResult};
use crate::validators::{
    AllOf, AnyOf, Dependencies, EnumConstraint, Items, MaxItems, MaxLength, MaxProperties, Maximum,
    MinItems, MinLength, MinProperties, Minimum, MultipleOf, Not, OneOf, Pattern,
    PatternProperties, Properties, Required, TypeConstraint, UniqueItems, Validator,
};

pub(crate) const REF_KEYWORD: &str = "$ref";

pub(crate) fn decode_schema(value: &Value) -> SchemaResult<Schema> {
    let object = value.as_object().ok_or(SchemaError::NotAnObject)?;
    let mut nodes = HashMap::with_capacity(object.len());
    for (keyword, raw) in object {
        let validator = decode_validator(keyword, raw, object)?;
        // Embedded schemas are decoded opportunistically for every keyword;
        // scalar keywords simply end up with none.
        let schemas = EmbeddedSchemas::from_value(raw).unwrap_or_default();
        nodes.insert(keyword.clone(), Node { validator, schemas });
    }
    Ok(Schema {
        nodes,
        resolved: false,
    })
}

fn decode_validator(
    keyword: &str,
    value: &Value,
    siblings: &Map<String, Value>,
) -> SchemaResult<Validator> {
    let validator = match keyword {
        REF_KEYWORD => {
            let reference = value
                .as_str()
                .ok_or_else(|| SchemaError::invalid_keyword(REF_KEYWORD, "expected a string"))?;
            Validator::Ref(reference.to_owned())
        }
        "properties" => Validator::Properties(Properties::decode(value, siblings)?),
        "patternProperties" => {
            // Decoded even when a properties neighbor supersedes the
            // standalone registration, so a bad pattern surfaces either way.
            let patterns = PatternProperties::decode(value)?;
            if siblings.contains_key("properties") {
                Validator::Annotation
            } else {
                Validator::PatternProperties(patterns)
            }
        }
        "dependencies" => Validator::Dependencies(Dependencies::decode(value)?),
        "required" => Validator::Required(Required::decode(value)?),
        "maxProperties" => Validator::MaxProperties(MaxProperties::decode(value)?),
        "minProperties" => Validator::MinProperties(MinProperties::decode(value)?),
        "type" => Validator::Type(TypeConstraint::decode(value)?),
        "enum" => Validator::Enum(EnumConstraint::decode(value)?),
        "minimum" => Validator::Minimum(Minimum::decode(value, siblings)?),
        "maximum" => Validator::Maximum(Maximum::decode(value, siblings)?),
        "multipleOf" => Validator::MultipleOf(MultipleOf::decode(value)?),
        "minLength" => Validator::MinLength(MinLength::decode(value)?),
        "maxLength" => Validator::MaxLength(MaxLength::decode(value)?),
        "pattern" => Validator::Pattern(Pattern::decode(value)?),
        "items" => Validator::Items(Items::decode(value, siblings)?),
        "minItems" => Validator::MinItems(MinItems::decode(value)?),
        "maxItems" => Validator::MaxItems(MaxItems::decode(value)?),
        "uniqueItems" => Validator::UniqueItems(UniqueItems::decode(value)?),
        "allOf" => Validator::AllOf(AllOf::decode(value)?),
        "anyOf" => Validator::AnyOf(AnyOf::decode(value)?),
        "oneOf" => Validator::OneOf(OneOf::decode(value)?),
        "not" => Validator::Not(Not::decode(value)?),
        // Modifier keywords consumed by a neighbor, and anything unknown,
        // carry no validator of their own.
        _ => Validator::Annotation,
    };
    Ok(validator)
}

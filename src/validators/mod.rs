//! Keyword validators.
//!
//! The keyword set is fixed and known at compile time, so dispatch is a
//! closed [`Validator`] enum rather than trait objects. Every variant
//! implements one operation, validate-against-instance, returning zero or
//! more [`ValidationError`]s; validators are no-ops on instance types they do
//! not apply to.
//!
//! # Key Types
//!
//! - [`Validator`] - Closed dispatch enum, one variant per supported keyword
//! - [`Properties`] - The composed object-property validator
//! - [`Items`] - Single-schema and per-position array validation

pub mod array;
pub mod compound;
pub mod general;
pub mod number;
pub mod object;
pub mod string;

#[cfg(test)]
mod tests;

use serde_json::Value;

use crate::error::{SchemaError, SchemaResult, ValidationError};
use crate::schema::Schema;

pub use array::{Items, MaxItems, MinItems, UniqueItems};
pub use compound::{AllOf, AnyOf, Not, OneOf};
pub use general::{EnumConstraint, TypeConstraint};
pub use number::{Maximum, Minimum, MultipleOf};
pub use object::{
    Dependencies, MaxProperties, MinProperties, PatternProperties, Properties, Required,
};
pub use string::{MaxLength, MinLength, Pattern};

/// One keyword's validation behavior.
///
/// `Ref` is the unresolved reference placeholder: it is not a schema itself
/// and is consumed and replaced in place by the resolver. `Annotation` marks
/// keywords with no behavior of their own, either because they are unknown or
/// because a neighboring keyword absorbed them (`exclusiveMinimum`,
/// `additionalProperties`, a superseded `patternProperties`). Annotation
/// nodes still carry embedded schemas so pointers can traverse them.
#[derive(Debug, Clone)]
pub enum Validator {
    Ref(String),
    Annotation,
    Properties(Properties),
    PatternProperties(PatternProperties),
    Dependencies(Dependencies),
    Required(Required),
    MaxProperties(MaxProperties),
    MinProperties(MinProperties),
    Type(TypeConstraint),
    Enum(EnumConstraint),
    Minimum(Minimum),
    Maximum(Maximum),
    MultipleOf(MultipleOf),
    MinLength(MinLength),
    MaxLength(MaxLength),
    Pattern(Pattern),
    Items(Items),
    MinItems(MinItems),
    MaxItems(MaxItems),
    UniqueItems(UniqueItems),
    AllOf(AllOf),
    AnyOf(AnyOf),
    OneOf(OneOf),
    Not(Not),
}

impl Validator {
    /// Validate an instance, returning zero or more errors.
    pub fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        match self {
            Self::Ref(_) | Self::Annotation => Vec::new(),
            Self::Properties(v) => v.validate(instance),
            Self::PatternProperties(v) => v.validate(instance),
            Self::Dependencies(v) => v.validate(instance),
            Self::Required(v) => v.validate(instance),
            Self::MaxProperties(v) => v.validate(instance),
            Self::MinProperties(v) => v.validate(instance),
            Self::Type(v) => v.validate(instance),
            Self::Enum(v) => v.validate(instance),
            Self::Minimum(v) => v.validate(instance),
            Self::Maximum(v) => v.validate(instance),
            Self::MultipleOf(v) => v.validate(instance),
            Self::MinLength(v) => v.validate(instance),
            Self::MaxLength(v) => v.validate(instance),
            Self::Pattern(v) => v.validate(instance),
            Self::Items(v) => v.validate(instance),
            Self::MinItems(v) => v.validate(instance),
            Self::MaxItems(v) => v.validate(instance),
            Self::UniqueItems(v) => v.validate(instance),
            Self::AllOf(v) => v.validate(instance),
            Self::AnyOf(v) => v.validate(instance),
            Self::OneOf(v) => v.validate(instance),
            Self::Not(v) => v.validate(instance),
        }
    }

    /// Mutable access to every sub-schema this validator owns.
    ///
    /// Validators check instances against their own copies, so the resolver
    /// rewrites these alongside the node's embedded schemas.
    pub(crate) fn embedded_schemas_mut(&mut self) -> Vec<&mut Schema> {
        match self {
            Self::Properties(v) => v.subschemas_mut(),
            Self::PatternProperties(v) => v.subschemas_mut(),
            Self::Dependencies(v) => v.subschemas_mut(),
            Self::Items(v) => v.subschemas_mut(),
            Self::AllOf(v) => v.subschemas_mut(),
            Self::AnyOf(v) => v.subschemas_mut(),
            Self::OneOf(v) => v.subschemas_mut(),
            Self::Not(v) => v.subschemas_mut(),
            _ => Vec::new(),
        }
    }
}

/// Bool-or-schema rule shared by `additionalProperties` and
/// `additionalItems`.
#[derive(Debug, Clone)]
pub(crate) enum AdditionalRule {
    Allowed(bool),
    Schema(Box<Schema>),
}

impl AdditionalRule {
    /// Decode from an optional sibling keyword value.
    ///
    /// Both forms are attempted independently and the schema form wins when
    /// both succeed. An absent or undecodable value falls back to permissive.
    pub(crate) fn decode(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::Allowed(true);
        };
        if let Ok(schema) = Schema::from_value(value) {
            return Self::Schema(Box::new(schema));
        }
        Self::Allowed(value.as_bool().unwrap_or(true))
    }

    pub(crate) fn subschema_mut(&mut self) -> Option<&mut Schema> {
        match self {
            Self::Schema(schema) => Some(schema.as_mut()),
            Self::Allowed(_) => None,
        }
    }
}

/// Decode a non-negative counting bound.
pub(crate) fn decode_bound(value: &Value, keyword: &str) -> SchemaResult<usize> {
    let bound = value
        .as_i64()
        .ok_or_else(|| SchemaError::invalid_keyword(keyword, "expected an integer"))?;
    if bound < 0 {
        return Err(SchemaError::negative_bound(keyword));
    }
    Ok(bound as usize)
}

/// JSON type name used in error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Deep JSON equality. Numbers compare by double value, so `1` and `1.0` are
/// equal.
pub(crate) fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(m, n)| json_equal(m, n))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len() && x.iter().all(|(k, v)| y.get(k).is_some_and(|w| json_equal(v, w)))
        }
        _ => a == b,
    }
}

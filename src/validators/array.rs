//! Array keyword validators.

use serde_json::{Map, Value};

use super::{AdditionalRule, decode_bound, json_equal};
use crate::error::{SchemaError, SchemaResult, ValidationError};
use crate::schema::Schema;

/// The `items` keyword in both its forms.
///
/// A single schema validates every element; an array of schemas validates
/// positionally, with elements beyond the tuple falling to the
/// `additionalItems` sibling rule.
#[derive(Debug, Clone)]
pub struct Items {
    kind: ItemsKind,
    additional: AdditionalRule,
}

#[derive(Debug, Clone)]
enum ItemsKind {
    Single(Box<Schema>),
    Tuple(Vec<Schema>),
}

impl Items {
    pub(crate) fn decode(value: &Value, siblings: &Map<String, Value>) -> SchemaResult<Self> {
        let kind = match value {
            Value::Object(_) => ItemsKind::Single(Box::new(Schema::from_value(value)?)),
            Value::Array(raws) => ItemsKind::Tuple(
                raws.iter()
                    .map(Schema::from_value)
                    .collect::<SchemaResult<_>>()?,
            ),
            _ => {
                return Err(SchemaError::invalid_keyword(
                    "items",
                    "expected a schema or an array of schemas",
                ));
            }
        };
        let additional = AdditionalRule::decode(siblings.get("additionalItems"));
        Ok(Self { kind, additional })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let Some(items) = instance.as_array() else {
            return Vec::new();
        };
        let mut errors = Vec::new();
        match &self.kind {
            ItemsKind::Single(schema) => {
                for item in items {
                    errors.extend(schema.validate(item));
                }
            }
            ItemsKind::Tuple(schemas) => {
                for (index, item) in items.iter().enumerate() {
                    if let Some(schema) = schemas.get(index) {
                        errors.extend(schema.validate(item));
                        continue;
                    }
                    match &self.additional {
                        AdditionalRule::Schema(schema) => errors.extend(schema.validate(item)),
                        AdditionalRule::Allowed(false) => {
                            errors.push(ValidationError::AdditionalItem { index });
                        }
                        AdditionalRule::Allowed(true) => {}
                    }
                }
            }
        }
        errors
    }

    pub(crate) fn subschemas_mut(&mut self) -> Vec<&mut Schema> {
        let mut out: Vec<&mut Schema> = match &mut self.kind {
            ItemsKind::Single(schema) => vec![schema.as_mut()],
            ItemsKind::Tuple(schemas) => schemas.iter_mut().collect(),
        };
        if let Some(schema) = self.additional.subschema_mut() {
            out.push(schema);
        }
        out
    }
}

/// Lower bound on array length.
#[derive(Debug, Clone)]
pub struct MinItems {
    limit: usize,
}

impl MinItems {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        Ok(Self {
            limit: decode_bound(value, "minItems")?,
        })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let Some(items) = instance.as_array() else {
            return Vec::new();
        };
        if items.len() < self.limit {
            return vec![ValidationError::TooFewItems {
                count: items.len(),
                limit: self.limit,
            }];
        }
        Vec::new()
    }
}

/// Upper bound on array length.
#[derive(Debug, Clone)]
pub struct MaxItems {
    limit: usize,
}

impl MaxItems {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        Ok(Self {
            limit: decode_bound(value, "maxItems")?,
        })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let Some(items) = instance.as_array() else {
            return Vec::new();
        };
        if items.len() > self.limit {
            return vec![ValidationError::TooManyItems {
                count: items.len(),
                limit: self.limit,
            }];
        }
        Vec::new()
    }
}

/// No two array elements may be equal while the flag is set.
#[derive(Debug, Clone)]
pub struct UniqueItems {
    unique: bool,
}

impl UniqueItems {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        let unique = value
            .as_bool()
            .ok_or_else(|| SchemaError::invalid_keyword("uniqueItems", "expected a boolean"))?;
        Ok(Self { unique })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        if !self.unique {
            return Vec::new();
        }
        let Some(items) = instance.as_array() else {
            return Vec::new();
        };
        for (index, item) in items.iter().enumerate() {
            if items[..index].iter().any(|seen| json_equal(seen, item)) {
                return vec![ValidationError::DuplicateItems];
            }
        }
        Vec::new()
    }
}

//! Combinator validators: `allOf`, `anyOf`, `oneOf`, and `not`.

use serde_json::Value;

use crate::error::{SchemaError, SchemaResult, ValidationError};
use crate::schema::Schema;

fn decode_list(value: &Value, keyword: &str) -> SchemaResult<Vec<Schema>> {
    let raws = value
        .as_array()
        .ok_or_else(|| SchemaError::invalid_keyword(keyword, "expected an array of schemas"))?;
    raws.iter().map(Schema::from_value).collect()
}

/// Every sub-schema must validate; all errors propagate.
#[derive(Debug, Clone)]
pub struct AllOf {
    schemas: Vec<Schema>,
}

impl AllOf {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        Ok(Self {
            schemas: decode_list(value, "allOf")?,
        })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for schema in &self.schemas {
            errors.extend(schema.validate(instance));
        }
        errors
    }

    pub(crate) fn subschemas_mut(&mut self) -> Vec<&mut Schema> {
        self.schemas.iter_mut().collect()
    }
}

/// At least one sub-schema must validate cleanly.
#[derive(Debug, Clone)]
pub struct AnyOf {
    schemas: Vec<Schema>,
}

impl AnyOf {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        Ok(Self {
            schemas: decode_list(value, "anyOf")?,
        })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        if self
            .schemas
            .iter()
            .any(|schema| schema.validate(instance).is_empty())
        {
            return Vec::new();
        }
        vec![ValidationError::AnyOfMismatch]
    }

    pub(crate) fn subschemas_mut(&mut self) -> Vec<&mut Schema> {
        self.schemas.iter_mut().collect()
    }
}

/// Exactly one sub-schema must validate cleanly.
#[derive(Debug, Clone)]
pub struct OneOf {
    schemas: Vec<Schema>,
}

impl OneOf {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        Ok(Self {
            schemas: decode_list(value, "oneOf")?,
        })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let matches = self
            .schemas
            .iter()
            .filter(|schema| schema.validate(instance).is_empty())
            .count();
        if matches == 1 {
            return Vec::new();
        }
        vec![ValidationError::OneOfMismatch { matches }]
    }

    pub(crate) fn subschemas_mut(&mut self) -> Vec<&mut Schema> {
        self.schemas.iter_mut().collect()
    }
}

/// The sub-schema must not validate cleanly.
#[derive(Debug, Clone)]
pub struct Not {
    schema: Box<Schema>,
}

impl Not {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        Ok(Self {
            schema: Box::new(Schema::from_value(value)?),
        })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        if self.schema.validate(instance).is_empty() {
            return vec![ValidationError::NotMatched];
        }
        Vec::new()
    }

    pub(crate) fn subschemas_mut(&mut self) -> Vec<&mut Schema> {
        vec![self.schema.as_mut()]
    }
}

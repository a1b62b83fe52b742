//! Numeric keyword validators.

use serde_json::{Map, Value};

use crate::error::{SchemaError, SchemaResult, ValidationError};

/// Lower bound, optionally exclusive via the `exclusiveMinimum` sibling.
#[derive(Debug, Clone)]
pub struct Minimum {
    limit: f64,
    exclusive: bool,
}

impl Minimum {
    pub(crate) fn decode(value: &Value, siblings: &Map<String, Value>) -> SchemaResult<Self> {
        let limit = value
            .as_f64()
            .ok_or_else(|| SchemaError::invalid_keyword("minimum", "expected a number"))?;
        let exclusive = siblings
            .get("exclusiveMinimum")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Ok(Self { limit, exclusive })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let Some(number) = instance.as_f64() else {
            return Vec::new();
        };
        let violated = if self.exclusive {
            number <= self.limit
        } else {
            number < self.limit
        };
        if violated {
            return vec![ValidationError::BelowMinimum {
                value: number,
                limit: self.limit,
            }];
        }
        Vec::new()
    }
}

/// Upper bound, optionally exclusive via the `exclusiveMaximum` sibling.
#[derive(Debug, Clone)]
pub struct Maximum {
    limit: f64,
    exclusive: bool,
}

impl Maximum {
    pub(crate) fn decode(value: &Value, siblings: &Map<String, Value>) -> SchemaResult<Self> {
        let limit = value
            .as_f64()
            .ok_or_else(|| SchemaError::invalid_keyword("maximum", "expected a number"))?;
        let exclusive = siblings
            .get("exclusiveMaximum")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Ok(Self { limit, exclusive })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let Some(number) = instance.as_f64() else {
            return Vec::new();
        };
        let violated = if self.exclusive {
            number >= self.limit
        } else {
            number > self.limit
        };
        if violated {
            return vec![ValidationError::AboveMaximum {
                value: number,
                limit: self.limit,
            }];
        }
        Vec::new()
    }
}

/// The instance must divide evenly by this value.
#[derive(Debug, Clone)]
pub struct MultipleOf {
    divisor: f64,
}

impl MultipleOf {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        let divisor = value
            .as_f64()
            .filter(|d| *d > 0.0)
            .ok_or_else(|| {
                SchemaError::invalid_keyword("multipleOf", "expected a number greater than zero")
            })?;
        Ok(Self { divisor })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let Some(number) = instance.as_f64() else {
            return Vec::new();
        };
        let quotient = number / self.divisor;
        if (quotient - quotient.round()).abs() > f64::EPSILON {
            return vec![ValidationError::NotMultipleOf {
                value: number,
                divisor: self.divisor,
            }];
        }
        Vec::new()
    }
}

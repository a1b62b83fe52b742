//! String keyword validators. Length bounds count characters, not bytes.

use regex::Regex;
use serde_json::Value;

use super::decode_bound;
use crate::error::{SchemaError, SchemaResult, ValidationError};

/// Lower bound on string length.
#[derive(Debug, Clone)]
pub struct MinLength {
    limit: usize,
}

impl MinLength {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        Ok(Self {
            limit: decode_bound(value, "minLength")?,
        })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let Some(string) = instance.as_str() else {
            return Vec::new();
        };
        let length = string.chars().count();
        if length < self.limit {
            return vec![ValidationError::TooShort {
                length,
                limit: self.limit,
            }];
        }
        Vec::new()
    }
}

/// Upper bound on string length.
#[derive(Debug, Clone)]
pub struct MaxLength {
    limit: usize,
}

impl MaxLength {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        Ok(Self {
            limit: decode_bound(value, "maxLength")?,
        })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let Some(string) = instance.as_str() else {
            return Vec::new();
        };
        let length = string.chars().count();
        if length > self.limit {
            return vec![ValidationError::TooLong {
                length,
                limit: self.limit,
            }];
        }
        Vec::new()
    }
}

/// Unanchored regular-expression match over string instances.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        let source = value
            .as_str()
            .ok_or_else(|| SchemaError::invalid_keyword("pattern", "expected a string"))?;
        let regex = Regex::new(source).map_err(|source_err| SchemaError::InvalidPattern {
            pattern: source.to_owned(),
            source: source_err,
        })?;
        Ok(Self { regex })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let Some(string) = instance.as_str() else {
            return Vec::new();
        };
        if !self.regex.is_match(string) {
            return vec![ValidationError::PatternMismatch {
                pattern: self.regex.as_str().to_owned(),
            }];
        }
        Vec::new()
    }
}

//! Instance-type and enumeration validators.

use serde_json::Value;

use super::{json_equal, json_type_name};
use crate::error::{SchemaError, SchemaResult, ValidationError};

/// The `type` keyword: one or more allowed primitive type names.
#[derive(Debug, Clone)]
pub struct TypeConstraint {
    allowed: Vec<PrimitiveType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrimitiveType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl PrimitiveType {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "null" => Some(Self::Null),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }

    fn matches(self, instance: &Value) -> bool {
        match self {
            Self::Object => instance.is_object(),
            Self::Array => instance.is_array(),
            Self::String => instance.is_string(),
            Self::Number => instance.is_number(),
            Self::Boolean => instance.is_boolean(),
            Self::Null => instance.is_null(),
            // Any JSON number with zero fraction counts as an integer.
            Self::Integer => match instance {
                Value::Number(n) => {
                    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
                }
                _ => false,
            },
        }
    }
}

impl TypeConstraint {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        let names: Vec<&str> = match value {
            Value::String(name) => vec![name.as_str()],
            Value::Array(names) => names
                .iter()
                .map(|name| {
                    name.as_str().ok_or_else(|| {
                        SchemaError::invalid_keyword("type", "expected a type name or an array of type names")
                    })
                })
                .collect::<SchemaResult<_>>()?,
            _ => {
                return Err(SchemaError::invalid_keyword(
                    "type",
                    "expected a type name or an array of type names",
                ));
            }
        };
        let allowed = names
            .into_iter()
            .map(|name| {
                PrimitiveType::from_name(name)
                    .ok_or_else(|| SchemaError::invalid_keyword("type", format!("unknown type '{name}'")))
            })
            .collect::<SchemaResult<Vec<_>>>()?;
        Ok(Self { allowed })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        if self.allowed.iter().any(|t| t.matches(instance)) {
            return Vec::new();
        }
        let expected = self
            .allowed
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(" or ");
        vec![ValidationError::InvalidType {
            expected,
            actual: json_type_name(instance),
        }]
    }
}

/// The `enum` keyword: the instance must equal one of the listed values.
///
/// Unlike most validators this one applies to every instance type.
#[derive(Debug, Clone)]
pub struct EnumConstraint {
    values: Vec<Value>,
}

impl EnumConstraint {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        let values = value
            .as_array()
            .ok_or_else(|| SchemaError::invalid_keyword("enum", "expected an array of values"))?;
        Ok(Self {
            values: values.clone(),
        })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        if self.values.iter().any(|value| json_equal(value, instance)) {
            return Vec::new();
        }
        vec![ValidationError::EnumMismatch]
    }
}

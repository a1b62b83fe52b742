//! Core schema tree types.
//!
//! A [`Schema`] is a mapping from keyword name to [`Node`]; a `Node` pairs the
//! keyword's validator with the sub-schemas embedded in its value. Schemas are
//! built once from decoded JSON, rewritten in place exactly once by the
//! reference resolver, and read-only from then on.

use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use super::parser;
use crate::error::{SchemaError, SchemaResult, ValidationError};
use crate::validators::Validator;

/// A node in a JSON Schema document.
///
/// Each keyword of the source object becomes one entry in `nodes`. Validation
/// walks the entries and concatenates the errors every validator produces for
/// the instance.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub(crate) nodes: HashMap<String, Node>,
    /// Set once below-traversal has completed for this node. The marker is the
    /// resolver's descent guard; it is never serialized.
    pub(crate) resolved: bool,
}

/// One keyword's validator paired with the sub-schemas its value embeds.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) validator: Validator,
    pub(crate) schemas: EmbeddedSchemas,
}

impl Node {
    /// The validator attached to this keyword.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// The sub-schemas embedded in this keyword's value.
    pub fn embedded(&self) -> &EmbeddedSchemas {
        &self.schemas
    }
}

/// Zero or more named sub-schemas decoded from a keyword's raw value.
///
/// Key conventions are keyword-specific: numeric-string keys ("0", "1", ...)
/// for array-shaped keywords, property names for object-shaped keywords, and
/// the empty string for a single unnamed sub-schema. The decoder tries all
/// three shapes independently, so a value that is valid in more than one shape
/// populates keys from more than one attempt.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedSchemas(pub(crate) HashMap<String, Schema>);

impl EmbeddedSchemas {
    /// Decode a keyword value, trying the array, object, and single-schema
    /// shapes in that order. Fails only if every attempt fails.
    pub fn from_value(value: &Value) -> SchemaResult<Self> {
        let mut out = HashMap::new();

        let array = Self::decode_array(value);
        let object = Self::decode_object(value);
        let single = Self::decode_single(value);

        if array.is_err() && object.is_err() && single.is_err() {
            return Err(SchemaError::NoEmbeddedSchemas);
        }

        if let Ok(schemas) = array {
            for (index, schema) in schemas.into_iter().enumerate() {
                out.insert(index.to_string(), schema);
            }
        }
        if let Ok(schemas) = object {
            out.extend(schemas);
        }
        if let Ok(schema) = single {
            out.insert(String::new(), schema);
        }

        Ok(Self(out))
    }

    fn decode_array(value: &Value) -> SchemaResult<Vec<Schema>> {
        let items = value.as_array().ok_or(SchemaError::NoEmbeddedSchemas)?;
        items.iter().map(Schema::from_value).collect()
    }

    fn decode_object(value: &Value) -> SchemaResult<HashMap<String, Schema>> {
        let entries = value.as_object().ok_or(SchemaError::NoEmbeddedSchemas)?;
        entries
            .iter()
            .map(|(key, raw)| Ok((key.clone(), Schema::from_value(raw)?)))
            .collect()
    }

    fn decode_single(value: &Value) -> SchemaResult<Schema> {
        Schema::from_value(value)
    }

    /// Look up a sub-schema by key.
    pub fn get(&self, key: &str) -> Option<&Schema> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the named sub-schemas.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Schema)> {
        self.0.iter()
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut Schema> {
        self.0.values_mut()
    }
}

impl Schema {
    /// Decode a schema from an already-parsed JSON value.
    pub fn from_value(value: &Value) -> SchemaResult<Self> {
        parser::decode_schema(value)
    }

    /// Decode a schema from a reader of JSON bytes.
    ///
    /// The result still contains unresolved references; call
    /// [`Schema::resolve_refs`] (or use [`crate::parse`]) before validating.
    pub fn from_reader<R: Read>(reader: R) -> SchemaResult<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(&value)
    }

    /// Look up the node for a keyword.
    pub fn node(&self, keyword: &str) -> Option<&Node> {
        self.nodes.get(keyword)
    }

    /// Iterate over the keyword nodes.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Node)> {
        self.nodes.iter()
    }

    /// The reference string carried by this schema, if it is (still) a
    /// reference placeholder.
    pub(crate) fn ref_keyword(&self) -> Option<&str> {
        match self.nodes.get(parser::REF_KEYWORD).map(Node::validator) {
            Some(Validator::Ref(reference)) => Some(reference),
            _ => None,
        }
    }

    /// Validate an instance against this schema.
    ///
    /// Every keyword node's validator runs against the instance; the returned
    /// list concatenates their errors. An empty list means the instance is
    /// valid. Validators are no-ops on instance types they do not apply to.
    pub fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for node in self.nodes.values() {
            errors.extend(node.validator.validate(instance));
        }
        errors
    }
}

impl FromStr for Schema {
    type Err = SchemaError;

    fn from_str(s: &str) -> SchemaResult<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(&value)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Schema::from_value(&value).map_err(serde::de::Error::custom)
    }
}

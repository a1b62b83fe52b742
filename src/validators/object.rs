//! Object keyword validators: `properties`, `patternProperties`,
//! `additionalProperties`, `dependencies`, `required`, `maxProperties`, and
//! `minProperties`.
//!
//! The first three keywords compose into a single validator because keyword
//! presence changes how the neighbors are evaluated: pattern matching must
//! run exactly once whether or not `properties` is present, and the
//! additional-property rule only sees instance keys that matched nothing
//! else.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use serde_json::{Map, Value};

use super::{AdditionalRule, decode_bound};
use crate::error::{SchemaError, SchemaResult, ValidationError};
use crate::schema::Schema;

/// The composed `properties` validator.
///
/// When `patternProperties` or `additionalProperties` appear next to
/// `properties`, their behavior folds in here: the pattern sub-validator is
/// decoded and owned by this validator (the standalone registration of the
/// neighbor is suppressed), and the additional rule applies to instance keys
/// that matched neither the named map nor any pattern.
#[derive(Debug, Clone)]
pub struct Properties {
    object: HashMap<String, Schema>,
    patterns: Option<PatternProperties>,
    additional: AdditionalRule,
}

impl Properties {
    pub(crate) fn decode(value: &Value, siblings: &Map<String, Value>) -> SchemaResult<Self> {
        let entries = value.as_object().ok_or_else(|| {
            SchemaError::invalid_keyword("properties", "expected an object of schemas")
        })?;
        let mut object = HashMap::with_capacity(entries.len());
        for (name, raw) in entries {
            object.insert(name.clone(), Schema::from_value(raw)?);
        }
        // Decode failures here were already surfaced when the sibling keyword
        // itself went through the parser.
        let patterns = siblings
            .get("patternProperties")
            .and_then(|raw| PatternProperties::decode(raw).ok());
        let additional = AdditionalRule::decode(siblings.get("additionalProperties"));
        Ok(Self {
            object,
            patterns,
            additional,
        })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let Some(object) = instance.as_object() else {
            return Vec::new();
        };
        let mut errors = Vec::new();
        for (key, value) in object {
            let mut matched = false;
            if let Some(schema) = self.object.get(key) {
                errors.extend(schema.validate(value));
                matched = true;
            }
            // Patterns are tested even after an exact match.
            if let Some(patterns) = &self.patterns {
                matched |= patterns.validate_key(key, value, &mut errors);
            }
            if matched {
                continue;
            }
            match &self.additional {
                AdditionalRule::Schema(schema) => errors.extend(schema.validate(value)),
                AdditionalRule::Allowed(false) => errors.push(ValidationError::AdditionalProperty {
                    property: key.clone(),
                }),
                AdditionalRule::Allowed(true) => {}
            }
        }
        errors
    }

    pub(crate) fn subschemas_mut(&mut self) -> Vec<&mut Schema> {
        let mut out: Vec<&mut Schema> = self.object.values_mut().collect();
        if let Some(patterns) = &mut self.patterns {
            out.extend(patterns.subschemas_mut());
        }
        if let Some(schema) = self.additional.subschema_mut() {
            out.push(schema);
        }
        out
    }
}

/// Schema mapping keyed by regular expression.
#[derive(Debug, Clone)]
pub struct PatternProperties {
    entries: Vec<PatternEntry>,
}

#[derive(Debug, Clone)]
struct PatternEntry {
    pattern: Regex,
    schema: Schema,
}

impl PatternProperties {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            SchemaError::invalid_keyword("patternProperties", "expected an object of schemas")
        })?;
        let mut entries = Vec::with_capacity(object.len());
        for (source, raw) in object {
            let pattern = Regex::new(source).map_err(|source_err| SchemaError::InvalidPattern {
                pattern: source.clone(),
                source: source_err,
            })?;
            entries.push(PatternEntry {
                pattern,
                schema: Schema::from_value(raw)?,
            });
        }
        Ok(Self { entries })
    }

    /// Validate one instance key against every matching pattern, appending
    /// any errors. Returns whether at least one pattern matched.
    pub(crate) fn validate_key(
        &self,
        key: &str,
        value: &Value,
        errors: &mut Vec<ValidationError>,
    ) -> bool {
        let mut matched = false;
        for entry in &self.entries {
            if entry.pattern.is_match(key) {
                errors.extend(entry.schema.validate(value));
                matched = true;
            }
        }
        matched
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let Some(object) = instance.as_object() else {
            return Vec::new();
        };
        let mut errors = Vec::new();
        for (key, value) in object {
            self.validate_key(key, value, &mut errors);
        }
        errors
    }

    pub(crate) fn subschemas_mut(&mut self) -> Vec<&mut Schema> {
        self.entries
            .iter_mut()
            .map(|entry| &mut entry.schema)
            .collect()
    }
}

/// Per-key dependencies, each either a schema or a set of companion property
/// names.
///
/// Both interpretations are attempted per key; a key whose value decodes as
/// neither is skipped, and decoding fails overall only when no key produced
/// either kind.
#[derive(Debug, Clone)]
pub struct Dependencies {
    schema_deps: HashMap<String, Schema>,
    property_deps: HashMap<String, HashSet<String>>,
}

impl Dependencies {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| SchemaError::invalid_keyword("dependencies", "expected an object"))?;

        let mut schema_deps = HashMap::new();
        let mut property_deps = HashMap::new();
        for (key, raw) in object {
            if let Ok(schema) = Schema::from_value(raw) {
                schema_deps.insert(key.clone(), schema);
            }
            if let Some(names) = raw.as_array() {
                let set: Option<HashSet<String>> = names
                    .iter()
                    .map(|name| name.as_str().map(str::to_owned))
                    .collect();
                if let Some(set) = set {
                    property_deps.insert(key.clone(), set);
                }
            }
        }

        if schema_deps.is_empty() && property_deps.is_empty() {
            return Err(SchemaError::invalid_keyword(
                "dependencies",
                "no valid schema or property dependencies",
            ));
        }
        Ok(Self {
            schema_deps,
            property_deps,
        })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let Some(object) = instance.as_object() else {
            return Vec::new();
        };
        let mut errors = Vec::new();

        // A schema dependency constrains the whole instance, not the value of
        // the key that triggered it.
        for (key, schema) in &self.schema_deps {
            if !object.contains_key(key) {
                continue;
            }
            errors.extend(schema.validate(instance));
        }

        for (key, companions) in &self.property_deps {
            if !object.contains_key(key) {
                continue;
            }
            for companion in companions {
                if !object.contains_key(companion) {
                    errors.push(ValidationError::MissingDependency {
                        property: key.clone(),
                        dependency: companion.clone(),
                    });
                }
            }
        }
        errors
    }

    pub(crate) fn subschemas_mut(&mut self) -> Vec<&mut Schema> {
        self.schema_deps.values_mut().collect()
    }
}

/// Set of property names that must be present.
#[derive(Debug, Clone)]
pub struct Required {
    properties: HashSet<String>,
}

impl Required {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        let names = value.as_array().ok_or_else(|| {
            SchemaError::invalid_keyword("required", "expected an array of property names")
        })?;
        let properties: Option<HashSet<String>> = names
            .iter()
            .map(|name| name.as_str().map(str::to_owned))
            .collect();
        let properties = properties.ok_or_else(|| {
            SchemaError::invalid_keyword("required", "expected an array of property names")
        })?;
        Ok(Self { properties })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let Some(object) = instance.as_object() else {
            return Vec::new();
        };
        let mut errors = Vec::new();
        for property in &self.properties {
            if !object.contains_key(property) {
                errors.push(ValidationError::RequiredProperty {
                    property: property.clone(),
                });
            }
        }
        errors
    }
}

/// Upper bound on an object's property count.
#[derive(Debug, Clone)]
pub struct MaxProperties {
    limit: usize,
}

impl MaxProperties {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        Ok(Self {
            limit: decode_bound(value, "maxProperties")?,
        })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let Some(object) = instance.as_object() else {
            return Vec::new();
        };
        if object.len() > self.limit {
            return vec![ValidationError::TooManyProperties {
                count: object.len(),
                limit: self.limit,
            }];
        }
        Vec::new()
    }
}

/// Lower bound on an object's property count.
#[derive(Debug, Clone)]
pub struct MinProperties {
    limit: usize,
}

impl MinProperties {
    pub(crate) fn decode(value: &Value) -> SchemaResult<Self> {
        Ok(Self {
            limit: decode_bound(value, "minProperties")?,
        })
    }

    pub(crate) fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let Some(object) = instance.as_object() else {
            return Vec::new();
        };
        if object.len() < self.limit {
            return vec![ValidationError::TooFewProperties {
                count: object.len(),
                limit: self.limit,
            }];
        }
        Vec::new()
    }
}

//! Error types for schema decoding, reference resolution, and validation.
//!
//! Two distinct classes live here. [`SchemaError`] covers structural problems:
//! a schema document that is malformed for one of its keywords, a reference
//! that cannot be resolved, or an external document that cannot be fetched.
//! [`ValidationError`] is not exceptional at all; validation returns a list of
//! them as ordinary data, and an empty list means the instance is valid.

/// Structural errors raised while decoding a schema document or resolving
/// its references.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A schema document must decode as a JSON object
    #[error("schema must be a JSON object")]
    NotAnObject,

    /// A keyword value decoded as none of the supported embedded-schema shapes
    #[error("no valid embedded schemas")]
    NoEmbeddedSchemas,

    /// A known keyword carries a value of the wrong shape
    #[error("keyword '{keyword}' has an invalid value: {detail}")]
    InvalidKeyword { keyword: String, detail: String },

    /// Counting bounds must be non-negative
    #[error("'{keyword}' cannot be smaller than zero")]
    NegativeBound { keyword: String },

    /// A pattern key or `pattern` value failed to compile
    #[error("invalid pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// An absolute-URI reference was hit while external loading is off
    #[error("external schemas are disabled")]
    ExternalDisabled,

    /// Transport failure or non-success status while fetching a document
    #[error("bad external url: {url}")]
    BadExternalUrl {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The fetched body was not a decodable schema document
    #[error("error parsing external document {url}")]
    ExternalDocumentParse {
        url: String,
        #[source]
        source: Box<SchemaError>,
    },

    /// A local pointer did not lead to a schema
    #[error("failed to resolve {pointer}")]
    UnresolvedPointer { pointer: String },

    /// A chain of references revisited one of its own targets
    #[error("cyclic reference: {reference}")]
    CyclicReference { reference: String },
}

/// Validation errors produced by keyword validators.
///
/// These are accumulated across all applicable validators and returned to the
/// caller; each carries a human-readable message via its `Display` impl.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Required property is missing from the instance
    #[error("required property '{property}' is missing")]
    RequiredProperty { property: String },

    /// Object exceeds the maxProperties bound
    #[error("object has more properties than maxProperties ({count} > {limit})")]
    TooManyProperties { count: usize, limit: usize },

    /// Object is below the minProperties bound
    #[error("object has fewer properties than minProperties ({count} < {limit})")]
    TooFewProperties { count: usize, limit: usize },

    /// Property matched no schema and additional properties are forbidden
    #[error("additional properties aren't allowed ('{property}')")]
    AdditionalProperty { property: String },

    /// A property dependency names a companion that is absent
    #[error("property '{property}' depends on '{dependency}', which is missing")]
    MissingDependency {
        property: String,
        dependency: String,
    },

    /// Instance matches none of the allowed primitive types
    #[error("expected {expected}, got {actual}")]
    InvalidType {
        expected: String,
        actual: &'static str,
    },

    /// Instance equals none of the enumerated values
    #[error("value is not one of the enumerated values")]
    EnumMismatch,

    /// Numeric instance is below the minimum
    #[error("{value} is less than the minimum of {limit}")]
    BelowMinimum { value: f64, limit: f64 },

    /// Numeric instance is above the maximum
    #[error("{value} is greater than the maximum of {limit}")]
    AboveMaximum { value: f64, limit: f64 },

    /// Numeric instance is not divisible by the multipleOf value
    #[error("{value} is not a multiple of {divisor}")]
    NotMultipleOf { value: f64, divisor: f64 },

    /// String is shorter than minLength
    #[error("string is shorter than minLength ({length} < {limit})")]
    TooShort { length: usize, limit: usize },

    /// String is longer than maxLength
    #[error("string is longer than maxLength ({length} > {limit})")]
    TooLong { length: usize, limit: usize },

    /// String does not match the pattern
    #[error("string does not match pattern '{pattern}'")]
    PatternMismatch { pattern: String },

    /// Array is below the minItems bound
    #[error("array has fewer items than minItems ({count} < {limit})")]
    TooFewItems { count: usize, limit: usize },

    /// Array exceeds the maxItems bound
    #[error("array has more items than maxItems ({count} > {limit})")]
    TooManyItems { count: usize, limit: usize },

    /// Element beyond the items tuple and additional items are forbidden
    #[error("additional items aren't allowed (index {index})")]
    AdditionalItem { index: usize },

    /// Two array elements are equal while uniqueItems is set
    #[error("array items are not unique")]
    DuplicateItems,

    /// Instance validated against none of the anyOf schemas
    #[error("value does not match any schema in anyOf")]
    AnyOfMismatch,

    /// Instance validated against a number of oneOf schemas other than one
    #[error("value must match exactly one schema in oneOf, matched {matches}")]
    OneOfMismatch { matches: usize },

    /// Instance validated against the schema in `not`
    #[error("value must not match the schema in 'not'")]
    NotMatched,
}

// Convenience constructors for the error sites spread across the validators.
impl SchemaError {
    pub(crate) fn invalid_keyword(keyword: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidKeyword {
            keyword: keyword.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn negative_bound(keyword: impl Into<String>) -> Self {
        Self::NegativeBound {
            keyword: keyword.into(),
        }
    }

    pub(crate) fn unresolved(pointer: impl Into<String>) -> Self {
        Self::UnresolvedPointer {
            pointer: pointer.into(),
        }
    }
}

/// Result alias for schema decoding and resolution.
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_messages() {
        let error = SchemaError::unresolved("definitions/missing");
        assert_eq!(error.to_string(), "failed to resolve definitions/missing");

        let error = SchemaError::negative_bound("maxProperties");
        assert_eq!(error.to_string(), "'maxProperties' cannot be smaller than zero");
    }

    #[test]
    fn validation_error_messages() {
        let error = ValidationError::TooManyProperties { count: 2, limit: 1 };
        assert!(error.to_string().contains("2 > 1"));

        let error = ValidationError::RequiredProperty {
            property: "name".into(),
        };
        assert!(error.to_string().contains("'name'"));
    }
}

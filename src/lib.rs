//! JSON Schema parsing, reference resolution, and validation.
//!
//! A schema document is itself JSON: it decodes into a [`Schema`] tree, has
//! its reference keywords resolved into the concrete sub-schemas they point
//! to (possibly across externally fetched documents, cached by URI), and is
//! then evaluated against data instances by a composed set of keyword
//! validators. Validation does not fail fast; it returns the full list of
//! errors, and an empty list means the instance is valid.
//!
//! # Core Components
//!
//! - [`Schema`] - Decoded schema tree and the validation entry point
//! - [`Resolver`] - Reference resolution with external-document caching
//! - [`Validator`] - Closed set of keyword validators
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//!
//! # fn main() -> Result<(), json_schema::SchemaError> {
//! let mut schema: json_schema::Schema = r#"{
//!     "properties": {"name": {"type": "string"}},
//!     "required": ["name"]
//! }"#.parse()?;
//! schema.resolve_refs(false);
//!
//! let errors = schema.validate(&json!({"name": 7}));
//! assert_eq!(errors.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod schema;
pub mod validators;

// Re-export commonly used types for convenience
pub use error::{SchemaError, SchemaResult, ValidationError};
pub use schema::{EmbeddedSchemas, Node, Resolver, Schema};
pub use validators::Validator;

/// Decode a schema document from a reader and resolve its references.
///
/// `allow_external` gates fetching of absolute-URI references; with it off,
/// such references are left as inert placeholders.
pub fn parse<R: std::io::Read>(reader: R, allow_external: bool) -> SchemaResult<Schema> {
    let mut schema = Schema::from_reader(reader)?;
    schema.resolve_refs(allow_external);
    Ok(schema)
}

/// Decode a schema document and resolve it through an existing [`Resolver`].
///
/// Documents resolved through the same resolver share its external-document
/// cache, so a second document referencing an already-fetched URI reuses the
/// cached copy instead of fetching again.
pub fn parse_with_resolver<R: std::io::Read>(
    reader: R,
    resolver: &mut Resolver,
) -> SchemaResult<Schema> {
    let mut schema = Schema::from_reader(reader)?;
    resolver.resolve(&mut schema);
    Ok(schema)
}

//! Schema tree, keyword-table parsing, and reference resolution.
//!
//! A schema document decodes into a tree of [`Schema`] nodes, each a mapping
//! from keyword name to [`Node`]. The [`Resolver`] runs once per root schema
//! before any validation, rewriting reference placeholders into the schemas
//! they denote; the tree is read-only from then on.
//!
//! # Key Types
//!
//! - [`Schema`] - A node in the schema tree, with the validation entry point
//! - [`Node`] - One keyword's validator plus its embedded sub-schemas
//! - [`EmbeddedSchemas`] - Named sub-schemas decoded from a keyword value
//! - [`Resolver`] - A resolution pass with its external-document cache
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//!
//! # fn main() -> Result<(), json_schema::SchemaError> {
//! let mut schema: json_schema::Schema = r##"{
//!     "properties": {"name": {"$ref": "#/definitions/name"}},
//!     "definitions": {"name": {"type": "string"}}
//! }"##.parse()?;
//! schema.resolve_refs(false);
//!
//! assert!(schema.validate(&json!({"name": "amy"})).is_empty());
//! assert_eq!(schema.validate(&json!({"name": 7})).len(), 1);
//! # Ok(())
//! # }
//! ```

mod parser;
pub mod resolver;
pub mod types;

#[cfg(test)]
mod tests;

pub use resolver::Resolver;
pub use types::{EmbeddedSchemas, Node, Schema};

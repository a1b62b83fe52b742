//! Depth-first reference resolution.
//!
//! The resolver walks a schema tree and rewrites every reference-bearing node
//! it can reach into a structural copy of the schema the reference denotes.
//! External documents are fetched over blocking HTTP and cached by URI with
//! the fragment excluded; the cache belongs to the resolver, so one pass and
//! every document fetched transitively from it share the same instance.
//!
//! Resolution failures are swallowed at the node that hit them. The failed
//! node stays a reference placeholder, which validates nothing, instead of
//! aborting resolution of the whole document.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use log::debug;
use url::Url;

use super::types::Schema;
use crate::error::{SchemaError, SchemaResult};

/// A single resolution pass over one root schema and anything it fetches.
pub struct Resolver {
    cache: HashMap<String, Schema>,
    allow_external: bool,
}

impl Resolver {
    pub fn new(allow_external: bool) -> Self {
        Self {
            cache: HashMap::new(),
            allow_external,
        }
    }

    /// Resolve every reference reachable from `schema`, the root included.
    ///
    /// Idempotent once the tree's resolved markers are set, except that a
    /// reference at the top level is re-examined on every call.
    pub fn resolve(&mut self, schema: &mut Schema) {
        let root = schema.clone();
        self.resolve_self(schema, &root);
        self.resolve_below(schema, &root);
    }

    fn resolve_self_and_below(&mut self, schema: &mut Schema, root: &Schema) {
        self.resolve_self(schema, root);
        self.resolve_below(schema, root);
    }

    /// Rewrite this node while it carries a reference keyword, following
    /// chains of references to their terminal schema. The chain tracks its
    /// own targets; a repeat means the chain is cyclic and the node is left
    /// as a placeholder.
    fn resolve_self(&mut self, schema: &mut Schema, root: &Schema) {
        let mut visited = HashSet::new();
        while let Some(reference) = schema.ref_keyword().map(str::to_owned) {
            if !visited.insert(reference.clone()) {
                let err = SchemaError::CyclicReference { reference };
                debug!("leaving reference unresolved: {err}");
                return;
            }
            match self.ref_to_schema(&reference, root) {
                Ok(target) => *schema = target,
                Err(err) => {
                    debug!("leaving reference '{reference}' unresolved: {err}");
                    return;
                }
            }
        }
    }

    /// Descend into every embedded sub-schema once. The resolved marker is
    /// the only cycle guard at this level; it protects descent into visited
    /// nodes, not the self-resolution chain above.
    fn resolve_below(&mut self, schema: &mut Schema, root: &Schema) {
        if schema.resolved {
            return;
        }
        schema.resolved = true;
        for node in schema.nodes.values_mut() {
            for sub in node.schemas.values_mut() {
                self.resolve_self_and_below(sub, root);
            }
            // Validators check instances against copies they own, so those
            // are rewritten as well.
            for sub in node.validator.embedded_schemas_mut() {
                self.resolve_self_and_below(sub, root);
            }
        }
    }

    /// Resolve a reference string to the schema it denotes.
    ///
    /// An absolute URI switches the resolution root to the named document,
    /// fetching and caching it if necessary; anything else resolves against
    /// the caller's root. The fragment is then resolved as a local pointer.
    fn ref_to_schema(&mut self, reference: &str, root: &Schema) -> SchemaResult<Schema> {
        let (lookup_root, fragment): (Cow<'_, Schema>, String) = match Url::parse(reference) {
            Ok(uri) => {
                let fragment = uri.fragment().unwrap_or("").to_owned();
                // The document alone keys the cache; the fragment suffix is
                // trimmed off the raw reference string.
                let key = reference
                    .strip_suffix(fragment.as_str())
                    .unwrap_or(reference)
                    .to_owned();
                let document = match self.cache.get(&key) {
                    Some(document) => document.clone(),
                    None => {
                        let document = self.fetch_external(reference)?;
                        self.cache.insert(key, document.clone());
                        document
                    }
                };
                (Cow::Owned(document), fragment)
            }
            Err(_) => (Cow::Borrowed(root), reference.to_owned()),
        };
        resolve_local_path(&lookup_root, &fragment)
    }

    /// Fetch, decode, and resolve an external document.
    ///
    /// The fetched document resolves against itself, sharing this resolver's
    /// cache for anything it fetches in turn.
    fn fetch_external(&mut self, reference: &str) -> SchemaResult<Schema> {
        if !self.allow_external {
            return Err(SchemaError::ExternalDisabled);
        }
        debug!("fetching external schema {reference}");
        let body = reqwest::blocking::get(reference)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|source| SchemaError::BadExternalUrl {
                url: reference.to_owned(),
                source,
            })?;
        let mut document: Schema =
            body.parse()
                .map_err(|source: SchemaError| SchemaError::ExternalDocumentParse {
                    url: reference.to_owned(),
                    source: Box::new(source),
                })?;
        self.resolve(&mut document);
        Ok(document)
    }
}

impl Schema {
    /// Resolve references in place with a single-use [`Resolver`].
    pub fn resolve_refs(&mut self, allow_external: bool) {
        Resolver::new(allow_external).resolve(self);
    }
}

/// Resolve the local (fragment) part of a reference against a root schema.
///
/// Only one- and two-segment pointers are supported; anything deeper fails.
fn resolve_local_path(root: &Schema, fragment: &str) -> SchemaResult<Schema> {
    let path = fragment.strip_prefix('#').unwrap_or(fragment);
    let path = path.strip_prefix('/').unwrap_or(path);
    let segments: Vec<String> = path.split('/').map(unescape_segment).collect();

    match segments.as_slice() {
        [segment] if segment.is_empty() => Ok(root.clone()),
        [keyword] => root
            .nodes
            .get(keyword)
            .and_then(|node| node.schemas.get(""))
            .cloned()
            .ok_or_else(|| SchemaError::unresolved(path)),
        [keyword, name] => root
            .nodes
            .get(keyword)
            .and_then(|node| node.schemas.get(name.as_str()))
            .cloned()
            .ok_or_else(|| SchemaError::unresolved(path)),
        _ => Err(SchemaError::unresolved(path)),
    }
}

/// JSON-Pointer-style unescaping, applied per segment in this order:
/// "~0" to "~", "~1" to "/", "%25" to "%".
fn unescape_segment(segment: &str) -> String {
    segment.replace("~0", "~").replace("~1", "/").replace("%25", "%")
}

//! Root schemas and `$ref` resolution.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{InvalidReferenceError, ValidationError};
use crate::node::{validate_node, NodeId, Scope, SchemaNode};
use crate::registry::Registry;

/// A compiled schema document: the arena of its nodes, the entry node, its
/// `$id` (empty when anonymous), and the index mapping each interior
/// subschema's canonical path to its node.
///
/// A root is immutable once built; concurrent validations against it need
/// no coordination.
#[derive(Debug)]
pub struct RootSchema {
    id: String,
    entry: NodeId,
    nodes: Vec<SchemaNode>,
    subschema_index: HashMap<String, NodeId>,
}

impl RootSchema {
    pub(crate) fn new(
        id: String,
        entry: NodeId,
        nodes: Vec<SchemaNode>,
        subschema_index: HashMap<String, NodeId>,
    ) -> Self {
        Self {
            id,
            entry,
            nodes,
            subschema_index,
        }
    }

    /// The `$id` this root registers under; empty for anonymous roots.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn entry(&self) -> NodeId {
        self.entry
    }

    pub(crate) fn node(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.0]
    }

    pub(crate) fn subschema(&self, pointer: &str) -> Option<NodeId> {
        self.subschema_index.get(pointer).copied()
    }

    /// Canonical paths of every indexed interior subschema.
    pub fn subschema_paths(&self) -> impl Iterator<Item = &str> {
        self.subschema_index.keys().map(String::as_str)
    }

    /// Validate a JSON instance given as raw bytes.
    pub fn validate_bytes(&self, registry: &Registry, instance: &[u8]) -> Result<(), ValidationError> {
        let value: Value = serde_json::from_slice(instance)
            .map_err(|e| ValidationError::MalformedInstance(e.to_string()))?;
        self.validate_value(registry, &value)
    }

    /// Validate an already-decoded JSON instance.
    pub fn validate_value(&self, registry: &Registry, instance: &Value) -> Result<(), ValidationError> {
        let scope = Scope {
            registry,
            root: self,
            root_id: &self.id,
        };
        validate_node(scope, self.entry, "", instance)
    }
}

/// Resolve a `$ref` and delegate validation to the referenced node.
///
/// The reference splits at the first `#` into a schema URI and a fragment.
/// An empty URI means the enclosing root; an empty fragment means the
/// resolved root's entry node. The resolved root's id governs the rest of
/// the branch, so nested references resolve against the new root's registry
/// entry.
pub(crate) fn validate_by_ref(
    scope: Scope<'_>,
    reference: &str,
    path: &str,
    container: &Value,
) -> Result<(), ValidationError> {
    let (schema_uri, fragment) = reference.split_once('#').unwrap_or((reference, ""));
    let schema_uri = if schema_uri.is_empty() {
        scope.root_id
    } else {
        schema_uri
    };

    let root = scope.registry.get(schema_uri).ok_or_else(|| InvalidReferenceError {
        schema_uri: schema_uri.to_string(),
        fragment: fragment.to_string(),
        reason: "could not find the referenced root schema".to_string(),
    })?;

    let node = if fragment.is_empty() {
        root.entry()
    } else {
        root.subschema(fragment)
            .ok_or_else(|| InvalidReferenceError {
                schema_uri: schema_uri.to_string(),
                fragment: fragment.to_string(),
                reason: "could not find fragment in the referenced root schema".to_string(),
            })?
    };

    let resolved = Scope {
        registry: scope.registry,
        root: root.as_ref(),
        root_id: root.id(),
    };
    validate_node(resolved, node, path, container)
}

//! Compiled schema nodes and the recursive validation driver.

use jsonvalid_json_pointer::JsonPointer;
use serde_json::Value;

use crate::error::{AssertionError, SchemaValidationError, ValidationError};
use crate::keywords::{validate_assertion, Assertion};
use crate::registry::Registry;
use crate::root::{validate_by_ref, RootSchema};

/// Index of a schema node inside its root's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// One compiled schema.
///
/// A node produced from the literal `false` has `reject_all` set and rejects
/// every instance. A node with `reference` set delegates to the referenced
/// node; its own assertions may exist syntactically but never run.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    pub(crate) reject_all: bool,
    pub(crate) id: Option<String>,
    pub(crate) reference: Option<String>,
    pub(crate) assertions: Vec<Assertion>,
}

impl SchemaNode {
    pub(crate) fn empty() -> Self {
        Self {
            reject_all: false,
            id: None,
            reference: None,
            assertions: Vec::new(),
        }
    }

    pub(crate) fn reject_all() -> Self {
        Self {
            reject_all: true,
            ..Self::empty()
        }
    }
}

/// The instance subvalue a node is looking at, paired with its canonical
/// re-serialisation for the raw-equality keywords.
pub(crate) struct JsonData<'a> {
    pub(crate) raw: String,
    pub(crate) value: &'a Value,
}

impl<'a> JsonData<'a> {
    pub(crate) fn new(value: &'a Value) -> Self {
        Self {
            raw: serde_json::to_string(value).unwrap_or_default(),
            value,
        }
    }
}

/// Everything a recursive validation step needs besides the instance: the
/// registry for `$ref` lookups, the root whose arena the node ids index, and
/// that root's id for resolving relative references.
#[derive(Clone, Copy)]
pub(crate) struct Scope<'a> {
    pub(crate) registry: &'a Registry,
    pub(crate) root: &'a RootSchema,
    pub(crate) root_id: &'a str,
}

/// Validate the instance subvalue designated by `path` against one node.
///
/// `container` is the local value of the calling node; the final path
/// segment is evaluated against it as a one-step pointer to recover this
/// node's own subvalue (the empty path designates the whole container).
pub(crate) fn validate_node(
    scope: Scope<'_>,
    node_id: NodeId,
    path: &str,
    container: &Value,
) -> Result<(), ValidationError> {
    let node = scope.root.node(node_id);

    if node.reject_all {
        return Err(SchemaValidationError {
            path: path.to_string(),
            reason: "json schema \"false\" drops everything".to_string(),
        }
        .into());
    }

    if let Some(reference) = &node.reference {
        return validate_by_ref(scope, reference, path, container);
    }

    let last_segment = path.rsplit('/').next().unwrap_or("");
    let pointer = JsonPointer::parse(&format!("/{last_segment}"))?;
    let local = pointer.evaluate(container)?;
    let data = JsonData::new(local);

    for assertion in &node.assertions {
        if let Err(failure) = validate_assertion(assertion, scope, path, &data) {
            return Err(match failure {
                AssertionError::Keyword(keyword_error) => SchemaValidationError {
                    path: path.to_string(),
                    reason: keyword_error.to_string(),
                }
                .into(),
                AssertionError::Nested(nested) => nested,
            });
        }
    }

    Ok(())
}

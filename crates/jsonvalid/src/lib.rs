//! JSON Schema (Draft-07 subset) compilation and validation.
//!
//! # Overview
//!
//! A schema document is compiled into a [`RootSchema`]: an immutable arena
//! of schema nodes plus an index from canonical JSON-Pointer paths to the
//! interior subschemas, registered in a [`Registry`] under the document's
//! `$id` so that `$ref` can find it. Validation walks the node tree
//! recursively and reports the first failure as a single error carrying the
//! instance path and a reason.
//!
//! # Example
//!
//! ```
//! use jsonvalid::Registry;
//!
//! let registry = Registry::new();
//! let schema = registry
//!     .compile(br#"{"type": "string", "minLength": 3}"#)
//!     .unwrap();
//!
//! assert!(schema.validate_bytes(&registry, br#""hello""#).is_ok());
//! assert!(schema.validate_bytes(&registry, br#""hi""#).is_err());
//! ```
//!
//! Callers that want the process-wide registry can use the [`compile`] and
//! [`validate`] shims instead of carrying a [`Registry`] around.

use std::sync::Arc;

mod compiler;
mod error;
mod keywords;
mod node;
mod registry;
mod root;

pub use error::{
    InvalidReferenceError, KeywordValidationError, SchemaCompilationError, SchemaValidationError,
    ValidationError,
};
pub use node::{NodeId, SchemaNode};
pub use registry::{global, Registry};
pub use root::RootSchema;

/// Compile a schema document on the process-wide registry.
pub fn compile(schema: &[u8]) -> Result<Arc<RootSchema>, SchemaCompilationError> {
    global().compile(schema)
}

/// Validate an instance against a root compiled on the process-wide
/// registry.
pub fn validate(root: &RootSchema, instance: &[u8]) -> Result<(), ValidationError> {
    root.validate_bytes(global(), instance)
}

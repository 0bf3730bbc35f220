//! The root-schema registry.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use crate::compiler::compile_root;
use crate::error::SchemaCompilationError;
use crate::root::RootSchema;

/// Mapping from schema `$id` to compiled root.
///
/// Compilation is the only writer, and it inserts a finished, immutable
/// root in a single step; readers clone the `Arc` out and never hold the
/// lock across validation. The empty id is reserved for roots without a
/// `$id`; registering a new one replaces the previous (last write wins).
pub struct Registry {
    roots: RwLock<HashMap<String, Arc<RootSchema>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            roots: RwLock::new(HashMap::new()),
        }
    }

    /// Compile a schema document and register the result under its `$id`.
    ///
    /// On error nothing is registered; the partially built root is
    /// discarded.
    pub fn compile(&self, schema: &[u8]) -> Result<Arc<RootSchema>, SchemaCompilationError> {
        let root = Arc::new(compile_root(schema)?);
        self.roots
            .write()
            .expect("schema registry lock poisoned")
            .insert(root.id().to_string(), Arc::clone(&root));
        Ok(root)
    }

    pub(crate) fn get(&self, id: &str) -> Option<Arc<RootSchema>> {
        self.roots
            .read()
            .expect("schema registry lock poisoned")
            .get(id)
            .cloned()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry shared by the convenience entry points.
pub fn global() -> &'static Registry {
    static GLOBAL: OnceLock<Registry> = OnceLock::new();
    GLOBAL.get_or_init(Registry::new)
}

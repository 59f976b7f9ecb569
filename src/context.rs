//! Validation context for schema reference resolution.
//!
//! This module provides the [`ValidationContext`] type that carries registry
//! access and depth tracking through a schema pass, so that `$ref` schemas
//! can be resolved and circular references stop at a fixed depth.

use std::sync::Arc;

use crate::schema::SchemaLike;

/// Registry handle plus reference depth for one schema pass.
///
/// Cloning is cheap: the registry is shared behind an `Arc`.
#[derive(Clone)]
pub struct ValidationContext {
    registry: Arc<dyn RegistryAccess>,
    depth: usize,
    max_depth: usize,
}

impl ValidationContext {
    /// Creates a new validation context with a registry and max depth limit.
    pub fn new(registry: Arc<dyn RegistryAccess>, max_depth: usize) -> Self {
        Self {
            registry,
            depth: 0,
            max_depth,
        }
    }

    /// Creates a new context one reference deeper.
    pub fn increment_depth(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            depth: self.depth + 1,
            max_depth: self.max_depth,
        }
    }

    /// Returns the current depth of reference traversal.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the maximum allowed depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns a reference to the registry for definition lookups.
    pub fn registry(&self) -> &dyn RegistryAccess {
        &*self.registry
    }
}

/// Read access to named schema definitions.
///
/// Kept separate from the registry type so that schemas can resolve
/// references without depending on the registry module.
pub trait RegistryAccess: Send + Sync {
    /// Gets a definition by name.
    fn get_schema(&self, name: &str) -> Option<Arc<dyn SchemaLike>>;
}

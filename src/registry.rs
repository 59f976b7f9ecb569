//! Schema registry for named definitions and reference resolution.
//!
//! This module provides the [`SchemaRegistry`] type that stores the `$defs`
//! of a schema document and resolves [`RefSchema`](crate::RefSchema)
//! references during validation.

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::sync::Arc;
use stillwater::Validation;

use crate::context::{RegistryAccess, ValidationContext};
use crate::error::Violations;
use crate::path::{JsonPath, SchemaPath};
use crate::schema::SchemaLike;

/// Type alias for the definition storage map.
type DefinitionMap = Arc<RwLock<IndexMap<String, Arc<dyn SchemaLike>>>>;

/// Default limit on nested reference resolution.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// A thread-safe registry of named schema definitions.
///
/// Definitions keep their registration order, so exporting the registry
/// always yields the same `$defs` layout.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>`: validation takes read locks only,
/// registration is serialized, and clones share the same definitions.
///
/// # Example
///
/// ```rust
/// use formcheck::{Schema, SchemaRegistry};
///
/// let registry = SchemaRegistry::new();
/// registry.register("label", Schema::string().non_empty()).unwrap();
/// registry.register("page", Schema::object()
///     .optional("name", Schema::ref_("label"))
///     .field("widgets", Schema::array(Schema::ref_("widget")))
/// ).unwrap();
///
/// assert_eq!(registry.validate_refs(), vec!["widget"]);
/// ```
pub struct SchemaRegistry {
    definitions: DefinitionMap,
    max_depth: usize,
}

impl SchemaRegistry {
    /// Creates a new empty registry with the default max depth.
    pub fn new() -> Self {
        Self {
            definitions: Arc::new(RwLock::new(IndexMap::new())),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum reference depth for circular reference prevention.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Returns the maximum reference depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Registers a definition with the given name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    pub fn register<S>(&self, name: impl Into<String>, schema: S) -> Result<(), RegistryError>
    where
        S: SchemaLike + 'static,
    {
        let name = name.into();
        let mut definitions = self.definitions.write();

        if definitions.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        definitions.insert(name, Arc::new(schema));
        Ok(())
    }

    /// Retrieves a definition by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn SchemaLike>> {
        self.definitions.read().get(name).cloned()
    }

    /// Returns the registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.definitions.read().keys().cloned().collect()
    }

    /// Returns the sorted, deduplicated names referenced but not registered.
    pub fn validate_refs(&self) -> Vec<String> {
        let definitions = self.definitions.read();
        let mut refs = Vec::new();

        for schema in definitions.values() {
            schema.collect_refs(&mut refs);
        }

        let mut unresolved: Vec<String> = refs
            .into_iter()
            .filter(|name| !definitions.contains_key(name))
            .collect();
        unresolved.sort();
        unresolved.dedup();
        unresolved
    }

    /// Validates a value against a named definition.
    ///
    /// Schema paths of the resulting violations are rooted at `#/$defs/<name>`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::SchemaNotFound` if no definition has that name.
    ///
    /// ```rust
    /// use formcheck::{Schema, SchemaRegistry};
    /// use serde_json::json;
    ///
    /// let registry = SchemaRegistry::new();
    /// let page = Schema::object().field("widgets", Schema::array(Schema::object()));
    /// registry.register("page", page).unwrap();
    ///
    /// assert!(registry.validate("page", &json!({"widgets": []})).unwrap().is_success());
    /// assert!(registry.validate("widget", &json!({})).is_err());
    /// ```
    pub fn validate(
        &self,
        name: &str,
        value: &Value,
    ) -> Result<Validation<(), Violations>, RegistryError> {
        let schema = self
            .get(name)
            .ok_or_else(|| RegistryError::SchemaNotFound(name.to_string()))?;

        Ok(schema.validate(
            value,
            &JsonPath::root(),
            &SchemaPath::definition(name),
            &self.context(),
        ))
    }

    /// Creates a validation context that resolves references against this registry.
    pub fn context(&self) -> ValidationContext {
        ValidationContext::new(Arc::new(self.clone()), self.max_depth)
    }

    /// Exports all definitions as a `$defs` object.
    pub fn to_json_schema(&self) -> Value {
        let definitions = self.definitions.read();
        let defs: Map<String, Value> = definitions
            .iter()
            .map(|(name, schema)| (name.clone(), schema.to_json_schema()))
            .collect();
        Value::Object(defs)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SchemaRegistry {
    fn clone(&self) -> Self {
        Self {
            definitions: Arc::clone(&self.definitions),
            max_depth: self.max_depth,
        }
    }
}

impl RegistryAccess for SchemaRegistry {
    fn get_schema(&self, name: &str) -> Option<Arc<dyn SchemaLike>> {
        self.get(name)
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a definition with a name that already exists.
    #[error("schema '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to use a definition name that doesn't exist.
    #[error("schema '{0}' not found")]
    SchemaNotFound(String),

    /// Definitions reference names that were never registered.
    #[error("unresolved schema references: {}", .0.join(", "))]
    UnresolvedRefs(Vec<String>),
}

//! Complete schema documents.
//!
//! A [`SchemaDocument`] pairs a root schema with the registry holding its
//! `$defs`, and is the unit that validates a whole JSON document in one pass.

use serde_json::{json, Value};
use stillwater::Validation;

use crate::error::Violation;
use crate::interop::ToJsonSchema;
use crate::path::{JsonPath, SchemaPath};
use crate::registry::{RegistryError, SchemaRegistry};
use crate::schema::SchemaLike;

/// JSON Schema dialect emitted by [`SchemaDocument::to_json_schema`].
pub const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// A root schema plus its named definitions.
///
/// # Example
///
/// ```rust
/// use formcheck::{Schema, SchemaDocument, SchemaRegistry};
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// let page = Schema::object().field("widgets", Schema::array(Schema::object()));
/// registry.register("page", page).unwrap();
///
/// let document = SchemaDocument::new(
///     Schema::object().field("pages", Schema::array(Schema::ref_("page"))),
///     registry,
/// );
///
/// let violations = document.validate(&json!({"pages": [{}]}));
/// assert_eq!(violations[0].instance_path.to_string(), "/pages/0");
/// assert_eq!(violations[0].schema_path.to_string(), "#/$defs/page/required");
/// ```
pub struct SchemaDocument {
    root: Box<dyn SchemaLike>,
    registry: SchemaRegistry,
}

impl SchemaDocument {
    /// Creates a document from a root schema and its registry.
    pub fn new<S>(root: S, registry: SchemaRegistry) -> Self
    where
        S: SchemaLike + 'static,
    {
        Self {
            root: Box::new(root),
            registry,
        }
    }

    /// Creates a document after checking that every reference resolves.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnresolvedRefs` naming each missing definition.
    pub fn checked<S>(root: S, registry: SchemaRegistry) -> Result<Self, RegistryError>
    where
        S: SchemaLike + 'static,
    {
        let document = Self::new(root, registry);

        let mut refs = Vec::new();
        document.root.collect_refs(&mut refs);
        refs.retain(|name| document.registry.get(name).is_none());
        refs.extend(document.registry.validate_refs());
        refs.sort();
        refs.dedup();

        if refs.is_empty() {
            Ok(document)
        } else {
            Err(RegistryError::UnresolvedRefs(refs))
        }
    }

    /// Returns the registry holding this document's definitions.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Validates `value`, returning every violation (empty when valid).
    pub fn validate(&self, value: &Value) -> Vec<Violation> {
        let context = self.registry.context();
        match self
            .root
            .validate(value, &JsonPath::root(), &SchemaPath::root(), &context)
        {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(errors) => errors.into_vec(),
        }
    }
}

impl ToJsonSchema for SchemaDocument {
    /// Exports the root schema with `$schema` and `$defs` attached.
    fn to_json_schema(&self) -> Value {
        let mut schema = json!({ "$schema": SCHEMA_DIALECT });

        if let (Some(target), Some(root)) = (
            schema.as_object_mut(),
            self.root.to_json_schema().as_object().cloned(),
        ) {
            target.extend(root);
        }

        let defs = self.registry.to_json_schema();
        if defs.as_object().is_some_and(|defs| !defs.is_empty()) {
            schema["$defs"] = defs;
        }

        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn test_checked_reports_missing_definitions() {
        let registry = SchemaRegistry::new();
        registry
            .register("page", Schema::object().field("w", Schema::ref_("widget")))
            .unwrap();

        let root = Schema::object()
            .field("pages", Schema::array(Schema::ref_("page")))
            .field("meta", Schema::ref_("meta"));

        let err = SchemaDocument::checked(root, registry).err().unwrap();
        assert_eq!(
            err.to_string(),
            "unresolved schema references: meta, widget"
        );
    }

    #[test]
    fn test_valid_document_has_no_violations() {
        let document = SchemaDocument::new(Schema::object(), SchemaRegistry::new());
        assert!(document.validate(&json!({"anything": 1})).is_empty());
    }

    #[test]
    fn test_export_shape() {
        let registry = SchemaRegistry::new();
        registry.register("label", Schema::string()).unwrap();
        let document = SchemaDocument::new(
            Schema::object().field("name", Schema::ref_("label")),
            registry,
        );

        let json = document.to_json_schema();
        assert_eq!(json["$schema"], SCHEMA_DIALECT);
        assert_eq!(json["type"], "object");
        assert_eq!(json["properties"]["name"]["$ref"], "#/$defs/label");
        assert_eq!(json["$defs"]["label"]["type"], "string");
    }

    #[test]
    fn test_export_omits_empty_defs() {
        let document = SchemaDocument::new(Schema::object(), SchemaRegistry::new());
        assert!(document.to_json_schema().get("$defs").is_none());
    }
}

//! Schema definitions for validation.
//!
//! This module provides a small JSON Schema engine. Each schema type
//! validates one kind of value and accumulates every violation instead of
//! stopping at the first, reporting each one with both its instance path and
//! its schema path.
//!
//! # Example
//!
//! ```rust
//! use formcheck::{Schema, SchemaDocument, SchemaRegistry};
//! use serde_json::json;
//!
//! let schema = Schema::object()
//!     .field("name", Schema::string().non_empty())
//!     .optional("row", Schema::integer().min(1))
//!     .additional_properties(false);
//!
//! let document = SchemaDocument::new(schema, SchemaRegistry::new());
//! assert!(document.validate(&json!({"name": "Auto"})).is_empty());
//! assert_eq!(document.validate(&json!({"row": 0})).len(), 2);
//! ```

mod array;
mod boolean;
mod combinators;
mod numeric;
mod object;
mod ref_schema;
mod string;
mod traits;

pub use array::ArraySchema;
pub use boolean::BooleanSchema;
pub use combinators::CombinatorSchema;
pub use numeric::NumberSchema;
pub use object::ObjectSchema;
pub use ref_schema::RefSchema;
pub use string::StringSchema;
pub use traits::SchemaLike;

/// Entry point for creating validation schemas.
pub struct Schema;

impl Schema {
    /// Creates a new string schema.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a schema accepting integers only.
    pub fn integer() -> NumberSchema {
        NumberSchema::integer()
    }

    /// Creates a schema accepting any number.
    pub fn number() -> NumberSchema {
        NumberSchema::number()
    }

    /// Creates a boolean schema.
    pub fn boolean() -> BooleanSchema {
        BooleanSchema
    }

    /// Creates a new object schema with no properties.
    ///
    /// ```rust
    /// use formcheck::{Schema, SchemaDocument, SchemaRegistry};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object()
    ///     .field("type", Schema::string().constant("header"))
    ///     .field("name", Schema::string())
    ///     .additional_properties(false);
    ///
    /// let document = SchemaDocument::new(schema, SchemaRegistry::new());
    /// let violations = document.validate(&json!({"type": "text", "name": "A"}));
    /// assert_eq!(violations[0].schema_path.to_string(), "#/properties/type/const");
    /// ```
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Creates an array schema whose items must match `items`.
    pub fn array<S>(items: S) -> ArraySchema
    where
        S: SchemaLike + 'static,
    {
        ArraySchema::new(items)
    }

    /// Creates a schema that passes if any of `schemas` passes.
    pub fn any_of(schemas: Vec<Box<dyn SchemaLike>>) -> CombinatorSchema {
        CombinatorSchema::AnyOf(schemas)
    }

    /// Creates a schema that passes only if every one of `schemas` passes.
    pub fn all_of(schemas: Vec<Box<dyn SchemaLike>>) -> CombinatorSchema {
        CombinatorSchema::AllOf(schemas)
    }

    /// Creates a reference to a named definition in the registry.
    pub fn ref_(name: impl Into<String>) -> RefSchema {
        RefSchema::new(name)
    }
}

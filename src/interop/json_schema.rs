//! JSON Schema export.

use serde_json::Value;

/// Trait for converting schema types to JSON Schema format.
///
/// Implementations emit draft 2020-12 keywords. References are emitted as
/// `{"$ref": "#/$defs/<name>"}` and resolve against the `$defs` produced by
/// [`SchemaRegistry::to_json_schema`](crate::SchemaRegistry::to_json_schema).
pub trait ToJsonSchema {
    /// Converts this schema to a JSON Schema representation.
    fn to_json_schema(&self) -> Value;
}

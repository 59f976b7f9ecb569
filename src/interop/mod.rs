//! Interoperability with other schema formats.
//!
//! This module exports formcheck schemas as JSON Schema documents, so the
//! built-in config schema can be published for editors and other tools.

pub mod json_schema;

pub use json_schema::ToJsonSchema;

//! # formcheck
//!
//! Schema validation and readable diagnostics for declarative form configs.
//!
//! ## Overview
//!
//! A form config is a JSON document made of pages of typed widgets. Widgets
//! (keyed by `type`) and their numeric validations (keyed by `comparison`)
//! are discriminated unions, so a schema pass over an invalid document
//! reports violations against *every* branch of each union, most of them
//! irrelevant. formcheck runs the pass, accumulating all violations instead
//! of stopping at the first, then keeps only the branches that match each
//! object's actual discriminant and groups the rest into one report per
//! offending location.
//!
//! ## Core Types
//!
//! - [`Schema`], [`SchemaRegistry`], [`SchemaDocument`]: the schema engine
//! - [`Violation`] / [`Violations`]: raw violations with instance and schema paths
//! - [`ReportedError`]: a header plus indented detail lines
//! - [`ConfigDocument`]: the typed config, built through a validated conversion
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//!
//! let config = json!({
//!     "pages": [{
//!         "name": "Teleop",
//!         "widgets": [{"type": "text", "name": "Notes", "min": 5}]
//!     }]
//! });
//!
//! let reports = formcheck::aggregate(&config);
//! assert_eq!(reports.len(), 1);
//!
//! let text = reports[0].to_string();
//! assert!(text.contains("with [widget type] = 'text'"));
//! assert!(text.contains("'0': must NOT have additional properties\n"));
//! assert!(!text.contains("widgetNumber"));
//! ```

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod interop;
pub mod path;
pub mod registry;
pub mod remote;
pub mod schema;

pub use config::{
    config_schema, Align, Comparison, ComparisonFamily, ConfigDocument, DiscriminantKind,
    InequalityComparison, Layout, Page, RangeComparison, Widget, WidgetKind, WidgetValidation,
};
pub use context::{RegistryAccess, ValidationContext};
pub use diagnostics::{
    aggregate, aggregate_violations, classify, parse_branch, resolve, validate,
    BranchDescriptor, BranchName, ConfigValidator, ResolvedLocation,
};
pub use document::{SchemaDocument, SCHEMA_DIALECT};
pub use error::{ConfigError, Keyword, ReportedError, Violation, ViolationParams, Violations};
pub use interop::ToJsonSchema;
pub use path::{JsonPath, PathSegment, SchemaPath};
pub use registry::{RegistryError, SchemaRegistry};
pub use remote::{
    failure_message, is_failed, team_name, EventApiConfig, EventData, EventDataStore,
    EventSource, FetchError,
};
pub use schema::{
    ArraySchema, BooleanSchema, CombinatorSchema, NumberSchema, ObjectSchema, RefSchema, Schema,
    SchemaLike, StringSchema,
};

//! Config diagnostics.
//!
//! A schema pass over a config document yields violations for every branch
//! of every discriminated union, most of which describe variants the
//! offending object does not use. This module locates each violation in the
//! document, drops the branches that do not apply, and groups what is left
//! into one [`ReportedError`](crate::ReportedError) per offending instance.
//!
//! ```rust
//! use serde_json::json;
//!
//! let reports = formcheck::aggregate(&json!({
//!     "pages": [{"name": "Auto", "widgets": [
//!         {"type": "number", "name": "Cones", "validation": {"comparison": "inRange", "value": 7}}
//!     ]}]
//! }));
//!
//! let value = reports
//!     .iter()
//!     .find(|report| report.header().starts_with("In /pages/0/widgets/0/validation/value "))
//!     .unwrap();
//!
//! assert_eq!(
//!     value.to_string(),
//!     "In /pages/0/widgets/0/validation/value (in Auto > Cones):\n    \
//!      with [validation type] = 'range' (from #/$defs/validationRange/properties/value/type):\n        \
//!      'value': must be array"
//! );
//! ```

mod aggregate;
mod classify;
mod locate;

pub use aggregate::{aggregate, aggregate_violations, shared, validate, ConfigValidator};
pub use classify::{classify, parse_branch, BranchDescriptor, BranchName};
pub use locate::{resolve, ResolvedLocation, ROOT_LABEL};

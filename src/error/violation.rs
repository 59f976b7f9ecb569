//! Raw schema violations.
//!
//! This module provides [`Violation`] for a single failed constraint and
//! [`Violations`] for accumulating every failure of a schema pass.

use std::fmt::{self, Display};

use serde_json::Value;
use stillwater::prelude::*;

use crate::path::{JsonPath, SchemaPath};

/// The kind of constraint that was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Type,
    Required,
    AdditionalProperties,
    Const,
    Enum,
    Minimum,
    Maximum,
    MinItems,
    MaxItems,
    MinLength,
    AnyOf,
    Ref,
}

impl Keyword {
    /// Returns the JSON Schema keyword name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Type => "type",
            Keyword::Required => "required",
            Keyword::AdditionalProperties => "additionalProperties",
            Keyword::Const => "const",
            Keyword::Enum => "enum",
            Keyword::Minimum => "minimum",
            Keyword::Maximum => "maximum",
            Keyword::MinItems => "minItems",
            Keyword::MaxItems => "maxItems",
            Keyword::MinLength => "minLength",
            Keyword::AnyOf => "anyOf",
            Keyword::Ref => "$ref",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword-specific details of a violation.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationParams {
    None,
    /// The expected JSON type name.
    Type(&'static str),
    MissingProperty(String),
    AdditionalProperty(String),
    AllowedValue(Value),
    AllowedValues(Vec<Value>),
    /// A numeric bound with its comparison operator (`>=`, `<=`).
    Limit { comparison: &'static str, limit: f64 },
    /// A count bound (items or characters).
    Count(usize),
    Reference(String),
}

/// A single schema violation.
///
/// `instance_path` locates the offending value in the document and
/// `schema_path` the constraint in the schema, ending in the keyword.
///
/// # Example
///
/// ```rust
/// use formcheck::{JsonPath, Keyword, SchemaPath, Violation, ViolationParams};
///
/// let violation = Violation::new(
///     JsonPath::parse("/pages/0/widgets/0"),
///     SchemaPath::definition("widgetText").push("required"),
///     Keyword::Required,
///     "must have required property 'name'",
/// )
/// .with_params(ViolationParams::MissingProperty("name".to_string()));
///
/// assert_eq!(violation.schema_path.to_string(), "#/$defs/widgetText/required");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub instance_path: JsonPath,
    pub schema_path: SchemaPath,
    pub keyword: Keyword,
    pub message: String,
    pub params: ViolationParams,
}

impl Violation {
    /// Creates a violation without params.
    pub fn new(
        instance_path: JsonPath,
        schema_path: SchemaPath,
        keyword: Keyword,
        message: impl Into<String>,
    ) -> Self {
        Self {
            instance_path,
            schema_path,
            keyword,
            message: message.into(),
            params: ViolationParams::None,
        }
    }

    /// Sets the params and returns self for chaining.
    pub fn with_params(mut self, params: ViolationParams) -> Self {
        self.params = params;
        self
    }

    /// Formats the violation as a single report line.
    ///
    /// The line names the last segment of the instance path (or `[root]`)
    /// and the message, followed by the allowed value(s) for `const` and
    /// `enum` violations.
    pub fn detail(&self) -> String {
        let instance = self
            .instance_path
            .last()
            .map(|segment| segment.to_string())
            .unwrap_or_else(|| "[root]".to_string());

        let mut line = format!("'{}': {}", instance, self.message);

        match (&self.keyword, &self.params) {
            (Keyword::Const, ViolationParams::AllowedValue(value)) => {
                line.push_str(&format!(": {}", display_value(value)));
            }
            (Keyword::Enum, ViolationParams::AllowedValues(values)) => {
                let joined: Vec<String> = values.iter().map(display_value).collect();
                line.push_str(&format!(": {}", joined.join(", ")));
            }
            _ => {}
        }

        line
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.instance_path, self.schema_path, self.message
        )
    }
}

/// Renders a JSON value the way report lines print it: strings raw, everything else as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Violation>();
    assert_sync::<Violation>();
};

/// A non-empty collection of violations.
///
/// `Violations` wraps a `NonEmptyVec<Violation>` so that it can serve as the
/// failure side of `Validation<T, Violations>`, and implements `Semigroup`
/// so that failures from sibling constraints can be combined.
///
/// ```rust
/// use formcheck::{JsonPath, Keyword, SchemaPath, Violation, Violations};
/// use stillwater::prelude::*;
///
/// let a = Violations::single(Violation::new(
///     JsonPath::root(), SchemaPath::root().push("required"), Keyword::Required, "a",
/// ));
/// let b = Violations::single(Violation::new(
///     JsonPath::root(), SchemaPath::root().push("type"), Keyword::Type, "b",
/// ));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Violations(NonEmptyVec<Violation>);

impl Violations {
    /// Creates a collection holding a single violation.
    pub fn single(violation: Violation) -> Self {
        Self(NonEmptyVec::singleton(violation))
    }

    /// Creates a collection from a vec, or `None` if the vec is empty.
    pub fn from_vec(violations: Vec<Violation>) -> Option<Self> {
        let mut iter = violations.into_iter();
        let head = NonEmptyVec::singleton(iter.next()?);
        let collected = iter.fold(head, |acc, v| acc.combine(NonEmptyVec::singleton(v)));
        Some(Self(collected))
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the violations.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Returns the first violation.
    pub fn first(&self) -> &Violation {
        self.0.head()
    }

    /// Converts this collection into a `Vec<Violation>`.
    pub fn into_vec(self) -> Vec<Violation> {
        self.0.into_vec()
    }
}

impl Semigroup for Violations {
    fn combine(self, other: Self) -> Self {
        Violations(self.0.combine(other.0))
    }
}

impl Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} schema violation(s):", self.len())?;
        for (i, violation) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

//! Discriminant tables.
//!
//! Closed lookups for the two discriminated unions in a config document:
//! widgets (keyed by `type`) and validations (keyed by `comparison`).
//! Comparison names map to their predicates, and each [`DiscriminantKind`]
//! knows how to read its discriminant from a resolved location and whether
//! a schema variant accepts it.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::diagnostics::ResolvedLocation;

/// A comparison against a single numeric bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InequalityComparison {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
}

impl InequalityComparison {
    pub const ALL: [InequalityComparison; 5] = [
        InequalityComparison::Less,
        InequalityComparison::LessOrEqual,
        InequalityComparison::Greater,
        InequalityComparison::GreaterOrEqual,
        InequalityComparison::Equal,
    ];

    /// Returns the config name of the comparison.
    pub fn name(&self) -> &'static str {
        match self {
            InequalityComparison::Less => "less",
            InequalityComparison::LessOrEqual => "lessOrEqual",
            InequalityComparison::Greater => "greater",
            InequalityComparison::GreaterOrEqual => "greaterOrEqual",
            InequalityComparison::Equal => "equal",
        }
    }

    /// Looks a comparison up by its exact config name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Tests `observed` against `bound`.
    pub fn test(&self, observed: f64, bound: f64) -> bool {
        match self {
            InequalityComparison::Less => observed < bound,
            InequalityComparison::LessOrEqual => observed <= bound,
            InequalityComparison::Greater => observed > bound,
            InequalityComparison::GreaterOrEqual => observed >= bound,
            InequalityComparison::Equal => observed == bound,
        }
    }
}

/// A comparison against a two-element range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeComparison {
    InRange,
    OutOfRange,
}

impl RangeComparison {
    pub const ALL: [RangeComparison; 2] = [RangeComparison::InRange, RangeComparison::OutOfRange];

    /// Returns the config name of the comparison.
    pub fn name(&self) -> &'static str {
        match self {
            RangeComparison::InRange => "inRange",
            RangeComparison::OutOfRange => "outOfRange",
        }
    }

    /// Looks a comparison up by its exact config name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Tests `observed` against `bounds`; the bounds may come in either order.
    pub fn test(&self, observed: f64, bounds: [f64; 2]) -> bool {
        let low = bounds[0].min(bounds[1]);
        let high = bounds[0].max(bounds[1]);
        match self {
            RangeComparison::InRange => observed >= low && observed <= high,
            RangeComparison::OutOfRange => observed < low || observed > high,
        }
    }
}

/// The two families of comparisons, one schema branch each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonFamily {
    Inequality,
    Range,
}

impl ComparisonFamily {
    pub const ALL: [ComparisonFamily; 2] = [ComparisonFamily::Inequality, ComparisonFamily::Range];

    /// Returns the variant name used in schema definition names.
    pub fn name(&self) -> &'static str {
        match self {
            ComparisonFamily::Inequality => "inequality",
            ComparisonFamily::Range => "range",
        }
    }

    /// Returns the config names of every comparison in this family.
    pub fn comparison_names(&self) -> Vec<&'static str> {
        match self {
            ComparisonFamily::Inequality => InequalityComparison::ALL
                .iter()
                .map(InequalityComparison::name)
                .collect(),
            ComparisonFamily::Range => RangeComparison::ALL
                .iter()
                .map(RangeComparison::name)
                .collect(),
        }
    }
}

/// Any registered comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Inequality(InequalityComparison),
    Range(RangeComparison),
}

impl Comparison {
    /// Looks a comparison up in both tables by its exact config name.
    ///
    /// ```rust
    /// use formcheck::{Comparison, ComparisonFamily};
    ///
    /// let family = Comparison::from_name("inRange").map(|c| c.family());
    /// assert_eq!(family, Some(ComparisonFamily::Range));
    /// assert!(Comparison::from_name("inrange").is_none());
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        InequalityComparison::from_name(name)
            .map(Comparison::Inequality)
            .or_else(|| RangeComparison::from_name(name).map(Comparison::Range))
    }

    /// Returns the family this comparison belongs to.
    pub fn family(&self) -> ComparisonFamily {
        match self {
            Comparison::Inequality(_) => ComparisonFamily::Inequality,
            Comparison::Range(_) => ComparisonFamily::Range,
        }
    }

    /// Returns the config name of the comparison.
    pub fn name(&self) -> &'static str {
        match self {
            Comparison::Inequality(c) => c.name(),
            Comparison::Range(c) => c.name(),
        }
    }
}

/// The kinds of discriminated objects a schema branch can describe.
///
/// Each kind is also the prefix of its branch definitions in the schema
/// (`widgetText`, `validationRange`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscriminantKind {
    Widget,
    Validation,
}

impl DiscriminantKind {
    pub const ALL: [DiscriminantKind; 2] = [DiscriminantKind::Widget, DiscriminantKind::Validation];

    /// Returns the kind name, as used in definition names.
    pub fn name(&self) -> &'static str {
        match self {
            DiscriminantKind::Widget => "widget",
            DiscriminantKind::Validation => "validation",
        }
    }

    /// Looks a kind up by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Reads this kind's discriminant from a resolved location.
    ///
    /// Widgets are read from the containing widget (`type`), validations from
    /// the containing object (`comparison`).
    pub fn discriminant<'a>(&self, location: &ResolvedLocation<'a>) -> Option<&'a str> {
        let (holder, field) = match self {
            DiscriminantKind::Widget => (location.containing_widget, "type"),
            DiscriminantKind::Validation => (location.containing_object, "comparison"),
        };
        holder?.get(field)?.as_str()
    }

    /// Returns true if the schema variant `variant` applies to an object
    /// whose discriminant is `actual`.
    pub fn accepts(&self, variant: &str, actual: &str) -> bool {
        match self {
            DiscriminantKind::Widget => variant.eq_ignore_ascii_case(actual),
            DiscriminantKind::Validation => Comparison::from_name(actual)
                .is_some_and(|comparison| comparison.family().name() == variant),
        }
    }

    /// Builds the definition name of a variant branch (`widget` + `text` → `widgetText`).
    pub fn branch_name(&self, variant: &str) -> String {
        let mut chars = variant.chars();
        match chars.next() {
            Some(first) => format!(
                "{}{}{}",
                self.name(),
                first.to_ascii_uppercase(),
                chars.as_str()
            ),
            None => self.name().to_string(),
        }
    }
}

impl Display for DiscriminantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

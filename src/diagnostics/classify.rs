//! Matching schema branches against the discriminant they describe.
//!
//! Branch definitions are named `#/$defs/<kind><Variant>`, where `<kind>` is
//! a [`DiscriminantKind`] name and `<Variant>` the widget type or comparison
//! family the branch covers. [`parse_branch`] is the only place that reads
//! the convention.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::discriminant::DiscriminantKind;
use crate::diagnostics::ResolvedLocation;
use crate::path::SchemaPath;

/// The kind and variant named by a branch definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName {
    pub kind: DiscriminantKind,
    /// Lowercased variant name (`text`, `inequality`, ...).
    pub variant: String,
}

/// How a group of violations sharing a schema path should be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchDescriptor {
    pub description: String,
    /// The branch targets a variant other than the object's actual one.
    pub is_extraneous: bool,
}

fn branch_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let kinds: Vec<&str> = DiscriminantKind::ALL.iter().map(|kind| kind.name()).collect();
        let pattern = format!(r"(?i)#/\$defs/({})([a-z]+)", kinds.join("|"));
        Regex::new(&pattern).expect("branch name pattern is valid")
    })
}

/// Parses the kind and variant out of a rendered schema path.
///
/// Returns `None` for paths that do not name a variant branch, such as
/// `#/$defs/widget/allOf/1/anyOf` or `#/properties/pages/type`.
///
/// ```rust
/// use formcheck::{parse_branch, DiscriminantKind};
///
/// let branch = parse_branch("#/$defs/widgetNumber/additionalProperties").unwrap();
/// assert_eq!(branch.kind, DiscriminantKind::Widget);
/// assert_eq!(branch.variant, "number");
///
/// assert!(parse_branch("#/$defs/page/required").is_none());
/// ```
pub fn parse_branch(schema_path: &str) -> Option<BranchName> {
    let captures = branch_pattern().captures(schema_path)?;
    let kind = DiscriminantKind::from_name(captures.get(1)?.as_str())?;
    let variant = captures.get(2)?.as_str().to_ascii_lowercase();
    Some(BranchName { kind, variant })
}

/// Describes the branch at `schema_path` and decides whether it applies to
/// the object at `location`.
///
/// A branch is extraneous only when it names a variant and the object's
/// actual discriminant is missing or belongs to a different variant. Paths
/// without a recognizable variant are always kept.
pub fn classify(schema_path: &SchemaPath, location: &ResolvedLocation<'_>) -> BranchDescriptor {
    let rendered = schema_path.to_string();

    match parse_branch(&rendered) {
        Some(branch) => {
            let is_extraneous = !branch
                .kind
                .discriminant(location)
                .is_some_and(|actual| branch.kind.accepts(&branch.variant, actual));

            BranchDescriptor {
                description: format!(
                    "with [{} type] = '{}' (from {}):",
                    branch.kind, branch.variant, rendered
                ),
                is_extraneous,
            }
        }
        None => BranchDescriptor {
            description: format!("from {}:", rendered),
            is_extraneous: false,
        },
    }
}

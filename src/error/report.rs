//! Human-readable config validation reports.

use std::fmt::{self, Display};

/// Spaces per indentation level of a sub-entry.
const INDENT_WIDTH: usize = 4;

/// A config validation failure, built as a header plus indented detail lines.
///
/// One `ReportedError` is produced per offending location in a config
/// document. It is returned as data, never raised.
///
/// # Example
///
/// ```rust
/// use formcheck::ReportedError;
///
/// let mut error = ReportedError::new("In /pages/0 (in Auto):");
/// assert!(!error.has_entries());
///
/// error.add_sub_entry("from #/$defs/page/required:", 1);
/// error.add_sub_entry("'0': must have required property 'widgets'", 2);
///
/// assert_eq!(
///     error.to_string(),
///     "In /pages/0 (in Auto):\n    from #/$defs/page/required:\n        '0': must have required property 'widgets'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedError {
    header: String,
    sub_entries: Vec<String>,
}

impl ReportedError {
    /// Creates a report with the given header and no sub-entries.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            sub_entries: Vec::new(),
        }
    }

    /// Appends a line indented by `level` steps.
    pub fn add_sub_entry(&mut self, entry: impl AsRef<str>, level: usize) {
        let line = format!("{}{}", " ".repeat(level * INDENT_WIDTH), entry.as_ref());
        self.sub_entries.push(line);
    }

    /// Returns true if at least one sub-entry was added.
    pub fn has_entries(&self) -> bool {
        !self.sub_entries.is_empty()
    }

    /// Returns the header line.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Returns the indented sub-entry lines in insertion order.
    pub fn sub_entries(&self) -> &[String] {
        &self.sub_entries
    }
}

impl Display for ReportedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        for entry in &self.sub_entries {
            write!(f, "\n{}", entry)?;
        }
        Ok(())
    }
}

impl std::error::Error for ReportedError {}

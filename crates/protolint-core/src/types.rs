//! Core types for lint problems and per-file responses.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};

use crate::descriptor::{Element, ElementKind};

/// Severity category of a problem.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Should be addressed; the process default.
    #[default]
    Warning,
    /// Must be fixed.
    Error,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source location of a problem (1-indexed lines and columns).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Path of the `.proto` file.
    pub file: String,
    /// Start line.
    pub start_line: usize,
    /// Start column.
    pub start_column: usize,
    /// End line.
    pub end_line: usize,
    /// End column (inclusive).
    pub end_column: usize,
}

impl Location {
    /// Creates a single-position location.
    #[must_use]
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            start_line: line,
            start_column: column,
            end_line: line,
            end_column: column,
        }
    }

    /// Sets the end position.
    #[must_use]
    pub fn with_end(mut self, line: usize, column: usize) -> Self {
        self.end_line = line;
        self.end_column = column;
        self
    }

    /// Converts a raw protobuf source span into a location.
    ///
    /// Spans are 0-indexed `[line, col, end_col]` or
    /// `[line, col, end_line, end_col]`, with an exclusive end column. A
    /// two-number span only carries a start; anything else maps to 1:1.
    #[must_use]
    pub fn from_span(file: &str, span: &[i32]) -> Self {
        let n = |v: i32| usize::try_from(v).unwrap_or(0);
        match *span {
            [line, col, end_line, end_col] => {
                Self::new(file, n(line) + 1, n(col) + 1).with_end(n(end_line) + 1, n(end_col))
            }
            [line, col, end_col] => {
                Self::new(file, n(line) + 1, n(col) + 1).with_end(n(line) + 1, n(end_col))
            }
            [line, col] => Self::new(file, n(line) + 1, n(col) + 1),
            _ => Self::new(file, 1, 1),
        }
    }
}

/// Owned reference to the element a problem was reported against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DescriptorRef {
    /// Element kind.
    pub kind: ElementKind,
    /// Fully qualified name (the file path for files).
    pub full_name: String,
    /// Source-code-info path within the file.
    pub path: Vec<i32>,
}

impl From<&Element<'_>> for DescriptorRef {
    fn from(element: &Element<'_>) -> Self {
        Self {
            kind: element.kind(),
            full_name: element.full_name().to_string(),
            path: element.path().to_vec(),
        }
    }
}

impl std::fmt::Display for DescriptorRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} `{}`", self.kind, self.full_name)
    }
}

/// A lint problem.
///
/// Rules create problems with [`Problem::new`]; the runtime stamps the rule
/// name, category and any missing location or documentation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Name of the rule that reported this problem.
    pub rule: String,
    /// Resolved severity.
    pub category: Category,
    /// Human-readable message.
    pub message: String,
    /// Suggested replacement text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// The offending element.
    pub descriptor: DescriptorRef,
    /// Location of the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Link to the rule's documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl Problem {
    /// Creates a problem against an element.
    #[must_use]
    pub fn new(element: &Element<'_>, message: impl Into<String>) -> Self {
        Self {
            rule: String::new(),
            category: Category::default(),
            message: message.into(),
            suggestion: None,
            descriptor: DescriptorRef::from(element),
            location: None,
            uri: None,
        }
    }

    /// Adds a suggested replacement.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Overrides the location derived from the element.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Adds a documentation link.
    #[must_use]
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Formats the problem for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = match &self.location {
            Some(loc) => format!(
                "{} at {}:{}:{}\n",
                self.rule, loc.file, loc.start_line, loc.start_column
            ),
            None => format!("{} at {}\n", self.rule, self.descriptor),
        };
        let _ = writeln!(output, "  {}: {}", self.category, self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: replace with `{suggestion}`");
        }
        if let Some(uri) = &self.uri {
            let _ = writeln!(output, "  = see: {uri}");
        }
        output
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "{}:{}:{}: ", loc.file, loc.start_line, loc.start_column)?;
        }
        write!(f, "{} [{}] {}", self.category, self.rule, self.message)?;
        if let Some(uri) = &self.uri {
            write!(f, " (see: {uri})")?;
        }
        Ok(())
    }
}

/// A rule check that panicked while processing an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error, Diagnostic)]
#[error("rule `{rule}` failed on {element}: {message}")]
#[diagnostic(code(protolint::runtime::rule_execution))]
pub struct RuleExecutionError {
    /// Name of the failing rule.
    pub rule: String,
    /// The element being checked.
    pub element: DescriptorRef,
    /// Panic payload.
    pub message: String,
}

/// All problems found in one file, in visitation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Path of the linted file.
    pub file_path: String,
    /// Problems in (element, rule) visitation order.
    pub problems: Vec<Problem>,
    /// Rule failures; processing of the file stopped at the first one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<RuleExecutionError>,
}

impl Response {
    /// Creates an empty response for a file.
    #[must_use]
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    /// Returns true if any problem has the error category.
    ///
    /// Rule failures are in [`Response::errors`] and are not counted here.
    #[must_use]
    pub fn has_error_problems(&self) -> bool {
        self.problems.iter().any(|p| p.category == Category::Error)
    }

    /// Counts problems by category as `(errors, warnings)`.
    #[must_use]
    pub fn count_by_category(&self) -> (usize, usize) {
        let errors = self
            .problems
            .iter()
            .filter(|p| p.category == Category::Error)
            .count();
        (errors, self.problems.len() - errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_problem(category: Category) -> Problem {
        Problem {
            rule: "core::naming::lower_snake".to_string(),
            category,
            message: "field names must be lower_snake_case".to_string(),
            suggestion: None,
            descriptor: DescriptorRef {
                kind: ElementKind::Field,
                full_name: "acme.T.badName".to_string(),
                path: vec![4, 0, 2, 0],
            },
            location: Some(Location::new("acme.proto", 3, 10)),
            uri: None,
        }
    }

    #[test]
    fn span_with_four_numbers_has_explicit_end() {
        let loc = Location::from_span("a.proto", &[4, 2, 6, 3]);
        assert_eq!((loc.start_line, loc.start_column), (5, 3));
        assert_eq!((loc.end_line, loc.end_column), (7, 3));
    }

    #[test]
    fn span_with_three_numbers_ends_on_start_line() {
        let loc = Location::from_span("a.proto", &[4, 2, 20]);
        assert_eq!((loc.start_line, loc.start_column), (5, 3));
        assert_eq!((loc.end_line, loc.end_column), (5, 20));
    }

    #[test]
    fn span_with_two_numbers_is_start_only() {
        let loc = Location::from_span("a.proto", &[0, 0]);
        assert_eq!(loc, Location::new("a.proto", 1, 1));
        assert_eq!(Location::from_span("a.proto", &[]), Location::new("a.proto", 1, 1));
    }

    #[test]
    fn category_defaults_to_warning_and_parses_lowercase() {
        assert_eq!(Category::default(), Category::Warning);
        let parsed: Category = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(parsed, Category::Error);
        assert!(serde_json::from_str::<Category>("\"fatal\"").is_err());
    }

    #[test]
    fn problem_display_includes_uri() {
        let p = make_problem(Category::Warning).with_uri("https://linter.aip.dev/naming");
        let display = p.to_string();
        assert!(display.starts_with("acme.proto:3:10: warning"));
        assert!(display.contains("(see: https://linter.aip.dev/naming)"));
    }

    #[test]
    fn problem_format_includes_suggestion() {
        let p = make_problem(Category::Error).with_suggestion("bad_name");
        let formatted = p.format();
        assert!(formatted.contains("error: field names must be lower_snake_case"));
        assert!(formatted.contains("= help: replace with `bad_name`"));
        assert!(!formatted.contains("see:"));
    }

    #[test]
    fn response_counts_by_category() {
        let mut response = Response::new("acme.proto");
        response.problems.push(make_problem(Category::Error));
        response.problems.push(make_problem(Category::Warning));
        response.problems.push(make_problem(Category::Warning));
        assert!(response.has_error_problems());
        assert_eq!(response.count_by_category(), (1, 2));
    }
}

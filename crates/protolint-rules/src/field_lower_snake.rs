//! Rule requiring `lower_snake_case` field names.
//!
//! # Rationale
//!
//! Generated code in every language maps field names from `lower_snake_case`
//! to its own convention. Other spellings produce awkward accessors and
//! inconsistent JSON names.
//!
//! # Detected Patterns
//!
//! ```text
//! message Book {
//!   string displayName = 1;   // should be display_name
//! }
//! ```

use protolint_core::{Element, Problem, Rule, RuleKind};

use crate::case::{is_lower_snake, to_lower_snake};

/// Rule name for field-lower-snake.
pub const NAME: &str = "core::naming::lower_snake";

/// Documentation link.
pub const URI: &str = "https://protobuf.dev/programming-guides/style/";

/// Requires field names to be `lower_snake_case`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldLowerSnake;

impl FieldLowerSnake {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for FieldLowerSnake {
    fn name(&self) -> &str {
        NAME
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Field
    }

    fn description(&self) -> &str {
        "Field names must be lower_snake_case"
    }

    fn uri(&self) -> Option<&str> {
        Some(URI)
    }

    fn check(&self, element: &Element<'_>) -> Vec<Problem> {
        let Some(field) = element.as_field() else {
            return Vec::new();
        };
        let name = field.name();
        if is_lower_snake(name) {
            return Vec::new();
        }
        vec![
            Problem::new(element, format!("Field `{name}` should be lower_snake_case."))
                .with_suggestion(to_lower_snake(name)),
        ]
    }
}

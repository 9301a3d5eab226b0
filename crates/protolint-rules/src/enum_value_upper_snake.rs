//! Rule requiring `UPPER_SNAKE_CASE` enum value names.

use protolint_core::{Element, Problem, Rule, RuleKind};

use crate::case::{is_upper_snake, to_upper_snake};

/// Rule name for enum-value-upper-snake.
pub const NAME: &str = "core::naming::enum_value_upper_snake";

/// Documentation link.
pub const URI: &str = "https://protobuf.dev/programming-guides/style/";

/// Requires enum value names to be `UPPER_SNAKE_CASE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumValueUpperSnake;

impl EnumValueUpperSnake {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for EnumValueUpperSnake {
    fn name(&self) -> &str {
        NAME
    }

    fn kind(&self) -> RuleKind {
        RuleKind::EnumValue
    }

    fn description(&self) -> &str {
        "Enum value names must be UPPER_SNAKE_CASE"
    }

    fn uri(&self) -> Option<&str> {
        Some(URI)
    }

    fn check(&self, element: &Element<'_>) -> Vec<Problem> {
        let Some(value) = element.as_enum_value() else {
            return Vec::new();
        };
        let name = value.name();
        if is_upper_snake(name) {
            return Vec::new();
        }
        vec![
            Problem::new(element, format!("Enum value `{name}` should be UPPER_SNAKE_CASE."))
                .with_suggestion(to_upper_snake(name)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protolint_core::testing::{enum_proto, file_with};
    use protolint_core::SchemaFile;

    #[test]
    fn test_flags_only_mixed_case_values() {
        let mut proto = file_with("t.proto", "acme", vec![]);
        proto
            .enum_type
            .push(enum_proto("State", &["STATE_UNSPECIFIED", "activeState"]));
        let file = SchemaFile::new(proto);
        let state = file.enums().next().unwrap();

        let problems: Vec<Problem> = state
            .values()
            .flat_map(|v| EnumValueUpperSnake::new().check(&Element::EnumValue(v)))
            .collect();
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].descriptor.full_name, "acme.State.activeState");
        assert_eq!(problems[0].suggestion.as_deref(), Some("ACTIVE_STATE"));
    }
}

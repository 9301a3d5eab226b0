//! Rule requiring `UpperCamelCase` message names.
//!
//! Synthetic map-entry messages are never visited, so `map<K, V>` fields
//! do not trigger this rule.

use protolint_core::{Element, Problem, Rule, RuleKind};

use crate::case::{is_upper_camel, to_upper_camel};

/// Rule name for message-upper-camel.
pub const NAME: &str = "core::naming::upper_camel";

/// Documentation link.
pub const URI: &str = "https://protobuf.dev/programming-guides/style/";

/// Requires message names to be `UpperCamelCase`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageUpperCamel;

impl MessageUpperCamel {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MessageUpperCamel {
    fn name(&self) -> &str {
        NAME
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Message
    }

    fn description(&self) -> &str {
        "Message names must be UpperCamelCase"
    }

    fn uri(&self) -> Option<&str> {
        Some(URI)
    }

    fn check(&self, element: &Element<'_>) -> Vec<Problem> {
        let Some(message) = element.as_message() else {
            return Vec::new();
        };
        let name = message.name();
        if is_upper_camel(name) {
            return Vec::new();
        }
        vec![
            Problem::new(element, format!("Message `{name}` should be UpperCamelCase."))
                .with_suggestion(to_upper_camel(name)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protolint_core::testing::{file_with, message};
    use protolint_core::SchemaFile;

    fn check_message(name: &str) -> Vec<Problem> {
        let file = SchemaFile::new(file_with("t.proto", "", vec![message(name, vec![])]));
        let m = file.messages().next().unwrap();
        MessageUpperCamel::new().check(&Element::Message(m))
    }

    #[test]
    fn test_detects_snake_case_message() {
        let problems = check_message("book_shelf");
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].suggestion.as_deref(), Some("BookShelf"));
    }

    #[test]
    fn test_allows_upper_camel_message() {
        assert!(check_message("BookShelf").is_empty());
    }
}

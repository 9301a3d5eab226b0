//! Rule requiring `UpperCamelCase` RPC method names.
//!
//! # Detected Patterns
//!
//! ```text
//! service Library {
//!   rpc get_book(GetBookRequest) returns (Book);   // should be GetBook
//! }
//! ```

use protolint_core::{Element, Problem, Rule, RuleKind};

use crate::case::{is_upper_camel, to_upper_camel};

/// Rule name for method-upper-camel.
pub const NAME: &str = "core::naming::method_upper_camel";

/// Documentation link.
pub const URI: &str = "https://protobuf.dev/programming-guides/style/";

/// Requires RPC method names to be `UpperCamelCase`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodUpperCamel;

impl MethodUpperCamel {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MethodUpperCamel {
    fn name(&self) -> &str {
        NAME
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Method
    }

    fn description(&self) -> &str {
        "RPC method names must be UpperCamelCase"
    }

    fn uri(&self) -> Option<&str> {
        Some(URI)
    }

    fn check(&self, element: &Element<'_>) -> Vec<Problem> {
        let Some(method) = element.as_method() else {
            return Vec::new();
        };
        let name = method.name();
        if is_upper_camel(name) {
            return Vec::new();
        }
        vec![
            Problem::new(element, format!("Method `{name}` should be UpperCamelCase."))
                .with_suggestion(to_upper_camel(name)),
        ]
    }
}

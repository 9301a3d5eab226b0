//! The built-in rule catalog.

use protolint_core::{RegistryError, RuleBox, RuleRegistry};
use tracing::debug;

use crate::{EnumValueUpperSnake, FieldLowerSnake, MessageUpperCamel, MethodUpperCamel};

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(FieldLowerSnake::new()),
        Box::new(MessageUpperCamel::new()),
        Box::new(EnumValueUpperSnake::new()),
        Box::new(MethodUpperCamel::new()),
    ]
}

/// Registers every built-in rule.
///
/// # Errors
///
/// Returns an error if a built-in name is already registered.
pub fn register_all(registry: &mut RuleRegistry) -> Result<(), RegistryError> {
    let rules = all_rules();
    debug!(count = rules.len(), "registering built-in rules");
    registry.register_all(rules)
}

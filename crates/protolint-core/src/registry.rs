//! Append-only catalog of registered rules.

use std::collections::HashMap;

use tracing::debug;

use crate::rule::{Rule, RuleBox};
use crate::rule_name::{NameError, RuleName};

/// Registration failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum RegistryError {
    /// A rule with the same name is already registered.
    #[error("rule `{name}` is already registered")]
    #[diagnostic(code(protolint::registry::duplicate_name))]
    DuplicateName {
        /// The duplicated name.
        name: String,
    },

    /// The name is malformed or differs only in case from a registered name.
    #[error("invalid rule name `{name}`: {reason}")]
    #[diagnostic(code(protolint::registry::invalid_name))]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// A rule together with its validated name.
pub struct RegisteredRule {
    name: RuleName,
    rule: RuleBox,
}

impl RegisteredRule {
    /// Returns the validated name.
    #[must_use]
    pub fn name(&self) -> &RuleName {
        &self.name
    }

    /// Returns the rule.
    #[must_use]
    pub fn rule(&self) -> &dyn Rule {
        self.rule.as_ref()
    }
}

impl std::fmt::Debug for RegisteredRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredRule")
            .field("name", &self.name)
            .field("kind", &self.rule.kind())
            .finish()
    }
}

/// The rule catalog passed to the runtime.
///
/// Rules keep their registration order, which is also the order they run in.
/// There is no way to remove a rule.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<RegisteredRule>,
    by_folded_name: HashMap<String, usize>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken and
    /// [`RegistryError::InvalidName`] if it is malformed or collides
    /// case-insensitively with a registered name.
    pub fn register<R: Rule + 'static>(&mut self, rule: R) -> Result<(), RegistryError> {
        self.register_box(Box::new(rule))
    }

    /// Registers a boxed rule.
    ///
    /// # Errors
    ///
    /// See [`RuleRegistry::register`].
    pub fn register_box(&mut self, rule: RuleBox) -> Result<(), RegistryError> {
        let raw = rule.name();
        let name = RuleName::new(raw).map_err(|e: NameError| RegistryError::InvalidName {
            name: raw.to_string(),
            reason: e.to_string(),
        })?;

        let folded = name.as_str().to_ascii_lowercase();
        if let Some(&existing) = self.by_folded_name.get(&folded) {
            let existing = &self.rules[existing].name;
            if existing == &name {
                return Err(RegistryError::DuplicateName {
                    name: name.to_string(),
                });
            }
            return Err(RegistryError::InvalidName {
                name: name.to_string(),
                reason: format!("differs only in case from registered rule `{existing}`"),
            });
        }

        debug!(rule = %name, kind = %rule.kind(), "registered rule");
        self.by_folded_name.insert(folded, self.rules.len());
        self.rules.push(RegisteredRule { name, rule });
        Ok(())
    }

    /// Registers every rule, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// See [`RuleRegistry::register`].
    pub fn register_all<I>(&mut self, rules: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = RuleBox>,
    {
        rules.into_iter().try_for_each(|r| self.register_box(r))
    }

    /// All rules in registration order.
    pub fn all(&self) -> impl Iterator<Item = &RegisteredRule> {
        self.rules.iter()
    }

    /// Rules whose name equals or is namespaced under `prefix`.
    #[must_use]
    pub fn lookup(&self, prefix: &str) -> Vec<&RegisteredRule> {
        self.rules
            .iter()
            .filter(|r| r.name.has_prefix(prefix))
            .collect()
    }

    /// The rule with exactly this name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredRule> {
        self.by_folded_name
            .get(&name.to_ascii_lowercase())
            .map(|&i| &self.rules[i])
            .filter(|r| r.name.as_str() == name)
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

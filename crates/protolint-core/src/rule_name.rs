//! Hierarchical rule names.
//!
//! Names are `::` separated, least specific segment first:
//! ```text
//! core::0135::http-body
//! ```
//!
//! Any name is also a namespace prefix that matches itself and every name
//! that continues past a `::` boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between rule name segments.
pub const SEPARATOR: &str = "::";

/// A validated, immutable rule name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleName(String);

impl RuleName {
    /// Creates a new rule name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, has an empty segment, or a
    /// segment contains characters other than ASCII alphanumerics, `_` and `-`.
    pub fn new(name: impl Into<String>) -> Result<Self, NameError> {
        let name = name.into();
        validate(&name)?;
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the segments of this name.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    /// Returns true if `prefix` is this name or a namespace enclosing it.
    ///
    /// The empty prefix matches every name.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        has_prefix(&self.0, prefix)
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RuleName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RuleName> for String {
    fn from(name: RuleName) -> Self {
        name.0
    }
}

/// Namespace prefix test on raw strings.
///
/// `prefix` matches `name` when it is empty, equal to `name`, or followed in
/// `name` by a segment separator.
#[must_use]
pub fn has_prefix(name: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    match name.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with(SEPARATOR),
        None => false,
    }
}

/// Validates a namespace prefix; the empty prefix is allowed.
///
/// # Errors
///
/// Returns an error if a non-empty prefix is not a valid rule name.
pub fn validate_prefix(prefix: &str) -> Result<(), NameError> {
    if prefix.is_empty() {
        Ok(())
    } else {
        validate(prefix)
    }
}

fn validate(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    for segment in name.split(SEPARATOR) {
        if segment.is_empty() {
            return Err(NameError::EmptySegment {
                name: name.to_string(),
            });
        }
        if let Some(c) = segment
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(NameError::InvalidCharacter {
                name: name.to_string(),
                character: c,
            });
        }
    }
    Ok(())
}

/// Reasons a rule name is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// The name is empty.
    #[error("rule name must not be empty")]
    Empty,

    /// The name has an empty segment (e.g. `core::::x` or a trailing `::`).
    #[error("rule name `{name}` contains an empty segment")]
    EmptySegment {
        /// The rejected name.
        name: String,
    },

    /// A segment contains a disallowed character.
    #[error("rule name `{name}` contains invalid character `{character}`")]
    InvalidCharacter {
        /// The rejected name.
        name: String,
        /// The first offending character.
        character: char,
    },
}

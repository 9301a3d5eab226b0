//! Layered runtime configuration.
//!
//! Configuration files are an ordered array of layers:
//!
//! ```yaml
//! - included_paths: ["google/**/*.proto"]
//!   excluded_paths: ["google/legacy/**"]
//!   rule_configs:
//!     "": { status: disabled }
//!     core::0135: { status: enabled, category: error }
//! ```
//!
//! JSON and YAML parse through the same DTO layer ([`dto`]) and are
//! validated into [`RuntimeConfigs`] by [`loader`]. Later layers take
//! precedence over earlier ones.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::rule_name::{has_prefix, NameError};
use crate::types::Category;

pub mod dto;
pub mod loader;

/// Whether a rule is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The rule runs.
    Enabled,
    /// The rule is skipped.
    Disabled,
}

/// Settings for one rule-name prefix. Unset values leave earlier results intact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleConfig {
    /// Enabled or disabled.
    pub status: Option<Status>,
    /// Severity override.
    pub category: Option<Category>,
}

impl RuleConfig {
    /// An enabling config.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            status: Some(Status::Enabled),
            category: None,
        }
    }

    /// A disabling config.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            status: Some(Status::Disabled),
            category: None,
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

const SEGMENT_MATCH: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A validated glob pattern for file path matching.
///
/// The glob is compiled once at construction and reused for all match calls.
/// `*` stays within one path segment; `**` crosses directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobPattern {
    raw: String,
    compiled: glob::Pattern,
}

impl GlobPattern {
    /// Creates a new glob pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty or has invalid glob syntax.
    pub fn new(pattern: &str) -> Result<Self, String> {
        if pattern.is_empty() {
            return Err("glob pattern must not be empty".to_string());
        }
        let compiled = glob::Pattern::new(pattern).map_err(|e| e.to_string())?;
        Ok(Self {
            raw: pattern.to_string(),
            compiled,
        })
    }

    /// Tests whether a file path matches this pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        if self.compiled.matches_with(path, SEGMENT_MATCH) {
            return true;
        }
        // `dir/**` should also match everything below `dir` when the glob
        // crate disagrees on the trailing separator.
        if let Some(prefix) = self.raw.strip_suffix("/**") {
            let normalized = prefix.trim_end_matches('/');
            return path.starts_with(normalized)
                && path.as_bytes().get(normalized.len()) == Some(&b'/');
        }
        false
    }

    /// Returns the pattern as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// One configuration layer.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Files this layer applies to; empty means every file.
    pub included_paths: Vec<GlobPattern>,
    /// Files this layer never applies to.
    pub excluded_paths: Vec<GlobPattern>,
    /// Settings keyed by rule-name prefix; `""` matches every rule.
    pub rule_configs: BTreeMap<String, RuleConfig>,
}

impl RuntimeConfig {
    /// Creates an empty layer that applies to every file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule config for a prefix.
    #[must_use]
    pub fn rule(mut self, prefix: impl Into<String>, config: RuleConfig) -> Self {
        self.rule_configs.insert(prefix.into(), config);
        self
    }

    /// Returns true if this layer applies to `path`.
    #[must_use]
    pub fn applies_to(&self, path: &str) -> bool {
        let included = self.included_paths.is_empty()
            || self.included_paths.iter().any(|p| p.matches(path));
        included && !self.excluded_paths.iter().any(|p| p.matches(path))
    }

    /// Returns the longest key that is a namespace prefix of `rule_name`.
    #[must_use]
    pub fn most_specific(&self, rule_name: &str) -> Option<(&str, &RuleConfig)> {
        self.rule_configs
            .iter()
            .filter(|(prefix, _)| has_prefix(rule_name, prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(prefix, config)| (prefix.as_str(), config))
    }
}

/// Ordered configuration layers; later layers win.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfigs(Vec<RuntimeConfig>);

impl RuntimeConfigs {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a JSON or YAML file, chosen by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown
    /// extension, or fails to parse or validate.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::parse_json(&content),
            Some("yaml" | "yml") => Self::parse_yaml(&content),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or fails validation.
    pub fn parse_json(content: &str) -> Result<Self, ConfigError> {
        let dtos: Vec<dto::RuntimeConfigDto> = serde_json::from_str(content)?;
        loader::load(dtos)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or fails validation.
    pub fn parse_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty YAML document means no layers.
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        let dtos: Vec<dto::RuntimeConfigDto> = serde_yaml::from_str(content)?;
        loader::load(dtos)
    }

    /// Appends a layer with the highest precedence so far.
    pub fn push(&mut self, config: RuntimeConfig) {
        self.0.push(config);
    }

    /// Appends all layers of `other` after the existing ones.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Iterates over layers in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &RuntimeConfig> {
        self.0.iter()
    }

    /// Returns the number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<RuntimeConfig>> for RuntimeConfigs {
    fn from(configs: Vec<RuntimeConfig>) -> Self {
        Self(configs)
    }
}

impl FromIterator<RuntimeConfig> for RuntimeConfigs {
    fn from_iter<I: IntoIterator<Item = RuntimeConfig>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(protolint::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// JSON parse error.
    #[error("Failed to parse JSON config: {0}")]
    #[diagnostic(code(protolint::config::parse))]
    Json(#[from] serde_json::Error),

    /// YAML parse error.
    #[error("Failed to parse YAML config: {0}")]
    #[diagnostic(code(protolint::config::parse))]
    Yaml(#[from] serde_yaml::Error),

    /// The config file extension is not recognized.
    #[error("Unsupported config format: {path}")]
    #[diagnostic(
        code(protolint::config::format),
        help("use a .json, .yaml or .yml file")
    )]
    UnsupportedFormat {
        /// The offending path.
        path: PathBuf,
    },

    /// A glob in `included_paths` or `excluded_paths` is invalid.
    #[error("{context}: invalid glob `{pattern}`: {reason}")]
    #[diagnostic(code(protolint::config::glob))]
    InvalidGlob {
        /// Where the error occurred (e.g. `configs[0].included_paths[1]`).
        context: String,
        /// The invalid pattern.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A `rule_configs` key is not a valid rule-name prefix.
    #[error("{context}: invalid rule prefix `{prefix}`: {source}")]
    #[diagnostic(code(protolint::config::rule_prefix))]
    InvalidRulePrefix {
        /// Where the error occurred.
        context: String,
        /// The invalid key.
        prefix: String,
        /// The name validation failure.
        source: NameError,
    },

    /// A suppression comment in a schema file is malformed.
    #[error("{0}")]
    #[diagnostic(
        code(protolint::config::directive),
        help("directives look like `(-- api-linter: <rule-name>=disabled --)`")
    )]
    InvalidDirective(#[from] crate::directive::LocatedDirectiveError),
}

//! Serde deserialization types (DTO layer).
//!
//! These types exist solely for JSON/YAML deserialization.
//! They are converted to validated [`super::RuntimeConfig`]s by the loader.

use serde::Deserialize;
use std::collections::BTreeMap;

use super::Status;
use crate::types::Category;

/// Raw representation of one configuration layer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeConfigDto {
    /// Glob patterns of files the layer applies to.
    #[serde(default)]
    pub included_paths: Vec<String>,

    /// Glob patterns of files the layer skips.
    #[serde(default)]
    pub excluded_paths: Vec<String>,

    /// Rule settings keyed by rule-name prefix.
    #[serde(default)]
    pub rule_configs: BTreeMap<String, RuleConfigDto>,
}

/// Raw representation of one rule setting.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfigDto {
    /// `enabled` or `disabled`.
    #[serde(default)]
    pub status: Option<Status>,

    /// `error` or `warning`.
    #[serde(default)]
    pub category: Option<Category>,
}

//! Lint command implementation.

use anyhow::{bail, Context, Result};
use protolint_core::{
    read_descriptor_set, validate_prefix, Response, RuleConfig, RuleRegistry, Runtime,
    RuntimeConfig, SchemaFile,
};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::{config_resolver, OutputFormat};

/// Options collected from the command line.
#[derive(Debug, Clone)]
pub struct LintOptions {
    /// Serialized `FileDescriptorSet` inputs.
    pub descriptor_sets: Vec<PathBuf>,
    /// Files to lint; empty means every file in the sets.
    pub files: Vec<String>,
    /// Explicit config files, lowest precedence first.
    pub configs: Vec<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Rule prefixes to enable after all config files.
    pub enable_rules: Vec<String>,
    /// Rule prefixes to disable after all config files.
    pub disable_rules: Vec<String>,
    /// Ignore `(-- api-linter: ... --)` comments.
    pub ignore_comment_disables: bool,
    /// Fail when any problem is found.
    pub set_exit_status: bool,
    /// Lint files on the rayon pool.
    pub parallel: bool,
}

/// Runs the lint command.
///
/// Returns `true` when the process should exit with a failure status.
pub fn run(options: &LintOptions, project_dir: &Path, registry: &RuleRegistry) -> Result<bool> {
    let sources = config_resolver::resolve(project_dir, &options.configs);
    let mut configs = config_resolver::load(&sources)?;
    for layer in override_layers(&options.enable_rules, &options.disable_rules)? {
        configs.push(layer);
    }

    let files = select_files(load_files(&options.descriptor_sets)?, &options.files)?;

    tracing::info!(
        "Linting {} file(s) with {} rule(s) and {} config layer(s)",
        files.len(),
        registry.len(),
        configs.len()
    );

    let runtime = Runtime::builder(registry)
        .configs(configs)
        .ignore_comment_disables(options.ignore_comment_disables)
        .parallel(options.parallel)
        .build();
    let responses = runtime.run(&files).context("Lint run failed")?;

    super::output::print(&responses, options.format)?;

    Ok(should_fail(&responses, options.set_exit_status))
}

/// Reads every descriptor set; a file present in several sets is kept once.
fn load_files(sets: &[PathBuf]) -> Result<Vec<SchemaFile>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for set in sets {
        let loaded = read_descriptor_set(set)
            .with_context(|| format!("Failed to load descriptor set: {}", set.display()))?;
        tracing::debug!("Loaded {} file(s) from {}", loaded.len(), set.display());
        files.extend(
            loaded
                .into_iter()
                .filter(|f| seen.insert(f.name().to_string())),
        );
    }
    Ok(files)
}

/// Keeps the named files, in the order given.
fn select_files(files: Vec<SchemaFile>, names: &[String]) -> Result<Vec<SchemaFile>> {
    if names.is_empty() {
        return Ok(files);
    }
    let mut by_name: HashMap<String, SchemaFile> = files
        .into_iter()
        .map(|f| (f.name().to_string(), f))
        .collect();

    let mut selected = Vec::with_capacity(names.len());
    let mut requested = HashSet::new();
    for name in names.iter().filter(|n| requested.insert(n.as_str())) {
        let Some(file) = by_name.remove(name) else {
            bail!("{name} was not found in any descriptor set");
        };
        selected.push(file);
    }
    Ok(selected)
}

/// Builds the layers for `--enable-rule` and `--disable-rule`.
///
/// Disables come last so they win when both name the same prefix.
fn override_layers(enable: &[String], disable: &[String]) -> Result<Vec<RuntimeConfig>> {
    let build = |prefixes: &[String], flag: &str, config: RuleConfig| -> Result<Option<RuntimeConfig>> {
        if prefixes.is_empty() {
            return Ok(None);
        }
        let mut layer = RuntimeConfig::new();
        for prefix in prefixes {
            validate_prefix(prefix).with_context(|| format!("Invalid {flag} value `{prefix}`"))?;
            layer = layer.rule(prefix.clone(), config);
        }
        Ok(Some(layer))
    };

    Ok([
        build(enable, "--enable-rule", RuleConfig::enabled())?,
        build(disable, "--disable-rule", RuleConfig::disabled())?,
    ]
    .into_iter()
    .flatten()
    .collect())
}

/// Rule failures always fail the run; problems only with `--set-exit-status`.
fn should_fail(responses: &[Response], set_exit_status: bool) -> bool {
    responses.iter().any(|r| !r.errors.is_empty())
        || (set_exit_status && responses.iter().any(|r| !r.problems.is_empty()))
}

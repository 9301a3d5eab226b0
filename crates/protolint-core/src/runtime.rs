//! Orchestrates lint execution across files.

use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::config::{ConfigError, RuntimeConfigs};
use crate::descriptor::{Element, SchemaFile};
use crate::directive::FileDirectives;
use crate::enumerate::enumerate;
use crate::registry::{RegisteredRule, RuleRegistry};
use crate::resolver::Resolver;
use crate::types::{Category, DescriptorRef, Problem, Response, RuleExecutionError};

/// Errors that abort a whole run before any rule executes.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum RunError {
    /// Configuration, including in-source directives, is invalid.
    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Builder for configuring a [`Runtime`].
#[derive(Debug)]
pub struct RuntimeBuilder<'r> {
    registry: &'r RuleRegistry,
    configs: RuntimeConfigs,
    ignore_comment_disables: bool,
    parallel: bool,
}

impl<'r> RuntimeBuilder<'r> {
    /// Sets the configuration layers.
    #[must_use]
    pub fn configs(mut self, configs: RuntimeConfigs) -> Self {
        self.configs = configs;
        self
    }

    /// Sets whether suppression comments are ignored (default: false).
    #[must_use]
    pub fn ignore_comment_disables(mut self, ignore: bool) -> Self {
        self.ignore_comment_disables = ignore;
        self
    }

    /// Sets whether files are linted on the rayon pool (default: false).
    ///
    /// Responses are returned in input order either way.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builds the runtime.
    #[must_use]
    pub fn build(self) -> Runtime<'r> {
        Runtime {
            registry: self.registry,
            configs: self.configs,
            ignore_comment_disables: self.ignore_comment_disables,
            parallel: self.parallel,
        }
    }
}

/// Applies every registered rule to every element of the given files.
///
/// Use [`Runtime::builder()`] to construct an instance.
#[derive(Debug)]
pub struct Runtime<'r> {
    registry: &'r RuleRegistry,
    configs: RuntimeConfigs,
    ignore_comment_disables: bool,
    parallel: bool,
}

impl<'r> Runtime<'r> {
    /// Creates a new builder over a registry.
    #[must_use]
    pub fn builder(registry: &'r RuleRegistry) -> RuntimeBuilder<'r> {
        RuntimeBuilder {
            registry,
            configs: RuntimeConfigs::new(),
            ignore_comment_disables: false,
            parallel: false,
        }
    }

    /// Returns the configuration layers.
    #[must_use]
    pub fn configs(&self) -> &RuntimeConfigs {
        &self.configs
    }

    /// Lints every file and returns one response per file, in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if any file carries a malformed suppression
    /// directive; no rule has run at that point.
    pub fn run(&self, files: &[SchemaFile]) -> Result<Vec<Response>, RunError> {
        info!(
            files = files.len(),
            rules = self.registry.len(),
            layers = self.configs.len(),
            "Starting lint run"
        );

        let directives = self.collect_directives(files)?;

        let responses: Vec<Response> = if self.parallel {
            files
                .par_iter()
                .zip(directives.par_iter())
                .map(|(file, directives)| self.lint_file(file, directives))
                .collect()
        } else {
            files
                .iter()
                .zip(&directives)
                .map(|(file, directives)| self.lint_file(file, directives))
                .collect()
        };

        info!(
            problems = responses.iter().map(|r| r.problems.len()).sum::<usize>(),
            errors = responses.iter().map(|r| r.errors.len()).sum::<usize>(),
            "Lint run complete"
        );
        Ok(responses)
    }

    fn collect_directives(&self, files: &[SchemaFile]) -> Result<Vec<FileDirectives>, ConfigError> {
        if self.ignore_comment_disables {
            return Ok(files.iter().map(|_| FileDirectives::default()).collect());
        }
        files
            .iter()
            .map(|f| FileDirectives::collect(f).map_err(ConfigError::from))
            .collect()
    }

    /// Lints one file; a failing rule stops the file but keeps earlier problems.
    fn lint_file(&self, file: &SchemaFile, directives: &FileDirectives) -> Response {
        let path = file.name();
        debug!("Linting: {path}");

        let resolver =
            Resolver::new(&self.configs).ignore_comment_disables(self.ignore_comment_disables);
        let mut response = Response::new(path);

        'elements: for element in enumerate(file) {
            for registered in self.registry.all() {
                let rule = registered.rule();
                if !rule.kind().matches(element.kind()) {
                    continue;
                }
                let name = registered.name().as_str();

                let outcome = guarded(|| rule.applies_to(&element)).and_then(|applies| {
                    if !applies {
                        return Ok(None);
                    }
                    let resolution = resolver.resolve(path, name, &element, directives);
                    if !resolution.enabled {
                        trace!(rule = name, element = %element, "Skipping disabled rule");
                        return Ok(None);
                    }
                    guarded(|| rule.check(&element)).map(|p| Some((p, resolution.category)))
                });

                match outcome {
                    Ok(Some((problems, category))) => response.problems.extend(
                        problems
                            .into_iter()
                            .map(|p| stamp(p, registered, category, &element)),
                    ),
                    Ok(None) => {}
                    Err(message) => {
                        let error = RuleExecutionError {
                            rule: name.to_string(),
                            element: DescriptorRef::from(&element),
                            message,
                        };
                        warn!("{error}; skipping the rest of {path}");
                        response.errors.push(error);
                        break 'elements;
                    }
                }
            }
        }

        response
    }
}

/// Fills in the engine-owned fields of a problem.
fn stamp(
    mut problem: Problem,
    registered: &RegisteredRule,
    category: Category,
    element: &Element<'_>,
) -> Problem {
    problem.rule = registered.name().to_string();
    problem.category = category;
    if problem.location.is_none() {
        problem.location = Some(element.location());
    }
    if problem.uri.is_none() {
        problem.uri = registered.rule().uri().map(String::from);
    }
    problem
}

/// Runs rule code, turning a panic into its message.
fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

//! # protolint-core
//!
//! Rule engine for linting protobuf API definitions.
//!
//! This crate provides the foundational types for building protobuf API
//! linters. It includes:
//!
//! - [`SchemaFile`] and [`Element`] views over compiled descriptors
//! - [`enumerate`] for visiting every element of a file in a fixed order
//! - [`Rule`] trait and the closure-backed [`DescriptorRule`]
//! - [`RuleRegistry`] for collecting rules under hierarchical names
//! - [`RuntimeConfigs`] and [`Resolver`] for layered configuration and
//!   `(-- api-linter: ... --)` suppression comments
//! - [`Runtime`] for orchestrating lint execution
//!
//! ## Example
//!
//! ```ignore
//! use protolint_core::{read_descriptor_set, Runtime, RuleRegistry, RuntimeConfigs};
//!
//! let mut registry = RuleRegistry::new();
//! registry.register(MyRule::new())?;
//!
//! let files = read_descriptor_set("api.pb".as_ref())?;
//! let responses = Runtime::builder(&registry)
//!     .configs(RuntimeConfigs::from_file("protolint.yaml".as_ref())?)
//!     .build()
//!     .run(&files)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
mod descriptor;
mod directive;
mod enumerate;
mod registry;
mod resolver;
mod rule;
mod rule_name;
mod runtime;
mod types;

/// Descriptor builders for rule tests.
pub mod testing;

pub use config::{ConfigError, GlobPattern, RuleConfig, RuntimeConfig, RuntimeConfigs, Status};
pub use descriptor::{
    load_descriptor_set, read_descriptor_set, DescriptorError, Element, ElementKind,
    EnumDescriptor, EnumValueDescriptor, FieldDescriptor, MessageDescriptor, MethodDescriptor,
    SchemaFile, ServiceDescriptor, SourceInfo,
};
pub use directive::{
    parse_directives, Directive, DirectiveError, Directives, FileDirectives,
    LocatedDirectiveError,
};
pub use enumerate::enumerate;
pub use registry::{RegisteredRule, RegistryError, RuleRegistry};
pub use resolver::{Resolution, Resolver};
pub use rule::{DescriptorRule, Rule, RuleBox, RuleKind};
pub use rule_name::{has_prefix, validate_prefix, NameError, RuleName};
pub use runtime::{RunError, Runtime, RuntimeBuilder};
pub use types::{Category, DescriptorRef, Location, Problem, Response, RuleExecutionError};

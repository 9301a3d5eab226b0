//! # protolint-rules
//!
//! Built-in naming rules for protolint.
//!
//! ## Available Rules
//!
//! | Name | Kind | Description |
//! |------|------|-------------|
//! | `core::naming::lower_snake` | field | Field names must be `lower_snake_case` |
//! | `core::naming::upper_camel` | message | Message names must be `UpperCamelCase` |
//! | `core::naming::enum_value_upper_snake` | enum value | Enum values must be `UPPER_SNAKE_CASE` |
//! | `core::naming::method_upper_camel` | method | RPC methods must be `UpperCamelCase` |
//!
//! ## Usage
//!
//! ```ignore
//! use protolint_core::{RuleRegistry, Runtime};
//!
//! let mut registry = RuleRegistry::new();
//! protolint_rules::register_all(&mut registry)?;
//! let responses = Runtime::builder(&registry).build().run(&files)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod case;
mod enum_value_upper_snake;
mod field_lower_snake;
mod message_upper_camel;
mod method_upper_camel;
mod presets;

pub use enum_value_upper_snake::EnumValueUpperSnake;
pub use field_lower_snake::FieldLowerSnake;
pub use message_upper_camel::MessageUpperCamel;
pub use method_upper_camel::MethodUpperCamel;
pub use presets::{all_rules, register_all};

/// Re-export core types for convenience.
pub use protolint_core::{Problem, Rule, RuleKind};

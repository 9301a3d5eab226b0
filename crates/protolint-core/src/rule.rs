//! Rule trait and the closure-backed [`DescriptorRule`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::descriptor::{
    Element, ElementKind, EnumDescriptor, EnumValueDescriptor, FieldDescriptor,
    MessageDescriptor, MethodDescriptor, SchemaFile, ServiceDescriptor,
};
use crate::types::Problem;

/// The element kind a rule targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Whole files.
    File,
    /// Messages (never synthetic map entries).
    Message,
    /// Fields.
    Field,
    /// Enums.
    Enum,
    /// Enum values.
    EnumValue,
    /// Services.
    Service,
    /// Methods.
    Method,
    /// Every element.
    Generic,
}

impl RuleKind {
    /// Returns true if a rule of this kind applies to `kind` elements.
    #[must_use]
    pub fn matches(self, kind: ElementKind) -> bool {
        matches!(
            (self, kind),
            (Self::Generic, _)
                | (Self::File, ElementKind::File)
                | (Self::Message, ElementKind::Message)
                | (Self::Field, ElementKind::Field)
                | (Self::Enum, ElementKind::Enum)
                | (Self::EnumValue, ElementKind::EnumValue)
                | (Self::Service, ElementKind::Service)
                | (Self::Method, ElementKind::Method)
        )
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::File => "file",
            Self::Message => "message",
            Self::Field => "field",
            Self::Enum => "enum",
            Self::EnumValue => "enum_value",
            Self::Service => "service",
            Self::Method => "method",
            Self::Generic => "generic",
        };
        f.write_str(s)
    }
}

/// A lint rule over schema elements.
///
/// The runtime only calls [`Rule::check`] for elements whose kind matches
/// [`Rule::kind`] and for which [`Rule::applies_to`] returns true.
///
/// # Example
///
/// ```ignore
/// use protolint_core::{Element, Problem, Rule, RuleKind};
///
/// pub struct NoEmptyMessages;
///
/// impl Rule for NoEmptyMessages {
///     fn name(&self) -> &str { "core::structure::no-empty-messages" }
///     fn kind(&self) -> RuleKind { RuleKind::Message }
///
///     fn check(&self, element: &Element<'_>) -> Vec<Problem> {
///         match element.as_message() {
///             Some(m) if m.proto().field.is_empty() => {
///                 vec![Problem::new(element, "message has no fields")]
///             }
///             _ => vec![],
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the hierarchical rule name (e.g. `core::0135::http-body`).
    fn name(&self) -> &str;

    /// Returns the element kind this rule targets.
    fn kind(&self) -> RuleKind;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &str {
        ""
    }

    /// Returns a link to the rule's documentation.
    fn uri(&self) -> Option<&str> {
        None
    }

    /// Narrows the elements this rule is invoked on.
    fn applies_to(&self, _element: &Element<'_>) -> bool {
        true
    }

    /// Checks one element and returns any problems found.
    fn check(&self, element: &Element<'_>) -> Vec<Problem>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

type Predicate = Box<dyn Fn(&Element<'_>) -> bool + Send + Sync>;
type CheckFn = Box<dyn Fn(&Element<'_>) -> Vec<Problem> + Send + Sync>;

/// A rule built from closures, with typed constructors per element kind.
///
/// ```ignore
/// let rule = DescriptorRule::field("core::naming::no-caps", |field| {
///     if field.name().chars().any(char::is_uppercase) {
///         vec![Problem::new(&Element::Field(field.clone()), "uppercase in field name")]
///     } else {
///         vec![]
///     }
/// });
/// ```
pub struct DescriptorRule {
    name: String,
    kind: RuleKind,
    description: String,
    uri: Option<String>,
    only_if: Option<Predicate>,
    check: CheckFn,
}

impl DescriptorRule {
    /// Creates a rule over any element kind.
    pub fn new(
        name: impl Into<String>,
        kind: RuleKind,
        check: impl Fn(&Element<'_>) -> Vec<Problem> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            description: String::new(),
            uri: None,
            only_if: None,
            check: Box::new(check),
        }
    }

    /// Creates a rule invoked once per file.
    pub fn file(
        name: impl Into<String>,
        check: impl Fn(&SchemaFile) -> Vec<Problem> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, RuleKind::File, move |e| match e {
            Element::File(f) => check(f),
            _ => Vec::new(),
        })
    }

    /// Creates a message rule.
    pub fn message(
        name: impl Into<String>,
        check: impl Fn(&MessageDescriptor<'_>) -> Vec<Problem> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, RuleKind::Message, move |e| {
            e.as_message().map(&check).unwrap_or_default()
        })
    }

    /// Creates a field rule.
    pub fn field(
        name: impl Into<String>,
        check: impl Fn(&FieldDescriptor<'_>) -> Vec<Problem> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, RuleKind::Field, move |e| {
            e.as_field().map(&check).unwrap_or_default()
        })
    }

    /// Creates an enum rule.
    pub fn enumeration(
        name: impl Into<String>,
        check: impl Fn(&EnumDescriptor<'_>) -> Vec<Problem> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, RuleKind::Enum, move |e| {
            e.as_enum().map(&check).unwrap_or_default()
        })
    }

    /// Creates an enum value rule.
    pub fn enum_value(
        name: impl Into<String>,
        check: impl Fn(&EnumValueDescriptor<'_>) -> Vec<Problem> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, RuleKind::EnumValue, move |e| {
            e.as_enum_value().map(&check).unwrap_or_default()
        })
    }

    /// Creates a service rule.
    pub fn service(
        name: impl Into<String>,
        check: impl Fn(&ServiceDescriptor<'_>) -> Vec<Problem> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, RuleKind::Service, move |e| {
            e.as_service().map(&check).unwrap_or_default()
        })
    }

    /// Creates a method rule.
    pub fn method(
        name: impl Into<String>,
        check: impl Fn(&MethodDescriptor<'_>) -> Vec<Problem> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, RuleKind::Method, move |e| {
            e.as_method().map(&check).unwrap_or_default()
        })
    }

    /// Restricts the rule to elements accepted by `predicate`.
    #[must_use]
    pub fn only_if(
        mut self,
        predicate: impl Fn(&Element<'_>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.only_if = Some(Box::new(predicate));
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the documentation link.
    #[must_use]
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }
}

impl fmt::Debug for DescriptorRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorRule")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("only_if", &self.only_if.is_some())
            .finish_non_exhaustive()
    }
}

impl Rule for DescriptorRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> RuleKind {
        self.kind
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    fn applies_to(&self, element: &Element<'_>) -> bool {
        self.only_if.as_ref().map_or(true, |p| p(element))
    }

    fn check(&self, element: &Element<'_>) -> Vec<Problem> {
        (self.check)(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{field, file_with, message};

    #[test]
    fn generic_matches_every_kind() {
        for kind in [
            ElementKind::File,
            ElementKind::Message,
            ElementKind::Field,
            ElementKind::Enum,
            ElementKind::EnumValue,
            ElementKind::Service,
            ElementKind::Method,
        ] {
            assert!(RuleKind::Generic.matches(kind));
        }
        assert!(RuleKind::Field.matches(ElementKind::Field));
        assert!(!RuleKind::Field.matches(ElementKind::Message));
        assert!(!RuleKind::EnumValue.matches(ElementKind::Enum));
    }

    #[test]
    fn typed_constructor_sets_kind_and_dispatches() {
        let rule = DescriptorRule::field("test::field", |f| {
            vec![Problem {
                message: f.name().to_string(),
                ..Problem::new(&Element::Field(f.clone()), "")
            }]
        });
        assert_eq!(rule.kind(), RuleKind::Field);

        let file = SchemaFile::new(file_with("t.proto", "", vec![message("T", vec![field("a", 1)])]));
        let element = file.resolve(&[4, 0, 2, 0]).unwrap();
        let problems = rule.check(&element);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].message, "a");

        // Mismatched elements produce nothing even if called directly.
        assert!(rule.check(&file.element()).is_empty());
    }

    #[test]
    fn predicate_defaults_to_true() {
        let file = SchemaFile::new(file_with("t.proto", "", vec![]));
        let rule = DescriptorRule::file("test::file", |_| vec![]);
        assert!(rule.applies_to(&file.element()));

        let rule = rule.only_if(|e| e.name().ends_with(".txt"));
        assert!(!rule.applies_to(&file.element()));
    }
}

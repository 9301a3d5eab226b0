//! In-source suppression directives.
//!
//! A directive disables a rule or a whole rule namespace:
//! ```text
//! // (-- api-linter: core::0135::http-body=disabled --)
//! ```
//!
//! In the file header comment it covers the whole file; in an element's own
//! leading comment it covers only that element. Parsing is a pure function of
//! the comment text; the resolver only ever consumes the parsed result.

use std::collections::HashMap;

use crate::descriptor::{Element, SchemaFile};
use crate::enumerate::enumerate;
use crate::rule_name::{has_prefix, validate_prefix};

const MARKER: &str = "api-linter:";
const OPEN: &str = "(-- api-linter:";
const CLOSE: &str = "--)";
const DISABLED: &str = "disabled";

/// A parsed `<prefix>=disabled` directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Directive {
    /// Rule name or namespace prefix being disabled.
    pub prefix: String,
}

impl Directive {
    /// Returns true if this directive disables `rule_name`.
    #[must_use]
    pub fn disables(&self, rule_name: &str) -> bool {
        has_prefix(rule_name, &self.prefix)
    }
}

/// Malformed directive text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    /// `(-- api-linter:` without a closing `--)`.
    #[error("unterminated directive `{text}`")]
    Unterminated {
        /// The offending text.
        text: String,
    },

    /// The body is not `<name>=disabled`.
    #[error("malformed directive `{text}`, expected `<rule-name>=disabled`")]
    Malformed {
        /// The offending text.
        text: String,
    },

    /// The named prefix is not a valid rule name.
    #[error("invalid rule name in directive `{text}`")]
    InvalidName {
        /// The offending text.
        text: String,
    },
}

/// Parses every directive in a comment.
///
/// Text outside `(-- api-linter: ... --)` markers is ignored. A block may
/// repeat `api-linter: <prefix>=disabled` to name more than one rule.
///
/// # Errors
///
/// Returns an error for an unterminated marker, a body other than
/// `<prefix>=disabled`, or an invalid prefix.
pub fn parse_directives(comment: &str) -> Result<Vec<Directive>, DirectiveError> {
    let mut directives = Vec::new();
    let mut rest = comment;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            return Err(DirectiveError::Unterminated {
                text: rest[start..].trim_end().to_string(),
            });
        };
        let text = &rest[start..start + OPEN.len() + end + CLOSE.len()];
        // One block may name several rules, one `api-linter:` line each.
        for body in after_open[..end].split(MARKER) {
            directives.push(parse_body(body.trim(), text)?);
        }
        rest = &after_open[end + CLOSE.len()..];
    }

    Ok(directives)
}

fn parse_body(body: &str, text: &str) -> Result<Directive, DirectiveError> {
    let (prefix, state) = body.split_once('=').ok_or_else(|| DirectiveError::Malformed {
        text: text.to_string(),
    })?;
    // Anything after the state is free-form justification.
    let (prefix, state) = (prefix.trim(), state.split_whitespace().next());
    if state != Some(DISABLED) || prefix.is_empty() {
        return Err(DirectiveError::Malformed {
            text: text.to_string(),
        });
    }
    validate_prefix(prefix).map_err(|_| DirectiveError::InvalidName {
        text: text.to_string(),
    })?;
    Ok(Directive {
        prefix: prefix.to_string(),
    })
}

/// Directives found in one comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives(Vec<Directive>);

impl Directives {
    /// Parses a comment.
    ///
    /// # Errors
    ///
    /// See [`parse_directives`].
    pub fn parse(comment: &str) -> Result<Self, DirectiveError> {
        parse_directives(comment).map(Self)
    }

    /// Returns true if any directive disables `rule_name`.
    #[must_use]
    pub fn disables(&self, rule_name: &str) -> bool {
        self.0.iter().any(|d| d.disables(rule_name))
    }

    /// Returns true if there are no directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the directives.
    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.0.iter()
    }
}

/// Where a malformed directive was found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{file}: {element}: {source}")]
pub struct LocatedDirectiveError {
    /// File path.
    pub file: String,
    /// `file header` or the element's full name.
    pub element: String,
    /// The parse failure.
    pub source: DirectiveError,
}

/// All directives of one file: the header plus each element's own comment.
#[derive(Debug, Clone, Default)]
pub struct FileDirectives {
    header: Directives,
    elements: HashMap<Vec<i32>, Directives>,
}

impl FileDirectives {
    /// Parses the header and every element's leading comment.
    ///
    /// # Errors
    ///
    /// Returns the first malformed directive found.
    pub fn collect(file: &SchemaFile) -> Result<Self, LocatedDirectiveError> {
        let header =
            Directives::parse(file.header_comment()).map_err(|e| LocatedDirectiveError {
                file: file.name().to_string(),
                element: "file header".to_string(),
                source: e,
            })?;

        let mut elements = HashMap::new();
        for element in enumerate(file) {
            let comment = element.source_info().leading_comments;
            let parsed = Directives::parse(comment).map_err(|e| LocatedDirectiveError {
                file: file.name().to_string(),
                element: element.full_name().to_string(),
                source: e,
            })?;
            if !parsed.is_empty() {
                elements.insert(element.path().to_vec(), parsed);
            }
        }

        Ok(Self { header, elements })
    }

    /// Returns true if the file header disables `rule_name`.
    #[must_use]
    pub fn file_disables(&self, rule_name: &str) -> bool {
        self.header.disables(rule_name)
    }

    /// Returns true if the element's own comment disables `rule_name`.
    #[must_use]
    pub fn element_disables(&self, element: &Element<'_>, rule_name: &str) -> bool {
        self.elements
            .get(element.path())
            .is_some_and(|d| d.disables(rule_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{field, file_with, message, with_comment, with_header};

    #[test]
    fn parses_single_directive() {
        let d = parse_directives(" (-- api-linter: core::0135::http-body=disabled --)\n").unwrap();
        assert_eq!(
            d,
            vec![Directive {
                prefix: "core::0135::http-body".to_string()
            }]
        );
    }

    #[test]
    fn parses_multiple_directives_and_ignores_prose() {
        let comment = "The user's id.\n\
            (-- api-linter: core::0122=disabled\n    aip.dev/not-precedent: legacy --)\n\
            (-- api-linter: core::0140::lower-snake=disabled --)";
        let d = parse_directives(comment).unwrap();
        let prefixes: Vec<&str> = d.iter().map(|d| d.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["core::0122", "core::0140::lower-snake"]);
    }

    #[test]
    fn block_naming_several_rules_disables_each() {
        let comment = "(-- api-linter: core::a=disabled\n    \
            api-linter: core::b=disabled\n    \
            aip.dev/not-precedent: legacy field names. --)";
        let d = Directives::parse(comment).unwrap();
        assert!(d.disables("core::a"));
        assert!(d.disables("core::b::x"));
        assert!(!d.disables("core::c"));
        assert_eq!(d.iter().count(), 2);
    }

    #[test]
    fn malformed_second_rule_in_block_is_rejected() {
        assert!(matches!(
            parse_directives("(-- api-linter: core::a=disabled\n api-linter: core::b=on --)"),
            Err(DirectiveError::Malformed { .. })
        ));
    }

    #[test]
    fn comment_without_directive_is_empty() {
        assert!(parse_directives("just a note about api-linter").unwrap().is_empty());
        assert!(parse_directives("").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_directives() {
        assert!(matches!(
            parse_directives("(-- api-linter: core::0135=enabled --)"),
            Err(DirectiveError::Malformed { .. })
        ));
        assert!(matches!(
            parse_directives("(-- api-linter: core::0135 --)"),
            Err(DirectiveError::Malformed { .. })
        ));
        assert!(matches!(
            parse_directives("(-- api-linter: =disabled --)"),
            Err(DirectiveError::Malformed { .. })
        ));
        assert!(matches!(
            parse_directives("(-- api-linter: core::=disabled --)"),
            Err(DirectiveError::InvalidName { .. })
        ));
        assert!(matches!(
            parse_directives("(-- api-linter: core::0135=disabled"),
            Err(DirectiveError::Unterminated { .. })
        ));
    }

    #[test]
    fn namespace_directive_disables_descendants_only() {
        let d = Directives::parse("(-- api-linter: core::0135=disabled --)").unwrap();
        assert!(d.disables("core::0135::http-body"));
        assert!(d.disables("core::0135"));
        assert!(!d.disables("core::01350::x"));
        assert!(!d.disables("core::0231::http-body"));
    }

    #[test]
    fn collects_header_and_element_directives() {
        let mut proto = file_with(
            "d.proto",
            "",
            vec![message("T", vec![field("a", 1), field("b", 2)])],
        );
        with_header(&mut proto, "(-- api-linter: core::header=disabled --)");
        with_comment(&mut proto, vec![4, 0, 2, 1], "(-- api-linter: core::inline=disabled --)");
        let file = SchemaFile::new(proto);

        let directives = FileDirectives::collect(&file).unwrap();
        assert!(directives.file_disables("core::header::x"));
        assert!(!directives.file_disables("core::inline"));

        let a = file.resolve(&[4, 0, 2, 0]).unwrap();
        let b = file.resolve(&[4, 0, 2, 1]).unwrap();
        assert!(!directives.element_disables(&a, "core::inline"));
        assert!(directives.element_disables(&b, "core::inline"));
    }

    #[test]
    fn collect_reports_where_a_directive_is_malformed() {
        let mut proto = file_with("d.proto", "acme", vec![message("T", vec![field("a", 1)])]);
        with_comment(&mut proto, vec![4, 0, 2, 0], "(-- api-linter: x=on --)");
        let err = FileDirectives::collect(&SchemaFile::new(proto)).unwrap_err();
        assert_eq!(err.file, "d.proto");
        assert_eq!(err.element, "acme.T.a");
    }
}

//! Decides whether a rule fires on an element, and at what severity.

use tracing::trace;

use crate::config::{RuntimeConfigs, Status};
use crate::descriptor::Element;
use crate::directive::FileDirectives;
use crate::types::Category;

/// Outcome of resolving one (file, rule, element) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Whether the rule runs.
    pub enabled: bool,
    /// Severity stamped on its problems.
    pub category: Category,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            enabled: true,
            category: Category::Warning,
        }
    }
}

/// Combines configuration layers with in-source directives.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'c> {
    configs: &'c RuntimeConfigs,
    ignore_comment_disables: bool,
}

impl<'c> Resolver<'c> {
    /// Creates a resolver over the given layers.
    #[must_use]
    pub fn new(configs: &'c RuntimeConfigs) -> Self {
        Self {
            configs,
            ignore_comment_disables: false,
        }
    }

    /// Ignores `(-- api-linter: ...=disabled --)` comments when set.
    #[must_use]
    pub fn ignore_comment_disables(mut self, ignore: bool) -> Self {
        self.ignore_comment_disables = ignore;
        self
    }

    /// Applies the configuration layers only.
    ///
    /// Within a layer the longest matching prefix wins; across layers the
    /// later layer wins regardless of specificity.
    #[must_use]
    pub fn configured(&self, file_path: &str, rule_name: &str) -> Resolution {
        let mut resolution = Resolution::default();
        for config in self.configs.iter().filter(|c| c.applies_to(file_path)) {
            if let Some((key, rule)) = config.most_specific(rule_name) {
                trace!(rule = rule_name, key, "config layer matched");
                if let Some(status) = rule.status {
                    resolution.enabled = status == Status::Enabled;
                }
                if let Some(category) = rule.category {
                    resolution.category = category;
                }
            }
        }
        resolution
    }

    /// Resolves enablement and severity for `rule_name` on `element`.
    ///
    /// Directives can only disable; they never re-enable and never change
    /// the category.
    #[must_use]
    pub fn resolve(
        &self,
        file_path: &str,
        rule_name: &str,
        element: &Element<'_>,
        directives: &FileDirectives,
    ) -> Resolution {
        let mut resolution = self.configured(file_path, rule_name);
        if self.ignore_comment_disables {
            return resolution;
        }
        if directives.file_disables(rule_name) || directives.element_disables(element, rule_name)
        {
            resolution.enabled = false;
        }
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GlobPattern, RuleConfig, RuntimeConfig};
    use crate::descriptor::SchemaFile;
    use crate::testing::{field, file_with, message, with_comment, with_header};

    const HTTP_BODY: &str = "core::0135::http-body";

    fn configs(layers: Vec<RuntimeConfig>) -> RuntimeConfigs {
        RuntimeConfigs::from(layers)
    }

    #[test]
    fn defaults_to_enabled_warning() {
        let c = configs(vec![]);
        assert_eq!(
            Resolver::new(&c).configured("a.proto", HTTP_BODY),
            Resolution {
                enabled: true,
                category: Category::Warning
            }
        );
    }

    #[test]
    fn later_specific_layer_enables_over_universal_disable() {
        let c = configs(vec![
            RuntimeConfig::new().rule("", RuleConfig::disabled()),
            RuntimeConfig::new().rule(HTTP_BODY, RuleConfig::enabled()),
        ]);
        let resolver = Resolver::new(&c);
        assert!(resolver.configured("a.proto", HTTP_BODY).enabled);
        assert!(!resolver.configured("a.proto", "core::0231::http-body").enabled);
    }

    #[test]
    fn later_layer_wins_even_when_less_specific() {
        let c = configs(vec![
            RuntimeConfig::new().rule(HTTP_BODY, RuleConfig::enabled()),
            RuntimeConfig::new().rule("core", RuleConfig::disabled()),
        ]);
        assert!(!Resolver::new(&c).configured("a.proto", HTTP_BODY).enabled);
    }

    #[test]
    fn specificity_breaks_ties_within_a_layer() {
        let c = configs(vec![RuntimeConfig::new()
            .rule("core", RuleConfig::disabled())
            .rule("core::0135", RuleConfig::enabled().with_category(Category::Error))]);
        let r = Resolver::new(&c).configured("a.proto", HTTP_BODY);
        assert!(r.enabled);
        assert_eq!(r.category, Category::Error);
    }

    #[test]
    fn path_scoped_layer_only_applies_to_matching_files() {
        let c = configs(vec![RuntimeConfig {
            included_paths: vec![GlobPattern::new("legacy/**").unwrap()],
            ..RuntimeConfig::new().rule("", RuleConfig::disabled())
        }]);
        let resolver = Resolver::new(&c);
        assert!(!resolver.configured("legacy/old.proto", HTTP_BODY).enabled);
        assert!(resolver.configured("api/new.proto", HTTP_BODY).enabled);
    }

    #[test]
    fn status_and_category_merge_independently() {
        let c = configs(vec![
            RuntimeConfig::new().rule("core", RuleConfig::disabled().with_category(Category::Error)),
            RuntimeConfig::new().rule("core", RuleConfig::enabled()),
        ]);
        let r = Resolver::new(&c).configured("a.proto", HTTP_BODY);
        assert!(r.enabled);
        assert_eq!(r.category, Category::Error);
    }

    fn annotated_file() -> SchemaFile {
        let mut proto = file_with("d.proto", "", vec![message("T", vec![field("a", 1), field("b", 2)])]);
        with_header(&mut proto, "(-- api-linter: core::0140=disabled --)");
        with_comment(&mut proto, vec![4, 0, 2, 1], "(-- api-linter: core::0135::http-body=disabled --)");
        SchemaFile::new(proto)
    }

    #[test]
    fn directives_disable_file_and_single_element() {
        let file = annotated_file();
        let directives = FileDirectives::collect(&file).unwrap();
        let c = configs(vec![]);
        let resolver = Resolver::new(&c);
        let a = file.resolve(&[4, 0, 2, 0]).unwrap();
        let b = file.resolve(&[4, 0, 2, 1]).unwrap();

        assert!(!resolver.resolve("d.proto", "core::0140::x", &a, &directives).enabled);
        assert!(resolver.resolve("d.proto", HTTP_BODY, &a, &directives).enabled);
        assert!(!resolver.resolve("d.proto", HTTP_BODY, &b, &directives).enabled);
    }

    #[test]
    fn directives_never_change_category_or_reenable() {
        let file = annotated_file();
        let directives = FileDirectives::collect(&file).unwrap();
        let c = configs(vec![RuntimeConfig::new()
            .rule("", RuleConfig::disabled().with_category(Category::Error))]);
        let a = file.resolve(&[4, 0, 2, 0]).unwrap();
        let r = Resolver::new(&c).resolve("d.proto", HTTP_BODY, &a, &directives);
        assert!(!r.enabled);
        assert_eq!(r.category, Category::Error);
    }

    #[test]
    fn ignoring_comment_disables_keeps_config_result() {
        let file = annotated_file();
        let directives = FileDirectives::collect(&file).unwrap();
        let c = configs(vec![]);
        let b = file.resolve(&[4, 0, 2, 1]).unwrap();
        let resolver = Resolver::new(&c).ignore_comment_disables(true);
        assert!(resolver.resolve("d.proto", HTTP_BODY, &b, &directives).enabled);
    }
}

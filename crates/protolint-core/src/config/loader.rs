//! DTO → validated configuration conversion.

use super::dto::{RuleConfigDto, RuntimeConfigDto};
use super::{ConfigError, GlobPattern, RuleConfig, RuntimeConfig, RuntimeConfigs};
use crate::rule_name::validate_prefix;

/// Converts raw layers into validated [`RuntimeConfigs`], preserving order.
///
/// # Errors
///
/// Returns the first invalid glob or rule prefix encountered.
pub fn load(dtos: Vec<RuntimeConfigDto>) -> Result<RuntimeConfigs, ConfigError> {
    dtos.into_iter()
        .enumerate()
        .map(|(i, dto)| convert_layer(dto, i))
        .collect()
}

fn convert_layer(dto: RuntimeConfigDto, index: usize) -> Result<RuntimeConfig, ConfigError> {
    let ctx = format!("configs[{index}]");
    let included_paths = convert_globs(&dto.included_paths, &format!("{ctx}.included_paths"))?;
    let excluded_paths = convert_globs(&dto.excluded_paths, &format!("{ctx}.excluded_paths"))?;

    let rule_configs = dto
        .rule_configs
        .into_iter()
        .map(|(prefix, rule)| {
            validate_prefix(&prefix).map_err(|e| ConfigError::InvalidRulePrefix {
                context: format!("{ctx}.rule_configs"),
                prefix: prefix.clone(),
                source: e,
            })?;
            Ok((prefix, convert_rule(rule)))
        })
        .collect::<Result<_, ConfigError>>()?;

    Ok(RuntimeConfig {
        included_paths,
        excluded_paths,
        rule_configs,
    })
}

fn convert_globs(patterns: &[String], ctx: &str) -> Result<Vec<GlobPattern>, ConfigError> {
    patterns
        .iter()
        .enumerate()
        .map(|(i, p)| {
            GlobPattern::new(p).map_err(|reason| ConfigError::InvalidGlob {
                context: format!("{ctx}[{i}]"),
                pattern: p.clone(),
                reason,
            })
        })
        .collect()
}

fn convert_rule(dto: RuleConfigDto) -> RuleConfig {
    RuleConfig {
        status: dto.status,
        category: dto.category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Status;
    use crate::types::Category;
    use std::collections::BTreeMap;

    fn layer(rules: &[(&str, RuleConfigDto)]) -> RuntimeConfigDto {
        RuntimeConfigDto {
            rule_configs: rules
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
            ..RuntimeConfigDto::default()
        }
    }

    #[test]
    fn keeps_layer_order_and_values() {
        let configs = load(vec![
            layer(&[(
                "",
                RuleConfigDto {
                    status: Some(Status::Disabled),
                    category: None,
                },
            )]),
            layer(&[(
                "core::0135::http-body",
                RuleConfigDto {
                    status: Some(Status::Enabled),
                    category: Some(Category::Error),
                },
            )]),
        ])
        .unwrap();

        let layers: Vec<_> = configs.iter().collect();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].rule_configs[""], RuleConfig::disabled());
        assert_eq!(
            layers[1].rule_configs["core::0135::http-body"],
            RuleConfig::enabled().with_category(Category::Error)
        );
    }

    #[test]
    fn reports_context_for_bad_glob() {
        let dto = RuntimeConfigDto {
            excluded_paths: vec!["ok/**".to_string(), "bad/[".to_string()],
            ..RuntimeConfigDto::default()
        };
        let err = load(vec![RuntimeConfigDto::default(), dto]).unwrap_err();
        match err {
            ConfigError::InvalidGlob {
                context, pattern, ..
            } => {
                assert_eq!(context, "configs[1].excluded_paths[1]");
                assert_eq!(pattern, "bad/[");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_malformed_rule_prefix() {
        let err = load(vec![layer(&[("core::", RuleConfigDto::default())])]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRulePrefix { prefix, .. } if prefix == "core::"));
    }
}

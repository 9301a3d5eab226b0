//! Configuration file discovery with global fallback.
//!
//! Resolves the configuration layers using a deterministic priority order:
//!
//! 1. `--config` flags (explicit paths, every one loaded in the given order)
//! 2. `{project}/protolint.yaml`, `.protolint.yaml` or `protolint.json`
//! 3. `~/.protolint/config.yaml` (global fallback)
//! 4. Nothing found: no layers, every rule enabled as a warning

use anyhow::{Context, Result};
use protolint_core::RuntimeConfigs;
use std::path::{Path, PathBuf};

/// Where a configuration layer file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config`.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the global config directory (`~/.protolint/`).
    Global(PathBuf),
}

impl ConfigSource {
    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => p,
        }
    }

    /// Returns `true` if the config comes from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["protolint.yaml", ".protolint.yaml", "protolint.json"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.yaml";

/// Resolves the config files to load, in layer order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: &[PathBuf]) -> Vec<ConfigSource> {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(
    project_dir: &Path,
    explicit: &[PathBuf],
    global_dir: Option<PathBuf>,
) -> Vec<ConfigSource> {
    if !explicit.is_empty() {
        return explicit.iter().cloned().map(ConfigSource::Explicit).collect();
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.exists())
    {
        tracing::debug!("Found project config: {}", found.display());
        return vec![ConfigSource::Project(found)];
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.exists())
        .map(|found| {
            tracing::debug!("Found global config: {}", found.display());
            ConfigSource::Global(found)
        })
        .into_iter()
        .collect()
}

/// Loads every source into one ordered list of layers.
///
/// # Errors
///
/// Returns an error naming the file that failed to read, parse or validate.
pub fn load(sources: &[ConfigSource]) -> Result<RuntimeConfigs> {
    let mut configs = RuntimeConfigs::new();
    for source in sources {
        let path = source.path();
        if source.is_global() {
            tracing::info!("Using global config: {}", path.display());
        }
        let layers = RuntimeConfigs::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        configs.extend(layers);
    }
    Ok(configs)
}

/// Returns the global config directory path.
///
/// Resolution: `$PROTOLINT_CONFIG_DIR` > `~/.protolint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("PROTOLINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".protolint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_takes_priority_over_project() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("base.yaml");
        let strict = tmp.path().join("strict.json");

        let project = tmp.path().join("project");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("protolint.yaml"), "").unwrap();

        let result = resolve_inner(&project, &[base.clone(), strict.clone()], None);
        assert_eq!(
            result,
            vec![ConfigSource::Explicit(base), ConfigSource::Explicit(strict)]
        );
    }

    #[test]
    fn project_names_checked_in_order() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("protolint.json"), "[]").unwrap();
        assert_eq!(
            resolve_inner(tmp.path(), &[], None),
            vec![ConfigSource::Project(tmp.path().join("protolint.json"))]
        );

        fs::write(tmp.path().join(".protolint.yaml"), "").unwrap();
        assert_eq!(
            resolve_inner(tmp.path(), &[], None),
            vec![ConfigSource::Project(tmp.path().join(".protolint.yaml"))]
        );

        fs::write(tmp.path().join("protolint.yaml"), "").unwrap();
        assert_eq!(
            resolve_inner(tmp.path(), &[], None),
            vec![ConfigSource::Project(tmp.path().join("protolint.yaml"))]
        );
    }

    #[test]
    fn global_fallback_when_no_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.yaml"), "").unwrap();

        let result = resolve_inner(project.path(), &[], Some(global.path().to_path_buf()));
        assert_eq!(
            result,
            vec![ConfigSource::Global(global.path().join("config.yaml"))]
        );
        assert!(result[0].is_global());
    }

    #[test]
    fn global_skipped_when_project_config_exists() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("protolint.yaml"), "").unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.yaml"), "").unwrap();

        let result = resolve_inner(project.path(), &[], Some(global.path().to_path_buf()));
        assert!(matches!(result.as_slice(), [ConfigSource::Project(_)]));
    }

    #[test]
    fn nothing_found_yields_no_layers() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        assert!(resolve_inner(project.path(), &[], Some(global.path().to_path_buf())).is_empty());
        assert!(resolve_inner(project.path(), &[], None).is_empty());
    }

    #[test]
    fn load_concatenates_layers_in_order() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("first.yaml");
        let second = tmp.path().join("second.json");
        fs::write(&first, "- rule_configs:\n    \"\": { status: disabled }\n").unwrap();
        fs::write(
            &second,
            r#"[{"rule_configs": {"core::naming": {"status": "enabled"}}}, {}]"#,
        )
        .unwrap();

        let configs = load(&[
            ConfigSource::Explicit(first),
            ConfigSource::Explicit(second),
        ])
        .unwrap();
        assert_eq!(configs.len(), 3);
    }

    #[test]
    fn load_names_the_failing_file() {
        let tmp = TempDir::new().unwrap();
        let bad = tmp.path().join("bad.yaml");
        fs::write(&bad, "- included_paths: [\"[\"]\n").unwrap();

        let err = load(&[ConfigSource::Explicit(bad)]).unwrap_err();
        assert!(err.to_string().contains("bad.yaml"));
    }
}

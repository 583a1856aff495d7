//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, e.g. `CC_INIT__DEPLOY__DRY_RUN=true`
//! 3. Config file (`--config FILE`, else [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix shared by every configuration environment variable.
pub const ENV_PREFIX: &str = "CC_INIT";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Deployment defaults.
    pub deploy: DeployConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Directory used when `--target` is not given.
    pub target_dir: PathBuf,
    /// Preview instead of writing, unless overridden on the command line.
    pub dry_run: bool,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from("."),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Behave as if `-v` was passed.
    pub verbose: bool,
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path passed via `--config`. It must exist when
    /// given; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(config_file.map(PathBuf::as_path), None)
    }

    /// Same as [`Self::load`] but with the environment replaced by `env`
    /// when it is `Some`.
    fn load_from(config_file: Option<&Path>, env: Option<Map<String, String>>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to serialise default configuration")?;

        let file = match config_file {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::from(Self::config_path().as_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(env);

        let config: Self = Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(environment)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.cc-init.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "cc-init", "cc-init")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".cc-init.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn no_env() -> Option<Map<String, String>> {
        Some(Map::new())
    }

    #[test]
    fn defaults_target_current_directory() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.deploy.target_dir, PathBuf::from("."));
        assert!(!cfg.deploy.dry_run);
        assert!(!cfg.output.no_color);
        assert!(!cfg.output.verbose);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[deploy]\ndry_run = true\n\n[output]\nno_color = true\n").unwrap();

        let cfg = AppConfig::load_from(Some(&path), no_env()).unwrap();
        assert!(cfg.deploy.dry_run);
        assert!(cfg.output.no_color);
        assert_eq!(cfg.deploy.target_dir, PathBuf::from("."));
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[deploy]\ntarget_dir = \"/from/file\"\n").unwrap();

        let env = Map::from([
            ("CC_INIT__DEPLOY__TARGET_DIR".to_string(), "/from/env".to_string()),
            ("CC_INIT__OUTPUT__VERBOSE".to_string(), "true".to_string()),
        ]);
        let cfg = AppConfig::load_from(Some(&path), Some(env)).unwrap();
        assert_eq!(cfg.deploy.target_dir, PathBuf::from("/from/env"));
        assert!(cfg.output.verbose);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load_from(Some(&missing), no_env()).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[deploy]\ndry_run = \"maybe\"\n").unwrap();
        assert!(AppConfig::load_from(Some(&path), no_env()).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}

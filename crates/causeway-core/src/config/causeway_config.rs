//! Top-level Causeway configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::TaggerConfig;
use crate::errors::ConfigError;

/// Project config file name looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "causeway.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`CAUSEWAY_*`)
/// 2. Project config (`causeway.toml` in the project root)
/// 3. Compiled defaults
///
/// Built once at startup and passed by reference; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CausewayConfig {
    pub tagger: TaggerConfig,
}

impl CausewayConfig {
    /// Load configuration for the project rooted at `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            origin: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &CausewayConfig) -> Result<(), ConfigError> {
        let positive = [
            ("tagger.max_threads", config.tagger.max_threads.map(|v| v as u64)),
            ("tagger.progress_interval_ms", config.tagger.progress_interval_ms),
        ];
        match positive.into_iter().find(|(_, value)| *value == Some(0)) {
            Some((field, _)) => Err(ConfigError::Invalid {
                field,
                message: "must be greater than 0",
            }),
            None => Ok(()),
        }
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut CausewayConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let file_config: CausewayConfig =
            toml::from_str(&content).map_err(|e| ConfigError::Parse {
                origin: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut CausewayConfig, other: &CausewayConfig) {
        let (b, o) = (&mut base.tagger, &other.tagger);
        if o.tregex_dir.is_some() {
            b.tregex_dir = o.tregex_dir.clone();
        }
        if o.max_steiners.is_some() {
            b.max_steiners = o.max_steiners;
        }
        if o.max_threads.is_some() {
            b.max_threads = o.max_threads;
        }
        if o.pattern_type.is_some() {
            b.pattern_type = o.pattern_type;
        }
        if o.cache_dir.is_some() {
            b.cache_dir = o.cache_dir.clone();
        }
        if o.progress_interval_ms.is_some() {
            b.progress_interval_ms = o.progress_interval_ms;
        }
        if o.rewrite_scripts_dir.is_some() {
            b.rewrite_scripts_dir = o.rewrite_scripts_dir.clone();
        }
        if !o.rewrite_scripts.is_empty() {
            b.rewrite_scripts = o.rewrite_scripts.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `CAUSEWAY_MAX_THREADS`, `CAUSEWAY_PATTERN_TYPE`, etc.
    fn apply_env_overrides(config: &mut CausewayConfig) {
        if let Ok(val) = std::env::var("CAUSEWAY_TREGEX_DIR") {
            config.tagger.tregex_dir = Some(val.into());
        }
        if let Ok(val) = std::env::var("CAUSEWAY_MAX_STEINERS") {
            if let Ok(v) = val.parse::<usize>() {
                config.tagger.max_steiners = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CAUSEWAY_MAX_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.tagger.max_threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CAUSEWAY_PATTERN_TYPE") {
            match val.parse() {
                Ok(v) => config.tagger.pattern_type = Some(v),
                Err(e) => tracing::warn!(error = %e, "ignoring CAUSEWAY_PATTERN_TYPE"),
            }
        }
        if let Ok(val) = std::env::var("CAUSEWAY_CACHE_DIR") {
            config.tagger.cache_dir = Some(val.into());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            message: e.to_string(),
        })
    }
}

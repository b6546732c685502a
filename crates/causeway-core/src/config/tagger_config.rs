//! Connective tagger configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::types::PatternType;

/// Configuration for pattern generation and the matcher worker pool.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TaggerConfig {
    /// Directory containing `tregex.sh` and `tsurgeon.sh`.
    pub tregex_dir: Option<PathBuf>,
    /// Maximum Steiner nodes per pattern. Default: 6.
    pub max_steiners: Option<usize>,
    /// Number of matcher worker threads. Default: 30.
    pub max_threads: Option<usize>,
    /// Tree representation for patterns. Default: dependency.
    pub pattern_type: Option<PatternType>,
    /// Root of the on-disk match cache. Default: `~/tregex_cache`.
    pub cache_dir: Option<PathBuf>,
    /// Progress report interval in milliseconds. Default: 4000.
    pub progress_interval_ms: Option<u64>,
    /// Directory holding dependency rewrite scripts.
    /// Default: `<tregex_dir>/tsurgeon_dep`.
    pub rewrite_scripts_dir: Option<PathBuf>,
    /// Rewrite script names (without extension), applied in order.
    #[serde(default)]
    pub rewrite_scripts: Vec<String>,
}

impl TaggerConfig {
    pub fn effective_tregex_dir(&self) -> PathBuf {
        self.tregex_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_TREGEX_DIR))
    }

    pub fn effective_max_steiners(&self) -> usize {
        self.max_steiners.unwrap_or(constants::DEFAULT_MAX_STEINERS)
    }

    pub fn effective_max_threads(&self) -> usize {
        self.max_threads.unwrap_or(constants::DEFAULT_MAX_THREADS)
    }

    pub fn effective_pattern_type(&self) -> PatternType {
        self.pattern_type.unwrap_or_default()
    }

    /// Returns the cache root, defaulting to `$HOME/tregex_cache`, or the
    /// system temp dir when no home directory is known.
    pub fn effective_cache_dir(&self) -> PathBuf {
        if let Some(dir) = &self.cache_dir {
            return dir.clone();
        }
        home_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(constants::DEFAULT_CACHE_DIR_NAME)
    }

    pub fn effective_progress_interval(&self) -> Duration {
        Duration::from_millis(
            self.progress_interval_ms
                .unwrap_or(constants::DEFAULT_PROGRESS_INTERVAL_MS),
        )
    }

    pub fn effective_rewrite_scripts_dir(&self) -> PathBuf {
        self.rewrite_scripts_dir.clone().unwrap_or_else(|| {
            self.effective_tregex_dir()
                .join(constants::DEFAULT_REWRITE_SCRIPTS_SUBDIR)
        })
    }

    pub fn effective_rewrite_scripts(&self) -> Vec<String> {
        if self.rewrite_scripts.is_empty() {
            constants::DEFAULT_REWRITE_SCRIPTS
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.rewrite_scripts.clone()
        }
    }

    /// Full paths of the rewrite scripts, in application order.
    pub fn rewrite_script_paths(&self) -> Vec<PathBuf> {
        let dir = self.effective_rewrite_scripts_dir();
        self.effective_rewrite_scripts()
            .into_iter()
            .map(|name| {
                dir.join(name)
                    .with_extension(constants::REWRITE_SCRIPT_EXTENSION)
            })
            .collect()
    }
}

/// Cross-platform home directory resolution.
pub(crate) fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

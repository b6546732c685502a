//! Tagger errors. Aggregates subsystem errors via `From` conversions.

use std::path::PathBuf;

use super::error_code::{self, CausewayErrorCode};
use super::{ConfigError, MatcherError, SentenceError};

/// Errors that abort a tagging run. Per-pattern failures never reach here.
#[derive(Debug, thiserror::Error)]
pub enum TaggerError {
    #[error("Matcher error: {0}")]
    Matcher(#[from] MatcherError),

    #[error("Sentence error: {0}")]
    Sentence(#[from] SentenceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cache I/O error at {path}: {message}")]
    CacheIo { path: PathBuf, message: String },

    #[error("Pattern set at {path}: {message}")]
    PatternStore { path: PathBuf, message: String },

    #[error("Preprocessing failed: {message}")]
    Preprocess { message: String },

    #[error("Failed to start {thread}: {message}")]
    WorkerSpawn { thread: String, message: String },

    #[error("Matcher worker thread panicked")]
    WorkerPanicked,
}

impl TaggerError {
    /// Wrap an I/O error on a cache or scratch path.
    pub fn cache_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::CacheIo {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl CausewayErrorCode for TaggerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Matcher(e) => e.error_code(),
            Self::Sentence(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::CacheIo { .. } => error_code::CACHE_IO,
            Self::PatternStore { .. } => error_code::PATTERN_STORE,
            Self::Preprocess { .. } => error_code::PREPROCESS_FAILED,
            Self::WorkerSpawn { .. } => error_code::WORKER_SPAWN_FAILED,
            Self::WorkerPanicked => error_code::WORKER_PANICKED,
        }
    }
}

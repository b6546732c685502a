//! CausewayErrorCode trait for structured error reporting.

/// Trait giving every Causeway error a stable, machine-readable code.
pub trait CausewayErrorCode {
    /// Returns the error code string (e.g., "MATCHER_FAILED").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const MALFORMED_TREE: &str = "MALFORMED_TREE";
pub const SENTENCE_ERROR: &str = "SENTENCE_ERROR";
pub const MATCHER_SPAWN_FAILED: &str = "MATCHER_SPAWN_FAILED";
pub const MATCHER_FAILED: &str = "MATCHER_FAILED";
pub const MATCHER_IO: &str = "MATCHER_IO";
pub const CACHE_IO: &str = "CACHE_IO";
pub const PREPROCESS_FAILED: &str = "PREPROCESS_FAILED";
pub const WORKER_PANICKED: &str = "WORKER_PANICKED";
pub const PATTERN_STORE: &str = "PATTERN_STORE";
pub const WORKER_SPAWN_FAILED: &str = "WORKER_SPAWN_FAILED";

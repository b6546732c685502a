//! External tree-matcher errors.

use super::error_code::{self, CausewayErrorCode};

/// Errors from invoking the external tree-matching tool.
#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    /// The process could not be started at all. Fatal for a batch.
    #[error("Failed to spawn {command}: {message}")]
    Spawn { command: String, message: String },

    /// The process ran but exited unsuccessfully.
    #[error("{command} exited with status {status}")]
    Failed { command: String, status: String },

    #[error("Matcher I/O error: {message}")]
    Io { message: String },
}

impl MatcherError {
    /// Whether this failure should abort the batch instead of skipping one unit.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Spawn { .. })
    }
}

impl CausewayErrorCode for MatcherError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Spawn { .. } => error_code::MATCHER_SPAWN_FAILED,
            Self::Failed { .. } => error_code::MATCHER_FAILED,
            Self::Io { .. } => error_code::MATCHER_IO,
        }
    }
}

//! Configuration errors.

use std::path::PathBuf;

use super::error_code::{self, CausewayErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {message}", path.display())]
    Unreadable { path: PathBuf, message: String },

    /// `origin` is the file path, or a marker such as `<string>`.
    #[error("Malformed config in {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("Invalid value for {field}: {message}")]
    Invalid {
        field: &'static str,
        message: &'static str,
    },

    #[error("Cannot serialize config: {message}")]
    Serialize { message: String },
}

impl CausewayErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}

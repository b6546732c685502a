//! Error handling for Causeway.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod matcher_error;
pub mod sentence_error;
pub mod tagger_error;

pub use config_error::ConfigError;
pub use error_code::CausewayErrorCode;
pub use matcher_error::MatcherError;
pub use sentence_error::SentenceError;
pub use tagger_error::TaggerError;

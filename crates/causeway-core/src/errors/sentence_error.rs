//! Sentence model errors.

use super::error_code::{self, CausewayErrorCode};

/// Errors raised while building sentences or reading serialized trees.
#[derive(Debug, thiserror::Error)]
pub enum SentenceError {
    #[error("Malformed tree at byte {offset}: {message}")]
    MalformedTree { offset: usize, message: String },

    #[error("Token {index} out of range (sentence has {len} tokens)")]
    TokenOutOfRange { index: usize, len: usize },

    #[error("Tree node label {label:?} carries no token index")]
    MissingTokenIndex { label: String },

    #[error("Sentence has no constituency parse")]
    MissingConstituencyTree,
}

impl CausewayErrorCode for SentenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedTree { .. } | Self::MissingTokenIndex { .. } => {
                error_code::MALFORMED_TREE
            }
            Self::TokenOutOfRange { .. } | Self::MissingConstituencyTree => {
                error_code::SENTENCE_ERROR
            }
        }
    }
}

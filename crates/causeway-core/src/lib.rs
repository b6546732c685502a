//! # causeway-core
//!
//! Foundation crate for the Causeway connective tagger.
//! Defines config, errors, tracing setup, constants, and shared types.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{CausewayConfig, TaggerConfig};
pub use errors::error_code::CausewayErrorCode;
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::identifiers::PatternId;
pub use types::pattern_type::PatternType;

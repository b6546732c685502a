//! Tree-query patterns: generation from annotated instances, the
//! deduplicated pattern set, and per-representation rendering.

pub mod dialect;
pub mod extraction;
pub mod generator;
pub mod types;

pub use extraction::extract_patterns;
pub use generator::PatternGenerator;
pub use types::{GeneratedPattern, Pattern, PatternSet};

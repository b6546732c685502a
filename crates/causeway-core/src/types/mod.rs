//! Shared data structures for Causeway.
//! FxHashMap/SmallVec aliases, identifier newtypes, tree modes.

pub mod collections;
pub mod identifiers;
pub mod pattern_type;

pub use collections::{FxHashMap, FxHashSet};
pub use identifiers::PatternId;
pub use pattern_type::PatternType;

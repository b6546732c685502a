//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec sized for connective token lists (almost always <4 words).
pub type SmallVec4<T> = SmallVec<[T; 4]>;

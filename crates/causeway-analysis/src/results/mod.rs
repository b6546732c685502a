//! Match output parsing, cross-pattern deduplication, overlap resolution.

pub mod dedup;
pub mod overlap;
pub mod parser;
pub mod types;

pub use dedup::deduplicate;
pub use overlap::{filter_steiner_overlaps, remove_smaller_matches};
pub use parser::{parse_tree_matches, HeadCache, MatchOutputReader};
pub use types::{CausationKey, PossibleCausation};

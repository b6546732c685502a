//! # causeway-analysis
//!
//! Pattern-based causal connective tagging.
//!
//! - **graph**: Steiner trees and longest paths over weighted digraphs
//! - **sentence**: tokens, dependency/constituency parses, tree strings
//! - **patterns**: tree-query generation and the training-time pattern set
//! - **tagger**: work queue, matcher worker pool, output cache, progress
//! - **results**: match output parsing, deduplication, overlap resolution

pub mod graph;
pub mod patterns;
pub mod results;
pub mod sentence;
pub mod tagger;

pub use patterns::{Pattern, PatternGenerator, PatternSet};
pub use results::PossibleCausation;
pub use sentence::{CausationInstance, ParsedSentence, SentenceBuilder};
pub use tagger::{ConnectiveStage, ConnectiveTagger, TreeMatcher, TregexProcess};

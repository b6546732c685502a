//! Candidate causal relations produced by the connective tagger.

use std::sync::Arc;

use causeway_core::types::collections::SmallVec4;
use causeway_core::PatternId;

use crate::patterns::Pattern;

/// Key under which raw matches collapse: (connective, cause head, effect head).
pub type CausationKey = (SmallVec4<usize>, usize, usize);

/// A possible causal relation found by one or more patterns.
///
/// All token references are indices into the sentence at
/// `sentence_index` within the tagged batch.
#[derive(Debug, Clone, PartialEq)]
pub struct PossibleCausation {
    pub sentence_index: usize,
    /// Connective tokens, in the lemma order recorded with the pattern.
    pub connective: SmallVec4<usize>,
    pub cause: Vec<usize>,
    pub effect: Vec<usize>,
    /// Patterns that matched this relation, ascending by id, no repeats.
    pub matching_patterns: Vec<Arc<Pattern>>,
    /// Gold instance with the same connective, if any (pairwise only).
    pub true_instance: Option<usize>,
}

impl PossibleCausation {
    pub fn cause_head(&self) -> Option<usize> {
        self.cause.first().copied()
    }

    pub fn effect_head(&self) -> Option<usize> {
        self.effect.first().copied()
    }

    pub fn key(&self) -> CausationKey {
        (
            self.connective.clone(),
            self.cause_head().unwrap_or(usize::MAX),
            self.effect_head().unwrap_or(usize::MAX),
        )
    }

    pub fn pattern_ids(&self) -> Vec<PatternId> {
        self.matching_patterns.iter().map(|p| p.id).collect()
    }

    /// Whether any matching pattern goes through Steiner nodes.
    pub fn relies_on_steiner_nodes(&self) -> bool {
        self.matching_patterns.iter().any(|p| p.relies_on_steiner_nodes())
    }

    /// Add another candidate's patterns, keeping ids sorted and unique.
    pub fn merge_patterns(&mut self, other: &[Arc<Pattern>]) {
        self.matching_patterns.extend(other.iter().cloned());
        self.matching_patterns.sort_by_key(|p| p.id);
        self.matching_patterns.dedup_by_key(|p| p.id);
    }
}

//! Work units: one pattern plus the sentences it could possibly match.

use std::sync::Arc;

use causeway_core::constants::BYTES_PER_SENTENCE_FACTOR;
use causeway_core::types::collections::FxHashSet;
use rayon::prelude::*;
use tracing::debug;

use crate::patterns::{Pattern, PatternSet};
use crate::sentence::ParsedSentence;

#[derive(Debug, Clone)]
pub struct WorkUnit {
    pub pattern: Arc<Pattern>,
    /// Batch positions of candidate sentences, ascending.
    pub sentence_indices: Vec<usize>,
}

impl WorkUnit {
    /// Expected matcher output size for this unit.
    pub fn estimated_bytes(&self) -> f64 {
        estimate_output_bytes(self.sentence_indices.len())
    }
}

/// Rough output size for `sentences` trees: each tree prints its number
/// plus a few bytes of punctuation, inflated for matched node names.
pub fn estimate_output_bytes(sentences: usize) -> f64 {
    (0..sentences)
        .map(|i| BYTES_PER_SENTENCE_FACTOR * (((i + 1) as f64).log10().floor() + 3.0))
        .sum()
}

/// One unit per pattern whose connective lemmas all occur in at least one
/// sentence. Patterns with no candidate sentence produce no unit.
pub fn build_work_units(patterns: &PatternSet, sentences: &[ParsedSentence]) -> Vec<WorkUnit> {
    let lemma_sets: Vec<FxHashSet<&str>> = sentences
        .iter()
        .map(|s| s.tokens().iter().map(|t| t.lemma.as_str()).collect())
        .collect();

    let all: Vec<&Arc<Pattern>> = patterns.iter().collect();
    all.par_iter()
        .filter_map(|pattern| {
            let sentence_indices: Vec<usize> = lemma_sets
                .iter()
                .enumerate()
                .filter(|(_, lemmas)| pattern.connective_lemmas.iter().all(|l| lemmas.contains(l.as_str())))
                .map(|(i, _)| i)
                .collect();
            if sentence_indices.is_empty() {
                debug!(pattern = %pattern.query, "No candidate sentences; skipping pattern");
                return None;
            }
            Some(WorkUnit {
                pattern: Arc::clone(pattern),
                sentence_indices,
            })
        })
        .collect()
}

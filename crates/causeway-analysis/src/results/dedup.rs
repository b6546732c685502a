//! Collapsing duplicate matches within one sentence.

use std::collections::BTreeMap;

use super::types::{CausationKey, PossibleCausation};

/// Merge candidates with identical (connective, cause head, effect head),
/// unioning their matching patterns. The result is ordered by the first
/// connective token, then by the full key. Idempotent.
pub fn deduplicate(candidates: Vec<PossibleCausation>) -> Vec<PossibleCausation> {
    let mut by_key: BTreeMap<CausationKey, PossibleCausation> = BTreeMap::new();
    for candidate in candidates {
        match by_key.get_mut(&candidate.key()) {
            Some(existing) => existing.merge_patterns(&candidate.matching_patterns),
            None => {
                let mut candidate = candidate;
                let patterns = std::mem::take(&mut candidate.matching_patterns);
                candidate.merge_patterns(&patterns);
                by_key.insert(candidate.key(), candidate);
            }
        }
    }

    let mut merged: Vec<(CausationKey, PossibleCausation)> = by_key.into_iter().collect();
    merged.sort_by(|(a, _), (b, _)| {
        let first = |key: &CausationKey| key.0.first().copied().unwrap_or(usize::MAX);
        first(a).cmp(&first(b)).then_with(|| a.cmp(b))
    });
    merged.into_iter().map(|(_, candidate)| candidate).collect()
}

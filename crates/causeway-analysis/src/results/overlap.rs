//! Choosing among candidates whose connectives overlap.

use causeway_core::types::collections::FxHashMap;

use super::types::PossibleCausation;

/// Drop candidates that share a connective token with another candidate
/// and were found by a pattern passing through Steiner nodes.
///
/// A heuristic: when several matches claim the same word, the ones that
/// needed filler nodes to connect are usually wrong. Nothing is dropped
/// for words claimed by a single candidate.
pub fn filter_steiner_overlaps(candidates: Vec<PossibleCausation>) -> Vec<PossibleCausation> {
    let mut claims: FxHashMap<usize, usize> = FxHashMap::default();
    for candidate in &candidates {
        for &token in &candidate.connective {
            *claims.entry(token).or_insert(0) += 1;
        }
    }
    candidates
        .into_iter()
        .filter(|candidate| {
            let contested = candidate.connective.iter().any(|t| claims.get(t).copied().unwrap_or(0) > 1);
            !(contested && candidate.relies_on_steiner_nodes())
        })
        .collect()
}

/// Longest match wins: drop a candidate whose connective tokens are a
/// strict subset of another candidate's.
pub fn remove_smaller_matches(candidates: Vec<PossibleCausation>) -> Vec<PossibleCausation> {
    let keep: Vec<bool> = candidates
        .iter()
        .map(|small| {
            !candidates.iter().any(|large| {
                large.connective.len() > small.connective.len()
                    && small.connective.iter().all(|t| large.connective.contains(t))
            })
        })
        .collect();
    candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(candidate, keep)| keep.then_some(candidate))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use causeway_core::PatternId;
    use smallvec::SmallVec;

    use super::*;
    use crate::patterns::Pattern;

    fn candidate(connective: &[usize], query: &str) -> PossibleCausation {
        PossibleCausation {
            sentence_index: 0,
            connective: SmallVec::from_slice(connective),
            cause: vec![1],
            effect: vec![9],
            matching_patterns: vec![Arc::new(Pattern {
                id: PatternId(0),
                query: query.to_string(),
                connective_labels: vec![],
                connective_lemmas: vec![],
            })],
            true_instance: None,
        }
    }

    #[test]
    fn contested_steiner_matches_are_dropped() {
        let out = filter_steiner_overlaps(vec![
            candidate(&[3], "(/.*_[0-9]+/=steiner_0 < x)"),
            candidate(&[3], "(/.*_[0-9]+/=cause)"),
            candidate(&[5], "(/.*_[0-9]+/=steiner_0 < y)"),
        ]);
        assert_eq!(out.len(), 2);
        assert!(!out[0].relies_on_steiner_nodes());
        assert_eq!(out[1].connective.as_slice(), &[5]);
    }

    #[test]
    fn all_steiner_matches_on_a_word_are_dropped() {
        let out = filter_steiner_overlaps(vec![
            candidate(&[3], "=steiner_0"),
            candidate(&[3, 4], "=steiner_0"),
        ]);
        assert!(out.is_empty());
    }

    #[test]
    fn longer_connective_wins() {
        let out = remove_smaller_matches(vec![
            candidate(&[3], "a"),
            candidate(&[3, 4], "b"),
            candidate(&[6], "c"),
            candidate(&[3, 4], "d"),
        ]);
        let kept: Vec<&[usize]> = out.iter().map(|c| c.connective.as_slice()).collect();
        assert_eq!(kept, vec![&[3, 4][..], &[6][..], &[3, 4][..]]);
    }
}

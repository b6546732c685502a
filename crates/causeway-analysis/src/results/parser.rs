//! Reading the matcher's line-oriented output.
//!
//! For each input tree the matcher prints one header line, then one line per
//! requested capture per match, then a blank line. Captures come in batches
//! of `2 + k`: cause, effect, then the `k` connective captures.

use std::io::{self, BufRead};
use std::sync::Arc;

use causeway_core::types::collections::{FxHashMap, SmallVec4};
use causeway_core::PatternType;
use tracing::{debug, warn};

use super::types::PossibleCausation;
use crate::patterns::Pattern;
use crate::sentence::ParsedSentence;

/// Splits a matcher output stream into per-tree line groups.
pub struct MatchOutputReader<R> {
    reader: R,
    bytes_read: u64,
    line: String,
}

impl<R: BufRead> MatchOutputReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            bytes_read: 0,
            line: String::new(),
        }
    }

    /// Bytes consumed so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Capture lines for the next tree. Empty once the stream is exhausted.
    pub fn next_tree(&mut self) -> io::Result<Vec<String>> {
        let mut lines = Vec::new();
        // Header line.
        if self.read_line()? == 0 {
            return Ok(lines);
        }
        loop {
            if self.read_line()? == 0 {
                break;
            }
            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                break;
            }
            lines.push(trimmed.to_string());
        }
        Ok(lines)
    }

    fn read_line(&mut self) -> io::Result<usize> {
        self.line.clear();
        let n = self.reader.read_line(&mut self.line)?;
        self.bytes_read += n as u64;
        Ok(n)
    }
}

/// Constituent heads for the sentence currently being parsed.
///
/// Keyed by tree position. Switching to another sentence clears it.
#[derive(Debug, Default)]
pub struct HeadCache {
    sentence: Option<usize>,
    heads: FxHashMap<usize, Option<usize>>,
}

impl HeadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the cache at `sentence_index`, discarding stale entries.
    pub fn select(&mut self, sentence_index: usize) {
        if self.sentence != Some(sentence_index) {
            self.sentence = Some(sentence_index);
            self.heads.clear();
        }
    }

    fn head_at(&mut self, sentence: &ParsedSentence, position: usize) -> Option<usize> {
        *self.heads.entry(position).or_insert_with(|| {
            let span = sentence.constituency()?.span_at_position(position)?;
            sentence.get_head(&span)
        })
    }
}

/// Resolve one capture line to a token index.
fn resolve_line(
    line: &str,
    sentence: &ParsedSentence,
    pattern_type: PatternType,
    heads: &mut HeadCache,
) -> Option<usize> {
    match pattern_type {
        // `lemma_INDEX`
        PatternType::Dependency => {
            let index: usize = line.rsplit_once('_')?.1.trim().parse().ok()?;
            (index < sentence.len()).then_some(index)
        }
        // `TREE:POSITION`
        PatternType::Constituency => {
            let position: usize = line.split(':').nth(1)?.trim().parse().ok()?;
            heads.head_at(sentence, position)
        }
    }
}

/// Turn one tree's capture lines into candidates.
///
/// Incomplete or unresolvable batches and cause-equals-effect matches are
/// dropped.
pub fn parse_tree_matches(
    lines: &[String],
    pattern: &Arc<Pattern>,
    sentence: &ParsedSentence,
    sentence_index: usize,
    pattern_type: PatternType,
    heads: &mut HeadCache,
) -> Vec<PossibleCausation> {
    heads.select(sentence_index);
    let batch_size = 2 + pattern.connective_labels.len();
    let mut candidates = Vec::new();

    for batch in lines.chunks(batch_size) {
        if batch.len() < batch_size {
            warn!(pattern = %pattern.query, lines = ?lines, "Skipping incomplete match");
            continue;
        }
        let resolved: Option<Vec<usize>> = batch
            .iter()
            .map(|line| resolve_line(line, sentence, pattern_type, heads))
            .collect();
        let Some(tokens) = resolved else {
            warn!(pattern = %pattern.query, batch = ?batch, "Skipping invalid match");
            continue;
        };

        let (cause, effect) = (tokens[0], tokens[1]);
        if cause == effect {
            debug!(pattern = %pattern.query, token = cause, "Dropping match with identical arguments");
            continue;
        }

        let mut connective: SmallVec4<usize> = tokens[2..].iter().copied().collect();
        let lemma_rank = |token: &usize| {
            sentence
                .token(*token)
                .and_then(|t| pattern.connective_lemmas.iter().position(|l| *l == t.lemma))
                .unwrap_or(usize::MAX)
        };
        connective.sort_by_key(lemma_rank);

        let true_instance = sentence
            .causation_instances()
            .iter()
            .position(|i| i.is_pairwise() && i.connective.as_slice() == connective.as_slice());

        candidates.push(PossibleCausation {
            sentence_index,
            connective,
            cause: vec![cause],
            effect: vec![effect],
            matching_patterns: vec![Arc::clone(pattern)],
            true_instance,
        });
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::{CausationInstance, SentenceBuilder};
    use causeway_core::PatternId;

    fn sentence() -> ParsedSentence {
        let mut b = SentenceBuilder::new();
        let smoking = b.add_token("Smoking", "smoking", "NN");
        let causes = b.add_token("causes", "cause", "VBZ");
        let cancer = b.add_token("cancer", "cancer", "NN");
        b.add_edge(0, causes, "root")
            .add_edge(causes, smoking, "nsubj")
            .add_edge(causes, cancer, "dobj")
            .constituency("(ROOT (S (NP (NN Smoking)) (VP (VBZ causes) (NP (NN cancer)))))")
            .add_instance(CausationInstance::new(vec![causes], Some(vec![smoking]), Some(vec![cancer])));
        b.build().unwrap()
    }

    fn pattern(labels: usize, lemmas: &[&str]) -> Arc<Pattern> {
        Arc::new(Pattern {
            id: PatternId(0),
            query: "q".to_string(),
            connective_labels: (0..labels).map(|i| format!("connective_{i}")).collect(),
            connective_lemmas: lemmas.iter().map(|l| l.to_string()).collect(),
        })
    }

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn reader_splits_trees() {
        let output = "1:\nsmoking_1\ncancer_3\ncause_2\n\n2:\n\n3:\na_1\n";
        let mut reader = MatchOutputReader::new(output.as_bytes());
        assert_eq!(reader.next_tree().unwrap(), lines(&["smoking_1", "cancer_3", "cause_2"]));
        assert!(reader.next_tree().unwrap().is_empty());
        assert_eq!(reader.next_tree().unwrap(), lines(&["a_1"]));
        assert!(reader.next_tree().unwrap().is_empty());
        assert_eq!(reader.bytes_read(), output.len() as u64);
    }

    #[test]
    fn dependency_matches_link_gold_instance() {
        let s = sentence();
        let mut heads = HeadCache::new();
        let found = parse_tree_matches(
            &lines(&["smoking_1", "cancer_3", "cause_2"]),
            &pattern(1, &["cause"]),
            &s,
            4,
            PatternType::Dependency,
            &mut heads,
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sentence_index, 4);
        assert_eq!(found[0].cause_head(), Some(1));
        assert_eq!(found[0].effect_head(), Some(3));
        assert_eq!(found[0].connective.as_slice(), &[2]);
        assert_eq!(found[0].true_instance, Some(0));
    }

    #[test]
    fn incomplete_and_self_loop_batches_are_dropped() {
        let s = sentence();
        let mut heads = HeadCache::new();
        let found = parse_tree_matches(
            &lines(&["smoking_1", "smoking_1", "cause_2", "cancer_3", "smoking_1"]),
            &pattern(1, &["cause"]),
            &s,
            0,
            PatternType::Dependency,
            &mut heads,
        );
        assert!(found.is_empty());
        let garbage = parse_tree_matches(
            &lines(&["smoking", "cancer_3", "cause_99"]),
            &pattern(1, &["cause"]),
            &s,
            0,
            PatternType::Dependency,
            &mut heads,
        );
        assert!(garbage.is_empty());
    }

    #[test]
    fn connectives_follow_lemma_order() {
        let s = sentence();
        let mut heads = HeadCache::new();
        let found = parse_tree_matches(
            &lines(&["smoking_1", "cancer_3", "cancer_3", "cause_2"]),
            &pattern(2, &["cause", "cancer"]),
            &s,
            0,
            PatternType::Dependency,
            &mut heads,
        );
        assert_eq!(found[0].connective.as_slice(), &[2, 3]);
        assert_eq!(found[0].true_instance, None);
    }

    #[test]
    fn constituency_positions_resolve_to_heads() {
        let s = sentence();
        let mut heads = HeadCache::new();
        // 5 = leaf "Smoking", 6 = VP, 8 = leaf "causes".
        let found = parse_tree_matches(
            &lines(&["1:5", "1:6", "1:8"]),
            &pattern(1, &["cause"]),
            &s,
            0,
            PatternType::Constituency,
            &mut heads,
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].cause_head(), Some(1));
        assert_eq!(found[0].effect_head(), Some(2));
        assert_eq!(found[0].connective.as_slice(), &[2]);
    }
}

//! Training-time pattern extraction.

use tracing::{debug, info, warn};

use super::generator::PatternGenerator;
use super::types::PatternSet;
use crate::sentence::ParsedSentence;
use causeway_core::PatternType;

/// Build the deduplicated pattern set from gold annotations.
///
/// `trees` holds each sentence's preprocessed tree string, in order. In
/// dependency mode patterns are generated against the rewritten trees, so
/// they line up with what the matcher will later see. Only instances with
/// both arguments annotated contribute.
pub fn extract_patterns(
    sentences: &[ParsedSentence],
    trees: &[String],
    generator: &PatternGenerator,
) -> PatternSet {
    info!(sentences = sentences.len(), "Extracting patterns...");
    let mut patterns = PatternSet::new();

    for (index, (original, tree)) in sentences.iter().zip(trees).enumerate() {
        let rewritten;
        let sentence = match generator.pattern_type() {
            PatternType::Dependency => match original.substitute_dependency_tree(tree) {
                Ok(substituted) => {
                    rewritten = substituted;
                    &rewritten
                }
                Err(e) => {
                    warn!(sentence = index, error = %e, "Unreadable rewritten tree; skipping sentence");
                    continue;
                }
            },
            PatternType::Constituency => original,
        };

        for instance in sentence.causation_instances() {
            let (Some(cause), Some(effect)) = (&instance.cause, &instance.effect) else {
                continue;
            };
            if !instance.is_pairwise() {
                continue;
            }
            let Some(generated) = generator.generate(sentence, &instance.connective, cause, effect) else {
                continue;
            };

            let lemmas = instance
                .connective
                .iter()
                .filter_map(|&t| sentence.token(t).map(|token| token.lemma.clone()))
                .collect();
            let query = generated.query.clone();
            if let Some(id) = patterns.insert(generated, lemmas) {
                debug!(pattern = %query, id = %id, sentence = %sentence.original_text(), "New pattern");
            }
        }
    }

    info!(patterns = patterns.len(), "Done extracting patterns.");
    patterns
}

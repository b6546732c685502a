//! The connective stage: pattern training and candidate tagging.

use causeway_core::config::TaggerConfig;
use causeway_core::errors::TaggerError;
use causeway_core::PatternType;
use tracing::debug;
use xxhash_rust::xxh3::Xxh3;

use super::matcher::TreeMatcher;
use super::preprocess::preprocess_sentences;
use super::tagger::ConnectiveTagger;
use crate::patterns::{extract_patterns, PatternGenerator, PatternSet};
use crate::results::{deduplicate, PossibleCausation};
use crate::sentence::ParsedSentence;

/// Preprocessed trees kept from a training batch, keyed by the batch's
/// fingerprint.
#[derive(Debug)]
struct PendingTrees {
    fingerprint: u64,
    trees: Vec<String>,
}

/// Learned patterns, plus the preprocessed trees from the last training
/// batch so an immediate test pass over the same sentences can skip
/// preprocessing.
#[derive(Debug, Default)]
pub struct ConnectiveModel {
    patterns: PatternSet,
    pending_trees: Option<PendingTrees>,
}

impl ConnectiveModel {
    pub fn with_patterns(patterns: PatternSet) -> Self {
        Self {
            patterns,
            pending_trees: None,
        }
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn reset(&mut self) {
        self.patterns = PatternSet::new();
        self.pending_trees = None;
    }

    /// Trees saved by training, only if `sentences` is the batch they were
    /// built from.
    fn take_trees_for(&mut self, sentences: &[ParsedSentence], pattern_type: PatternType) -> Option<Vec<String>> {
        let pending = self.pending_trees.take()?;
        if pending.trees.len() != sentences.len()
            || batch_fingerprint(sentences, pattern_type) != Some(pending.fingerprint)
        {
            debug!("Batch differs from the training batch; preprocessing again");
            return None;
        }
        Some(pending.trees)
    }
}

/// Hash of every sentence's text and matcher tree, in batch order. `None`
/// when a tree cannot be serialized.
fn batch_fingerprint(sentences: &[ParsedSentence], pattern_type: PatternType) -> Option<u64> {
    let mut hasher = Xxh3::new();
    for sentence in sentences {
        let tree = sentence.to_tree_string(pattern_type).ok()?;
        hasher.update(sentence.original_text().as_bytes());
        hasher.update(b"\n");
        hasher.update(tree.as_bytes());
        hasher.update(b"\n");
    }
    Some(hasher.digest())
}

/// Trains a [`ConnectiveModel`] and uses it to fill in
/// `possible_causations` on test sentences.
pub struct ConnectiveStage<M: TreeMatcher> {
    config: TaggerConfig,
    matcher: M,
    generator: PatternGenerator,
    model: ConnectiveModel,
}

impl<M: TreeMatcher> ConnectiveStage<M> {
    pub fn new(config: TaggerConfig, matcher: M) -> Self {
        let generator = PatternGenerator::new(&config);
        Self {
            config,
            matcher,
            generator,
            model: ConnectiveModel::default(),
        }
    }

    pub fn with_model(mut self, model: ConnectiveModel) -> Self {
        self.model = model;
        self
    }

    pub fn model(&self) -> &ConnectiveModel {
        &self.model
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Extract patterns from the gold annotations of `sentences`.
    pub fn train(&mut self, sentences: &[ParsedSentence]) -> Result<&PatternSet, TaggerError> {
        let trees = preprocess_sentences(sentences, &self.config, &self.matcher)?;
        self.model.patterns = extract_patterns(sentences, &trees, &self.generator);
        self.model.pending_trees = batch_fingerprint(sentences, self.config.effective_pattern_type())
            .map(|fingerprint| PendingTrees { fingerprint, trees });
        Ok(&self.model.patterns)
    }

    /// Raw candidates per sentence, without deduplication.
    pub fn tag(&mut self, sentences: &[ParsedSentence]) -> Result<Vec<Vec<PossibleCausation>>, TaggerError> {
        let pattern_type = self.config.effective_pattern_type();
        let trees = match self.model.take_trees_for(sentences, pattern_type) {
            Some(trees) => trees,
            None => preprocess_sentences(sentences, &self.config, &self.matcher)?,
        };
        ConnectiveTagger::new(&self.config, &self.matcher).tag(&self.model.patterns, sentences, &trees)
    }

    /// Tag `sentences` and store each one's deduplicated candidates.
    pub fn test(&mut self, sentences: &mut [ParsedSentence]) -> Result<(), TaggerError> {
        let outputs = self.tag(sentences)?;
        for (sentence, candidates) in sentences.iter_mut().zip(outputs) {
            sentence.possible_causations = deduplicate(candidates);
        }
        Ok(())
    }
}

//! Sentence tokens.

use causeway_core::constants::{generalize_pos, ROOT_LABEL};
use serde::{Deserialize, Serialize};

/// One token of a parsed sentence. Index 0 is always the synthetic root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Position in the sentence, stable under tree rewriting.
    pub index: usize,
    pub text: String,
    pub lemma: String,
    /// Penn Treebank part-of-speech tag.
    pub pos: String,
}

impl Token {
    pub fn new(index: usize, text: impl Into<String>, lemma: impl Into<String>, pos: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            lemma: lemma.into(),
            pos: pos.into(),
        }
    }

    /// The synthetic root token every dependency tree hangs from.
    pub fn root() -> Self {
        Self::new(0, ROOT_LABEL, ROOT_LABEL, ROOT_LABEL)
    }

    pub fn is_root(&self) -> bool {
        self.index == 0
    }

    /// Coarse POS category (all verb tags become `VB`, etc.).
    pub fn generalized_pos(&self) -> &str {
        generalize_pos(&self.pos)
    }

    pub fn is_verb(&self) -> bool {
        self.generalized_pos() == "VB"
    }
}

/// Escape a word or tag for bracketed tree notation.
pub(crate) fn tree_escape(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for ch in word.chars() {
        match ch {
            '(' => out.push_str("-LRB-"),
            ')' => out.push_str("-RRB-"),
            c if c.is_whitespace() => out.push('_'),
            c => out.push(c),
        }
    }
    out
}

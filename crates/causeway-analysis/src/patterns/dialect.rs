//! How nodes and edges are written in each tree representation.

use causeway_core::constants::{
    generalize_pos, PASSIVE_SUBJECT_LABELS, SUBJECT_LABELS, UNSPECIFIED_DEP_LABEL,
};
use causeway_core::types::collections::FxHashMap;

use crate::graph::WeightedDigraph;
use crate::sentence::parsed::tree_lemma;
use crate::sentence::{ConstituencyTree, ParsedSentence};

/// What a tree node stands for in the annotated instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Position within the connective.
    Connective(usize),
    Steiner,
    Cause,
    Effect,
}

/// Rendering rules for one tree representation.
pub trait PatternDialect {
    /// Reverse the longest path when the effect comes before the cause.
    const NORMALIZES_DIRECTION: bool;
    /// Emit `__=cause == =connective_i` when an argument head is a connective word.
    const LINKS_ARGUMENTS_TO_CONNECTIVES: bool;

    fn node_pattern(&self, node: usize, role: NodeRole, name: &str) -> String;

    /// Extend `pattern` (ending at `start`) with an open relation to `end`.
    /// The returned pattern leaves one parenthesis unclosed. A fragment that
    /// could not be embedded comes back separately.
    fn add_edge(
        &self,
        tree: &WeightedDigraph,
        pattern: &str,
        node_pattern: &str,
        start: usize,
        end: usize,
        names: &FxHashMap<usize, String>,
    ) -> (String, Option<String>);
}

/// Dependency trees serialized as `(lemma_INDEX deplabel POS child...)`.
pub struct DependencyDialect<'a> {
    pub sentence: &'a ParsedSentence,
}

impl DependencyDialect<'_> {
    /// Alternation of first-child label constraints for an arc.
    fn edge_pattern(&self, head: usize, dependent: usize) -> String {
        let label = self
            .sentence
            .edge_label(head, dependent)
            .unwrap_or(UNSPECIFIED_DEP_LABEL);
        let mut options: Vec<String> = if SUBJECT_LABELS.contains(&label) {
            SUBJECT_LABELS.iter().map(|l| format!("<1 {l}")).collect()
        } else if PASSIVE_SUBJECT_LABELS.contains(&label) {
            PASSIVE_SUBJECT_LABELS.iter().map(|l| format!("<1 {l}")).collect()
        } else {
            vec![format!("<1 {label}")]
        };
        if label != UNSPECIFIED_DEP_LABEL {
            options.push(format!("<1 {UNSPECIFIED_DEP_LABEL}"));
        }
        format!("[{}]", options.join(" | "))
    }
}

impl PatternDialect for DependencyDialect<'_> {
    const NORMALIZES_DIRECTION: bool = true;
    const LINKS_ARGUMENTS_TO_CONNECTIVES: bool = true;

    fn node_pattern(&self, node: usize, role: NodeRole, name: &str) -> String {
        match (role, self.sentence.token(node)) {
            (NodeRole::Connective(_), Some(token)) => format!(
                "/^{}_[0-9]+$/={name} <2 /^{}.*/",
                escape_regex_literal(&tree_lemma(token)),
                token.generalized_pos()
            ),
            _ => format!("/.*_[0-9]+/={name}"),
        }
    }

    fn add_edge(
        &self,
        tree: &WeightedDigraph,
        pattern: &str,
        node_pattern: &str,
        start: usize,
        end: usize,
        names: &FxHashMap<usize, String>,
    ) -> (String, Option<String>) {
        if tree.weight(start, end) > tree.weight(end, start) {
            let edge = self.edge_pattern(start, end);
            return (format!("{pattern} < ({node_pattern} {edge}"), None);
        }
        let edge = self.edge_pattern(end, start);
        // Opposing arrows meeting at one node: the label constraint for
        // `start` is already taken, so attach this one by back-reference.
        if pattern.ends_with(']') {
            let fragment = names.get(&end).map(|name| format!("~{name} {edge}"));
            (format!("{pattern} > ({node_pattern}"), fragment)
        } else {
            (format!("{pattern} {edge} > ({node_pattern}"), None)
        }
    }
}

/// Phrase-structure trees.
pub struct ConstituencyDialect<'a> {
    pub tree: &'a ConstituencyTree,
}

impl PatternDialect for ConstituencyDialect<'_> {
    const NORMALIZES_DIRECTION: bool = false;
    const LINKS_ARGUMENTS_TO_CONNECTIVES: bool = false;

    fn node_pattern(&self, node: usize, role: NodeRole, name: &str) -> String {
        let label = self.tree.label(node).unwrap_or_default();
        match role {
            NodeRole::Connective(_) => format!(
                "(/^{}.*/={name} < {})",
                generalize_pos(label),
                self.tree.word(node).unwrap_or_default()
            ),
            NodeRole::Steiner => format!("__={name}"),
            NodeRole::Cause | NodeRole::Effect => format!("{label}={name}"),
        }
    }

    fn add_edge(
        &self,
        tree: &WeightedDigraph,
        pattern: &str,
        node_pattern: &str,
        start: usize,
        end: usize,
        _names: &FxHashMap<usize, String>,
    ) -> (String, Option<String>) {
        let relation = if tree.has_edge(start, end) { "<" } else { ">" };
        (format!("{pattern} {relation} ({node_pattern}"), None)
    }
}

/// Escape text for use inside a `/.../` regex literal.
fn escape_regex_literal(text: &str) -> String {
    regex::escape(text).replace('/', "\\/")
}

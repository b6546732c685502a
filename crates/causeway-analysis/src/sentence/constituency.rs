//! Constituency trees.
//!
//! Nodes live in an arena in preorder, leaves included. That order is the
//! one the tree matcher uses for `-x` position output (1-based). The
//! non-leaf nodes, also in preorder, are the "subtrees" the pattern
//! generator builds its graph over.

use std::fmt;

use causeway_core::errors::SentenceError;

use super::bracketed::{parse_bracketed, Bracketed};
use crate::graph::{PathTable, WeightedDigraph};

#[derive(Debug, Clone)]
struct ConstituentNode {
    label: String,
    parent: Option<usize>,
    children: Vec<usize>,
    /// Token index for leaves (leaf order + 1, skipping ROOT).
    token: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ConstituencyTree {
    nodes: Vec<ConstituentNode>,
    /// Arena ids of non-leaf nodes, preorder.
    subtrees: Vec<usize>,
    /// Arena id to subtree index.
    subtree_index: Vec<Option<usize>>,
    /// Arena ids of leaves, in token order.
    leaves: Vec<usize>,
    graph: WeightedDigraph,
    paths: PathTable,
}

impl ConstituencyTree {
    pub fn parse(input: &str) -> Result<Self, SentenceError> {
        let tree = parse_bracketed(input)?;
        if tree.is_leaf() {
            return Err(SentenceError::MalformedTree {
                offset: 0,
                message: "constituency tree has no root node".to_string(),
            });
        }
        Ok(Self::from_bracketed(&tree))
    }

    pub fn from_bracketed(tree: &Bracketed) -> Self {
        let mut nodes = Vec::new();
        let mut leaves = Vec::new();
        push_node(tree, None, &mut nodes, &mut leaves);

        let mut subtrees = Vec::new();
        let mut subtree_index = vec![None; nodes.len()];
        for (id, node) in nodes.iter().enumerate() {
            if node.token.is_none() {
                subtree_index[id] = Some(subtrees.len());
                subtrees.push(id);
            }
        }

        let mut graph = WeightedDigraph::with_nodes(subtrees.len());
        for (parent_sub, &parent_id) in subtrees.iter().enumerate() {
            for &child in &nodes[parent_id].children {
                if let Some(child_sub) = subtree_index[child] {
                    graph.add_edge(parent_sub, child_sub, 1.0);
                }
            }
        }
        let paths = PathTable::compute(&graph, false);

        Self {
            nodes,
            subtrees,
            subtree_index,
            leaves,
            graph,
            paths,
        }
    }

    /// Number of words.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn subtree_count(&self) -> usize {
        self.subtrees.len()
    }

    /// Parent-to-child graph over subtree indices.
    pub fn graph(&self) -> &WeightedDigraph {
        &self.graph
    }

    /// Undirected shortest paths over [`Self::graph`].
    pub fn paths(&self) -> &PathTable {
        &self.paths
    }

    pub fn label(&self, subtree: usize) -> Option<&str> {
        self.subtrees.get(subtree).map(|&id| self.nodes[id].label.as_str())
    }

    /// The word under a preterminal subtree.
    pub fn word(&self, subtree: usize) -> Option<&str> {
        let &id = self.subtrees.get(subtree)?;
        match self.nodes[id].children.as_slice() {
            [child] if self.nodes[*child].token.is_some() => Some(self.nodes[*child].label.as_str()),
            _ => None,
        }
    }

    /// Subtree index of the POS node directly above a token's word.
    pub fn preterminal_of(&self, token: usize) -> Option<usize> {
        let leaf = *self.leaves.get(token.checked_sub(1)?)?;
        self.nodes[leaf].parent.and_then(|p| self.subtree_index[p])
    }

    /// Smallest subtree spanning all given tokens. A single token maps to
    /// its preterminal.
    pub fn node_for_tokens(&self, tokens: &[usize]) -> Option<usize> {
        let leaves: Vec<usize> = tokens
            .iter()
            .filter_map(|&t| t.checked_sub(1).and_then(|i| self.leaves.get(i)).copied())
            .collect();
        let (&first, rest) = leaves.split_first()?;
        let mut candidate = self.nodes[first].parent;
        while let Some(id) = candidate {
            if rest.iter().all(|&leaf| self.is_ancestor(id, leaf)) {
                return self.subtree_index[id];
            }
            candidate = self.nodes[id].parent;
        }
        None
    }

    /// Tokens under a subtree, ascending.
    pub fn span(&self, subtree: usize) -> Vec<usize> {
        self.subtrees
            .get(subtree)
            .map(|&id| self.tokens_under(id))
            .unwrap_or_default()
    }

    /// Tokens under the node at a 1-based preorder position (leaves
    /// counted), as reported by the matcher's `-x` output.
    pub fn span_at_position(&self, position: usize) -> Option<Vec<usize>> {
        let id = position.checked_sub(1)?;
        (id < self.nodes.len()).then(|| self.tokens_under(id))
    }

    fn tokens_under(&self, id: usize) -> Vec<usize> {
        let mut tokens = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            if let Some(token) = self.nodes[node].token {
                tokens.push(token);
            }
            stack.extend(self.nodes[node].children.iter().rev());
        }
        tokens.sort_unstable();
        tokens
    }

    fn is_ancestor(&self, ancestor: usize, mut node: usize) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.nodes[node].parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn write_node(&self, id: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.nodes[id];
        if node.token.is_some() {
            return f.write_str(&node.label);
        }
        write!(f, "({}", node.label)?;
        for &child in &node.children {
            f.write_str(" ")?;
            self.write_node(child, f)?;
        }
        f.write_str(")")
    }
}

/// Single-line bracketed serialization.
impl fmt::Display for ConstituencyTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(0, f)
    }
}

fn push_node(
    tree: &Bracketed,
    parent: Option<usize>,
    nodes: &mut Vec<ConstituentNode>,
    leaves: &mut Vec<usize>,
) -> usize {
    let id = nodes.len();
    let token = if tree.is_leaf() {
        leaves.push(id);
        Some(leaves.len())
    } else {
        None
    };
    nodes.push(ConstituentNode {
        label: tree.label().to_string(),
        parent,
        children: Vec::new(),
        token,
    });
    for child in tree.children() {
        let child_id = push_node(child, Some(id), nodes, leaves);
        nodes[id].children.push(child_id);
    }
    id
}

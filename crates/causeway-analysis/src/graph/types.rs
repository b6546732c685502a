//! Weighted directed graph over dense `usize` node ids.
//!
//! Node `i` is token `i` (dependency mode) or preorder node `i`
//! (constituency mode), so ids survive graph edits unchanged.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// Directed graph with `f64` edge weights. A missing edge has weight 0.
#[derive(Debug, Clone, Default)]
pub struct WeightedDigraph {
    graph: DiGraph<(), f64>,
}

impl WeightedDigraph {
    /// Create a graph with `n` nodes and no edges.
    pub fn with_nodes(n: usize) -> Self {
        let mut graph = DiGraph::with_capacity(n, n);
        for _ in 0..n {
            graph.add_node(());
        }
        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add or overwrite the edge `from -> to`. Grows the node set if needed.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64) {
        while self.graph.node_count() <= from.max(to) {
            self.graph.add_node(());
        }
        self.graph
            .update_edge(NodeIndex::new(from), NodeIndex::new(to), weight);
    }

    /// Weight of `from -> to`, or 0.0 when there is no such edge.
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        if from >= self.node_count() || to >= self.node_count() {
            return 0.0;
        }
        self.graph
            .find_edge(NodeIndex::new(from), NodeIndex::new(to))
            .map(|e| self.graph[e])
            .unwrap_or(0.0)
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        from < self.node_count()
            && to < self.node_count()
            && self
                .graph
                .find_edge(NodeIndex::new(from), NodeIndex::new(to))
                .is_some()
    }

    /// Whether `node` has any incoming or outgoing edge.
    pub fn has_incident_edges(&self, node: usize) -> bool {
        if node >= self.node_count() {
            return false;
        }
        let idx = NodeIndex::new(node);
        self.graph
            .neighbors_directed(idx, Direction::Outgoing)
            .next()
            .is_some()
            || self
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .next()
                .is_some()
    }

    /// All edges as `(from, to, weight)`, sorted by `(from, to)`.
    pub fn edges(&self) -> Vec<(usize, usize, f64)> {
        let mut edges: Vec<_> = self
            .graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
            .collect();
        edges.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        edges
    }

    /// Targets of edges leaving `node`, ascending.
    pub fn out_neighbors(&self, node: usize) -> Vec<usize> {
        self.directed_neighbors(node, Direction::Outgoing)
    }

    /// Sources of edges entering `node`, ascending.
    pub fn in_neighbors(&self, node: usize) -> Vec<usize> {
        self.directed_neighbors(node, Direction::Incoming)
    }

    fn directed_neighbors(&self, node: usize, direction: Direction) -> Vec<usize> {
        if node >= self.node_count() {
            return Vec::new();
        }
        let mut out: Vec<usize> = self
            .graph
            .neighbors_directed(NodeIndex::new(node), direction)
            .map(|n| n.index())
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Neighbors ignoring direction, ascending, each with the cheaper of
    /// the two directed weights.
    pub fn undirected_neighbors(&self, node: usize) -> Vec<(usize, f64)> {
        if node >= self.node_count() {
            return Vec::new();
        }
        let idx = NodeIndex::new(node);
        let mut out: Vec<(usize, f64)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target().index(), *e.weight()))
            .chain(
                self.graph
                    .edges_directed(idx, Direction::Incoming)
                    .map(|e| (e.source().index(), *e.weight())),
            )
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
        out.dedup_by_key(|(n, _)| *n);
        out
    }

    /// Cheapest weight between `a` and `b` in either direction.
    pub fn undirected_weight(&self, a: usize, b: usize) -> Option<f64> {
        match (self.has_edge(a, b), self.has_edge(b, a)) {
            (true, true) => Some(self.weight(a, b).min(self.weight(b, a))),
            (true, false) => Some(self.weight(a, b)),
            (false, true) => Some(self.weight(b, a)),
            (false, false) => None,
        }
    }
}

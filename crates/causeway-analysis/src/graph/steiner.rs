//! Steiner tree approximation (Kou, Markowsky & Berman 1981).
//!
//! 1. Metric closure over the terminals using precomputed shortest paths
//! 2. Minimum spanning tree of the closure
//! 3. Expand each closure edge back into its shortest path
//! 4. Minimum spanning tree of the expanded subgraph
//! 5. Repeatedly prune leaves that are not terminals
//!
//! The result is within a factor of 2 of the optimal tree weight.

use std::collections::BTreeSet;

use causeway_core::types::collections::{FxHashMap, FxHashSet};
use petgraph::unionfind::UnionFind;

use super::shortest_paths::PathTable;
use super::types::WeightedDigraph;

/// Approximate minimum subtree connecting a set of terminal nodes.
#[derive(Debug, Clone, Default)]
pub struct SteinerTree {
    /// Every node in the tree, ascending.
    pub nodes: Vec<usize>,
    /// Requested terminals, ascending and deduplicated.
    pub terminals: Vec<usize>,
    /// Non-terminal nodes the tree passes through, ascending.
    pub steiner_nodes: Vec<usize>,
    /// Tree edges with their original direction(s) and weights.
    pub graph: WeightedDigraph,
}

impl SteinerTree {
    pub fn contains(&self, node: usize) -> bool {
        self.nodes.binary_search(&node).is_ok()
    }

    pub fn is_steiner_node(&self, node: usize) -> bool {
        self.steiner_nodes.binary_search(&node).is_ok()
    }
}

/// Compute a Steiner tree over `graph` spanning `terminals`.
///
/// `paths` must have been computed from `graph`; its directedness decides
/// whether arrows may be traversed backwards. Terminals outside the graph
/// are ignored. Terminals in different components yield a forest.
pub fn steiner_tree(graph: &WeightedDigraph, terminals: &[usize], paths: &PathTable) -> SteinerTree {
    let n = graph.node_count();
    let mut terms: Vec<usize> = terminals.iter().copied().filter(|&t| t < n).collect();
    terms.sort_unstable();
    terms.dedup();

    // Steps 1-2: MST over the terminal metric closure.
    let mut closure = Vec::new();
    for (i, &a) in terms.iter().enumerate() {
        for &b in &terms[i + 1..] {
            if let Some(cost) = paths.cost(a, b) {
                closure.push((cost, a, b));
            }
        }
    }
    let closure_mst = kruskal(n, closure);

    // Step 3: expand closure edges into graph edges.
    let mut expanded: BTreeSet<(usize, usize)> = BTreeSet::new();
    for (a, b) in closure_mst {
        let Some(path) = paths.path(a, b) else { continue };
        for pair in path.windows(2) {
            expanded.insert((pair[0].min(pair[1]), pair[0].max(pair[1])));
        }
    }

    // Step 4: MST of the expanded subgraph.
    let weighted: Vec<(f64, usize, usize)> = expanded
        .into_iter()
        .filter_map(|(a, b)| graph.undirected_weight(a, b).map(|w| (w, a, b)))
        .collect();
    let mut tree_edges: BTreeSet<(usize, usize)> = kruskal(n, weighted).into_iter().collect();

    // Step 5: prune non-terminal leaves until none remain.
    let terminal_set: FxHashSet<usize> = terms.iter().copied().collect();
    loop {
        let mut degree: FxHashMap<usize, usize> = FxHashMap::default();
        for &(a, b) in &tree_edges {
            *degree.entry(a).or_insert(0) += 1;
            *degree.entry(b).or_insert(0) += 1;
        }
        let before = tree_edges.len();
        tree_edges.retain(|&(a, b)| {
            let leaf = |x: usize| degree[&x] == 1 && !terminal_set.contains(&x);
            !(leaf(a) || leaf(b))
        });
        if tree_edges.len() == before {
            break;
        }
    }

    let mut tree_graph = WeightedDigraph::with_nodes(n);
    let mut nodes: BTreeSet<usize> = terms.iter().copied().collect();
    for &(a, b) in &tree_edges {
        if graph.has_edge(a, b) {
            tree_graph.add_edge(a, b, graph.weight(a, b));
        }
        if graph.has_edge(b, a) {
            tree_graph.add_edge(b, a, graph.weight(b, a));
        }
        nodes.insert(a);
        nodes.insert(b);
    }

    let nodes: Vec<usize> = nodes.into_iter().collect();
    let steiner_nodes = nodes
        .iter()
        .copied()
        .filter(|node| !terminal_set.contains(node))
        .collect();

    SteinerTree {
        nodes,
        terminals: terms,
        steiner_nodes,
        graph: tree_graph,
    }
}

/// Kruskal's MST (or forest) over undirected weighted edges between
/// nodes `0..n`. Ties are broken by endpoint ids so the result is
/// deterministic.
fn kruskal(n: usize, mut edges: Vec<(f64, usize, usize)>) -> Vec<(usize, usize)> {
    edges.sort_by(|x, y| {
        x.0.total_cmp(&y.0)
            .then(x.1.cmp(&y.1))
            .then(x.2.cmp(&y.2))
    });

    let mut components = UnionFind::<usize>::new(n);
    edges
        .into_iter()
        .filter(|&(_, a, b)| components.union(a, b))
        .map(|(_, a, b)| (a.min(b), a.max(b)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Star: 0 is the hub, 1..=3 are spokes, 4 dangles off 3.
    fn star() -> WeightedDigraph {
        let mut g = WeightedDigraph::with_nodes(5);
        g.add_edge(0, 1, 1.0);
        g.add_edge(0, 2, 1.0);
        g.add_edge(0, 3, 1.0);
        g.add_edge(3, 4, 1.0);
        g
    }

    #[test]
    fn hub_becomes_steiner_node() {
        let g = star();
        let paths = PathTable::compute(&g, false);
        let tree = steiner_tree(&g, &[1, 2, 4], &paths);
        assert_eq!(tree.nodes, vec![0, 1, 2, 3, 4]);
        assert_eq!(tree.steiner_nodes, vec![0, 3]);
        assert_eq!(tree.graph.edge_count(), 4);
    }

    #[test]
    fn tree_keeps_original_directions() {
        let g = star();
        let paths = PathTable::compute(&g, false);
        let tree = steiner_tree(&g, &[1, 2], &paths);
        assert!(tree.graph.has_edge(0, 1));
        assert!(!tree.graph.has_edge(1, 0));
        assert_eq!(tree.steiner_nodes, vec![0]);
    }

    #[test]
    fn unused_branches_are_pruned() {
        let g = star();
        let paths = PathTable::compute(&g, false);
        let tree = steiner_tree(&g, &[0, 1], &paths);
        assert_eq!(tree.nodes, vec![0, 1]);
        assert!(tree.steiner_nodes.is_empty());
        assert!(!tree.contains(4));
    }

    #[test]
    fn single_terminal_has_no_edges() {
        let g = star();
        let paths = PathTable::compute(&g, false);
        let tree = steiner_tree(&g, &[2, 2], &paths);
        assert_eq!(tree.nodes, vec![2]);
        assert_eq!(tree.graph.edge_count(), 0);
    }

    #[test]
    fn disconnected_terminals_form_forest() {
        let mut g = WeightedDigraph::with_nodes(4);
        g.add_edge(0, 1, 1.0);
        g.add_edge(2, 3, 1.0);
        let paths = PathTable::compute(&g, false);
        let tree = steiner_tree(&g, &[0, 1, 3], &paths);
        assert_eq!(tree.nodes, vec![0, 1, 3]);
        assert_eq!(tree.graph.edge_count(), 1);
    }

    #[test]
    fn kruskal_breaks_ties_by_endpoint_ids() {
        // Equal-cost triangle plus a heavier edge that closes no cycle.
        let edges = vec![(1.0, 1, 2), (1.0, 0, 2), (1.0, 0, 1), (3.0, 3, 2)];
        assert_eq!(kruskal(4, edges), vec![(0, 1), (0, 2), (2, 3)]);
    }
}

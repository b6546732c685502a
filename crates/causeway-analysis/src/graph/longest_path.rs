//! Longest simple path through a tree.

use super::types::WeightedDigraph;

/// Longest path in the tree containing `seed`, edge directions ignored.
///
/// Finds the node farthest from `seed`, then the node farthest from that
/// one; the path between the two is a longest path. Among equally distant
/// nodes the lowest id wins. A seed with no edges yields `[seed]`.
pub fn longest_path_in_tree(tree: &WeightedDigraph, seed: usize) -> Vec<usize> {
    let (dist, _) = distances_from(tree, seed);
    let start = farthest(&dist).unwrap_or(seed);
    let (dist, parent) = distances_from(tree, start);
    let end = farthest(&dist).unwrap_or(start);

    let mut path = vec![end];
    let mut current = end;
    while current != start {
        match parent.get(current).copied().flatten() {
            Some(p) => {
                path.push(p);
                current = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Weighted distances from `source` over the tree, with DFS parents.
fn distances_from(tree: &WeightedDigraph, source: usize) -> (Vec<Option<f64>>, Vec<Option<usize>>) {
    let n = tree.node_count().max(source + 1);
    let mut dist = vec![None; n];
    let mut parent = vec![None; n];
    dist[source] = Some(0.0);

    let mut stack = vec![source];
    while let Some(node) = stack.pop() {
        let base = dist[node].unwrap_or(0.0);
        for (next, weight) in tree.undirected_neighbors(node) {
            if dist[next].is_none() {
                dist[next] = Some(base + weight);
                parent[next] = Some(node);
                stack.push(next);
            }
        }
    }
    (dist, parent)
}

fn farthest(dist: &[Option<f64>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (node, d) in dist.iter().enumerate() {
        if let Some(d) = *d {
            if best.map_or(true, |(_, b)| d > b) {
                best = Some((node, d));
            }
        }
    }
    best.map(|(node, _)| node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_diameter_from_interior_seed() {
        // 1 <- 0 -> 2 -> 3
        let mut g = WeightedDigraph::with_nodes(4);
        g.add_edge(0, 1, 1.0);
        g.add_edge(0, 2, 1.0);
        g.add_edge(2, 3, 1.0);
        assert_eq!(longest_path_in_tree(&g, 0), vec![3, 2, 0, 1]);
        assert_eq!(longest_path_in_tree(&g, 2), vec![1, 0, 2, 3]);
    }

    #[test]
    fn isolated_seed_is_its_own_path() {
        let g = WeightedDigraph::with_nodes(3);
        assert_eq!(longest_path_in_tree(&g, 1), vec![1]);
    }
}

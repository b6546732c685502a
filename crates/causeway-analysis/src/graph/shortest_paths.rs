//! All-pairs shortest paths with predecessor tables.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::types::WeightedDigraph;

/// Precomputed shortest-path costs and predecessors between all node pairs.
///
/// `predecessor(s, t)` is the node before `t` on the chosen shortest path
/// from `s`. Ties are broken toward lower node ids so tables are stable.
#[derive(Debug, Clone, Default)]
pub struct PathTable {
    costs: Vec<Vec<f64>>,
    predecessors: Vec<Vec<Option<usize>>>,
}

impl PathTable {
    /// Run Dijkstra from every node. With `directed == false` edges are
    /// traversable both ways at the cheaper of their directed weights.
    pub fn compute(graph: &WeightedDigraph, directed: bool) -> Self {
        let n = graph.node_count();
        let mut costs = Vec::with_capacity(n);
        let mut predecessors = Vec::with_capacity(n);
        for source in 0..n {
            let (c, p) = dijkstra(graph, source, directed);
            costs.push(c);
            predecessors.push(p);
        }
        Self {
            costs,
            predecessors,
        }
    }

    pub fn node_count(&self) -> usize {
        self.costs.len()
    }

    /// Shortest-path cost, or `None` when unreachable.
    pub fn cost(&self, from: usize, to: usize) -> Option<f64> {
        self.costs
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .filter(|c| c.is_finite())
    }

    pub fn predecessor(&self, from: usize, to: usize) -> Option<usize> {
        self.predecessors
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .flatten()
    }

    /// Node sequence of the shortest path from `from` to `to`, both inclusive.
    pub fn path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        self.cost(from, to)?;
        let mut path = vec![to];
        let mut current = to;
        while current != from {
            current = self.predecessor(from, current)?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

#[derive(Debug, Clone, Copy)]
struct DijkstraState {
    cost: f64,
    node: usize,
}

impl PartialEq for DijkstraState {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DijkstraState {}

impl PartialOrd for DijkstraState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DijkstraState {
    // Reversed for min-heap behavior; lower node id wins ties.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

fn dijkstra(
    graph: &WeightedDigraph,
    source: usize,
    directed: bool,
) -> (Vec<f64>, Vec<Option<usize>>) {
    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev = vec![None; n];
    let mut heap = BinaryHeap::new();

    dist[source] = 0.0;
    heap.push(DijkstraState {
        cost: 0.0,
        node: source,
    });

    while let Some(DijkstraState { cost, node }) = heap.pop() {
        if cost > dist[node] {
            continue;
        }

        let neighbors: Vec<(usize, f64)> = if directed {
            graph
                .out_neighbors(node)
                .into_iter()
                .map(|next| (next, graph.weight(node, next)))
                .collect()
        } else {
            graph.undirected_neighbors(node)
        };

        for (next, weight) in neighbors {
            let next_cost = cost + weight;
            if next_cost < dist[next] {
                dist[next] = next_cost;
                prev[next] = Some(node);
                heap.push(DijkstraState {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    (dist, prev)
}

//! Graph utilities for pattern generation. Pure algorithms, no I/O.
//!
//! - **Types** : weighted directed graph keyed by dense node ids
//! - **Shortest paths** : all-pairs Dijkstra with predecessor tables
//! - **Steiner** : Kou-Markowsky-Berman Steiner tree approximation
//! - **Longest path** : diameter path of a tree from a seed node

pub mod longest_path;
pub mod shortest_paths;
pub mod steiner;
pub mod types;

pub use longest_path::longest_path_in_tree;
pub use shortest_paths::PathTable;
pub use steiner::{steiner_tree, SteinerTree};
pub use types::WeightedDigraph;

//! Classic graph algorithms running on [`Graph`](crate::graph::Graph).
//!
//! - [`bellman_ford`] - single-source shortest paths with negative weights,
//!   recording a snapshot of every step
//! - [`dijkstra`] - single-source shortest paths for non-negative weights
//! - [`floyd_warshall`] - all-pairs shortest paths
//! - [`BinaryMinHeap`] - the priority queue behind Dijkstra
//! - [`sort`] - textbook sorting routines
//!
//! Edge weights are taken from [`Edge::weight`](crate::graph::Edge::weight).
//! Undirected edges are traversable both ways through their mirror record.

mod floyd_warshall;
mod heap;
mod shortest_path;
pub mod sort;

pub use floyd_warshall::{AllPairsShortestPaths, floyd_warshall};
pub use heap::BinaryMinHeap;
pub use shortest_path::{ShortestPaths, bellman_ford, dijkstra};

use thiserror::Error;

use trellis_core::identifier::Id;

/// Errors reported by the graph algorithms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlgorithmError {
    #[error("node `{0}` is not in the graph")]
    UnknownNode(Id),

    #[error("the graph contains a negative-weight cycle")]
    NegativeCycle,

    #[error("edge `{from}` -> `{to}` has negative weight {weight}")]
    NegativeWeight { from: Id, to: Id, weight: f64 },

    #[error("there is no path from `{from}` to `{to}`")]
    NoPath { from: Id, to: Id },
}

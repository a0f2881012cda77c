//! All-pairs shortest paths.

use indexmap::IndexSet;
use log::debug;

use trellis_core::identifier::Id;

use super::AlgorithmError;
use crate::graph::Graph;

/// Distance matrix plus the intermediate node of every improved path.
#[derive(Debug, Clone, PartialEq)]
pub struct AllPairsShortestPaths {
    ids: IndexSet<Id>,
    dist: Vec<Vec<f64>>,
    next: Vec<Vec<Option<usize>>>,
}

impl AllPairsShortestPaths {
    /// Shortest distance from `from` to `to`.
    ///
    /// `None` if either id is not in the graph, infinity if `to` is
    /// unreachable.
    pub fn distance(&self, from: impl Into<Id>, to: impl Into<Id>) -> Option<f64> {
        let i = self.ids.get_index_of(&from.into())?;
        let j = self.ids.get_index_of(&to.into())?;
        Some(self.dist[i][j])
    }

    /// The node sequence of a shortest path, both endpoints included.
    ///
    /// # Errors
    ///
    /// [`AlgorithmError::UnknownNode`] for ids not in the graph,
    /// [`AlgorithmError::NoPath`] when `to` is unreachable from `from`.
    pub fn path(&self, from: impl Into<Id>, to: impl Into<Id>) -> Result<Vec<Id>, AlgorithmError> {
        let (from, to) = (from.into(), to.into());
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        if self.dist[i][j].is_infinite() {
            return Err(AlgorithmError::NoPath { from, to });
        }

        let mut path = vec![from];
        if i != j {
            self.intermediates(i, j, &mut path);
            path.push(to);
        }
        Ok(path)
    }

    fn index_of(&self, id: Id) -> Result<usize, AlgorithmError> {
        self.ids
            .get_index_of(&id)
            .ok_or(AlgorithmError::UnknownNode(id))
    }

    fn intermediates(&self, i: usize, j: usize, path: &mut Vec<Id>) {
        if let Some(k) = self.next[i][j] {
            self.intermediates(i, k, path);
            path.push(self.ids[k]);
            self.intermediates(k, j, path);
        }
    }
}

/// Floyd-Warshall over every edge record of `graph`.
///
/// Parallel edges keep the smallest weight.
///
/// # Errors
///
/// [`AlgorithmError::NegativeCycle`] if some node reaches itself at negative
/// cost.
pub fn floyd_warshall<N, E>(graph: &Graph<N, E>) -> Result<AllPairsShortestPaths, AlgorithmError> {
    let ids: IndexSet<Id> = graph.nodes().map(|node| node.id()).collect();
    let n = ids.len();
    debug!(nodes = n; "Running Floyd-Warshall");

    let mut dist: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 0.0 } else { f64::INFINITY }).collect())
        .collect();
    let mut next = vec![vec![None; n]; n];

    for edge in graph.edges() {
        let (Some(i), Some(j)) = (
            ids.get_index_of(&edge.source()),
            ids.get_index_of(&edge.target()),
        ) else {
            continue;
        };
        if edge.weight() < dist[i][j] {
            dist[i][j] = edge.weight();
        }
    }

    for k in 0..n {
        for i in 0..n {
            if dist[i][k].is_infinite() {
                continue;
            }
            for j in 0..n {
                let through = dist[i][k] + dist[k][j];
                if through < dist[i][j] {
                    dist[i][j] = through;
                    next[i][j] = Some(k);
                }
            }
        }
    }

    if (0..n).any(|i| dist[i][i] < 0.0) {
        return Err(AlgorithmError::NegativeCycle);
    }

    Ok(AllPairsShortestPaths { ids, dist, next })
}

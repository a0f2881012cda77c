//! Single-source shortest paths.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, trace};

use trellis_core::identifier::Id;

use super::{AlgorithmError, heap::BinaryMinHeap};
use crate::graph::Graph;

/// Distances and predecessors from one source node.
///
/// Nodes that cannot be reached keep an infinite distance and no
/// predecessor.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    source: Id,
    distances: IndexMap<Id, f64>,
    predecessors: HashMap<Id, Id>,
}

impl ShortestPaths {
    fn new<N, E>(graph: &Graph<N, E>, source: Id) -> Self {
        let mut distances: IndexMap<Id, f64> = graph
            .nodes()
            .map(|node| (node.id(), f64::INFINITY))
            .collect();
        distances.insert(source, 0.0);
        Self {
            source,
            distances,
            predecessors: HashMap::new(),
        }
    }

    pub fn source(&self) -> Id {
        self.source
    }

    /// Distance from the source, `None` for ids not in the graph.
    pub fn distance(&self, id: impl Into<Id>) -> Option<f64> {
        self.distances.get(&id.into()).copied()
    }

    pub fn predecessor(&self, id: impl Into<Id>) -> Option<Id> {
        self.predecessors.get(&id.into()).copied()
    }

    /// All distances in node insertion order.
    pub fn distances(&self) -> impl Iterator<Item = (Id, f64)> + '_ {
        self.distances.iter().map(|(id, distance)| (*id, *distance))
    }

    /// The node sequence from the source to `target`, both included.
    ///
    /// # Errors
    ///
    /// [`AlgorithmError::UnknownNode`] if `target` is not in the graph,
    /// [`AlgorithmError::NoPath`] if it cannot be reached.
    pub fn path_to(&self, target: impl Into<Id>) -> Result<Vec<Id>, AlgorithmError> {
        let target = target.into();
        let distance = self
            .distance(target)
            .ok_or(AlgorithmError::UnknownNode(target))?;
        if distance.is_infinite() {
            return Err(AlgorithmError::NoPath {
                from: self.source,
                to: target,
            });
        }

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            let previous = self
                .predecessor(current)
                .filter(|_| path.len() <= self.distances.len())
                .ok_or(AlgorithmError::NoPath {
                    from: self.source,
                    to: target,
                })?;
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Ok(path)
    }

    fn get(&self, id: Id) -> f64 {
        self.distances.get(&id).copied().unwrap_or(f64::INFINITY)
    }

    fn relax(&mut self, from: Id, to: Id, distance: f64) {
        self.distances.insert(to, distance);
        self.predecessors.insert(to, from);
    }
}

/// Bellman-Ford shortest paths from `source`.
///
/// Every edge record is relaxed `|V| - 1` times (stopping early once a pass
/// changes nothing). Snapshots are recorded on the graph at initialisation,
/// before every relaxation (about the relaxed edge's endpoints) and at the
/// end, so the run can be replayed step by step.
///
/// # Errors
///
/// [`AlgorithmError::UnknownNode`] if `source` is not in the graph,
/// [`AlgorithmError::NegativeCycle`] if a negative-weight cycle is reachable
/// from it. Note that an undirected edge with negative weight forms such a
/// cycle with its own mirror.
pub fn bellman_ford<N: Clone, E: Clone>(
    graph: &mut Graph<N, E>,
    source: impl Into<Id>,
) -> Result<ShortestPaths, AlgorithmError> {
    let source = source.into();
    if !graph.contains_node(source) {
        return Err(AlgorithmError::UnknownNode(source));
    }
    debug!(source:% = source, nodes = graph.node_count(); "Running Bellman-Ford");

    let edges: Vec<(Id, Id, f64)> = graph
        .edges()
        .map(|edge| (edge.source(), edge.target(), edge.weight()))
        .collect();
    let mut paths = ShortestPaths::new(&*graph, source);
    graph.snapshot(
        "Initialisation: all distances are infinite and all predecessors are unset.",
        [source],
    );

    for pass in 1..graph.node_count() {
        let mut changed = false;
        for &(from, to, weight) in &edges {
            let candidate = paths.get(from) + weight;
            if candidate < paths.get(to) {
                graph.snapshot(format!("Relax edge between {from} and {to}."), [from, to]);
                paths.relax(from, to, candidate);
                changed = true;
            }
        }
        trace!(pass = pass, changed = changed; "Bellman-Ford pass");
        if !changed {
            break;
        }
    }

    let has_negative_cycle = edges
        .iter()
        .any(|&(from, to, weight)| paths.get(from) + weight < paths.get(to));
    if has_negative_cycle {
        graph.snapshot("Negative-weight cycle detected.", []);
        return Err(AlgorithmError::NegativeCycle);
    }

    graph.snapshot("Ready.", []);
    Ok(paths)
}

/// Dijkstra shortest paths from `source`.
///
/// # Errors
///
/// [`AlgorithmError::UnknownNode`] if `source` is not in the graph,
/// [`AlgorithmError::NegativeWeight`] if any edge has a negative weight.
pub fn dijkstra<N, E>(
    graph: &Graph<N, E>,
    source: impl Into<Id>,
) -> Result<ShortestPaths, AlgorithmError> {
    let source = source.into();
    if !graph.contains_node(source) {
        return Err(AlgorithmError::UnknownNode(source));
    }
    if let Some(edge) = graph.edges().find(|edge| edge.weight() < 0.0) {
        return Err(AlgorithmError::NegativeWeight {
            from: edge.source(),
            to: edge.target(),
            weight: edge.weight(),
        });
    }
    debug!(source:% = source, nodes = graph.node_count(); "Running Dijkstra");

    let mut paths = ShortestPaths::new(graph, source);
    let mut queue = BinaryMinHeap::new(|entry: &(Id, f64)| entry.1);
    queue.extend(paths.distances());
    let mut optimized = HashSet::new();

    while let Some((node, distance)) = queue.extract_min() {
        if distance.is_infinite() {
            // everything left is unreachable
            break;
        }
        optimized.insert(node);

        for edge in graph.outgoing(node) {
            let target = edge.target();
            if optimized.contains(&target) {
                continue;
            }

            let alternative = distance + edge.weight();
            if alternative < paths.get(target) {
                paths.relax(node, target, alternative);
                if let Some(entry) = queue.find_mut(|entry| entry.0 == target) {
                    entry.1 = alternative;
                }
                queue.heapify();
            }
        }
    }

    Ok(paths)
}

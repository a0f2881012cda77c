//! Recorded graph states.
//!
//! Algorithms that want to show their progress call [`Graph::snapshot`] at
//! interesting steps. Each snapshot is an independent deep copy of the nodes
//! and edges at that moment; the snapshot history itself is never copied.
//!
//! How much history is kept is controlled by [`SnapshotRetention`].

use indexmap::IndexMap;
use log::trace;

use trellis_core::{geometry::Bounds, identifier::Id};

use super::{Edge, Graph, Node};

/// How many snapshots a graph keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotRetention {
    /// Keep every snapshot.
    Unbounded,
    /// Keep only the newest `n`, evicting the oldest first.
    KeepLast(usize),
}

impl Default for SnapshotRetention {
    fn default() -> Self {
        Self::KeepLast(256)
    }
}

/// A frozen copy of a graph's nodes and edges.
#[derive(Debug, Clone)]
pub struct GraphState<N = (), E = ()> {
    nodes: IndexMap<Id, Node<N>>,
    edges: Vec<Edge<E>>,
    layout_bounds: Option<Bounds>,
}

impl<N, E> GraphState<N, E> {
    pub fn node(&self, id: impl Into<Id>) -> Option<&Node<N>> {
        self.nodes.get(&id.into())
    }

    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node<N>> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge<E>> {
        self.edges.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn layout_bounds(&self) -> Option<Bounds> {
        self.layout_bounds
    }
}

/// A recorded state with a description of what happened.
#[derive(Debug, Clone)]
pub struct Snapshot<N = (), E = ()> {
    comment: String,
    about: Vec<Id>,
    state: GraphState<N, E>,
}

impl<N, E> Snapshot<N, E> {
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Nodes marked as significant for this state.
    pub fn about(&self) -> &[Id] {
        &self.about
    }

    pub fn state(&self) -> &GraphState<N, E> {
        &self.state
    }
}

impl<N: Clone, E: Clone> Graph<N, E> {
    /// Records a deep copy of the current nodes and edges.
    ///
    /// `about` lists the nodes this step is about, e.g. the endpoints of a
    /// relaxed edge. The oldest snapshots are dropped afterwards if the
    /// [`SnapshotRetention`] limit is exceeded.
    pub fn snapshot(&mut self, comment: impl Into<String>, about: impl IntoIterator<Item = Id>) {
        let snapshot = Snapshot {
            comment: comment.into(),
            about: about.into_iter().collect(),
            state: GraphState {
                nodes: self.nodes.clone(),
                edges: self.edges.clone(),
                layout_bounds: self.layout_bounds,
            },
        };
        trace!(comment = snapshot.comment; "Recording snapshot");

        self.snapshots.push_back(snapshot);
        self.enforce_retention();
    }
}

impl<N, E> Graph<N, E> {
    /// Recorded snapshots, oldest first.
    pub fn snapshots(&self) -> impl ExactSizeIterator<Item = &Snapshot<N, E>> {
        self.snapshots.iter()
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn clear_snapshots(&mut self) {
        self.snapshots.clear();
    }

    /// Removes and returns every recorded snapshot, oldest first.
    pub fn take_snapshots(&mut self) -> Vec<Snapshot<N, E>> {
        self.snapshots.drain(..).collect()
    }

    pub fn retention(&self) -> SnapshotRetention {
        self.retention
    }

    /// Changes the retention policy, evicting at once if the new limit is
    /// already exceeded.
    pub fn set_retention(&mut self, retention: SnapshotRetention) {
        self.retention = retention;
        self.enforce_retention();
    }

    fn enforce_retention(&mut self) {
        if let SnapshotRetention::KeepLast(limit) = self.retention {
            while self.snapshots.len() > limit {
                self.snapshots.pop_front();
            }
        }
    }
}

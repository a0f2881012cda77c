//! Canvas positions of a laid-out graph.

use indexmap::IndexMap;
use log::debug;

use trellis_core::{
    geometry::{Bounds, Point},
    identifier::Id,
};

use super::viewport::Viewport;
use crate::graph::Graph;

/// Where each node sits on the canvas.
///
/// A scene is computed from the layout-space positions of a graph and can
/// then be edited independently, e.g. by dragging nodes around, without
/// touching the graph itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    viewport: Viewport,
    positions: IndexMap<Id, Point>,
}

impl Scene {
    /// Projects every node of `graph` onto the canvas.
    ///
    /// Uses the bounds stored by the last layout run, or the bounds of the
    /// current positions if the graph has not been laid out.
    pub fn new<N, E>(graph: &Graph<N, E>, viewport: Viewport) -> Self {
        let bounds = graph
            .layout_bounds()
            .or_else(|| Bounds::from_points(graph.nodes().map(|node| node.position())));

        let positions = match bounds {
            Some(bounds) => {
                let projection = viewport.fit(bounds);
                graph
                    .nodes()
                    .map(|node| (node.id(), projection.translate(node.position())))
                    .collect()
            }
            None => IndexMap::new(),
        };
        debug!(nodes = positions.len(); "Scene computed");

        Self {
            viewport,
            positions,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn position(&self, id: Id) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    /// Moves a node; returns `false` if the node is not in the scene.
    pub fn set_position(&mut self, id: Id, position: Point) -> bool {
        match self.positions.get_mut(&id) {
            Some(slot) => {
                *slot = position;
                true
            }
            None => false,
        }
    }

    /// Positions in node insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Id, Point)> + '_ {
        self.positions.iter().map(|(id, point)| (*id, *point))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

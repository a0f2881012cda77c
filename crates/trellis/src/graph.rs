//! The graph model laid out and drawn by Trellis.
//!
//! A [`Graph`] keeps its nodes in an insertion-ordered map keyed by [`Id`]
//! and its edges in a flat list. Insertion order matters: the spring layout
//! visits node pairs in that order, so two graphs built by the same sequence
//! of calls lay out identically for a fixed seed.
//!
//! # Edges
//!
//! Every call to [`Graph::add_edge`] appends a primary edge. Undirected
//! edges additionally append a *mirror* edge running the other way, so that
//! traversals and the layout see both directions:
//!
//! ```text
//!   add_edge(a, b, undirected)      add_edge(a, b, directed)
//!
//!   edges[0]: a -> b  Undirected    edges[0]: a -> b  Directed
//!   edges[1]: b -> a  Mirror
//! ```
//!
//! The primary edge and its mirror point at each other through
//! [`Edge::counterpart`]. Renderers skip mirrors so each undirected edge is
//! drawn once.
//!
//! # Payloads
//!
//! Nodes and edges carry recognized drawing fields (label, colours, custom
//! render callbacks) plus an opaque caller payload of type `N` / `E`. The
//! payload is never interpreted by the layout or the renderer.

mod snapshot;

pub use snapshot::{GraphState, Snapshot, SnapshotRetention};

use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;
use log::{debug, trace};

use trellis_core::{
    color::Color,
    geometry::{Bounds, Point},
    identifier::Id,
    semantic::{Attributes, Declaration, GraphSpec},
};

use crate::render::{EdgeRenderFn, NodeRenderFn};

/// Weight of an edge whose style does not set one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Attraction multiplier of an edge whose style does not set one.
pub const DEFAULT_ATTRACTION: f64 = 1.0;

/// Stable position of an edge in [`Graph::edges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeIndex(usize);

impl EdgeIndex {
    /// Returns the numeric position in the edge list.
    pub fn index(self) -> usize {
        self.0
    }
}

/// How an edge record came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// A one-way edge.
    Directed,
    /// The primary record of a two-way edge.
    Undirected,
    /// The reverse record appended for an undirected edge.
    Mirror,
}

/// Content attached to a node.
///
/// A node created implicitly by [`Graph::add_edge`] gets the default
/// content: no label, no colour, `N::default()` as payload.
#[derive(Debug, Clone, Default)]
pub struct NodeContent<N = ()> {
    label: Option<String>,
    color: Option<Color>,
    render: Option<NodeRenderFn>,
    data: N,
}

impl<N> NodeContent<N> {
    /// Creates content carrying `data` and no drawing overrides.
    pub fn new(data: N) -> Self {
        Self {
            label: None,
            color: None,
            render: None,
            data,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Replaces the default ellipse with a custom drawing callback.
    pub fn with_render(mut self, render: NodeRenderFn) -> Self {
        self.render = Some(render);
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn render(&self) -> Option<&NodeRenderFn> {
        self.render.as_ref()
    }

    pub fn data(&self) -> &N {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut N {
        &mut self.data
    }
}

/// Style of an edge, given to [`Graph::add_edge`].
///
/// # Examples
///
/// ```
/// use trellis::graph::EdgeStyle;
///
/// let style: EdgeStyle = EdgeStyle::default()
///     .directed()
///     .with_weight(3.0)
///     .with_label("calls");
///
/// assert!(style.is_directed());
/// assert_eq!(style.weight(), Some(3.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgeStyle<E = ()> {
    weight: Option<f64>,
    directed: bool,
    attraction: Option<f64>,
    label: Option<String>,
    stroke: Option<Color>,
    render: Option<EdgeRenderFn>,
    data: E,
}

impl<E> EdgeStyle<E> {
    /// Creates an undirected style carrying `data`.
    pub fn new(data: E) -> Self {
        Self {
            weight: None,
            directed: false,
            attraction: None,
            label: None,
            stroke: None,
            render: None,
            data,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Marks the edge as one-way; no mirror edge will be added.
    pub fn directed(mut self) -> Self {
        self.directed = true;
        self
    }

    /// Scales the spring force of the edge by `ln(attraction) * 0.5 + 1`.
    ///
    /// `attraction` must be a positive finite number; the spring layout
    /// treats any other value as the default of 1.
    pub fn with_attraction(mut self, attraction: f64) -> Self {
        self.attraction = Some(attraction);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Replaces the default straight connector with a custom drawing callback.
    pub fn with_render(mut self, render: EdgeRenderFn) -> Self {
        self.render = Some(render);
        self
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn attraction(&self) -> Option<f64> {
        self.attraction
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn stroke(&self) -> Option<Color> {
        self.stroke
    }

    pub fn render(&self) -> Option<&EdgeRenderFn> {
        self.render.as_ref()
    }

    pub fn data(&self) -> &E {
        &self.data
    }
}

/// A node together with its layout state.
#[derive(Debug, Clone)]
pub struct Node<N = ()> {
    id: Id,
    content: NodeContent<N>,
    pub(crate) position: Point,
    pub(crate) force: Point,
    edges: Vec<EdgeIndex>,
}

impl<N> Node<N> {
    fn new(id: Id, content: NodeContent<N>) -> Self {
        Self {
            id,
            content,
            position: Point::ORIGIN,
            force: Point::ORIGIN,
            edges: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn content(&self) -> &NodeContent<N> {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut NodeContent<N> {
        &mut self.content
    }

    /// Text shown for the node: its label, or its id when it has none.
    pub fn display_label(&self) -> String {
        self.content
            .label()
            .map_or_else(|| self.id.as_string(), str::to_string)
    }

    /// Position in layout space.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Force accumulated during the current layout iteration.
    pub fn force(&self) -> Point {
        self.force
    }

    /// Edges originating at this node, mirrors included.
    pub fn edges(&self) -> &[EdgeIndex] {
        &self.edges
    }
}

/// An edge record. See the [module documentation](self) for mirrors.
#[derive(Debug, Clone)]
pub struct Edge<E = ()> {
    source: Id,
    target: Id,
    weight: f64,
    style: EdgeStyle<E>,
    kind: EdgeKind,
    counterpart: Option<EdgeIndex>,
}

impl<E> Edge<E> {
    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn style(&self) -> &EdgeStyle<E> {
        &self.style
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// For an undirected edge and its mirror, the index of the other one.
    pub fn counterpart(&self) -> Option<EdgeIndex> {
        self.counterpart
    }

    pub fn is_directed(&self) -> bool {
        self.kind == EdgeKind::Directed
    }

    pub fn is_mirror(&self) -> bool {
        self.kind == EdgeKind::Mirror
    }

    /// The attraction multiplier, [`DEFAULT_ATTRACTION`] when unset.
    pub fn attraction(&self) -> f64 {
        self.style.attraction().unwrap_or(DEFAULT_ATTRACTION)
    }
}

/// An insertion-ordered graph of nodes and edges.
///
/// # Examples
///
/// ```
/// use trellis::graph::{EdgeKind, EdgeStyle, Graph};
///
/// let mut graph: Graph = Graph::new();
/// let index = graph.add_edge("a", "b", EdgeStyle::default());
///
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2);
///
/// let edge = graph.edge(index).unwrap();
/// assert_eq!(edge.kind(), EdgeKind::Undirected);
/// assert_eq!(edge.weight(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Graph<N = (), E = ()> {
    nodes: IndexMap<Id, Node<N>>,
    edges: Vec<Edge<E>>,
    snapshots: VecDeque<Snapshot<N, E>>,
    retention: SnapshotRetention,
    layout_bounds: Option<Bounds>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: Vec::new(),
            snapshots: VecDeque::new(),
            retention: SnapshotRetention::default(),
            layout_bounds: None,
        }
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many snapshots the graph keeps.
    pub fn with_retention(mut self, retention: SnapshotRetention) -> Self {
        self.set_retention(retention);
        self
    }

    /// Adds a node with the given content, unless the id is already present.
    ///
    /// When the id exists, the existing node is returned unchanged and
    /// `content` is dropped.
    pub fn add_node_with(&mut self, id: impl Into<Id>, content: NodeContent<N>) -> &mut Node<N> {
        let id = id.into();
        self.nodes.entry(id).or_insert_with(|| {
            trace!(id:% = id; "Adding node");
            Node::new(id, content)
        })
    }

    /// Adds a node with default content, unless the id is already present.
    pub fn add_node(&mut self, id: impl Into<Id>) -> &mut Node<N>
    where
        N: Default,
    {
        self.add_node_with(id, NodeContent::default())
    }

    /// Adds an edge, creating missing endpoints, and returns the index of
    /// the primary edge.
    ///
    /// Undirected styles also append the mirror edge right after the
    /// primary one.
    pub fn add_edge(
        &mut self,
        source: impl Into<Id>,
        target: impl Into<Id>,
        style: EdgeStyle<E>,
    ) -> EdgeIndex
    where
        N: Default,
        E: Clone,
    {
        let source = source.into();
        let target = target.into();
        self.add_node(source);
        self.add_node(target);

        let weight = style.weight().unwrap_or(DEFAULT_WEIGHT);
        let primary = EdgeIndex(self.edges.len());
        trace!(source:% = source, target:% = target, weight = weight, directed = style.is_directed(); "Adding edge");

        if style.is_directed() {
            self.push_edge(Edge {
                source,
                target,
                weight,
                style,
                kind: EdgeKind::Directed,
                counterpart: None,
            });
        } else {
            let mirror = EdgeIndex(primary.0 + 1);
            self.push_edge(Edge {
                source,
                target,
                weight,
                style: style.clone(),
                kind: EdgeKind::Undirected,
                counterpart: Some(mirror),
            });
            self.push_edge(Edge {
                source: target,
                target: source,
                weight,
                style,
                kind: EdgeKind::Mirror,
                counterpart: Some(primary),
            });
        }

        primary
    }

    fn push_edge(&mut self, edge: Edge<E>) {
        let index = EdgeIndex(self.edges.len());
        if let Some(node) = self.nodes.get_mut(&edge.source) {
            node.edges.push(index);
        }
        self.edges.push(edge);
    }

    pub fn node(&self, id: impl Into<Id>) -> Option<&Node<N>> {
        self.nodes.get(&id.into())
    }

    pub fn node_mut(&mut self, id: impl Into<Id>) -> Option<&mut Node<N>> {
        self.nodes.get_mut(&id.into())
    }

    pub fn contains_node(&self, id: impl Into<Id>) -> bool {
        self.nodes.contains_key(&id.into())
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node<N>> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge(&self, index: EdgeIndex) -> Option<&Edge<E>> {
        self.edges.get(index.0)
    }

    /// All edge records, mirrors included, in the order they were added.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge<E>> {
        self.edges.iter()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges leaving `id`, mirrors included. Empty for unknown ids.
    pub fn outgoing(&self, id: impl Into<Id>) -> impl Iterator<Item = &Edge<E>> {
        self.nodes
            .get(&id.into())
            .into_iter()
            .flat_map(|node| node.edges.iter())
            .filter_map(|index| self.edges.get(index.0))
    }

    /// Bounds of the node positions written by the last layout run.
    pub fn layout_bounds(&self) -> Option<Bounds> {
        self.layout_bounds
    }

    pub(crate) fn set_layout_bounds(&mut self, bounds: Option<Bounds>) {
        self.layout_bounds = bounds;
    }

    pub(crate) fn node_index(&self, id: Id) -> Option<usize> {
        self.nodes.get_index_of(&id)
    }

    pub(crate) fn node_at(&self, index: usize) -> Option<&Node<N>> {
        self.nodes.get_index(index).map(|(_, node)| node)
    }

    pub(crate) fn node_at_mut(&mut self, index: usize) -> Option<&mut Node<N>> {
        self.nodes.get_index_mut(index).map(|(_, node)| node)
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node<N>> {
        self.nodes.values_mut()
    }
}

impl Graph<Attributes, Attributes> {
    /// Builds a graph from a parsed description.
    ///
    /// Declarations are applied in source order. A `node` declaration for a
    /// node that an earlier edge created implicitly fills in that node's
    /// content; a second `node` declaration for the same id is ignored.
    pub fn from_spec(spec: &GraphSpec) -> Self {
        let mut graph = Self::new();
        let mut declared = HashSet::new();

        for declaration in spec.declarations() {
            match declaration {
                Declaration::Node(node) => {
                    if !declared.insert(node.id()) {
                        continue;
                    }

                    let mut content = NodeContent::new(node.attributes().clone());
                    if let Some(label) = node.label() {
                        content = content.with_label(label);
                    }
                    if let Some(color) = node.color() {
                        content = content.with_color(color);
                    }

                    match graph.node_mut(node.id()) {
                        Some(existing) => *existing.content_mut() = content,
                        None => {
                            graph.add_node_with(node.id(), content);
                        }
                    }
                }
                Declaration::Edge(edge) => {
                    let mut style = EdgeStyle::new(edge.attributes().clone());
                    if edge.is_directed() {
                        style = style.directed();
                    }
                    if let Some(weight) = edge.weight() {
                        style = style.with_weight(weight);
                    }
                    if let Some(attraction) = edge.attraction() {
                        style = style.with_attraction(attraction);
                    }
                    if let Some(label) = edge.label() {
                        style = style.with_label(label);
                    }
                    if let Some(stroke) = edge.stroke() {
                        style = style.with_stroke(stroke);
                    }
                    graph.add_edge(edge.source(), edge.target(), style);
                }
            }
        }

        debug!(nodes = graph.node_count(), edges = graph.edge_count(); "Graph built from description");
        graph
    }
}

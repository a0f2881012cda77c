//! SVG drawing of a laid-out graph.

use indexmap::IndexMap;
use log::{debug, info};
use svg::{Document, node::element as svg_element};

use trellis_core::{
    color::{Color, Palette},
    geometry::Point,
    identifier::Id,
};

use super::{
    callback::{EdgeRenderContext, NodeRenderContext},
    interaction::{DragController, DragEvent, SubscriptionId},
    scene::Scene,
    viewport::{Viewport, rotate},
};
use crate::graph::{Edge, Graph, Node};

/// Horizontal radius of the default node ellipse.
pub const NODE_RX: f64 = 30.0;
/// Vertical radius of the default node ellipse.
pub const NODE_RY: f64 = 20.0;
/// Distance from the node centre down to its label baseline.
pub const LABEL_OFFSET: f64 = 30.0;
/// Fill opacity applied to every node shape.
pub const NODE_FILL_OPACITY: f64 = 0.6;

/// Draws graphs to SVG and owns the interactive state of the drawing.
///
/// [`draw`](Self::draw) recomputes the [`Scene`] from the graph's layout;
/// [`redraw`](Self::redraw) renders the current scene as-is, keeping nodes
/// where the pointer left them.
///
/// # Examples
///
/// ```
/// use trellis::{
///     graph::{EdgeStyle, Graph},
///     layout::{SpringConfig, SpringLayout},
///     render::SvgRenderer,
/// };
///
/// let mut graph: Graph = Graph::new();
/// graph.add_edge("a", "b", EdgeStyle::default().directed());
/// SpringLayout::new(&mut graph, SpringConfig::default().with_seed(7)).layout();
///
/// let mut renderer = SvgRenderer::default();
/// let svg = renderer.draw(&graph).to_string();
/// assert!(svg.contains("<ellipse"));
/// assert!(svg.contains("marker-end"));
/// ```
#[derive(Debug)]
pub struct SvgRenderer {
    viewport: Viewport,
    background: Option<Color>,
    edge_color: Color,
    scene: Scene,
    drag: DragController,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl SvgRenderer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background: None,
            edge_color: Color::from_rgb8(0x66, 0x66, 0x66),
            scene: Scene::default(),
            drag: DragController::new(),
        }
    }

    /// Fills the canvas with `color` before drawing.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Stroke used for edges that do not set their own.
    pub fn with_edge_color(mut self, color: Color) -> Self {
        self.edge_color = color;
        self
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Projects the graph's layout onto the canvas and renders it.
    pub fn draw<N, E>(&mut self, graph: &Graph<N, E>) -> Document {
        info!(nodes = graph.node_count(), edges = graph.edge_count(); "Drawing graph");
        self.scene = Scene::new(graph, self.viewport);
        self.redraw(graph)
    }

    /// Renders the graph at the current scene positions.
    ///
    /// Nodes added to the graph after the last [`draw`](Self::draw) have no
    /// scene position yet and are left out, together with their edges.
    pub fn redraw<N, E>(&self, graph: &Graph<N, E>) -> Document {
        let width = self.viewport.width();
        let height = self.viewport.height();

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(background) = self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", background),
            );
        }

        let mut markers = IndexMap::new();
        let mut edges = svg_element::Group::new().set("class", "edges");
        for edge in graph.edges().filter(|edge| !edge.is_mirror()) {
            if let Some(group) = self.render_edge(edge, &mut markers) {
                edges = edges.add(group);
            }
        }

        let mut palette = Palette::new();
        let mut nodes = svg_element::Group::new().set("class", "nodes");
        for node in graph.nodes() {
            let Some(center) = self.scene.position(node.id()) else {
                debug!(node:% = node.id(); "Skipping node without scene position");
                continue;
            };
            let fill = node
                .content()
                .color()
                .unwrap_or_else(|| palette.next_color());
            nodes = nodes.add(Self::render_node(node, center, fill));
        }

        let mut defs = svg_element::Definitions::new();
        for (id, color) in &markers {
            defs = defs.add(Self::create_arrow_marker(id, *color));
        }

        doc.add(defs).add(edges).add(nodes)
    }

    /// Same as [`draw`](Self::draw), serialized.
    pub fn render_string<N, E>(&mut self, graph: &Graph<N, E>) -> String {
        self.draw(graph).to_string()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&DragEvent) + Send + 'static) -> SubscriptionId {
        self.drag.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.drag.unsubscribe(id)
    }

    /// See [`DragController::pointer_down`].
    pub fn pointer_down(&mut self, node: Id, at: Point) -> bool {
        self.drag.pointer_down(&self.scene, node, at)
    }

    /// See [`DragController::pointer_move`].
    pub fn pointer_move(&mut self, at: Point) -> Option<Point> {
        self.drag.pointer_move(&mut self.scene, at)
    }

    /// See [`DragController::pointer_up`].
    pub fn pointer_up(&mut self) -> Option<Id> {
        self.drag.pointer_up(&self.scene)
    }

    fn render_node<N>(node: &Node<N>, center: Point, fill: Color) -> svg_element::Group {
        let label = node.display_label();

        let group = match node.content().render() {
            Some(render) => render.call(&NodeRenderContext {
                id: node.id(),
                label: &label,
                center,
                fill,
            }),
            None => svg_element::Group::new()
                .add(
                    svg_element::Ellipse::new()
                        .set("cx", center.x())
                        .set("cy", center.y())
                        .set("rx", NODE_RX)
                        .set("ry", NODE_RY)
                        .set("fill", fill)
                        .set("stroke", fill)
                        .set("stroke-width", 2),
                )
                .add(
                    svg_element::Text::new(label.as_str())
                        .set("x", center.x())
                        .set("y", center.y() + LABEL_OFFSET)
                        .set("text-anchor", "middle"),
                ),
        };

        // Custom drawings keep their own attributes; ours go on a wrapper.
        svg_element::Group::new()
            .set("class", "node")
            .set("data-node", node.id().as_string())
            .set("fill-opacity", NODE_FILL_OPACITY)
            .add(group)
    }

    fn render_edge<E>(
        &self,
        edge: &Edge<E>,
        markers: &mut IndexMap<String, Color>,
    ) -> Option<svg_element::Group> {
        let source = self.scene.position(edge.source())?;
        let target = self.scene.position(edge.target())?;
        let from = clip_to_ellipse(source, target);
        let to = clip_to_ellipse(target, source);
        let stroke = edge.style().stroke().unwrap_or(self.edge_color);

        if let Some(render) = edge.style().render() {
            return Some(render.call(&EdgeRenderContext {
                source: edge.source(),
                target: edge.target(),
                from,
                to,
                directed: edge.is_directed(),
                label: edge.style().label(),
                stroke,
            }));
        }

        let mut path = svg_element::Path::new()
            .set(
                "d",
                format!("M {} {} L {} {}", from.x(), from.y(), to.x(), to.y()),
            )
            .set("fill", "none")
            .set("stroke", stroke)
            .set("stroke-width", 1.5);

        if edge.is_directed() {
            let marker_id = Self::marker_id(stroke);
            path = path.set("marker-end", format!("url(#{marker_id})"));
            markers.insert(marker_id, stroke);
        }

        let mut group = svg_element::Group::new().set("class", "edge").add(path);

        if let Some(label) = edge.style().label() {
            let mid = from.midpoint(to);
            group = group.add(
                svg_element::Text::new(label)
                    .set("x", mid.x())
                    .set("y", mid.y() - 4.0)
                    .set("text-anchor", "middle"),
            );
        }

        Some(group)
    }

    fn marker_id(color: Color) -> String {
        format!("arrow-{}", color.to_id_safe_string())
    }

    fn create_arrow_marker(id: &str, color: Color) -> svg_element::Marker {
        svg_element::Marker::new()
            .set("id", id)
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", color),
            )
    }
}

/// Point where the segment from `center` towards `toward` leaves the
/// default node ellipse. Returns `center` when `toward` lies inside it.
fn clip_to_ellipse(center: Point, toward: Point) -> Point {
    let delta = toward.sub_point(center);
    if delta.is_zero() {
        return center;
    }

    let t = 1.0 / ((delta.x() / NODE_RX).powi(2) + (delta.y() / NODE_RY).powi(2)).sqrt();
    if t >= 1.0 {
        return center;
    }
    rotate(center, delta.hypot() * t, delta.y().atan2(delta.x()))
}

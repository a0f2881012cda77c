//! Custom drawing callbacks for nodes and edges.
//!
//! A callback receives everything the default drawing would use and returns
//! an SVG group that replaces it. Callbacks are reference counted so styles
//! and node contents stay cheap to clone.

use std::{fmt, sync::Arc};

use svg::node::element::Group;

use trellis_core::{color::Color, geometry::Point, identifier::Id};

/// What a node callback gets to draw with.
#[derive(Debug, Clone, Copy)]
pub struct NodeRenderContext<'a> {
    pub id: Id,
    pub label: &'a str,
    /// Canvas position of the node centre.
    pub center: Point,
    /// The node's colour, or the next palette colour.
    pub fill: Color,
}

/// What an edge callback gets to draw with.
#[derive(Debug, Clone, Copy)]
pub struct EdgeRenderContext<'a> {
    pub source: Id,
    pub target: Id,
    /// Canvas point where the edge leaves the source shape.
    pub from: Point,
    /// Canvas point where the edge enters the target shape.
    pub to: Point,
    pub directed: bool,
    pub label: Option<&'a str>,
    pub stroke: Color,
}

type NodeCallback = dyn Fn(&NodeRenderContext<'_>) -> Group + Send + Sync;
type EdgeCallback = dyn Fn(&EdgeRenderContext<'_>) -> Group + Send + Sync;

/// Draws a node in place of the default ellipse.
///
/// # Examples
///
/// ```
/// use svg::node::element::{Group, Rectangle};
/// use trellis::render::NodeRenderFn;
///
/// let square = NodeRenderFn::new(|ctx| {
///     Group::new().add(
///         Rectangle::new()
///             .set("x", ctx.center.x() - 10.0)
///             .set("y", ctx.center.y() - 10.0)
///             .set("width", 20)
///             .set("height", 20)
///             .set("fill", ctx.fill),
///     )
/// });
/// # let _ = square;
/// ```
#[derive(Clone)]
pub struct NodeRenderFn(Arc<NodeCallback>);

impl NodeRenderFn {
    pub fn new(render: impl Fn(&NodeRenderContext<'_>) -> Group + Send + Sync + 'static) -> Self {
        Self(Arc::new(render))
    }

    pub fn call(&self, context: &NodeRenderContext<'_>) -> Group {
        (self.0)(context)
    }
}

impl fmt::Debug for NodeRenderFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NodeRenderFn(..)")
    }
}

/// Draws an edge in place of the default straight connector.
#[derive(Clone)]
pub struct EdgeRenderFn(Arc<EdgeCallback>);

impl EdgeRenderFn {
    pub fn new(render: impl Fn(&EdgeRenderContext<'_>) -> Group + Send + Sync + 'static) -> Self {
        Self(Arc::new(render))
    }

    pub fn call(&self, context: &EdgeRenderContext<'_>) -> Group {
        (self.0)(context)
    }
}

impl fmt::Debug for EdgeRenderFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EdgeRenderFn(..)")
    }
}

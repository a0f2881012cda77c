//! Drawing laid-out graphs.
//!
//! Rendering happens in two steps:
//!
//! ```text
//! Graph (layout space)
//!     ↓ Viewport::fit + Projection::translate
//! Scene (canvas space, editable by dragging)
//!     ↓ SvgRenderer
//! svg::Document
//! ```
//!
//! Nodes are drawn as ellipses filled from a rotating [`Palette`] unless
//! their content carries a colour or a [`NodeRenderFn`]; edges are straight
//! connectors clipped at the node outline, with an arrow head when directed,
//! unless their style carries an [`EdgeRenderFn`].
//!
//! [`Palette`]: trellis_core::color::Palette

mod callback;
mod interaction;
mod renderer;
mod scene;
mod viewport;

pub use callback::{EdgeRenderContext, EdgeRenderFn, NodeRenderContext, NodeRenderFn};
pub use interaction::{DRAG_MARGIN, DragController, DragEvent, SubscriptionId};
pub use renderer::{LABEL_OFFSET, NODE_FILL_OPACITY, NODE_RX, NODE_RY, SvgRenderer};
pub use scene::Scene;
pub use viewport::{Projection, Viewport, rotate};

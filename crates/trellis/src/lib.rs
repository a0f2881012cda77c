//! Trellis - force-directed graph layout and drawing
//!
//! This library keeps an insertion-ordered graph model, positions its nodes
//! with a spring layout, draws the result to SVG and runs a few classic
//! graph algorithms on the same model. Graphs are built in code or parsed
//! from the Trellis text format.

pub mod algorithms;
pub mod config;
pub mod graph;
pub mod layout;
pub mod render;

mod error;
mod export;

pub use trellis_core::{color, geometry, identifier, semantic};

pub use error::TrellisError;

use std::path::Path;

use log::{debug, info, trace};

use trellis_core::{
    geometry::Bounds,
    identifier::Id,
    semantic::{Attributes, GraphSpec},
};

use algorithms::ShortestPaths;
use config::AppConfig;
use export::Exporter;
use graph::Graph;
use layout::SpringLayout;
use render::SvgRenderer;

/// Builder for parsing, laying out and drawing graphs.
///
/// # Examples
///
/// ```rust,no_run
/// use trellis::{GraphBuilder, config::AppConfig};
///
/// let builder = GraphBuilder::new(AppConfig::default());
///
/// let spec = builder.parse("a -- b; b -> c [weight=2];")
///     .expect("Failed to parse");
/// let mut graph = builder.build(&spec);
///
/// builder.layout(&mut graph);
/// let svg = builder.render_svg(&graph)
///     .expect("Failed to render");
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    config: AppConfig,
}

impl GraphBuilder {
    /// Create a new graph builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source text into a graph description.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Parse`] carrying every diagnostic and the
    /// source text.
    pub fn parse(&self, source: &str) -> Result<GraphSpec, TrellisError> {
        info!("Parsing graph description");
        let spec = trellis_parser::parse(source)
            .map_err(|err| TrellisError::new_parse_error(err, source))?;
        debug!(declarations = spec.declarations().len(); "Graph description parsed");
        trace!(spec:?; "Parsed graph description");
        Ok(spec)
    }

    /// Build a graph from a description, using the configured snapshot
    /// retention.
    pub fn build(&self, spec: &GraphSpec) -> Graph<Attributes, Attributes> {
        let mut graph = Graph::from_spec(spec);
        graph.set_retention(self.config.snapshots().retention());
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Graph built"
        );
        graph
    }

    /// Run the spring layout with the configured constants.
    ///
    /// Returns the bounding box of the final positions, `None` for an empty
    /// graph.
    pub fn layout<N, E>(&self, graph: &mut Graph<N, E>) -> Option<Bounds> {
        SpringLayout::new(graph, self.config.layout().clone()).layout()
    }

    /// Create a renderer for the configured canvas and colours.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Config`] if a configured colour is invalid.
    pub fn renderer(&self) -> Result<SvgRenderer, TrellisError> {
        let render = self.config.render();
        let mut renderer = SvgRenderer::new(render.viewport());
        if let Some(color) = render.background_color().map_err(TrellisError::Config)? {
            renderer = renderer.with_background(color);
        }
        if let Some(color) = render.edge_color().map_err(TrellisError::Config)? {
            renderer = renderer.with_edge_color(color);
        }
        Ok(renderer)
    }

    /// Draw a laid-out graph to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Config`] if a configured colour is invalid.
    pub fn render_svg<N, E>(&self, graph: &Graph<N, E>) -> Result<String, TrellisError> {
        let svg = self.renderer()?.render_string(graph);
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Draw a laid-out graph to an SVG file.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Config`] for invalid colours and
    /// [`TrellisError::Export`] if the file cannot be written.
    pub fn write_svg<N, E>(
        &self,
        graph: &Graph<N, E>,
        path: impl AsRef<Path>,
    ) -> Result<(), TrellisError> {
        let mut exporter = export::svg::Svg::new(path.as_ref(), self.renderer()?);
        exporter.export_graph(graph)?;
        Ok(())
    }

    /// Shortest paths from `source`.
    ///
    /// Runs Bellman-Ford (recording snapshots on `graph`) when any edge has
    /// a negative weight, Dijkstra otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Algorithm`] for unknown sources and negative
    /// cycles.
    pub fn shortest_paths<N: Clone, E: Clone>(
        &self,
        graph: &mut Graph<N, E>,
        source: impl Into<Id>,
    ) -> Result<ShortestPaths, TrellisError> {
        let source = source.into();
        let paths = if graph.edges().any(|edge| edge.weight() < 0.0) {
            debug!("Negative edge weight found, using Bellman-Ford");
            algorithms::bellman_ford(graph, source)?
        } else {
            algorithms::dijkstra(graph, source)?
        };
        Ok(paths)
    }
}

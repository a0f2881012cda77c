//! Force-directed spring layout.
//!
//! Every node starts at the origin. Each iteration then
//!
//! 1. pushes every pair of nodes apart with a force of `k² / d`, as long as
//!    they are closer than `max_repulsive_force_distance`;
//! 2. pulls the endpoints of every edge record (mirrors included) together
//!    with a spring force of `(d² - k²) / k`, where `d` is capped at
//!    `max_repulsive_force_distance`, scaled by `ln(attraction) * 0.5 + 1`;
//! 3. moves every node by `time_step * force`, limited to
//!    `max_vertex_movement` per axis, and clears the force.
//!
//! Nodes closer than 0.1 units are treated as if they were separated by a
//! small random offset in `[0.1, 0.2)` on each axis, which is what breaks
//! the initial symmetry. After the last iteration the bounds of all
//! positions are written to the graph.
//!
//! Pairs are visited in node insertion order and all randomness comes from
//! one generator, so a fixed [`SpringConfig::seed`] makes runs reproducible.

use log::{debug, info, trace, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Deserialize;

use trellis_core::geometry::{Bounds, Point};

use crate::graph::{Graph, Node};

/// Squared distance below which two nodes count as coincident.
const COINCIDENT_DISTANCE_SQUARED: f64 = 0.01;

/// Tuning parameters of the spring layout.
///
/// Every field has a default, so a partial configuration table is enough:
///
/// ```toml
/// iterations = 800
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Number of simulation steps.
    iterations: usize,
    /// Distance beyond which nodes stop repelling; also caps spring length.
    max_repulsive_force_distance: f64,
    /// Natural spring length `k`.
    spring_constant: f64,
    /// Step size `c` converting force into movement.
    time_step: f64,
    /// Per-axis movement limit for one step.
    max_vertex_movement: f64,
    /// Seed for the jitter generator; `None` draws one from the OS.
    seed: Option<u64>,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            iterations: 500,
            max_repulsive_force_distance: 6.0,
            spring_constant: 2.0,
            time_step: 0.01,
            max_vertex_movement: 0.5,
            seed: None,
        }
    }
}

impl SpringConfig {
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_max_repulsive_force_distance(mut self, distance: f64) -> Self {
        self.max_repulsive_force_distance = distance;
        self
    }

    pub fn with_spring_constant(mut self, k: f64) -> Self {
        self.spring_constant = k;
        self
    }

    pub fn with_time_step(mut self, c: f64) -> Self {
        self.time_step = c;
        self
    }

    pub fn with_max_vertex_movement(mut self, movement: f64) -> Self {
        self.max_vertex_movement = movement;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn max_repulsive_force_distance(&self) -> f64 {
        self.max_repulsive_force_distance
    }

    pub fn spring_constant(&self) -> f64 {
        self.spring_constant
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn max_vertex_movement(&self) -> f64 {
        self.max_vertex_movement
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// An edge record reduced to what the simulation needs.
#[derive(Debug, Clone, Copy)]
struct Spring {
    source: usize,
    target: usize,
    /// `ln(attraction) * 0.5 + 1`
    scale: f64,
}

/// `ln(attraction) * 0.5 + 1`, or 1 for an attraction that is not a
/// positive finite number.
fn spring_scale(attraction: f64) -> f64 {
    if attraction.is_finite() && attraction > 0.0 {
        attraction.ln() * 0.5 + 1.0
    } else {
        warn!(attraction = attraction; "Ignoring invalid edge attraction");
        1.0
    }
}

/// A spring layout run over one graph.
///
/// The layout holds the graph mutably for its whole lifetime, so no other
/// layout (or any other code) can touch the graph while it runs.
///
/// # Examples
///
/// ```
/// use trellis::{
///     graph::{EdgeStyle, Graph},
///     layout::{SpringConfig, SpringLayout},
/// };
///
/// let mut graph: Graph = Graph::new();
/// graph.add_edge("a", "b", EdgeStyle::default());
/// graph.add_edge("b", "c", EdgeStyle::default());
///
/// let bounds = SpringLayout::new(&mut graph, SpringConfig::default().with_seed(1))
///     .layout()
///     .expect("non-empty graph has bounds");
///
/// for node in graph.nodes() {
///     assert!(bounds.contains(node.position()));
/// }
/// ```
pub struct SpringLayout<'g, N, E> {
    graph: &'g mut Graph<N, E>,
    config: SpringConfig,
    springs: Vec<Spring>,
    rng: StdRng,
}

impl<'g, N, E> SpringLayout<'g, N, E> {
    pub fn new(graph: &'g mut Graph<N, E>, config: SpringConfig) -> Self {
        let springs = graph
            .edges()
            .filter_map(|edge| {
                Some(Spring {
                    source: graph.node_index(edge.source())?,
                    target: graph.node_index(edge.target())?,
                    scale: spring_scale(edge.attraction()),
                })
            })
            .collect();

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            graph,
            config,
            springs,
            rng,
        }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph<N, E> {
        self.graph
    }

    /// Runs the whole simulation and returns the resulting bounds.
    ///
    /// `None` means the graph has no nodes.
    pub fn layout(&mut self) -> Option<Bounds> {
        info!(
            nodes = self.graph.node_count(),
            edges = self.springs.len(),
            iterations = self.config.iterations,
            seed:? = self.config.seed;
            "Running spring layout"
        );

        self.prepare();
        for iteration in 0..self.config.iterations {
            self.iterate();
            if iteration % 100 == 0 {
                trace!(iteration = iteration; "Spring layout progress");
            }
        }
        let bounds = self.calc_bounds();

        debug!(bounds:? = bounds; "Spring layout finished");
        bounds
    }

    /// Moves every node to the origin and clears forces and stale bounds.
    pub fn prepare(&mut self) {
        for node in self.graph.nodes_mut() {
            node.position = Point::ORIGIN;
            node.force = Point::ORIGIN;
        }
        self.graph.set_layout_bounds(None);
    }

    /// Performs one simulation step.
    pub fn iterate(&mut self) {
        let count = self.graph.node_count();
        for i in 0..count {
            for j in (i + 1)..count {
                self.repulse(i, j);
            }
        }

        for index in 0..self.springs.len() {
            let spring = self.springs[index];
            self.attract(spring);
        }

        let c = self.config.time_step;
        let max = self.config.max_vertex_movement;
        for node in self.graph.nodes_mut() {
            let movement = node.force.scale(c).clamp_axes(max);
            node.position = node.position.add_point(movement);
            node.force = Point::ORIGIN;
        }
    }

    /// Computes the bounds of the current positions and stores them on the
    /// graph.
    pub fn calc_bounds(&mut self) -> Option<Bounds> {
        let bounds = Bounds::from_points(self.graph.nodes().map(Node::position));
        self.graph.set_layout_bounds(bounds);
        bounds
    }

    fn repulse(&mut self, i: usize, j: usize) {
        let (dx, dy, d2) = self.separation(i, j);
        let d = d2.sqrt();
        if d < self.config.max_repulsive_force_distance {
            let k = self.config.spring_constant;
            let force = k * k / d;
            let push = Point::new(force * dx / d, force * dy / d);
            self.add_force(j, push);
            self.add_force(i, push.scale(-1.0));
        }
    }

    fn attract(&mut self, spring: Spring) {
        let (dx, dy, mut d2) = self.separation(spring.source, spring.target);
        let mut d = d2.sqrt();
        let max = self.config.max_repulsive_force_distance;
        if d > max {
            d = max;
            d2 = d * d;
        }

        let k = self.config.spring_constant;
        let force = (d2 - k * k) / k * spring.scale;
        let pull = Point::new(force * dx / d, force * dy / d);
        self.add_force(spring.target, pull.scale(-1.0));
        self.add_force(spring.source, pull);
    }

    /// Vector from node `i` to node `j` and its squared length, replaced by
    /// a random offset when the nodes (nearly) coincide.
    fn separation(&mut self, i: usize, j: usize) -> (f64, f64, f64) {
        let from = self.position(i);
        let to = self.position(j);
        let mut dx = to.x() - from.x();
        let mut dy = to.y() - from.y();
        let mut d2 = dx * dx + dy * dy;

        if d2 < COINCIDENT_DISTANCE_SQUARED {
            dx = 0.1 * self.rng.random::<f64>() + 0.1;
            dy = 0.1 * self.rng.random::<f64>() + 0.1;
            d2 = dx * dx + dy * dy;
        }
        (dx, dy, d2)
    }

    fn position(&self, index: usize) -> Point {
        self.graph
            .node_at(index)
            .map_or(Point::ORIGIN, Node::position)
    }

    fn add_force(&mut self, index: usize, force: Point) {
        if let Some(node) = self.graph.node_at_mut(index) {
            node.force = node.force.add_point(force);
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::graph::EdgeStyle;

    fn place<N, E>(graph: &mut Graph<N, E>, id: &str, x: f64, y: f64) {
        if let Some(node) = graph.node_mut(id) {
            node.set_position(Point::new(x, y));
        }
    }

    #[test]
    fn test_default_config() {
        let config = SpringConfig::default();
        assert_eq!(config.iterations(), 500);
        assert_eq!(config.max_repulsive_force_distance(), 6.0);
        assert_eq!(config.spring_constant(), 2.0);
        assert_eq!(config.time_step(), 0.01);
        assert_eq!(config.max_vertex_movement(), 0.5);
        assert_eq!(config.seed(), None);
    }

    #[test]
    fn test_prepare_resets_state() {
        let mut graph: Graph = Graph::new();
        graph.add_node("a");
        place(&mut graph, "a", 3.0, 4.0);
        graph.set_layout_bounds(Some(Bounds::new(0.0, 0.0, 1.0, 1.0)));

        SpringLayout::new(&mut graph, SpringConfig::default()).prepare();

        assert!(graph.node("a").unwrap().position().is_zero());
        assert!(graph.node("a").unwrap().force().is_zero());
        assert_eq!(graph.layout_bounds(), None);
    }

    #[test]
    fn test_single_repulsion_step() {
        let mut graph: Graph = Graph::new();
        graph.add_node("a");
        graph.add_node("b");
        place(&mut graph, "b", 1.0, 0.0);

        SpringLayout::new(&mut graph, SpringConfig::default()).iterate();

        // k²/d = 4, times c = 0.01
        let a = graph.node("a").unwrap();
        let b = graph.node("b").unwrap();
        assert!(approx_eq!(f64, a.position().x(), -0.04, ulps = 4));
        assert!(approx_eq!(f64, b.position().x(), 1.04, ulps = 4));
        assert_eq!(a.position().y(), 0.0);
        assert!(a.force().is_zero());
    }

    #[test]
    fn test_short_spring_pushes_apart() {
        let mut graph: Graph = Graph::new();
        graph.add_edge("a", "b", EdgeStyle::default());
        place(&mut graph, "b", 1.0, 0.0);

        SpringLayout::new(&mut graph, SpringConfig::default()).iterate();

        // repulsion 4, plus (1 - 4) / 2 = -1.5 from each of the two edge records
        assert!(approx_eq!(f64, graph.node("a").unwrap().position().x(), -0.07, ulps = 4));
        assert!(approx_eq!(f64, graph.node("b").unwrap().position().x(), 1.07, ulps = 4));
    }

    #[test]
    fn test_movement_is_clamped() {
        let mut graph: Graph = Graph::new();
        graph.add_edge(
            "a",
            "b",
            EdgeStyle::default()
                .directed()
                .with_attraction(10f64.exp()),
        );
        place(&mut graph, "b", 10.0, 0.0);

        SpringLayout::new(&mut graph, SpringConfig::default()).iterate();

        assert!(approx_eq!(f64, graph.node("a").unwrap().position().x(), 0.5, ulps = 4));
        assert!(approx_eq!(f64, graph.node("b").unwrap().position().x(), 9.5, ulps = 4));
    }

    #[test]
    fn test_coincident_nodes_get_finite_forces() {
        let mut graph: Graph = Graph::new();
        graph.add_edge("a", "b", EdgeStyle::default());
        graph.add_edge("a", "c", EdgeStyle::default());

        let mut layout = SpringLayout::new(&mut graph, SpringConfig::default().with_seed(3));
        layout.prepare();
        layout.iterate();

        for node in graph.nodes() {
            assert!(node.position().is_finite());
        }
    }

    #[test]
    fn test_spring_scale() {
        assert_eq!(spring_scale(1.0), 1.0);
        assert!(approx_eq!(f64, spring_scale(2f64.exp()), 2.0, ulps = 4));
        assert_eq!(spring_scale(0.0), 1.0);
        assert_eq!(spring_scale(-3.0), 1.0);
        assert_eq!(spring_scale(f64::NAN), 1.0);
        assert_eq!(spring_scale(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_zero_attraction_lays_out_like_default() {
        let run = |style: EdgeStyle| {
            let mut graph: Graph = Graph::new();
            graph.add_edge("a", "b", style);
            graph.add_edge("b", "c", EdgeStyle::default());
            SpringLayout::new(&mut graph, SpringConfig::default().with_seed(5)).layout();
            graph.nodes().map(Node::position).collect::<Vec<_>>()
        };

        let zero = run(EdgeStyle::default().with_attraction(0.0));
        assert_eq!(zero, run(EdgeStyle::default()));
        assert!(zero.iter().all(|p| p.x().abs() < 10.0 && p.y().abs() < 10.0));
    }

    #[test]
    fn test_empty_graph_has_no_bounds() {
        let mut graph: Graph = Graph::new();
        let bounds = SpringLayout::new(&mut graph, SpringConfig::default()).layout();
        assert_eq!(bounds, None);
        assert_eq!(graph.layout_bounds(), None);
    }

    #[test]
    fn test_single_node_has_degenerate_bounds() {
        let mut graph: Graph = Graph::new();
        graph.add_node("only");

        let bounds = SpringLayout::new(&mut graph, SpringConfig::default().with_seed(1))
            .layout()
            .unwrap();
        assert_eq!(bounds.width(), 0.0);
        assert_eq!(bounds.height(), 0.0);
        assert!(graph.node("only").unwrap().position().is_zero());
    }

    #[test]
    fn test_zero_iterations_leaves_nodes_at_origin() {
        let mut graph: Graph = Graph::new();
        graph.add_edge("a", "b", EdgeStyle::default());

        let bounds = SpringLayout::new(&mut graph, SpringConfig::default().with_iterations(0))
            .layout()
            .unwrap();
        assert_eq!(bounds, Bounds::new(0.0, 0.0, 0.0, 0.0));
    }
}

//! Properties of the spring layout on random graphs.

use proptest::prelude::*;

use trellis::{
    geometry::Point,
    graph::{EdgeStyle, Graph},
    layout::{SpringConfig, SpringLayout},
};

fn build(node_count: usize, edges: &[(usize, usize)]) -> Graph {
    let mut graph: Graph = Graph::new();
    for index in 0..node_count {
        graph.add_node(index);
    }
    for &(from, to) in edges {
        graph.add_edge(from % node_count, to % node_count, EdgeStyle::default());
    }
    graph
}

fn positions(graph: &Graph) -> Vec<Point> {
    graph.nodes().map(|node| node.position()).collect()
}

fn random_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>, u64)> {
    (2usize..8).prop_flat_map(|count| {
        (
            Just(count),
            prop::collection::vec((0..count, 0..count), 0..12),
            any::<u64>(),
        )
    })
}

#[test]
fn test_same_seed_same_positions() {
    let config = SpringConfig::default().with_seed(42);

    let mut first = build(3, &[(0, 1), (1, 2)]);
    let mut second = build(3, &[(0, 1), (1, 2)]);
    SpringLayout::new(&mut first, config.clone()).layout();
    SpringLayout::new(&mut second, config).layout();

    assert_eq!(positions(&first), positions(&second));
}

#[test]
fn test_connected_nodes_end_closer_than_strangers() {
    let mut graph = build(3, &[(0, 1)]);
    SpringLayout::new(&mut graph, SpringConfig::default().with_seed(3)).layout();

    let p = positions(&graph);
    assert!(p[0].distance(p[1]) < p[0].distance(p[2]));
    assert!(p[0].distance(p[1]) < p[1].distance(p[2]));
}

#[test]
fn test_layout_stores_bounds_on_graph() {
    let mut graph = build(4, &[(0, 1), (1, 2), (2, 3)]);
    let bounds = SpringLayout::new(&mut graph, SpringConfig::default().with_seed(9)).layout();

    assert!(bounds.is_some());
    assert_eq!(graph.layout_bounds(), bounds);
}

#[test]
fn test_rerun_restarts_from_origin() {
    let config = SpringConfig::default().with_seed(5);
    let mut graph = build(3, &[(0, 1), (1, 2)]);

    SpringLayout::new(&mut graph, config.clone()).layout();
    let first = positions(&graph);
    SpringLayout::new(&mut graph, config).layout();

    assert_eq!(positions(&graph), first);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_layout_is_finite_and_bounded((count, edges, seed) in random_graph()) {
        let mut graph = build(count, &edges);
        let bounds = SpringLayout::new(&mut graph, SpringConfig::default().with_seed(seed))
            .layout()
            .expect("non-empty graph has bounds");

        for node in graph.nodes() {
            prop_assert!(node.position().is_finite());
            prop_assert!(bounds.contains(node.position()));
        }
    }

    #[test]
    fn prop_nodes_are_separated((count, edges, seed) in random_graph()) {
        let mut graph = build(count, &edges);
        SpringLayout::new(&mut graph, SpringConfig::default().with_seed(seed)).layout();

        let p = positions(&graph);
        for i in 0..p.len() {
            for j in (i + 1)..p.len() {
                prop_assert!(p[i].distance(p[j]) > 1e-3, "nodes {} and {} overlap", i, j);
            }
        }
    }

    #[test]
    fn prop_movement_per_step_is_clamped((count, edges, seed) in random_graph()) {
        let mut graph = build(count, &edges);
        let config = SpringConfig::default().with_seed(seed);
        let limit = config.max_vertex_movement();
        let mut layout = SpringLayout::new(&mut graph, config);
        layout.prepare();

        for _ in 0..20 {
            let before: Vec<Point> = layout_positions(&layout);
            layout.iterate();
            let after = layout_positions(&layout);
            for (b, a) in before.iter().zip(&after) {
                prop_assert!((a.x() - b.x()).abs() <= limit + 1e-12);
                prop_assert!((a.y() - b.y()).abs() <= limit + 1e-12);
            }
        }
    }
}

fn layout_positions(layout: &SpringLayout<'_, (), ()>) -> Vec<Point> {
    layout.graph().nodes().map(|node| node.position()).collect()
}

//! Shortest-path algorithms against each other on parsed graphs.

use trellis::{
    GraphBuilder,
    algorithms::{AlgorithmError, bellman_ford, dijkstra, floyd_warshall},
    graph::{EdgeStyle, Graph},
    identifier::Id,
};

const ROADS: &str = r#"
    a -> b [weight=7];
    a -> c [weight=9];
    a -> f [weight=14];
    b -> c [weight=10];
    b -> d [weight=15];
    c -> d [weight=11];
    c -> f [weight=2];
    d -> e [weight=6];
    e -> f [weight=9];
"#;

fn roads() -> Graph<trellis::semantic::Attributes, trellis::semantic::Attributes> {
    let builder = GraphBuilder::default();
    let spec = builder.parse(ROADS).expect("valid graph");
    builder.build(&spec)
}

#[test]
fn test_all_algorithms_agree() {
    let mut graph = roads();
    let all = floyd_warshall(&graph).unwrap();
    let fast = dijkstra(&graph, "a").unwrap();
    let slow = bellman_ford(&mut graph, "a").unwrap();

    for node in ["a", "b", "c", "d", "e", "f"] {
        let expected = all.distance("a", node);
        assert_eq!(fast.distance(node), expected, "dijkstra to {node}");
        assert_eq!(slow.distance(node), expected, "bellman-ford to {node}");
    }
    assert_eq!(fast.distance("e"), Some(26.0));
}

#[test]
fn test_paths_agree() {
    let graph = roads();
    let all = floyd_warshall(&graph).unwrap();
    let single = dijkstra(&graph, "a").unwrap();

    let expected: Vec<Id> = ["a", "c", "d", "e"].into_iter().map(Id::new).collect();
    assert_eq!(single.path_to("e").unwrap(), expected);
    assert_eq!(all.path("a", "e").unwrap(), expected);
}

#[test]
fn test_builder_picks_bellman_ford_for_negative_weights() {
    let builder = GraphBuilder::default();
    let mut graph: Graph = Graph::new();
    graph.add_edge("s", "t", EdgeStyle::default().directed().with_weight(5.0));
    graph.add_edge("s", "u", EdgeStyle::default().directed().with_weight(2.0));
    graph.add_edge("t", "u", EdgeStyle::default().directed().with_weight(-4.0));

    let paths = builder.shortest_paths(&mut graph, "s").unwrap();
    assert_eq!(paths.distance("u"), Some(1.0));
    assert!(graph.snapshot_count() > 0);
}

#[test]
fn test_builder_uses_dijkstra_without_snapshots() {
    let builder = GraphBuilder::default();
    let mut graph = roads();

    let paths = builder.shortest_paths(&mut graph, "a").unwrap();
    assert_eq!(paths.distance("f"), Some(11.0));
    assert_eq!(graph.snapshot_count(), 0);
}

#[test]
fn test_snapshots_replay_relaxations() {
    let mut graph = roads();
    bellman_ford(&mut graph, "a").unwrap();

    let snapshots = graph.take_snapshots();
    assert!(snapshots.len() >= 3);
    for snapshot in &snapshots[1..snapshots.len() - 1] {
        assert!(snapshot.comment().starts_with("Relax edge between"));
        assert_eq!(snapshot.about().len(), 2);
    }
    assert_eq!(graph.snapshot_count(), 0);
}

#[test]
fn test_negative_cycle_through_builder() {
    let builder = GraphBuilder::default();
    let mut graph: Graph = Graph::new();
    graph.add_edge("a", "b", EdgeStyle::default().directed().with_weight(-1.0));
    graph.add_edge("b", "a", EdgeStyle::default().directed().with_weight(-1.0));

    let err = builder.shortest_paths(&mut graph, "a").unwrap_err();
    assert!(matches!(
        err,
        trellis::TrellisError::Algorithm(AlgorithmError::NegativeCycle)
    ));
}

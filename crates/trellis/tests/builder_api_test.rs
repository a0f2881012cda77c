//! Integration tests for the GraphBuilder API

use trellis::{
    GraphBuilder, TrellisError,
    config::{AppConfig, RenderConfig, SnapshotConfig, SpringConfig},
    graph::SnapshotRetention,
};

const SOURCE: &str = r#"
    // a small service map
    node gateway [label="Gateway", color="steelblue"];
    gateway -> auth [weight=2];
    gateway -> orders;
    orders -- db [attraction=3, label="sql"];
"#;

fn seeded() -> GraphBuilder {
    let config = AppConfig::default().with_layout(SpringConfig::default().with_seed(1));
    GraphBuilder::new(config)
}

#[test]
fn test_parse_and_build() {
    let builder = GraphBuilder::default();
    let spec = builder.parse(SOURCE).expect("Should parse valid graph");
    let graph = builder.build(&spec);

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 4, "three edges plus one mirror");
    let gateway = graph.node("gateway").unwrap();
    assert_eq!(gateway.display_label(), "Gateway");
    assert!(gateway.content().color().is_some());
}

#[test]
fn test_render_pipeline() {
    let builder = seeded();
    let spec = builder.parse(SOURCE).unwrap();
    let mut graph = builder.build(&spec);

    let bounds = builder.layout(&mut graph);
    assert!(bounds.is_some());

    let svg = builder.render_svg(&graph).expect("Failed to render");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("Gateway"));
    assert!(svg.contains("sql"));
}

#[test]
fn test_parse_error_keeps_source() {
    let builder = GraphBuilder::default();
    let err = builder.parse("a -- ;").unwrap_err();

    match err {
        TrellisError::Parse { src, .. } => assert_eq!(src, "a -- ;"),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_invalid_config_color() {
    let config = AppConfig::new(
        SpringConfig::default(),
        RenderConfig::default().with_background_color("no-such-color"),
        SnapshotConfig::default(),
    );
    let builder = GraphBuilder::new(config);
    let graph = builder.build(&builder.parse("a -- b;").unwrap());

    assert!(matches!(
        builder.render_svg(&graph),
        Err(TrellisError::Config(_))
    ));
}

#[test]
fn test_canvas_size_from_config() {
    let config = AppConfig::new(
        SpringConfig::default().with_seed(2),
        RenderConfig::new(800.0, 600.0, 20.0).with_background_color("white"),
        SnapshotConfig::default(),
    );
    let builder = GraphBuilder::new(config);
    let mut graph = builder.build(&builder.parse("a -- b; b -- c;").unwrap());
    builder.layout(&mut graph);

    let svg = builder.render_svg(&graph).unwrap();
    assert!(svg.contains("viewBox=\"0 0 800 600\""));
    assert!(svg.contains("<rect"));
}

#[test]
fn test_snapshot_retention_from_config() {
    let config = AppConfig::new(
        SpringConfig::default(),
        RenderConfig::default(),
        SnapshotConfig::keep_last(2),
    );
    let builder = GraphBuilder::new(config);
    let mut graph = builder.build(&builder.parse("a -> b [weight=-1]; b -> c;").unwrap());
    assert_eq!(graph.retention(), SnapshotRetention::KeepLast(2));

    builder.shortest_paths(&mut graph, "a").unwrap();
    assert_eq!(graph.snapshot_count(), 2);
    assert_eq!(graph.snapshots().last().unwrap().comment(), "Ready.");
}

#[test]
fn test_write_svg() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.svg");

    let builder = seeded();
    let mut graph = builder.build(&builder.parse(SOURCE).unwrap());
    builder.layout(&mut graph);
    builder.write_svg(&graph, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("data-node=\"orders\""));
}

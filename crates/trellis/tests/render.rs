//! Drawing laid-out graphs and dragging nodes around.

use std::sync::{Arc, Mutex};

use svg::node::element::{Circle, Group};

use trellis::{
    geometry::Point,
    graph::{EdgeStyle, Graph, NodeContent},
    identifier::Id,
    layout::{SpringConfig, SpringLayout},
    render::{DRAG_MARGIN, DragEvent, NodeRenderFn, SvgRenderer, Viewport},
};

fn laid_out() -> Graph {
    let mut graph: Graph = Graph::new();
    graph.add_edge("a", "b", EdgeStyle::default());
    graph.add_edge("b", "c", EdgeStyle::default().directed());
    graph.add_edge("c", "a", EdgeStyle::default().with_label("back"));
    SpringLayout::new(&mut graph, SpringConfig::default().with_seed(17)).layout();
    graph
}

#[test]
fn test_scene_fits_inside_margin() {
    let graph = laid_out();
    let viewport = Viewport::new(600.0, 300.0, 50.0);
    let mut renderer = SvgRenderer::new(viewport);
    renderer.draw(&graph);

    assert_eq!(renderer.scene().len(), 3);
    for (id, point) in renderer.scene().iter() {
        assert!(
            (50.0..=550.0).contains(&point.x()) && (50.0..=250.0).contains(&point.y()),
            "{id} at {point:?} is outside the drawing area"
        );
    }
}

#[test]
fn test_document_structure() {
    let graph = laid_out();
    let svg = SvgRenderer::default().render_string(&graph);

    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("class=\"node\"").count(), 3);
    assert_eq!(svg.matches("<path").count(), 3 + 1, "three edges plus one marker shape");
    assert!(svg.contains("marker-end"));
    assert!(svg.contains(">back<"));
}

#[test]
fn test_custom_node_drawing() {
    let mut graph = laid_out();
    let dot = NodeRenderFn::new(|ctx| {
        Group::new().set("class", "dot").add(
            Circle::new()
                .set("cx", ctx.center.x())
                .set("cy", ctx.center.y())
                .set("r", 5),
        )
    });
    if let Some(node) = graph.node_mut("b") {
        *node.content_mut() = NodeContent::default().with_render(dot);
    }

    let svg = SvgRenderer::default().render_string(&graph);
    assert_eq!(svg.matches("class=\"dot\"").count(), 1);
    assert_eq!(svg.matches("<ellipse").count(), 2);
    assert_eq!(svg.matches("class=\"node\"").count(), 3);
}

#[test]
fn test_drag_clamps_and_notifies() {
    let graph = laid_out();
    let mut renderer = SvgRenderer::default();
    renderer.draw(&graph);

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let subscription = renderer.subscribe(move |event| sink.lock().unwrap().push(*event));

    let a = Id::new("a");
    let start = renderer.scene().position(a).unwrap();
    assert!(renderer.pointer_down(a, start));
    let moved = renderer.pointer_move(Point::new(-500.0, 10_000.0)).unwrap();
    assert_eq!(moved, Point::new(DRAG_MARGIN, 400.0 - DRAG_MARGIN));
    assert_eq!(renderer.pointer_up(), Some(a));

    let recorded = events.lock().unwrap().clone();
    assert!(matches!(recorded[0], DragEvent::Started { .. }));
    assert!(matches!(recorded[1], DragEvent::Moved { .. }));
    assert!(matches!(recorded[2], DragEvent::Released { position, .. } if position == moved));

    assert!(renderer.unsubscribe(subscription));
    renderer.pointer_down(a, moved);
    renderer.pointer_up();
    assert_eq!(events.lock().unwrap().len(), 3);
}

#[test]
fn test_redraw_keeps_dragged_position() {
    let graph = laid_out();
    let mut renderer = SvgRenderer::default();
    renderer.draw(&graph);

    let c = Id::new("c");
    let start = renderer.scene().position(c).unwrap();
    renderer.pointer_down(c, start);
    renderer.pointer_move(Point::new(200.0, 200.0));
    renderer.pointer_up();

    let svg = renderer.redraw(&graph).to_string();
    assert!(svg.contains("data-node=\"c\""));
    assert_eq!(renderer.scene().position(c), Some(Point::new(200.0, 200.0)));
}

#[test]
fn test_empty_graph_draws_blank_canvas() {
    let graph: Graph = Graph::new();
    let svg = SvgRenderer::default().render_string(&graph);

    assert!(svg.contains("viewBox=\"0 0 400 400\""));
    assert!(!svg.contains("class=\"node\""));
}

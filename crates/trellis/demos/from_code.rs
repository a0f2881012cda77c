//! Example: Building a graph in code
//!
//! This example demonstrates the basic workflow of:
//! 1. Adding nodes and edges to a Graph directly
//! 2. Running the spring layout through a GraphBuilder
//! 3. Drawing one node with a custom callback
//! 4. Running Dijkstra on the same graph
//! 5. Rendering the result to SVG

use svg::node::element::{Group, Rectangle};

use trellis::{
    GraphBuilder,
    color::Color,
    graph::{EdgeStyle, Graph, NodeContent},
    render::NodeRenderFn,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut graph: Graph = Graph::new();

    // A square drawn in place of the default ellipse
    let square = NodeRenderFn::new(|ctx| {
        Group::new().add(
            Rectangle::new()
                .set("x", ctx.center.x() - 15.0)
                .set("y", ctx.center.y() - 15.0)
                .set("width", 30)
                .set("height", 30)
                .set("fill", ctx.fill),
        )
    });
    graph.add_node_with(
        "hub",
        NodeContent::default()
            .with_label("Hub")
            .with_color(Color::new("orange")?)
            .with_render(square),
    );

    // Edges create their endpoints on demand
    for spoke in 1..=5 {
        graph.add_edge("hub", spoke, EdgeStyle::default().with_weight(f64::from(spoke)));
    }
    graph.add_edge(1, 2, EdgeStyle::default().directed().with_label("next"));
    graph.add_edge(4, 5, EdgeStyle::default().with_attraction(4.0));

    let builder = GraphBuilder::default();

    println!("Laying out {} nodes...", graph.node_count());
    if let Some(bounds) = builder.layout(&mut graph) {
        println!("Layout bounds: {} x {}", bounds.width(), bounds.height());
    }

    let paths = builder.shortest_paths(&mut graph, 2)?;
    let route: Vec<String> = paths.path_to(5)?.iter().map(|id| id.to_string()).collect();
    println!("Shortest route from 2 to 5: {}", route.join(" -> "));

    let svg = builder.render_svg(&graph)?;
    println!("SVG length: {} bytes", svg.len());

    let output_path = "from_code_output.svg";
    std::fs::write(output_path, &svg)?;
    println!("SVG written to: {}", output_path);

    Ok(())
}

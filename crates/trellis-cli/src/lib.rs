//! Trellis CLI library
//!
//! Core logic of the `trellis` command: load configuration, parse the input
//! file, lay the graph out, write the SVG and optionally report shortest
//! paths.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io::Write};

use log::info;

use trellis::{GraphBuilder, TrellisError, config::AppConfig};

/// Run the Trellis CLI application, printing any path report to stdout.
///
/// # Errors
///
/// Returns `TrellisError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Unknown `--paths-from` nodes and negative cycles
/// - Export errors
pub fn run(args: &Args) -> Result<(), TrellisError> {
    run_with_output(args, &mut std::io::stdout())
}

/// Same as [`run`], writing the path report to `out`.
pub fn run_with_output(args: &Args, out: &mut impl Write) -> Result<(), TrellisError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let app_config = apply_overrides(config::load_config(args.config.as_ref())?, args);

    let source = fs::read_to_string(&args.input)?;

    let builder = GraphBuilder::new(app_config);
    let spec = builder.parse(&source)?;
    let mut graph = builder.build(&spec);
    builder.layout(&mut graph);
    builder.write_svg(&graph, &args.output)?;

    info!(output_file = args.output; "SVG exported successfully");

    if let Some(from) = &args.paths_from {
        let paths = builder.shortest_paths(&mut graph, from.as_str())?;
        for (id, distance) in paths.distances() {
            if distance.is_finite() {
                let route: Vec<String> = paths
                    .path_to(id)?
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                writeln!(out, "{id}\t{distance}\t{}", route.join(" -> "))?;
            } else {
                writeln!(out, "{id}\tunreachable")?;
            }
        }
    }

    Ok(())
}

fn apply_overrides(config: AppConfig, args: &Args) -> AppConfig {
    let mut layout = config.layout().clone();
    if let Some(seed) = args.seed {
        layout = layout.with_seed(seed);
    }
    if let Some(iterations) = args.iterations {
        layout = layout.with_iterations(iterations);
    }
    config.with_layout(layout)
}

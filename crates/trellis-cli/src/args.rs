//! Command-line argument definitions for the Trellis CLI.

use clap::Parser;

/// Command-line arguments for the Trellis graph tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph description
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Seed for the layout's random jitter, overriding the configuration
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of layout iterations, overriding the configuration
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Print shortest distances from this node
    #[arg(long, value_name = "NODE")]
    pub paths_from: Option<String>,
}

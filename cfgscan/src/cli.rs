//! Command line interface configuration using `clap`.
//! This struct defines the arguments and flags accepted by the program.

use clap::Parser;
use std::path::PathBuf;

/// Command line interface configuration.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "cfgscan - heuristic control-flow graphs and reaching definitions for C-like sources",
    long_about = None
)]
pub struct Cli {
    /// Path to the source unit to analyze (a single C-like file).
    pub path: PathBuf,

    /// Attempt to render the graph description to PNG using Graphviz `dot`.
    /// Failure to render is reported as an informational message, not an
    /// error.
    #[arg(long)]
    pub render: bool,

    /// Directory for generated files (graph description, report, image).
    /// Defaults to the current directory.
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Output a machine-readable JSON summary instead of the text summary.
    #[arg(long)]
    pub json: bool,

    /// Show the definition table and convergence details.
    #[arg(short, long)]
    pub verbose: bool,
}

//! Console summary output.

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use std::io::Write;
use std::path::Path;

use crate::flow::defs::Definition;
use crate::flow::reaching::{SolveResult, MAX_ITERATIONS};
use crate::metrics::GraphMetrics;
use crate::utils::normalize_display_path;

/// Print the main header with box-drawing characters.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_header(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{}",
        "╔════════════════════════════════════════╗".cyan()
    )?;
    writeln!(
        writer,
        "{}",
        "║  Control-Flow Analysis Results         ║".cyan().bold()
    )?;
    writeln!(
        writer,
        "{}",
        "╚════════════════════════════════════════╝".cyan()
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Print the graph metrics line (node count, edge count, cyclomatic
/// complexity).
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_metrics(writer: &mut impl Write, metrics: &GraphMetrics) -> std::io::Result<()> {
    writeln!(
        writer,
        "Blocks: {}  Edges: {}  Cyclomatic Complexity: {}",
        metrics.nodes.to_string().bold(),
        metrics.edges.to_string().bold(),
        metrics.cyclomatic.to_string().cyan().bold()
    )
}

/// Print the definition table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_definitions_table(
    writer: &mut impl Write,
    definitions: &[Definition],
) -> std::io::Result<()> {
    if definitions.is_empty() {
        writeln!(writer, "\n{}", "No definitions found.".dimmed())?;
        return Ok(());
    }

    writeln!(writer, "\n{}", "Definitions".bold().underline())?;
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Variable", "Block", "Line", "Statement"]);
    for def in definitions {
        table.add_row(vec![
            Cell::new(def.id).add_attribute(Attribute::Dim),
            Cell::new(&def.variable).add_attribute(Attribute::Bold),
            Cell::new(def.block),
            Cell::new(def.line),
            Cell::new(&def.text),
        ]);
    }
    writeln!(writer, "{table}")
}

/// Print how many passes the solver needed.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_convergence(writer: &mut impl Write, flow: &SolveResult) -> std::io::Result<()> {
    writeln!(
        writer,
        "{}",
        format!("Dataflow converged in {} iterations", flow.iterations).dimmed()
    )
}

/// Warn that the solver hit its iteration cap. The last computed sets are
/// still reported.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_solver_warning(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(
        writer,
        "{}",
        format!("WARNING: dataflow solver stopped after {MAX_ITERATIONS} iterations without converging")
            .yellow()
            .bold()
    )
}

/// Note a file written by the run.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_wrote(writer: &mut impl Write, what: &str, path: &Path) -> std::io::Result<()> {
    writeln!(
        writer,
        "Wrote {what} to {}",
        normalize_display_path(path).bold()
    )
}

/// Explain that rendering failed and how to run the renderer manually.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_render_fallback(writer: &mut impl Write, dot_path: &Path) -> std::io::Result<()> {
    writeln!(
        writer,
        "{}",
        "Could not render PNG automatically. Make sure Graphviz \"dot\" is installed and on PATH."
            .yellow()
    )?;
    let dot_display = normalize_display_path(dot_path);
    let png_display = dot_display.replace(".dot", ".png");
    writeln!(
        writer,
        "{}",
        format!("You can run it manually: dot -Tpng {dot_display} -o {png_display}").yellow()
    )
}

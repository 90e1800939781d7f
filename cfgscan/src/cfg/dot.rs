//! Graph description output and optional rendering.
//!
//! The graph description is Graphviz DOT: one box node per block labeled
//! with its id and the literal (line index: text) pairs it contains, one
//! edge statement per retained edge. `sequential` edges render unlabeled.

use anyhow::Result;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use super::types::{BasicBlock, Edge, EdgeKind};

/// Writes the graph description for a finished CFG.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn write_dot(
    writer: &mut impl Write,
    blocks: &[BasicBlock],
    edges: &[Edge],
) -> std::io::Result<()> {
    writeln!(writer, "digraph CFG {{")?;
    writeln!(writer, "  node [shape=box, fontname=\"monospace\"];")?;
    for block in blocks {
        let mut label_lines = vec![format!("{}:", block.id)];
        if block.lines.is_empty() {
            label_lines.push("void".to_owned());
        } else {
            for (idx, text) in &block.lines {
                label_lines.push(format!("{idx}: {}", escape_label(text)));
            }
        }
        writeln!(writer, "  {} [label=\"{}\"];", block.id, label_lines.join("\\n"))?;
    }
    for edge in edges {
        if edge.kind == EdgeKind::Sequential {
            writeln!(writer, "  {} -> {};", edge.from, edge.to)?;
        } else {
            writeln!(
                writer,
                "  {} -> {} [label=\"{}\"];",
                edge.from, edge.to, edge.kind
            )?;
        }
    }
    writeln!(writer, "}}")
}

/// Escapes embedded backslash and quote characters for a DOT label.
fn escape_label(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Invokes the external Graphviz `dot` tool to rasterize a graph
/// description.
///
/// # Errors
///
/// Returns an error if `dot` cannot be spawned or exits unsuccessfully.
/// Callers treat this as informational: rendering is optional and its
/// failure never fails the run.
pub fn render_png(dot_path: &Path, png_path: &Path) -> Result<()> {
    let status = Command::new("dot")
        .arg("-Tpng")
        .arg(dot_path)
        .arg("-o")
        .arg(png_path)
        .status()?;
    anyhow::ensure!(status.success(), "dot exited with {status}");
    Ok(())
}

//! Shared entry point for all binaries.
//!
//! Orchestration: read the source unit, run the analysis pipeline, write
//! the graph description and the reaching-definitions report, optionally
//! invoke the external renderer, and print the console (or JSON) summary.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::analyzer::{analyze_source, SourceAnalysis};
use crate::cfg::dot;
use crate::cli::Cli;
use crate::flow::defs::Definition;
use crate::metrics::GraphMetrics;
use crate::output::{report, summary};
use crate::utils::normalize_display_path;

/// Runs the analyzer with the given arguments using stdout as the writer.
///
/// # Errors
///
/// Returns an error if the input file cannot be read or an output file
/// cannot be written.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Generated-file paths included in the JSON summary.
#[derive(Serialize)]
struct JsonOutputs {
    dot: String,
    report: String,
    image: Option<String>,
}

/// Machine-readable run summary for `--json`.
#[derive(Serialize)]
struct JsonSummary<'a> {
    file: String,
    metrics: &'a GraphMetrics,
    definitions: &'a [Definition],
    iterations: usize,
    converged: bool,
    outputs: JsonOutputs,
}

/// Run cfgscan with the given arguments, writing output to the specified
/// writer.
///
/// This is the testable version of `run_with_args` that allows output
/// capture.
///
/// # Errors
///
/// Returns an error if the input file cannot be read or an output file
/// cannot be written. Argument errors are handled by mapping to exit codes
/// (help/version print and exit 0, usage errors exit 1).
pub fn run_with_args_to<W: Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["cfgscan".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    // Let clap print help/version as intended, but captured
                    // by the writer.
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    return Ok(0);
                }
                _ => {
                    eprint!("{e}");
                    return Ok(1);
                }
            }
        }
    };

    let source = fs::read_to_string(&cli.path)
        .with_context(|| format!("Failed to read source file {}", cli.path.display()))?;
    let analysis = analyze_source(&source);

    let stem = cli
        .path
        .file_stem()
        .map_or_else(|| "unit".to_owned(), |s| s.to_string_lossy().into_owned());
    let out_dir = cli.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let dot_path = out_dir.join(format!("{stem}_cfg.dot"));
    write_dot_file(&dot_path, &analysis)?;

    let report_path = out_dir.join(format!("{stem}_reaching.txt"));
    write_report_file(&report_path, &analysis)?;

    let mut image_path = None;
    let mut render_failed = false;
    if cli.render {
        let png_path = out_dir.join(format!("{stem}_cfg.png"));
        match dot::render_png(&dot_path, &png_path) {
            Ok(()) => image_path = Some(png_path),
            Err(_) => render_failed = true,
        }
    }

    if cli.json {
        let payload = JsonSummary {
            file: normalize_display_path(&cli.path),
            metrics: &analysis.metrics,
            definitions: &analysis.definitions,
            iterations: analysis.flow.iterations,
            converged: analysis.flow.converged,
            outputs: JsonOutputs {
                dot: normalize_display_path(&dot_path),
                report: normalize_display_path(&report_path),
                image: image_path.as_deref().map(normalize_display_path),
            },
        };
        serde_json::to_writer_pretty(&mut *writer, &payload)?;
        writeln!(writer)?;
    } else {
        summary::print_header(writer)?;
        summary::print_metrics(writer, &analysis.metrics)?;
        if cli.verbose {
            summary::print_definitions_table(writer, &analysis.definitions)?;
            summary::print_convergence(writer, &analysis.flow)?;
        }
        if !analysis.flow.converged {
            summary::print_solver_warning(writer)?;
        }
        summary::print_wrote(writer, "graph description", &dot_path)?;
        summary::print_wrote(writer, "reaching definitions report", &report_path)?;
        if let Some(png_path) = &image_path {
            summary::print_wrote(writer, "rendered graph", png_path)?;
        }
        if render_failed {
            summary::print_render_fallback(writer, &dot_path)?;
        }
    }

    Ok(0)
}

fn write_dot_file(path: &Path, analysis: &SourceAnalysis) -> Result<()> {
    let mut file = fs::File::create(path)
        .with_context(|| format!("Failed to create graph description {}", path.display()))?;
    dot::write_dot(&mut file, &analysis.blocks, &analysis.edges)
        .with_context(|| format!("Failed to write graph description {}", path.display()))
}

fn write_report_file(path: &Path, analysis: &SourceAnalysis) -> Result<()> {
    let mut file = fs::File::create(path)
        .with_context(|| format!("Failed to create report {}", path.display()))?;
    report::write_report(&mut file, analysis)
        .with_context(|| format!("Failed to write report {}", path.display()))
}

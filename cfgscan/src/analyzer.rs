//! Full-pipeline orchestration over a single source unit.

use crate::cfg::blocks::build_blocks;
use crate::cfg::edges::build_edges;
use crate::cfg::structure::{recognize, Recognition};
use crate::cfg::types::{BasicBlock, ControlDescriptor, Edge};
use crate::flow::defs::{extract_definitions, Definition};
use crate::flow::reaching::{self, compute_gen_kill, GenKill, SolveResult};
use crate::metrics::{self, GraphMetrics};
use crate::source::preprocess;

/// Everything derived from one source unit, produced in a single pass of
/// the pipeline and read-only afterward.
#[derive(Debug)]
pub struct SourceAnalysis {
    /// Normalized lines, index-stable with the raw input.
    pub lines: Vec<String>,
    /// Recognized control constructs, in scan order.
    pub controls: Vec<ControlDescriptor>,
    /// Basic blocks in id order.
    pub blocks: Vec<BasicBlock>,
    /// Deduplicated labeled edges.
    pub edges: Vec<Edge>,
    /// Assignment definitions in id order.
    pub definitions: Vec<Definition>,
    /// Per-block gen and kill sets.
    pub gen_kill: GenKill,
    /// Fixed-point IN/OUT sets and the convergence trail.
    pub flow: SolveResult,
    /// Node/edge counts and cyclomatic complexity.
    pub metrics: GraphMetrics,
}

/// Runs the full pipeline: normalize, recognize, partition into blocks,
/// derive edges, extract definitions, compute gen/kill, iterate to a fixed
/// point, derive metrics.
///
/// Never fails: structurally ambiguous input degrades to a best-effort
/// graph rather than an error.
#[must_use]
pub fn analyze_source(source: &str) -> SourceAnalysis {
    let lines = preprocess(source);
    let Recognition { leaders, controls } = recognize(&lines);
    let (blocks, start_to_block) = build_blocks(&lines, &leaders);
    let edges = build_edges(&blocks, &controls, &start_to_block);
    let (definitions, var_map) = extract_definitions(&blocks);
    let gen_kill = compute_gen_kill(&blocks, &definitions, &var_map);
    let flow = reaching::solve(&blocks, &edges, &gen_kill);
    let metrics = metrics::compute(&blocks, &edges);

    SourceAnalysis {
        lines,
        controls,
        blocks,
        edges,
        definitions,
        gen_kill,
        flow,
        metrics,
    }
}

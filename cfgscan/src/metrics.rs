//! Graph-level metrics.

use serde::Serialize;

use crate::cfg::types::{BasicBlock, Edge};

/// Node/edge counts and cyclomatic complexity of a finished graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphMetrics {
    /// Number of basic blocks.
    pub nodes: usize,
    /// Number of retained (deduplicated) edges.
    pub edges: usize,
    /// Cyclomatic complexity, E - N + 2. Signed: graphs with unreachable
    /// blocks and few edges can push it below zero.
    pub cyclomatic: i64,
}

/// Derives metrics from the finished graph. Reported, never asserted
/// against any threshold.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn compute(blocks: &[BasicBlock], edges: &[Edge]) -> GraphMetrics {
    let nodes = blocks.len();
    let edge_count = edges.len();
    GraphMetrics {
        nodes,
        edges: edge_count,
        cyclomatic: edge_count as i64 - nodes as i64 + 2,
    }
}

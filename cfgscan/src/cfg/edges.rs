//! Edge derivation from control descriptors and block boundaries.

use rustc_hash::{FxHashMap, FxHashSet};

use super::types::{BasicBlock, BlockId, ControlDescriptor, Edge, EdgeKind};

/// Edge accumulator, deduplicating by the full (from, to, kind) triple while
/// preserving insertion order.
#[derive(Default)]
struct EdgeSink {
    edges: Vec<Edge>,
    seen: FxHashSet<Edge>,
}

impl EdgeSink {
    fn push(&mut self, from: BlockId, to: BlockId, kind: EdgeKind) {
        let edge = Edge { from, to, kind };
        if self.seen.insert(edge) {
            self.edges.push(edge);
        }
    }
}

/// Derives the labeled edge set of the CFG.
///
/// Condition blocks emit `true`/`false` branch edges, plus `back` and `exit`
/// edges for loop kinds. Blocks holding the final line of a branch connect
/// to the construct's join block with a `sequential` edge and do not also
/// fall through to their textual successor; every other non-condition block
/// falls through to the next block in ascending start-line order.
///
/// The result is not guaranteed to be a single connected component, and
/// blocks with no incoming edges are legitimate on unreachable-code inputs.
#[must_use]
pub fn build_edges(
    blocks: &[BasicBlock],
    controls: &[ControlDescriptor],
    start_to_block: &FxHashMap<usize, BlockId>,
) -> Vec<Edge> {
    let control_by_cond: FxHashMap<usize, &ControlDescriptor> =
        controls.iter().map(|c| (c.cond_line, c)).collect();

    // Blocks that terminate a branch of a construct with a resolvable join.
    // These are wired straight to the join block instead of falling through.
    let mut branch_ends: Vec<(BlockId, BlockId)> = Vec::new();
    let mut joined: FxHashSet<BlockId> = FxHashSet::default();
    for control in controls {
        let Some(join_block) = control.join.and_then(|j| start_to_block.get(&j).copied()) else {
            continue;
        };
        for end in [control.then_end, control.else_end].into_iter().flatten() {
            if let Some(block) = blocks.iter().find(|b| b.start <= end && end <= b.end) {
                branch_ends.push((block.id, join_block));
                joined.insert(block.id);
            }
        }
    }

    let mut sink = EdgeSink::default();
    for (idx, block) in blocks.iter().enumerate() {
        if let Some(control) = control_by_cond.get(&block.start) {
            if let Some(then_block) = control
                .then_start
                .and_then(|s| start_to_block.get(&s).copied())
            {
                sink.push(block.id, then_block, EdgeKind::True);
            }
            if let Some(else_line) = control.else_start {
                if let Some(&else_block) = start_to_block.get(&else_line) {
                    sink.push(block.id, else_block, EdgeKind::False);
                }
            } else if let Some(join_block) =
                control.join.and_then(|j| start_to_block.get(&j).copied())
            {
                sink.push(block.id, join_block, EdgeKind::False);
            }
            if control.kind.is_loop() {
                if let Some(body_block) = control
                    .then_start
                    .and_then(|s| start_to_block.get(&s).copied())
                {
                    sink.push(body_block, block.id, EdgeKind::Back);
                }
                if let Some(join_block) =
                    control.join.and_then(|j| start_to_block.get(&j).copied())
                {
                    sink.push(block.id, join_block, EdgeKind::Exit);
                }
            }
        } else if !joined.contains(&block.id) {
            if let Some(next) = blocks.get(idx + 1) {
                sink.push(block.id, next.id, EdgeKind::Sequential);
            }
        }
    }

    for (from, to) in branch_ends {
        sink.push(from, to, EdgeKind::Sequential);
    }

    sink.edges
}

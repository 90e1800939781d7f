//! Basic block construction.

use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

use super::types::{BasicBlock, BlockId};
use crate::source::is_blank;

/// Partitions the line sequence into basic blocks, one per leader.
///
/// Each block spans from its leader line to the line before the next leader
/// (or the last line of the unit), so block ranges cover the full index
/// space with no gaps or overlaps. Returns the blocks in id order together
/// with the start-line lookup used by the edge builder.
#[must_use]
pub fn build_blocks(
    lines: &[String],
    leaders: &BTreeSet<usize>,
) -> (Vec<BasicBlock>, FxHashMap<usize, BlockId>) {
    let starts: Vec<usize> = leaders.iter().copied().collect();
    let mut blocks = Vec::with_capacity(starts.len());
    let mut start_to_block = FxHashMap::default();

    for (idx, &start) in starts.iter().enumerate() {
        let id = BlockId(idx);
        start_to_block.insert(start, id);
        let end = match starts.get(idx + 1) {
            Some(&next) => next - 1,
            None => lines.len().saturating_sub(1),
        };
        let content = (start..=end)
            .filter(|&i| !is_blank(&lines[i]))
            .map(|i| (i, lines[i].clone()))
            .collect();
        blocks.push(BasicBlock {
            id,
            start,
            end,
            lines: content,
        });
    }

    (blocks, start_to_block)
}

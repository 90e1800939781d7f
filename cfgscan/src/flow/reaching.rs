//! Gen/kill computation and the reaching-definitions fixed point.
//!
//! Classical forward dataflow equations at block granularity:
//!
//! - GEN\[B\] = definitions created inside B
//! - KILL\[B\] = other blocks' definitions of variables B defines
//! - IN\[B\]  = union of OUT\[P\] over predecessors P
//! - OUT\[B\] = GEN\[B\] union (IN\[B\] minus KILL\[B\])
//!
//! Same-block redefinitions of one variable all stay in GEN and never kill
//! each other; only definitions belonging to other blocks are killed. The
//! solver repeats full passes in block-id order until nothing changes,
//! retaining a complete IN/OUT snapshot per pass as an auditable
//! convergence trail.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use super::defs::{DefId, Definition};
use crate::cfg::types::{BasicBlock, Edge};

/// Safety cap on solver passes. The lattice is finite and the transfer
/// functions are monotone, so this is never expected to trigger; it is a
/// termination guard, not a tuning knob.
pub const MAX_ITERATIONS: usize = 200;

/// Per-block gen and kill sets, indexed by block id.
#[derive(Debug, Clone)]
pub struct GenKill {
    /// GEN\[B\]: ids of definitions created inside each block.
    pub gen: Vec<FxHashSet<DefId>>,
    /// KILL\[B\]: ids of other blocks' definitions of the variables each
    /// block defines. Never contains the owning block's own ids.
    pub kill: Vec<FxHashSet<DefId>>,
}

/// Computes gen and kill sets for every block.
#[must_use]
pub fn compute_gen_kill(
    blocks: &[BasicBlock],
    definitions: &[Definition],
    var_map: &FxHashMap<String, Vec<DefId>>,
) -> GenKill {
    let mut gen: Vec<FxHashSet<DefId>> = vec![FxHashSet::default(); blocks.len()];
    for def in definitions {
        gen[def.block.0].insert(def.id);
    }

    let mut kill: Vec<FxHashSet<DefId>> = vec![FxHashSet::default(); blocks.len()];
    for (block_idx, gen_set) in gen.iter().enumerate() {
        let killed = &mut kill[block_idx];
        for def_id in gen_set {
            if let Some(others) = var_map.get(&definitions[def_id.0].variable) {
                for &other in others {
                    if definitions[other.0].block.0 != block_idx {
                        killed.insert(other);
                    }
                }
            }
        }
    }

    GenKill { gen, kill }
}

/// One full pass's IN/OUT snapshot, sets sorted for stable reporting.
#[derive(Debug, Clone, Serialize)]
pub struct IterationSnapshot {
    /// 1-based pass number.
    pub iteration: usize,
    /// IN sets per block, sorted by definition id.
    pub in_sets: Vec<Vec<DefId>>,
    /// OUT sets per block, sorted by definition id.
    pub out_sets: Vec<Vec<DefId>>,
}

/// Result of the fixed-point iteration.
#[derive(Debug, Clone, Serialize)]
pub struct SolveResult {
    /// Final IN sets per block, sorted by definition id.
    pub in_sets: Vec<Vec<DefId>>,
    /// Final OUT sets per block, sorted by definition id.
    pub out_sets: Vec<Vec<DefId>>,
    /// Snapshot trail, one entry per pass including the final stable pass.
    pub history: Vec<IterationSnapshot>,
    /// Number of passes executed.
    pub iterations: usize,
    /// False only if the safety cap forced termination.
    pub converged: bool,
}

/// Iterates the dataflow equations to a fixed point.
///
/// Predecessors are derived from edges regardless of label; every edge kind
/// contributes to reachability. Blocks are visited in id order and updates
/// propagate within a pass.
#[must_use]
pub fn solve(blocks: &[BasicBlock], edges: &[Edge], gen_kill: &GenKill) -> SolveResult {
    let n = blocks.len();
    let mut preds: Vec<FxHashSet<usize>> = vec![FxHashSet::default(); n];
    for edge in edges {
        preds[edge.to.0].insert(edge.from.0);
    }

    let mut in_sets: Vec<FxHashSet<DefId>> = vec![FxHashSet::default(); n];
    let mut out_sets: Vec<FxHashSet<DefId>> = vec![FxHashSet::default(); n];
    let mut history = Vec::new();
    let mut iterations = 0;
    let mut converged = true;

    loop {
        iterations += 1;
        let mut changed = false;

        for b in 0..n {
            let mut new_in: FxHashSet<DefId> = FxHashSet::default();
            for &p in &preds[b] {
                new_in.extend(out_sets[p].iter().copied());
            }
            let mut new_out = gen_kill.gen[b].clone();
            new_out.extend(
                new_in
                    .iter()
                    .filter(|d| !gen_kill.kill[b].contains(d))
                    .copied(),
            );
            if new_in != in_sets[b] || new_out != out_sets[b] {
                changed = true;
            }
            in_sets[b] = new_in;
            out_sets[b] = new_out;
        }

        history.push(IterationSnapshot {
            iteration: iterations,
            in_sets: sorted_sets(&in_sets),
            out_sets: sorted_sets(&out_sets),
        });

        if !changed {
            break;
        }
        if iterations > MAX_ITERATIONS {
            converged = false;
            break;
        }
    }

    SolveResult {
        in_sets: sorted_sets(&in_sets),
        out_sets: sorted_sets(&out_sets),
        history,
        iterations,
        converged,
    }
}

fn sorted_sets(sets: &[FxHashSet<DefId>]) -> Vec<Vec<DefId>> {
    sets.iter()
        .map(|set| {
            let mut ids: Vec<DefId> = set.iter().copied().collect();
            ids.sort_unstable();
            ids
        })
        .collect()
}

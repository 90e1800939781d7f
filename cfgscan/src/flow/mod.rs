//! Reaching-definitions dataflow over the CFG.
//!
//! [`defs`] extracts assignment definitions from block contents; [`reaching`]
//! computes per-block gen/kill sets and iterates the classical forward
//! equations to a fixed point, recording a per-iteration snapshot trail for
//! explainability.

pub mod defs;
pub mod reaching;

pub use defs::{DefId, Definition};
pub use reaching::{GenKill, IterationSnapshot, SolveResult};

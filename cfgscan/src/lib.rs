//! cfgscan: heuristic control-flow graphs and reaching definitions for
//! C-like sources.
//!
//! The analysis pipeline is a strict left-to-right sequence over a single
//! source unit:
//!
//! 1. [`source`] strips comments and normalizes lines, keeping the original
//!    line count and indices stable.
//! 2. [`cfg`] recognizes leaders and control structures from the line
//!    sequence, partitions it into basic blocks, and derives labeled edges.
//! 3. [`flow`] extracts assignment definitions, computes per-block gen/kill
//!    sets, and iterates reaching definitions to a fixed point, keeping a
//!    per-iteration snapshot trail.
//! 4. [`metrics`] derives node/edge counts and cyclomatic complexity.
//!
//! No grammar is involved anywhere: construct recognition is line-prefix and
//! substring matching with bounded look-ahead, and inputs that do not match
//! the expected lexical shapes degrade to a best-effort graph rather than an
//! error.

pub mod analyzer;
pub mod cfg;
pub mod cli;
pub mod entry_point;
pub mod flow;
pub mod metrics;
pub mod output;
pub mod source;
pub mod utils;

//! CFG (Control Flow Graph) construction from normalized source lines.
//!
//! This module turns a flat line sequence into a directed, labeled graph of
//! basic blocks:
//!
//! - [`structure`] recognizes leaders and control constructs in one
//!   heuristic pass (no grammar, no AST).
//! - [`blocks`] partitions the line index space into blocks, one per leader.
//! - [`edges`] derives fall-through, branch, and loop edges from the
//!   control descriptors and block boundaries.
//! - [`dot`] serializes the finished graph and optionally hands it to an
//!   external renderer.
//!
//! # Design Principles
//!
//! - **Lexical heuristics instead of a grammar**: construct recognition is
//!   line-prefix and substring matching with bounded look-ahead.
//! - **Never fail**: unmatched braces and unresolvable joins degrade to
//!   conservative spans; output is always produced, possibly with reduced
//!   graph fidelity.

pub mod blocks;
pub mod dot;
pub mod edges;
pub mod structure;
pub mod types;

pub use types::{BasicBlock, BlockId, ControlDescriptor, ControlKind, Edge, EdgeKind};

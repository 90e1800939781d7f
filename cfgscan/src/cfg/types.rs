//! CFG type definitions.

use serde::Serialize;
use std::fmt;

/// Unique identifier for a basic block, assigned in ascending order of
/// starting line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BlockId(pub usize);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}", self.0)
    }
}

/// Recognized control construct kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// `if` statement, with or without an `else` branch.
    If,
    /// `for` loop.
    For,
    /// `while` loop.
    While,
    /// `do { ... } while (...)` loop.
    DoWhile,
}

impl ControlKind {
    /// Loop kinds carry back and exit edges in addition to branch edges.
    #[must_use]
    pub fn is_loop(self) -> bool {
        matches!(self, Self::For | Self::While | Self::DoWhile)
    }
}

/// One recognized control construct, described entirely by line indices.
///
/// Every boundary except the condition line is optional: the recognizer
/// degrades to the most conservative available index rather than failing, so
/// any field may be absent on malformed input. When both are present,
/// `then_start <= then_end` holds for the multi-line shapes the recognizer
/// targets.
#[derive(Debug, Clone, Serialize)]
pub struct ControlDescriptor {
    /// Construct kind.
    pub kind: ControlKind,
    /// Line holding the `if`/`for`/`while`/`do` keyword.
    pub cond_line: usize,
    /// First line of the then branch (loop body for loop kinds).
    pub then_start: Option<usize>,
    /// Last line of the then branch.
    pub then_end: Option<usize>,
    /// First line of the else branch, if one was recognized.
    pub else_start: Option<usize>,
    /// Last line of the else branch.
    pub else_end: Option<usize>,
    /// First line after the whole construct.
    pub join: Option<usize>,
}

/// A basic block: a maximal straight-line run of lines with one entry.
///
/// Block ranges partition the full line index space; blank lines consume
/// index space inside a range but are excluded from the content list.
#[derive(Debug, Clone, Serialize)]
pub struct BasicBlock {
    /// Stable block id.
    pub id: BlockId,
    /// First line index of the block's range (the leader line).
    pub start: usize,
    /// Last line index of the block's range.
    pub end: usize,
    /// Non-blank (line index, text) pairs inside the range.
    pub lines: Vec<(usize, String)>,
}

/// Edge labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Straight-line fall-through.
    Sequential,
    /// Branch taken when the condition holds.
    True,
    /// Branch taken when the condition fails.
    False,
    /// Loop body back to its condition.
    Back,
    /// Loop condition to the first line after the loop.
    Exit,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Sequential => "seq",
            Self::True => "true",
            Self::False => "false",
            Self::Back => "back",
            Self::Exit => "exit",
        };
        write!(f, "{label}")
    }
}

/// A directed, labeled edge between basic blocks.
///
/// Edges are unique by the full (from, to, kind) triple; two edges between
/// the same ordered pair with different labels are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    /// Source block.
    pub from: BlockId,
    /// Destination block.
    pub to: BlockId,
    /// Edge label.
    pub kind: EdgeKind,
}

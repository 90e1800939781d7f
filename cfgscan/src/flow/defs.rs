//! Assignment definition extraction.

use regex::Regex;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

use crate::cfg::types::{BasicBlock, BlockId};

/// Unique identifier for a definition, monotonically assigned across the
/// whole unit regardless of variable name reuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DefId(pub usize);

impl fmt::Display for DefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

/// One assignment occurrence.
#[derive(Debug, Clone, Serialize)]
pub struct Definition {
    /// Globally unique definition id.
    pub id: DefId,
    /// Assigned variable name.
    pub variable: String,
    /// Owning block.
    pub block: BlockId,
    /// Source line index.
    pub line: usize,
    /// Full trimmed statement text.
    pub text: String,
}

/// Returns the compiled regex matching an identifier followed by an
/// assignment operator. Compound operators are listed before bare `=`; the
/// bare case still needs an equality check on the following character,
/// which the pattern alone cannot express.
fn assign_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*(<<=|>>=|\+=|-=|\*=|/=|%=|&=|\|=|\^=|=)")
            .expect("Invalid assignment regex pattern")
    })
}

/// Finds the first assignment target on a line, skipping equality tests.
fn first_assignment(line: &str) -> Option<&str> {
    for caps in assign_re().captures_iter(line) {
        if let (Some(name), Some(op)) = (caps.get(1), caps.get(2)) {
            if op.as_str() == "=" && line[op.end()..].starts_with('=') {
                continue;
            }
            return Some(name.as_str());
        }
    }
    None
}

/// Scans block contents for assignment statements.
///
/// Each match produces one [`Definition`] with a fresh id; at most one
/// definition is recorded per physical line (first valid match only).
/// Returns the definitions in id order plus the variable-to-definitions map
/// used for kill-set computation.
#[must_use]
pub fn extract_definitions(
    blocks: &[BasicBlock],
) -> (Vec<Definition>, FxHashMap<String, Vec<DefId>>) {
    let mut definitions = Vec::new();
    let mut var_map: FxHashMap<String, Vec<DefId>> = FxHashMap::default();

    for block in blocks {
        for (line_idx, text) in &block.lines {
            if let Some(variable) = first_assignment(text) {
                let id = DefId(definitions.len());
                var_map.entry(variable.to_owned()).or_default().push(id);
                definitions.push(Definition {
                    id,
                    variable: variable.to_owned(),
                    block: block.id,
                    line: *line_idx,
                    text: text.trim().to_owned(),
                });
            }
        }
    }

    (definitions, var_map)
}

//! Leader and control-structure recognition.
//!
//! A single left-to-right scan over the normalized lines, classifying each
//! construct head by line prefix and resolving its extent with bounded
//! look-ahead and a brace-balance counter. Missing braces, unmatched
//! constructs, and unresolvable joins degrade to the most conservative
//! available line index; the scan never fails.
//!
//! Branch bodies are not re-scanned by this pass. Nested constructs are
//! still picked up whenever the outer construct degrades to single-statement
//! form, because the cursor advance then lands on interior lines.

use regex::Regex;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use super::types::{ControlDescriptor, ControlKind};
use crate::source::{is_blank, next_non_blank};

/// Look-ahead window for locating a construct's opening brace.
const BRACE_WINDOW: usize = 50;

/// Look-ahead window for locating the terminator of a `do` construct.
const DO_WINDOW: usize = 100;

/// Returns the compiled regex matching an `if`/`for`/`while` construct head.
fn construct_head_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"^(if|for|while)\b").expect("Invalid construct head regex"))
}

/// Returns the compiled regex matching a `do` construct head.
fn do_head_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"^do\b").expect("Invalid do head regex"))
}

/// Returns the compiled regex matching a `while` line (do/while terminator).
fn while_head_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"^while\b").expect("Invalid while head regex"))
}

/// Returns the compiled regex matching jump keywords as whole words.
fn jump_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"\b(?:return|goto|break|continue)\b").expect("Invalid jump keyword regex")
    })
}

/// Outcome of the recognition scan.
#[derive(Debug, Default)]
pub struct Recognition {
    /// Leader line indices, filtered to valid non-blank lines.
    pub leaders: BTreeSet<usize>,
    /// Recognized control constructs, in scan order.
    pub controls: Vec<ControlDescriptor>,
}

/// Finds the line holding the closing brace matching the first `{` at or
/// after `start`, via a running brace balance over subsequent lines.
#[must_use]
pub fn find_matching_brace(lines: &[String], start: usize) -> Option<usize> {
    let mut balance: i64 = 0;
    let mut found_any = false;
    for (i, line) in lines.iter().enumerate().skip(start) {
        for ch in line.chars() {
            match ch {
                '{' => {
                    balance += 1;
                    found_any = true;
                }
                '}' => balance -= 1,
                _ => {}
            }
        }
        if found_any && balance == 0 {
            return Some(i);
        }
    }
    None
}

/// Locates the opening-brace line of a construct starting at `from`.
///
/// Scans a bounded window; a `;` on a later line with no `{` seen first
/// means the construct has a single-statement body and no brace.
fn find_body_open(lines: &[String], from: usize) -> Option<usize> {
    let end = lines.len().min(from + BRACE_WINDOW);
    for (j, line) in lines.iter().enumerate().take(end).skip(from) {
        if line.contains('{') {
            return Some(j);
        }
        if line.contains(';') && j > from {
            break;
        }
    }
    None
}

/// Resolves a brace-delimited or single-statement body starting at `head`.
///
/// Returns (start, end) line indices of the body. With a brace, the body
/// runs from the first non-blank line after the brace line to the matching
/// closing brace (degrading to the brace line itself when unmatched).
/// Without one, the body is the single next non-blank line.
fn resolve_body(lines: &[String], head: usize) -> (Option<usize>, Option<usize>) {
    match find_body_open(lines, head) {
        Some(open) => {
            let start = next_non_blank(lines, open).unwrap_or(open);
            let end = find_matching_brace(lines, open).unwrap_or(open);
            (Some(start), Some(end))
        }
        None => {
            let start = next_non_blank(lines, head);
            (start, start)
        }
    }
}

/// Scans the line sequence once, producing the leader set and the control
/// descriptor catalog.
#[must_use]
pub fn recognize(lines: &[String]) -> Recognition {
    let n = lines.len();
    let mut leaders: FxHashSet<usize> = FxHashSet::default();
    let mut controls = Vec::new();

    // The first statement of the unit is always a leader.
    if let Some(first) = lines.iter().position(|l| !is_blank(l)) {
        leaders.insert(first);
    }

    let mut i = 0;
    while i < n {
        let line = lines[i].trim();
        if line.is_empty() {
            i += 1;
            continue;
        }

        if let Some(caps) = construct_head_re().captures(line) {
            let kind = match &caps[1] {
                "if" => ControlKind::If,
                "for" => ControlKind::For,
                _ => ControlKind::While,
            };
            let cond_line = i;
            let (then_start, then_end) = resolve_body(lines, i);

            let after_then = then_end.and_then(|e| next_non_blank(lines, e));
            let mut else_start = None;
            let mut else_end = None;
            let join;
            match after_then.filter(|&k| lines[k].trim().starts_with("else")) {
                Some(k) => {
                    let (start, end) = resolve_body(lines, k);
                    else_start = start;
                    else_end = end;
                    join = end.and_then(|e| next_non_blank(lines, e));
                }
                None => join = after_then,
            }

            leaders.insert(cond_line);
            leaders.extend(then_start);
            leaders.extend(else_start);
            leaders.extend(join);

            controls.push(ControlDescriptor {
                kind,
                cond_line,
                then_start,
                then_end,
                else_start,
                else_end,
                join,
            });

            // Advance past the construct; branch interiors are not re-scanned.
            i = match (else_end, then_end) {
                (Some(e), _) | (None, Some(e)) => e + 1,
                (None, None) => i + 1,
            };
            continue;
        }

        if do_head_re().is_match(line) {
            let cond_line = i;
            let end = lines.len().min(i + DO_WINDOW);
            let terminator = (i..end).find(|&j| {
                while_head_re().is_match(lines[j].trim())
                    || (lines[j].contains(')') && lines[j].contains(';'))
            });
            let then_start = next_non_blank(lines, i);
            let join = terminator.and_then(|e| next_non_blank(lines, e));

            leaders.insert(cond_line);
            leaders.extend(then_start);
            leaders.extend(join);

            controls.push(ControlDescriptor {
                kind: ControlKind::DoWhile,
                cond_line,
                then_start,
                then_end: terminator,
                else_start: None,
                else_end: None,
                join,
            });

            i = terminator.unwrap_or(i) + 1;
            continue;
        }

        // A statement immediately after a jump begins a new block. This does
        // not advance or interrupt the scan cursor.
        if jump_re().is_match(line) {
            if let Some(next) = next_non_blank(lines, i) {
                leaders.insert(next);
            }
        }

        i += 1;
    }

    let leaders: BTreeSet<usize> = leaders
        .into_iter()
        .filter(|&l| l < n && !is_blank(&lines[l]))
        .collect();

    Recognition { leaders, controls }
}

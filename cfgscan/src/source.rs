//! Comment stripping and line normalization.
//!
//! The rest of the pipeline identifies everything by 0-based line index, so
//! normalization must never shift lines: block comments are replaced by the
//! newlines they contained, line comments are cut to end of line, and blank
//! lines keep their slot.

use regex::Regex;
use std::sync::OnceLock;

/// Returns the compiled block-comment regex (`/* ... */`, non-greedy,
/// allowed to span lines).
fn block_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("Invalid block comment regex pattern"))
}

/// Normalizes raw source text into an index-stable line sequence.
///
/// Removes `/* ... */` spans (keeping their newlines so that line numbering
/// is preserved) and `//`-to-end-of-line spans, then trims trailing
/// whitespace per line. An unterminated block comment silently consumes to
/// the end of the input.
#[must_use]
pub fn preprocess(source: &str) -> Vec<String> {
    if source.is_empty() {
        return Vec::new();
    }
    let stripped = strip_block_comments(source);
    let mut lines: Vec<String> = stripped
        .split('\n')
        .map(|line| strip_line_comment(line).trim_end().to_owned())
        .collect();
    // split keeps a trailing empty segment when the text ends with a
    // newline; the raw line count must not include it. Stripping preserves
    // newline counts, so the raw input decides.
    if source.ends_with('\n') {
        lines.pop();
    }
    lines
}

fn strip_block_comments(source: &str) -> String {
    let mut out = block_comment_re()
        .replace_all(source, |caps: &regex::Captures<'_>| {
            let newlines = caps[0].matches('\n').count();
            "\n".repeat(newlines)
        })
        .into_owned();
    // Unterminated comments run to end of input.
    if let Some(open) = out.find("/*") {
        let newlines = out[open..].matches('\n').count();
        out.truncate(open);
        out.push_str(&"\n".repeat(newlines));
    }
    out
}

fn strip_line_comment(line: &str) -> &str {
    match line.find("//") {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Checks whether a line has no content.
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Returns the index of the first non-blank line strictly after `idx`.
#[must_use]
pub fn next_non_blank(lines: &[String], idx: usize) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .skip(idx + 1)
        .find(|(_, line)| !is_blank(line))
        .map(|(i, _)| i)
}

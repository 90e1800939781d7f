//! Small display helpers shared across output modules.

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips a leading "./" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use cfgscan::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new("./out/prog_cfg.dot")), "out/prog_cfg.dot");
/// ```
#[must_use]
pub fn normalize_display_path(path: &std::path::Path) -> String {
    let s = path.to_string_lossy();
    let normalized = s.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

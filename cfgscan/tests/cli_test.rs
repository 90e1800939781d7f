//! End-to-end tests for the shared entry point.

use cfgscan::entry_point::run_with_args_to;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

const SAMPLE: &str = "\
count = 0;
while (count < 3)
{
    count = count + 1;
}
if (count == 3)
{
    ok = 1;
}
else
{
    ok = 0;
}
result = ok;
";

fn write_sample(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("sample.c");
    let mut file = File::create(&path).expect("create sample");
    write!(file, "{SAMPLE}").expect("write sample");
    path
}

#[test]
fn test_analyze_file_end_to_end() {
    let dir = tempdir().expect("tempdir");
    let source_path = write_sample(dir.path());

    let mut out = Vec::new();
    let code = run_with_args_to(
        vec![
            source_path.to_string_lossy().into_owned(),
            "-o".to_owned(),
            dir.path().to_string_lossy().into_owned(),
        ],
        &mut out,
    )
    .expect("run");
    assert_eq!(code, 0);

    let dot_path = dir.path().join("sample_cfg.dot");
    let report_path = dir.path().join("sample_reaching.txt");
    assert!(dot_path.exists(), "graph description must be written");
    assert!(report_path.exists(), "report must be written");

    let dot = fs::read_to_string(&dot_path).expect("read dot");
    assert!(dot.starts_with("digraph CFG {"));
    assert!(dot.contains("label=\"true\""));

    let report = fs::read_to_string(&report_path).expect("read report");
    assert!(report.contains("=== Definitions (ID -> var, block, line) ==="));
    assert!(report.contains("=== gen[B] and kill[B] ==="));
    assert!(report.contains("=== Final in[B] / out[B] ==="));
    assert!(report.contains("count"));

    let console = String::from_utf8(out).expect("utf8");
    assert!(console.contains("Cyclomatic Complexity"));
    assert!(console.contains("sample_cfg.dot"));
    assert!(console.contains("sample_reaching.txt"));
}

#[test]
fn test_json_summary() {
    let dir = tempdir().expect("tempdir");
    let source_path = write_sample(dir.path());

    let mut out = Vec::new();
    let code = run_with_args_to(
        vec![
            source_path.to_string_lossy().into_owned(),
            "-o".to_owned(),
            dir.path().to_string_lossy().into_owned(),
            "--json".to_owned(),
        ],
        &mut out,
    )
    .expect("run");
    assert_eq!(code, 0);

    let payload: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
    assert!(payload["metrics"]["nodes"].as_u64().expect("nodes") > 0);
    assert!(payload["metrics"]["cyclomatic"].is_i64());
    assert!(payload["converged"].as_bool().expect("converged"));
    assert!(payload["definitions"].as_array().expect("definitions").len() >= 4);
    assert!(payload["outputs"]["dot"]
        .as_str()
        .expect("dot path")
        .ends_with("sample_cfg.dot"));
}

#[test]
fn test_verbose_shows_definition_table() {
    let dir = tempdir().expect("tempdir");
    let source_path = write_sample(dir.path());

    let mut out = Vec::new();
    let code = run_with_args_to(
        vec![
            source_path.to_string_lossy().into_owned(),
            "-o".to_owned(),
            dir.path().to_string_lossy().into_owned(),
            "--verbose".to_owned(),
        ],
        &mut out,
    )
    .expect("run");
    assert_eq!(code, 0);

    let console = String::from_utf8(out).expect("utf8");
    assert!(console.contains("Definitions"));
    assert!(console.contains("Variable"));
    assert!(console.contains("Dataflow converged"));
}

#[test]
fn test_missing_input_file_is_fatal() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("nope.c");

    let mut out = Vec::new();
    let result = run_with_args_to(vec![missing.to_string_lossy().into_owned()], &mut out);
    assert!(result.is_err());
}

#[test]
fn test_help_exits_zero() {
    let mut out = Vec::new();
    let code = run_with_args_to(vec!["--help".to_owned()], &mut out).expect("run");
    assert_eq!(code, 0);
    let console = String::from_utf8(out).expect("utf8");
    assert!(console.contains("--render"));
}

#[test]
fn test_missing_argument_is_usage_error() {
    let mut out = Vec::new();
    let code = run_with_args_to(vec![], &mut out).expect("run");
    assert_eq!(code, 1);
}

#[test]
fn test_render_failure_is_not_fatal() {
    let dir = tempdir().expect("tempdir");
    let source_path = write_sample(dir.path());

    let mut out = Vec::new();
    // Whether or not Graphviz is installed, the run must succeed.
    let code = run_with_args_to(
        vec![
            source_path.to_string_lossy().into_owned(),
            "-o".to_owned(),
            dir.path().to_string_lossy().into_owned(),
            "--render".to_owned(),
        ],
        &mut out,
    )
    .expect("run");
    assert_eq!(code, 0);
}

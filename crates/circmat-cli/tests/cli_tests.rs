//! End-to-end tests for the `circmat` binary.
//!
//! Each test writes a matrix document into a temporary directory and runs
//! the compiled binary against it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn circmat(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_circmat"))
        .args(args)
        .output()
        .expect("failed to run circmat")
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// Loading and rendering
// ============================================================================

#[test]
fn test_show_text_matrix() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "bell.circ", "iz c1 mz\niz t1 mz\n");

    let out = circmat(&["show", "-i", arg(&input)]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("2 lines, 3 columns, 1 gates"));
    assert!(stdout.contains("q0: iz c1 mz"));
    assert!(stdout.contains("q1: iz t1 mz"));
}

#[test]
fn test_show_yaml_matrix() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "inject.yaml",
        "name: inject\nlines:\n  - [din, c1, out]\n  - [in, t1, out]\n",
    );

    let out = circmat(&["show", "-i", arg(&input)]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("inject"));
    assert!(stdout.contains("with injections"));
}

#[test]
fn test_missing_file_fails() {
    let out = circmat(&["show", "-i", "/nonexistent/matrix.json"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("File not found"));
}

#[test]
fn test_bad_token_fails() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "bad.circ", "in zz out\n");

    let out = circmat(&["show", "-i", arg(&input)]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid cell token 'zz'"));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_check_reports_statistics() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "m.json",
        r#"{"name": "ladder", "lines": [["in","c1","-","c2","out"],["in","t1","-","t2","out"],[]]}"#,
    );

    let out = circmat(&["check", "-i", arg(&input)]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("ladder is well formed"));
    assert!(stdout.contains("Gates:         2"));
    assert!(stdout.contains("Empty rows:    1"));
    assert!(stdout.contains("Empty columns: 1"));
}

#[test]
fn test_check_rejects_collision() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "m.circ", "in c1 out\nin t1 out\nin c2 out\nin t2 out\n");

    let out = circmat(&["check", "-i", arg(&input)]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("column holds several gates"));
}

// ============================================================================
// Structural edits
// ============================================================================

#[test]
fn test_compact_to_json() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "m.circ",
        "in c1 - c2 out\nin t1 - t2 out\n. . . . .\n",
    );
    let output = dir.path().join("out.json");

    let out = circmat(&["compact", "-i", arg(&input), "-o", arg(&output)]);
    assert!(out.status.success());

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let lines = json["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        serde_json::json!(["in", "c1", "c2", "out"])
    );
}

#[test]
fn test_compact_keep_rows() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "m.circ", "in - c1 out\nin - t1 out\n- - - -\n");

    let out = circmat(&["compact", "-i", arg(&input), "--keep-rows"]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout, "q0: in  c1  out\nq1: in  t1  out\nq2: -   -   -\n");
}

#[test]
fn test_insert_columns_shifts_gate() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "m.circ", "iz c1 mz\niz t1 mz\n");
    let output = dir.path().join("out.circ");

    let out = circmat(&[
        "insert-columns",
        "-i",
        arg(&input),
        "-o",
        arg(&output),
        "--before",
        "1",
        "--count",
        "2",
    ]);
    assert!(out.status.success());

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, "q0: iz -  -  c1 mz\nq1: iz -  -  t1 mz\n");

    let gates = circmat(&["gates", "-i", arg(&output), "-f", "json"]);
    assert!(gates.status.success());
    let json: serde_json::Value = serde_json::from_slice(&gates.stdout).unwrap();
    assert_eq!(json[0]["column"], 3);
    assert_eq!(json[0]["targets"], serde_json::json!([1]));
}

#[test]
fn test_insert_columns_out_of_range() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "m.circ", "iz c1 mz\niz t1 mz\n");

    let out = circmat(&["insert-columns", "-i", arg(&input), "--before", "9"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("position index 9 out of range"));
}

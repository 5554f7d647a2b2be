//! End-to-end tests for the `symgraph` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn symgraph() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_symgraph"));
    cmd.env_remove("RUST_LOG")
        .env_remove("SYMGRAPH_MAX_HOPS")
        .env_remove("SYMGRAPH_DIRECTION")
        .env("NO_COLOR", "1");
    cmd
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// app -> ui -> theme -> tokens, plus an unrelated file.
fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "src/app.ts",
        "import { Button } from './ui';\nexport function render() { return Button(); }",
    );
    write(
        root,
        "src/ui.ts",
        "import { theme } from './theme';\nexport function Button() { return theme; }",
    );
    write(
        root,
        "src/theme.ts",
        "import { tokens } from './tokens';\nexport const theme = tokens;",
    );
    write(root, "src/tokens.ts", "export const tokens = {};");
    write(root, "src/unrelated.ts", "export const nothing = 0;");
    write(root, "node_modules/lib/index.js", "module.exports = 1;");
    temp
}

#[test]
fn test_build_prints_summary() {
    let temp = project();

    symgraph()
        .args(["build", "--root"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("symbols"))
        .stdout(predicate::str::contains("edges"));
}

#[test]
fn test_build_json_report() {
    let temp = project();

    let output = symgraph()
        .args(["build", "--json", "--root"])
        .arg(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["stats"]["filesParsed"], 5);
    assert_eq!(report["stats"]["graph"]["fileNodes"], 5);
    assert_eq!(report["diagnostics"], serde_json::json!([]));
}

#[test]
fn test_build_reports_broken_file() {
    let temp = project();
    write(temp.path(), "src/broken.ts", "export const = {{{{");

    symgraph()
        .args(["build", "--root"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("src/broken.ts"));
}

#[test]
fn test_trace_respects_hop_limit() {
    let temp = project();

    symgraph()
        .args(["trace", "src/app.ts", "-n", "1", "--root"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("src/app.ts"))
        .stdout(predicate::str::contains("src/ui.ts"))
        .stdout(predicate::str::contains("src/theme.ts").not())
        .stdout(predicate::str::contains("src/unrelated.ts").not());
}

#[test]
fn test_trace_json_with_dependents() {
    let temp = project();

    let output = symgraph()
        .args(["trace", "./src/tokens.ts", "-d", "dependents", "-n", "5", "--json", "--root"])
        .arg(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let trace: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(trace["start"], "src/tokens.ts");
    assert_eq!(trace["direction"], "dependents");
    assert_eq!(
        trace["files"],
        serde_json::json!({
            "src/app.ts": 3,
            "src/theme.ts": 1,
            "src/tokens.ts": 0,
            "src/ui.ts": 2
        })
    );
}

#[test]
fn test_trace_uses_config_defaults() {
    let temp = project();
    write(
        temp.path(),
        "symgraph.json",
        r#"{ "direction": "both", "maxHops": 1 }"#,
    );

    let output = symgraph()
        .args(["trace", "src/theme.ts", "--json", "--root"])
        .arg(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let trace: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(trace["maxHops"], 1);
    let files: Vec<&str> = trace["files"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(files, vec!["src/theme.ts", "src/tokens.ts", "src/ui.ts"]);
}

#[test]
fn test_trace_hop_limit_from_environment() {
    let temp = project();

    symgraph()
        .env("SYMGRAPH_MAX_HOPS", "1")
        .args(["trace", "src/app.ts", "--root"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("src/ui.ts"))
        .stdout(predicate::str::contains("src/theme.ts").not());
}

#[test]
fn test_trace_unknown_start_warns() {
    let temp = project();

    symgraph()
        .args(["trace", "src/missing.ts", "--root"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("not in the graph"));
}

#[test]
fn test_missing_root_fails() {
    let temp = TempDir::new().unwrap();

    symgraph()
        .args(["build", "--root"])
        .arg(temp.path().join("absent"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_invalid_config_fails_with_hint() {
    let temp = project();
    write(temp.path(), "symgraph.json", r#"{ "maxHops": "many" }"#);

    symgraph()
        .args(["build", "--root"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Hint:"));
}

//! Smoke tests for the tapcalc CLI
//!
//! These tests run the built binary end to end.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the tapcalc binary
fn tapcalc() -> Command {
    Command::cargo_bin("tapcalc").expect("tapcalc binary should exist")
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    tapcalc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    tapcalc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("eval"))
        .stdout(predicate::str::contains("repl"))
        .stdout(predicate::str::contains("keys"));
}

#[test]
fn test_no_args_fails() {
    tapcalc().assert().failure();
}

// ============================================================================
// eval
// ============================================================================

#[test]
fn test_eval_prints_display_and_result() {
    tapcalc()
        .args(["eval", "(2+3)*4="])
        .assert()
        .success()
        .stdout("(2+3)×4\n= 20\n");
}

#[test]
fn test_eval_percent() {
    tapcalc()
        .args(["-q", "eval", "50+10%="])
        .assert()
        .success()
        .stdout("55\n");
}

#[test]
fn test_eval_error_still_succeeds() {
    tapcalc()
        .args(["eval", "5/0="])
        .assert()
        .success()
        .stdout(predicate::str::contains("Division by zero"));
}

#[test]
fn test_eval_unknown_key_fails() {
    tapcalc()
        .args(["eval", "2+q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key 'q' at position 2"));
}

#[test]
fn test_eval_json() {
    let output = tapcalc()
        .args(["--format", "json", "eval", "r(0-4)="])
        .output()
        .unwrap();
    assert!(output.status.success());
    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["display_expression"], "√(0-4)");
    assert_eq!(view["error"], "NegativeSqrt");
}

#[test]
fn test_eval_with_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("calc.json");
    fs::write(&path, r#"{"precision": 2}"#).unwrap();

    tapcalc()
        .args(["-q", "--config", path.to_str().unwrap(), "eval", "2/3="])
        .assert()
        .success()
        .stdout("0.67\n");
}

#[test]
fn test_eval_with_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("calc.json");
    fs::write(&path, r#"{"max_tokens": 0}"#).unwrap();

    tapcalc()
        .args(["--config", path.to_str().unwrap(), "eval", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_tokens"));
}

#[test]
fn test_eval_missing_config_fails() {
    tapcalc()
        .args(["--config", "/nonexistent/tapcalc.json", "eval", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read config file"));
}

// ============================================================================
// repl / keys
// ============================================================================

#[test]
fn test_repl_reads_stdin() {
    tapcalc()
        .arg("repl")
        .write_stdin("2+3\n=\n")
        .assert()
        .success()
        .stdout("2+3\n2+3\n= 5\n");
}

#[test]
fn test_keys_lists_labels() {
    tapcalc()
        .arg("keys")
        .assert()
        .success()
        .stdout(predicate::str::contains("x²"))
        .stdout(predicate::str::contains("btn-backspace"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    tapcalc()
        .args(["-vv", "eval", "1+1="])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout("1+1\n= 2\n")
        .stderr(predicate::str::contains("calculated"));
}

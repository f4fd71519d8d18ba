//! Smoke tests for the tapcalc CLI

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the tapcalc binary
fn tapcalc() -> Command {
    let mut cmd = Command::cargo_bin("tapcalc").expect("tapcalc binary should exist");
    cmd.env_remove("RUST_LOG").env_remove("TAPCALC_CONFIG");
    cmd
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
fn test_eval_addition() {
    tapcalc()
        .args(["eval", "5+3="])
        .assert()
        .success()
        .stdout("8\n5 + 3\n");
}

#[test]
fn test_eval_spaced_script() {
    tapcalc()
        .args(["eval", "200 + 10 % ="])
        .assert()
        .success()
        .stdout("220\n200 + 20\n");
}

#[test]
fn test_eval_repeat_equals() {
    tapcalc()
        .args(["eval", "5+3==="])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("14\n"));
}

#[test]
fn test_eval_division_by_zero() {
    tapcalc()
        .args(["eval", "5/0="])
        .assert()
        .success()
        .stdout("NaN\nError\n");
}

#[test]
fn test_eval_grouping() {
    tapcalc()
        .args(["eval", "1234567"])
        .assert()
        .success()
        .stdout("1,234,567\n");
}

#[test]
fn test_eval_unknown_key() {
    tapcalc()
        .args(["eval", "2^8"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Unknown key: 2^8"));
}

#[test]
fn test_eval_json() {
    let output = tapcalc()
        .args(["eval", "6*7=", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["final"]["display"], "42");
    assert_eq!(value["final"]["formula"], "6 × 7");
    assert_eq!(value["final"]["signal"], "updated");
}

#[test]
fn test_eval_steps() {
    tapcalc()
        .args(["eval", "9n", "--steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("±"))
        .stdout(predicate::str::ends_with("\n-9\n"));
}

#[test]
fn test_eval_from_stdin() {
    tapcalc()
        .args(["eval", "-"])
        .write_stdin("12 * 12 =\n")
        .assert()
        .success()
        .stdout("144\n12 × 12\n");
}

#[test]
fn test_eval_verbose_logs_to_stderr() {
    tapcalc()
        .args(["-v", "eval", "5+3="])
        .assert()
        .success()
        .stdout("8\n5 + 3\n")
        .stderr(predicate::str::contains("evaluated add"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_default() {
    tapcalc()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("max_digits: 15"))
        .stdout(predicate::str::contains("precision: 12"));
}

#[test]
fn test_config_file_applies_to_eval() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tapcalc.yaml");
    fs::write(&path, "group_separator: \" \"\n").unwrap();

    tapcalc()
        .arg("--config")
        .arg(&path)
        .args(["eval", "1234567"])
        .assert()
        .success()
        .stdout("1 234 567\n");
}

#[test]
fn test_config_file_invalid_value() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tapcalc.yaml");
    fs::write(&path, "max_digits: 99\n").unwrap();

    tapcalc()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_digits"));
}

#[test]
fn test_config_file_missing() {
    tapcalc()
        .args(["--config", "/nonexistent/tapcalc.yaml", "keys"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

// ============================================================================
// keys / run
// ============================================================================

#[test]
fn test_keys() {
    tapcalc()
        .arg("keys")
        .assert()
        .success()
        .stdout(predicate::str::contains("Toggle sign"))
        .stdout(predicate::str::contains("Clear entry"));
}

#[test]
fn test_run_requires_terminal() {
    tapcalc()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a terminal"));
}

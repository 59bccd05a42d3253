//! CLI Integration Tests
//!
//! These tests verify the CLI commands work correctly end-to-end.
//! They test the "wiring" between the CLI and the core library.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Create a CLI command running inside a temporary directory so config
/// discovery only sees files the test writes.
fn cli_cmd(work_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("herald").expect("Failed to find herald binary");
    cmd.current_dir(work_dir.path());
    cmd.env("NO_COLOR", "1");
    cmd
}

// ============================================================================
// Log Command Tests
// ============================================================================

#[test]
fn test_log_success() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["log", "success", "ok", "--color", "never"])
        .assert()
        .success()
        .stdout("✔ success ok\n");
}

#[test]
fn test_log_joins_message_words() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["log", "note", "build", "finished", "--color", "never"])
        .assert()
        .success()
        .stdout("● note build finished\n");
}

#[test]
fn test_log_error_goes_to_stderr() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["log", "error", "bad", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("✖ error bad"));
}

#[test]
fn test_log_scope_and_uppercase() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args([
            "log", "info", "hi", "--scope", "a", "--scope", "b", "--uppercase", "--color",
            "never",
        ])
        .assert()
        .success()
        .stdout("ℹ INFO [a>b] hi\n");
}

#[test]
fn test_log_masks_secret() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args([
            "log",
            "info",
            "password=hunter2",
            "--secret",
            "hunter2",
            "--color",
            "never",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("password=[secure]"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_log_filename() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["log", "star", "x", "--filename", "--no-badge", "--color", "never"])
        .assert()
        .success()
        .stdout("star [main.rs] x\n");
}

#[test]
fn test_log_level_filters() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["log", "debug", "noise", "--log-level", "warn", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_log_unknown_type_fails() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["log", "shout", "hey"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown logger type: shout"));
}

#[test]
fn test_log_invalid_level_rejected() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["log", "info", "x", "--log-level", "loud"])
        .assert()
        .failure();
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn test_discovered_config_applies() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("herald.json"),
        r#"{ "displayLabel": false }"#,
    )
    .unwrap();

    cli_cmd(&dir)
        .args(["log", "success", "ok", "--color", "never"])
        .assert()
        .success()
        .stdout("✔ ok\n");
}

#[test]
fn test_flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.json");
    fs::write(
        &path,
        r#"{ "name": "app", "herald": { "displayBadge": false, "uppercaseLabel": true } }"#,
    )
    .unwrap();

    cli_cmd(&dir)
        .args(["log", "info", "x", "--no-label", "--color", "never", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout("x\n");
}

#[test]
fn test_broken_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ nope").unwrap();

    cli_cmd(&dir)
        .args(["log", "info", "x", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

// ============================================================================
// Types and Config Command Tests
// ============================================================================

#[test]
fn test_types_lists_defaults() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("success"))
        .stdout(predicate::str::contains("warning"))
        .stdout(predicate::str::contains("awaiting"));
}

#[test]
fn test_config_prints_effective_json() {
    let dir = TempDir::new().unwrap();

    let output = cli_cmd(&dir)
        .args(["config", "--timestamp", "--log-level", "error"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["displayTimestamp"], true);
    assert_eq!(json["displayBadge"], true);
    assert_eq!(json["displayDate"], false);
    assert_eq!(json["logLevel"], "error");
}

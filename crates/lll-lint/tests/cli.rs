//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Write `content` to `name` inside `dir` and return the path as a string.
fn fixture(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn no_args_shows_help_and_fails() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let tmp = TempDir::new().unwrap();
    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["config"]["line_length"], 120);
    assert_eq!(json["config"]["tab_width"], 1);
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_and_verbose_flags_accepted() {
    cmd().args(["-q", "info"]).assert().success();
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_choices_accepted() {
    for choice in ["auto", "always", "never"] {
        cmd().args(["--color", choice, "info"]).assert().success();
    }
}

#[test]
fn log_level_flag_accepted() {
    cmd().args(["--log-level", "warn", "info"]).assert().success();
}

// =============================================================================
// Check Command
// =============================================================================

#[test]
fn clean_file_passes() {
    let tmp = TempDir::new().unwrap();
    let file = fixture(&tmp, "ok.go", "package main\n\nfunc main() {}\n");
    cmd()
        .args(["check", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS:"));
}

#[test]
fn long_line_is_reported_with_location() {
    let tmp = TempDir::new().unwrap();
    let file = fixture(&tmp, "long.go", &format!("short\n{}\n", "x".repeat(150)));
    cmd()
        .args(["check", &file])
        .assert()
        .failure()
        .stdout(predicate::str::contains(format!(
            "{file}:2: line is 150 characters (lll)"
        )))
        .stderr(predicate::str::contains("1 long line found"));
}

#[test]
fn quiet_pass_prints_nothing() {
    let tmp = TempDir::new().unwrap();
    let file = fixture(&tmp, "ok.go", "ok\n");
    cmd()
        .args(["-q", "check", &file])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn line_length_flag_overrides_default() {
    let tmp = TempDir::new().unwrap();
    let file = fixture(&tmp, "a.go", &"x".repeat(90));
    cmd().args(["check", &file]).assert().success();
    cmd()
        .args(["check", "--line-length", "80", &file])
        .assert()
        .failure()
        .stdout(predicate::str::contains("line is 90 characters"));
}

#[test]
fn tab_width_flag_expands_tabs() {
    let tmp = TempDir::new().unwrap();
    let file = fixture(&tmp, "tabs.go", "\t\tx\n");
    cmd()
        .args(["check", "--line-length", "5", "--tab-width", "4", &file])
        .assert()
        .failure()
        .stdout(predicate::str::contains("line is 9 characters"));
}

#[test]
fn zero_line_length_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let file = fixture(&tmp, "a.go", "x\n");
    cmd()
        .args(["check", "--line-length", "0", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line_length"));
}

#[test]
fn oversized_line_is_reported_not_fatal() {
    let tmp = TempDir::new().unwrap();
    let file = fixture(&tmp, "bindata.go", &"x".repeat(2_000_000));
    cmd()
        .args(["check", &file])
        .assert()
        .failure()
        .stdout(predicate::str::contains(format!(
            "{file}:1:1: line is more than 65536 characters"
        )));
}

#[test]
fn oversized_line_with_huge_limit_is_scan_error() {
    let tmp = TempDir::new().unwrap();
    let file = fixture(&tmp, "bindata.go", &"x".repeat(2_000_000));
    cmd()
        .args(["check", "--line-length", "100000", &file])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("can't scan file"));
}

#[test]
fn missing_file_aborts_run() {
    let tmp = TempDir::new().unwrap();
    let long = fixture(&tmp, "long.go", &"x".repeat(150));
    let missing = tmp.path().join("missing.go");
    cmd()
        .args(["check", missing.to_str().unwrap(), &long])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("can't open file"));
}

#[test]
fn keep_going_reports_remaining_files() {
    let tmp = TempDir::new().unwrap();
    let long = fixture(&tmp, "long.go", &"x".repeat(150));
    let missing = tmp.path().join("missing.go");
    cmd()
        .args(["check", "--keep-going", missing.to_str().unwrap(), &long])
        .assert()
        .failure()
        .stdout(predicate::str::contains("line is 150 characters"))
        .stderr(predicate::str::contains("can't open file"))
        .stderr(predicate::str::contains("1 long line and 1 file unreadable found"));
}

#[test]
fn empty_file_passes() {
    let tmp = TempDir::new().unwrap();
    let file = fixture(&tmp, "empty.go", "");
    cmd().args(["check", &file]).assert().success();
}

#[test]
fn json_report_lists_issues() {
    let tmp = TempDir::new().unwrap();
    let long = "y".repeat(130);
    let file = fixture(&tmp, "a.go", &format!("{long}\nok\n{long}\n"));
    let output = cmd()
        .args(["--json", "check", &file])
        .assert()
        .failure();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON report");

    assert_eq!(json["pass"], false);
    assert_eq!(json["files_checked"], 1);
    let issues = json["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0]["line"], 1);
    assert_eq!(issues[1]["line"], 3);
    assert_eq!(issues[1]["message"], "line is 130 characters");
    assert_eq!(issues[1]["source"], "lll");
    assert_eq!(issues[1]["file"], file.as_str());
}

#[test]
fn json_report_for_clean_run() {
    let tmp = TempDir::new().unwrap();
    let file = fixture(&tmp, "a.go", "ok\n");
    let output = cmd().args(["--json", "check", &file]).assert().success();
    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["pass"], true);
    assert!(json["issues"].as_array().unwrap().is_empty());
}

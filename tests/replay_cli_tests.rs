// Integration tests for the replay binary
//
// Runs the compiled tool against the fixture log and checks exit codes and output.

use std::path::PathBuf;
use std::process::{Command, Output};

fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
}

fn run_replay(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_replay"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(args)
        .output()
        .expect("Failed to run replay binary")
}

#[test]
fn test_replay_help() {
    let output = run_replay(&["--help"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("USAGE"));
}

#[test]
fn test_replay_no_arguments() {
    let output = run_replay(&[]);
    assert!(!output.status.success());
}

#[test]
fn test_replay_requires_mode() {
    let log = fixture_path("opening.jsonl");
    let output = run_replay(&[log.to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn test_replay_all_opening() {
    let log = fixture_path("opening.jsonl");
    let output = run_replay(&[log.to_str().unwrap(), "--all"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("REPLAY REPORT"));
    assert!(stdout.contains("Total entries:  3"));
}

#[test]
fn test_replay_specific_entries() {
    let log = fixture_path("opening.jsonl");
    let output = run_replay(&[log.to_str().unwrap(), "--entries", "0,2"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total entries:  2"));
}

#[test]
fn test_replay_unknown_entry_fails() {
    let log = fixture_path("opening.jsonl");
    let output = run_replay(&[log.to_str().unwrap(), "--entries", "9"]);
    assert!(!output.status.success());
}

#[test]
fn test_replay_validate() {
    let log = fixture_path("opening.jsonl");

    let output = run_replay(&[log.to_str().unwrap(), "--validate", "0:20,1:19|21"]);
    assert!(output.status.success());

    let output = run_replay(&[log.to_str().unwrap(), "--validate", "0:43"]);
    assert!(!output.status.success());

    let output = run_replay(&[log.to_str().unwrap(), "--validate", "0:64"]);
    assert!(!output.status.success());
}

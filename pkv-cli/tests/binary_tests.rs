//! Runs the `pkv` binary and checks its output and exit codes.

use std::process::{Command, Output};

use pkv_cli::{CheckReport, EXIT_ERROR, EXIT_GOOD, EXIT_REJECTED};
use pkv_license::KeyStatus;

fn pkv(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pkv"))
        .args(args)
        .output()
        .expect("pkv binary should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout should be UTF-8")
}

// ── check / demo ─────────────────────────────────────────────────

#[test]
fn demo_exits_good() {
    let output = pkv(&["demo"]);
    assert_eq!(output.status.code(), Some(EXIT_GOOD));
    assert_eq!(stdout(&output).matches("KEY_GOOD").count(), 3);
}

#[test]
fn check_good_serial_exits_good() {
    let output = pkv(&["check", "a279-1717-7d7a-ca2e-7154"]);
    assert_eq!(output.status.code(), Some(EXIT_GOOD));
    assert_eq!(stdout(&output), "a279-1717-7d7a-ca2e-7154  KEY_GOOD\n");
}

#[test]
fn check_phony_serial_exits_rejected() {
    let output = pkv(&["check", "A279-1717-7D7A-CA2E-7154", "A279-1717-0000-0000-94E5"]);
    assert_eq!(output.status.code(), Some(EXIT_REJECTED));
    let out = stdout(&output);
    assert!(out.contains("A279-1717-7D7A-CA2E-7154  KEY_GOOD"));
    assert!(out.contains("A279-1717-0000-0000-94E5  KEY_PHONY"));
}

#[test]
fn check_json_output() {
    let output = pkv(&["check", "--json", "1111-1111-C87D-C822-1910"]);
    assert_eq!(output.status.code(), Some(EXIT_REJECTED));
    let reports: Vec<CheckReport> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].status, KeyStatus::Blacklisted);
}

#[test]
fn check_without_serials_is_usage_error() {
    let output = pkv(&["check"]);
    assert_eq!(output.status.code(), Some(EXIT_ERROR));
}

// ── generate ─────────────────────────────────────────────────────

#[test]
fn generate_from_seed() {
    let output = pkv(&["generate", "--seed", "A2791717", "--seed", "0x1"]);
    assert_eq!(output.status.code(), Some(EXIT_GOOD));
    assert_eq!(
        stdout(&output),
        "A2791717  A279-1717-7D7A-CA2E-7154\n00000001  0000-0001-C939-0000-0BDB\n"
    );
}

#[test]
fn generate_random_count() {
    let output = pkv(&["generate", "-n", "5"]);
    assert_eq!(output.status.code(), Some(EXIT_GOOD));
    assert_eq!(stdout(&output).lines().count(), 5);
}

#[test]
fn generate_bad_seed_exits_error() {
    let output = pkv(&["generate", "--seed", "not-hex"]);
    assert_eq!(output.status.code(), Some(EXIT_ERROR));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid --seed"));
}

// ── --config ─────────────────────────────────────────────────────

#[test]
fn missing_config_exits_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    let output = pkv(&["demo", "--config", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(EXIT_ERROR));
}

#[test]
fn partial_config_accepts_leaked_keygen_serial() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scheme.toml");
    std::fs::write(&path, "enabled_slots = [0]\n").unwrap();

    // Only slot 0 is right.
    let serial = "A279-1717-7D00-0000-5901";
    let partial = pkv(&["check", "--config", path.to_str().unwrap(), serial]);
    assert_eq!(partial.status.code(), Some(EXIT_GOOD));

    let full = pkv(&["check", serial]);
    assert_eq!(full.status.code(), Some(EXIT_REJECTED));
}

//! CLI integration tests for the sevlog binary.
//! Runs the binary with its default stdout/stderr channels.

use std::io::{self, Write};
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use sevlog::LoggerBuilder;
use tempfile::TempDir;

/// Environment flag telling the re-executed test binary to take the exit path.
const EXIT_CHILD_ENV: &str = "SEVLOG_TEST_EXIT_CHILD";

// ============================================================
// Helper functions
// ============================================================

/// Build an `assert_cmd::Command` pointing at the `sevlog` binary, isolated
/// from any `sevlog.yaml` or `SEVLOG_*` variables of the caller.
fn sevlog_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sevlog"));
    cmd.current_dir(dir)
        .env_remove("SEVLOG_LEVEL")
        .env_remove("SEVLOG_JSON");
    cmd
}

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }
}

// ============================================================
// Level fallback
// ============================================================

#[test]
fn test_unknown_level_notes_fallback_on_stderr() {
    let dir = TempDir::new().unwrap();
    let assert = sevlog_cmd(dir.path())
        .args(["--level", "verbose", "--json", "disk full"])
        .assert()
        .success();
    let output = assert.get_output();

    let stderr = String::from_utf8_lossy(&output.stderr);
    let notes: Vec<&str> = stderr
        .lines()
        .filter(|line| *line == "Unknown value of level \"verbose\", setting up to WARN")
        .collect();
    assert_eq!(notes.len(), 1, "stderr was: {stderr}");

    let records: Vec<Value> = stdout_lines(output)
        .iter()
        .map(|line| serde_json::from_str(line).expect("record is valid JSON"))
        .collect();
    let levels: Vec<&str> = records
        .iter()
        .map(|record| record["level"].as_str().unwrap())
        .collect();
    assert_eq!(levels, vec!["WARN", "ERROR", "FATAL"]);
    assert!(records.iter().all(|record| record.get("caller").is_none()));
    assert!(records.iter().all(|record| record["message"] == "disk full"));
}

#[test]
fn test_known_level_writes_nothing_to_stderr() {
    let dir = TempDir::new().unwrap();
    sevlog_cmd(dir.path())
        .args(["--level", "ERROR", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

// ============================================================
// Caller annotation
// ============================================================

#[test]
fn test_debug_console_names_binary_call_site() {
    let dir = TempDir::new().unwrap();
    let assert = sevlog_cmd(dir.path())
        .args(["--level", "debug", "cache warmed"])
        .assert()
        .success();

    let lines = stdout_lines(assert.get_output());
    assert_eq!(lines.len(), 5);

    for line in &lines {
        let parts: Vec<&str> = line.split('\t').collect();
        assert!(
            parts[2].starts_with("src/main.rs:"),
            "caller column was {:?}",
            parts[2]
        );
        assert_eq!(parts[3], "cache warmed");
    }
}

// ============================================================
// Settings sources
// ============================================================

#[test]
fn test_settings_file_and_env_override() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("sevlog.yaml"), "level: fatal\njson: true\n").unwrap();

    let assert = sevlog_cmd(dir.path()).assert().success();
    let lines = stdout_lines(assert.get_output());
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("\"level\":\"FATAL\""));

    let assert = sevlog_cmd(dir.path())
        .env("SEVLOG_LEVEL", "error")
        .assert()
        .success();
    assert_eq!(stdout_lines(assert.get_output()).len(), 2);
}

#[test]
fn test_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    sevlog_cmd(dir.path())
        .args(["--config", "absent.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

// ============================================================
// Construction failure
// ============================================================

#[test]
fn test_build_exits_when_output_is_unwritable() {
    if std::env::var_os(EXIT_CHILD_ENV).is_some() {
        let _logger = LoggerBuilder::new("info", true)
            .with_writer(|| BrokenPipe)
            .build();
        unreachable!("build returned despite an unwritable output");
    }

    let current_exe = std::env::current_exe().unwrap();
    Command::new(current_exe)
        .args([
            "--exact",
            "test_build_exits_when_output_is_unwritable",
            "--nocapture",
        ])
        .env(EXIT_CHILD_ENV, "1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "error initializing logger: Log output is not writable",
        ));
}

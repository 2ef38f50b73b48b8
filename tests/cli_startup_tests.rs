//! End-to-end tests for `lifecal` startup.
//!
//! Only paths that exit before the terminal is taken over are covered here.

use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the lifecal binary
fn lifecal_bin() -> &'static str {
    env!("CARGO_BIN_EXE_lifecal")
}

/// Runs lifecal inside `dir` with settings isolated to `dir`.
fn run_in(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(lifecal_bin())
        .args(args)
        .current_dir(dir.path())
        .env("LIFECAL_CONFIG_DIR", dir.path().join("settings"))
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_missing_default_data_dir_exits_with_1() {
    let temp = TempDir::new().unwrap();
    let output = run_in(&temp, &[]);

    assert_eq!(
        output.status.code(),
        Some(1),
        "Missing data directory should fail. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("'data' directory does not exist"),
        "Error should name the data directory, got: {stderr}"
    );
}

#[test]
fn test_missing_explicit_data_dir_exits_with_1() {
    let temp = TempDir::new().unwrap();
    let output = run_in(&temp, &["--data-dir", "elsewhere"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("elsewhere"));
}

#[test]
fn test_data_dir_from_settings_file() {
    let temp = TempDir::new().unwrap();
    let settings = temp.path().join("settings");
    std::fs::create_dir(&settings).unwrap();
    std::fs::write(
        settings.join("config.toml"),
        "[paths]\ndata_dir = \"calendars\"\n",
    )
    .unwrap();

    let output = run_in(&temp, &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("calendars"));
}

#[test]
fn test_help_succeeds() {
    let temp = TempDir::new().unwrap();
    let output = run_in(&temp, &["--help"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--data-dir"));
    assert!(stdout.contains("--verbose"));
    assert!(stdout.contains("[FILE]"));
}

#[test]
fn test_missing_named_file_exits_with_1() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("data")).unwrap();

    let output = run_in(&temp, &["nobody"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("nobody.yaml") && stderr.contains("not found"),
        "Error should name the resolved file, got: {stderr}"
    );
}

#[test]
fn test_broken_named_file_exits_with_1() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    std::fs::create_dir(&data).unwrap();
    std::fs::write(data.join("broken.yml"), "name: [broken\n").unwrap();

    let output = run_in(&temp, &["broken.yml"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to load life config") && stderr.contains("broken.yml"),
        "Error should name the broken file, got: {stderr}"
    );
}

#[test]
fn test_first_run_writes_default_settings() {
    let temp = TempDir::new().unwrap();
    let output = run_in(&temp, &[]);
    assert_eq!(output.status.code(), Some(1));

    let settings = std::fs::read_to_string(temp.path().join("settings/config.toml")).unwrap();
    assert!(settings.contains("[paths]"));
    assert!(settings.contains("data_dir = \"data\""));
}

//! Integration tests for clipper CLI

use std::process::Command;

fn clipper() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_clipper"));
    // Keep the developer's environment out of the way
    cmd.env_remove("CLIPPER_API_URL")
        .env_remove("CLIPPER_POLL_INTERVAL_MS")
        .env_remove("CLIPPER_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_version() {
    let output = clipper()
        .arg("--version")
        .output()
        .expect("Failed to execute clipper");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("clipper"));
}

#[test]
fn test_cli_help() {
    let output = clipper()
        .arg("--help")
        .output()
        .expect("Failed to execute clipper");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Upload videos to the clip pipeline"));
    assert!(stdout.contains("upload"));
    assert!(stdout.contains("status"));
    assert!(stdout.contains("clips"));
}

#[test]
fn test_cli_invalid_command() {
    let output = clipper()
        .arg("invalid-command")
        .output()
        .expect("Failed to execute clipper");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn test_upload_requires_file() {
    let output = clipper()
        .arg("upload")
        .output()
        .expect("Failed to execute clipper");

    assert!(!output.status.success());
}

#[test]
fn test_upload_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "").unwrap();
    let output = clipper()
        .arg("--config")
        .arg(&config_path)
        .args(["upload", "does-not-exist.mp4"])
        .output()
        .expect("Failed to execute clipper");

    assert!(!output.status.success());
}

#[test]
fn test_settings_show_json_uses_cli_url() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "[polling]\ninterval_ms = 250\n").unwrap();

    let output = clipper()
        .arg("--config")
        .arg(&config_path)
        .args(["--api-url", "http://backend.test:9000", "--json", "settings", "show"])
        .output()
        .expect("Failed to execute clipper");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["api"]["base_url"], "http://backend.test:9000");
    assert_eq!(value["polling"]["interval_ms"], 250);
}

#[test]
fn test_settings_init_writes_file_once() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("nested").join("config.toml");

    let first = clipper()
        .arg("--config")
        .arg(&config_path)
        .args(["settings", "init"])
        .output()
        .expect("Failed to execute clipper");
    assert!(first.status.success());
    assert!(std::fs::read_to_string(&config_path)
        .unwrap()
        .contains("base_url"));

    let second = clipper()
        .arg("--config")
        .arg(&config_path)
        .args(["settings", "init"])
        .output()
        .expect("Failed to execute clipper");
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("--force"));

    let forced = clipper()
        .arg("--config")
        .arg(&config_path)
        .args(["settings", "init", "--force"])
        .output()
        .expect("Failed to execute clipper");
    assert!(forced.status.success());
}

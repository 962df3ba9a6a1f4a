use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary config directory
fn temp_config_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".ledger-dashboard").join("config.json")
}

const BINARY_NAME: &str = "ledger-dashboard";

/// Nothing listens on the discard port, so every request is refused.
const UNREACHABLE_API: &str = "http://127.0.0.1:9";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("vote-recording ledger"))
        .stdout(contains("export-audit"));
}

#[test]
/// A zero refresh interval is rejected before anything starts.
fn start_rejects_zero_refresh_interval() {
    let tmp = temp_config_dir();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["start", "--headless", "--refresh-secs", "0"])
        .env("HOME", tmp.path())
        .assert()
        .failure();

    // Argument errors leave no trace on disk
    assert!(!config_file_path(&tmp).exists());
}

#[test]
/// Refresh intervals beyond a day are rejected instead of overflowing the timer.
fn start_rejects_oversized_refresh_interval() {
    let tmp = temp_config_dir();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["start", "--headless", "--refresh-secs", "18446744073709551615"])
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stderr(contains("--refresh-secs"));

    assert!(!config_file_path(&tmp).exists());
}

#[test]
/// Reset command should delete an existing config file.
fn reset_deletes_config_file() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, r#"{"visited":true}"#).unwrap();

    // Ensure the file exists
    assert!(config_path.exists());

    // Run the command
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("reset")
        .env("HOME", tmp.path()) // simulate different $HOME
        .assert()
        .success()
        .stdout(contains("Preferences cleared"));

    // Confirm the file was deleted
    assert!(!config_path.exists());
}

#[test]
/// Reset succeeds when there is nothing to clear.
fn reset_without_config_succeeds() {
    let tmp = temp_config_dir();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("reset")
        .env("HOME", tmp.path())
        .assert()
        .success();
}

#[test]
/// Verification against an unreachable backend reports the failure and exits non-zero.
fn verify_against_unreachable_backend_fails() {
    let tmp = temp_config_dir();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["--api-url", UNREACHABLE_API, "verify"])
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stderr(contains("Failed to verify blockchain"));
}

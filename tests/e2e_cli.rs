//! CLI end-to-end tests
//!
//! Tests for the dashgate command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the dashgate binary
#[allow(deprecated)]
fn dashgate_cmd() -> Command {
    Command::cargo_bin("dashgate").unwrap()
}

fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    fs::write(
        &path,
        r#"
[pipeline]
id = "1111111111111-abcdef"
endpoint = "http://localhost:9000"
"#,
    )
    .unwrap();
    path
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = dashgate_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = dashgate_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dashgate"));
}

#[test]
fn test_cli_validate_valid_config() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());

    let mut cmd = dashgate_cmd();
    cmd.arg("validate")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("1111111111111-abcdef"));
}

#[test]
fn test_cli_validate_rejects_incomplete_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[server]\nport = 8080\n").unwrap();

    let mut cmd = dashgate_cmd();
    cmd.arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pipeline.id"));
}

#[test]
fn test_cli_plan_prints_job_request() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());

    let mut cmd = dashgate_cmd();
    cmd.arg("--config")
        .arg(&config)
        .args(["plan", "videos/clip.mov"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"PipelineId\": \"1111111111111-abcdef\""))
        .stdout(predicate::str::contains("dash-720p/clip"))
        .stdout(predicate::str::contains("dash-audio/clip"))
        .stdout(predicate::str::contains("\"OutputKeyPrefix\": \"videos/transcoded/\""));
}

#[test]
fn test_cli_plan_hls_without_audio() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());

    let mut cmd = dashgate_cmd();
    cmd.arg("--config")
        .arg(&config)
        .args(["plan", "clip.mp4", "--format", "hls", "--resolutions", "480p", "--no-audio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hls-480p/clip"))
        .stdout(predicate::str::contains("HLSv4"))
        .stdout(predicate::str::contains("hls-audio").not());
}

#[test]
fn test_cli_plan_rejects_empty_basename() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());

    let mut cmd = dashgate_cmd();
    cmd.arg("--config")
        .arg(&config)
        .args(["plan", "videos/.mp4"])
        .assert()
        .failure();
}

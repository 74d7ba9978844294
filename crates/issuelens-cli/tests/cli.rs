// SPDX-License-Identifier: Apache-2.0

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Runs `issuelens` with an empty config directory and no credentials.
fn isolated_cmd(config_home: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("issuelens");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("GEMINI_MODEL")
        .env_remove("GEMINI_API_VERSION")
        .env_remove("GITHUB_TOKEN")
        .env_remove("GH_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version() {
    let mut cmd = cargo_bin_cmd!("issuelens");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("issuelens"));
}

#[test]
fn test_help_contains_all_commands() {
    let mut cmd = cargo_bin_cmd!("issuelens");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--model"));
}

#[test]
fn test_analyze_requires_issue_number() {
    let mut cmd = cargo_bin_cmd!("issuelens");
    cmd.args(["analyze", "https://github.com/foo/bar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ISSUE_NUMBER"));
}

#[test]
fn test_analyze_without_api_key_fails_with_tip() {
    let config_home = tempfile::tempdir().unwrap();
    isolated_cmd(&config_home)
        .args(["analyze", "https://github.com/foo/bar", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing GEMINI_API_KEY"))
        .stderr(predicate::str::contains("Tip:"));
}

#[test]
fn test_analyze_invalid_url_fails_before_network() {
    let config_home = tempfile::tempdir().unwrap();
    isolated_cmd(&config_home)
        .env("GEMINI_API_KEY", "test-key")
        .args(["analyze", "https://gitlab.com/foo/bar", "1", "-o", "json"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid GitHub repo URL"));
}

#[test]
fn test_invalid_config_file_is_reported() {
    let config_home = tempfile::tempdir().unwrap();
    let dir = config_home.path().join("issuelens");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[ai\nmodel = ").unwrap();

    isolated_cmd(&config_home)
        .args(["analyze", "https://github.com/foo/bar", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

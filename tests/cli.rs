//! Integration tests for the rulewatch binary.
//!
//! Only paths that finish before any AWS request are exercised here: region
//! rejection, settings output and local history maintenance.

use assert_cmd::Command;
use chrono::Utc;
use predicates::prelude::*;
use rulewatch::{HistoryConfig, RegionReport, ReportStore};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a Command instance for the rulewatch binary with an isolated settings file.
#[allow(deprecated)]
fn rulewatch_cmd(config_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rulewatch").expect("Failed to find rulewatch binary");
    cmd.arg("--config")
        .arg(config_path)
        .env_remove("RULEWATCH_REGION")
        .env_remove("RULEWATCH_HISTORY_DIR")
        .env_remove("RULEWATCH_STALE_AFTER_HOURS")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(temp_dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = temp_dir.path().join("rulewatch.toml");
    fs::write(&path, contents).expect("Failed to write config");
    path
}

#[test]
fn test_help_lists_commands() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&temp_dir, "");

    rulewatch_cmd(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("recorders"))
        .stdout(predicate::str::contains("report"));
}

#[test]
fn test_regions_lists_allow_list() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&temp_dir, "");

    rulewatch_cmd(&config)
        .arg("regions")
        .assert()
        .success()
        .stdout(predicate::str::contains("us-east-1"))
        .stdout(predicate::str::contains("eu-west-1"));
}

#[test]
fn test_regions_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&temp_dir, "");

    let output = rulewatch_cmd(&config)
        .args(["--json", "regions"])
        .output()
        .expect("Failed to run rulewatch");
    assert!(output.status.success());

    let regions: Vec<String> = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(regions.len(), 5);
}

#[test]
fn test_unsupported_region_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&temp_dir, "");

    rulewatch_cmd(&config)
        .args(["--region", "ap-south-1", "rules"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported region 'ap-south-1'"));
}

#[test]
fn test_unsupported_region_from_config_file_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&temp_dir, "region = \"me-south-1\"\n");

    rulewatch_cmd(&config)
        .arg("report")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported region 'me-south-1'"));
}

#[test]
fn test_config_prints_effective_settings() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&temp_dir, "region = \"us-west-2\"\nstale_after_hours = 12\n");

    rulewatch_cmd(&config)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("region = \"us-west-2\""))
        .stdout(predicate::str::contains("stale_after_hours = 12"));
}

#[test]
fn test_region_flag_overrides_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&temp_dir, "region = \"us-west-2\"\n");

    rulewatch_cmd(&config)
        .args(["--region", "us-east-2", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("region = \"us-east-2\""));
}

#[test]
fn test_env_overrides_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&temp_dir, "region = \"us-west-2\"\nstale_after_hours = 12\n");

    rulewatch_cmd(&config)
        .env("RULEWATCH_STALE_AFTER_HOURS", "7")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("stale_after_hours = 7"))
        .stdout(predicate::str::contains("region = \"us-west-2\""));
}

#[test]
fn test_region_flag_overrides_env() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&temp_dir, "");

    rulewatch_cmd(&config)
        .env("RULEWATCH_REGION", "us-west-1")
        .args(["--region", "us-east-2", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("region = \"us-east-2\""))
        .stdout(predicate::str::contains("us-west-1").not());
}

#[test]
fn test_region_from_env_is_validated() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&temp_dir, "");

    rulewatch_cmd(&config)
        .env("RULEWATCH_REGION", "ap-south-1")
        .arg("rules")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported region 'ap-south-1'"));
}

#[test]
fn test_missing_config_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    rulewatch_cmd(&temp_dir.path().join("absent.toml"))
        .arg("regions")
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading settings"));
}

#[test]
fn test_history_prune_on_empty_store() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let history_dir = temp_dir.path().join("history");
    let config = write_config(
        &temp_dir,
        &format!("history_dir = {:?}\n", history_dir.display().to_string()),
    );

    rulewatch_cmd(&config)
        .args(["history", "prune"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 0 expired report(s)."));

    assert!(history_dir.exists());
}

#[test]
fn test_history_dir_flag_overrides_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let from_file = temp_dir.path().join("from-file");
    let from_flag = temp_dir.path().join("from-flag");
    let config = write_config(
        &temp_dir,
        &format!("history_dir = {:?}\n", from_file.display().to_string()),
    );

    rulewatch_cmd(&config)
        .arg("--history-dir")
        .arg(&from_flag)
        .args(["history", "prune"])
        .assert()
        .success();

    assert!(from_flag.exists());
    assert!(!from_file.exists());
}

#[test]
fn test_history_latest_with_region_needs_no_aws() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let history_dir = temp_dir.path().join("history");
    let config = write_config(&temp_dir, "");

    rulewatch_cmd(&config)
        .arg("--history-dir")
        .arg(&history_dir)
        .args(["--region", "us-east-1", "history", "latest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no saved reports for us-east-1"));

    let store = ReportStore::new(HistoryConfig::new(&history_dir, 30)).expect("store");
    store
        .save(&RegionReport::new("us-east-1", Utc::now(), true, Vec::new()))
        .expect("save");

    let output = rulewatch_cmd(&config)
        .arg("--history-dir")
        .arg(&history_dir)
        .args(["--json", "--region", "us-east-1", "history", "latest"])
        .output()
        .expect("Failed to run rulewatch");
    assert!(output.status.success());

    let report: RegionReport = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(report.region, "us-east-1");
    assert!(report.recorder_active);
}

#[test]
fn test_history_latest_rejects_unsupported_region() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&temp_dir, "");

    rulewatch_cmd(&config)
        .arg("--history-dir")
        .arg(temp_dir.path().join("history"))
        .args(["--region", "ap-south-1", "history", "latest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported region 'ap-south-1'"));
}

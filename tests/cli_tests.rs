//! Command-line tests for the hivestats binary
//!
//! `--once` runs are pointed at a mock Hive node, so no network is needed.

use assert_cmd::Command;
use mockito::{Matcher, Server, ServerGuard};
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

fn hivestats() -> Command {
    Command::cargo_bin("hivestats").unwrap()
}

/// Empty config file so the user's own config never leaks into a test
fn empty_config(dir: &TempDir) -> String {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();
    path.to_string_lossy().into_owned()
}

fn rpc_result(result: Value) -> String {
    json!({ "jsonrpc": "2.0", "result": result, "id": 1 }).to_string()
}

/// Mock node: head block 100, 500 posts, 1000 accounts, 2 transactions per block
fn mock_node() -> ServerGuard {
    let mut server = Server::new();

    let responses = [
        (
            "condenser_api.get_dynamic_global_properties",
            json!({ "head_block_number": 100, "post_count": 500 }),
        ),
        ("condenser_api.get_account_count", json!(1000)),
        ("condenser_api.get_block", json!({ "transactions": [{}, {}] })),
    ];

    for (method, result) in responses {
        server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({ "method": method })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(rpc_result(result))
            .create();
    }

    server
}

#[test]
fn test_help_lists_flags() {
    hivestats()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--endpoint"))
        .stdout(predicate::str::contains("--period"))
        .stdout(predicate::str::contains("--no-auto-refresh"))
        .stdout(predicate::str::contains("--once"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_invalid_period_is_rejected() {
    hivestats()
        .args(["--period", "2m"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown refresh period '2m'"));
}

#[test]
fn test_json_requires_once() {
    hivestats().arg("--json").assert().failure();
}

#[test]
fn test_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    hivestats()
        .args(["--once", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_invalid_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[sampling]\nwindow_size = 0\n").unwrap();

    hivestats()
        .args(["--once", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_invalid_endpoint_fails() {
    let dir = TempDir::new().unwrap();

    hivestats()
        .args(["--once", "--config", &empty_config(&dir)])
        .args(["--endpoint", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a url"));
}

#[test]
fn test_once_prints_text_snapshot() {
    let server = mock_node();
    let dir = TempDir::new().unwrap();

    hivestats()
        .args(["--once", "--config", &empty_config(&dir)])
        .args(["--endpoint", &server.url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Accounts"))
        .stdout(predicate::str::contains("1,000"))
        .stdout(predicate::str::contains("150"))
        .stdout(predicate::str::contains("500"))
        .stdout(predicate::str::contains("2.0"))
        .stdout(predicate::str::contains("Fetched at"));
}

#[test]
fn test_once_prints_json_snapshot() {
    let server = mock_node();
    let dir = TempDir::new().unwrap();

    let output = hivestats()
        .args(["--once", "--json", "--config", &empty_config(&dir)])
        .args(["--endpoint", &server.url()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let snapshot: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["totalAccounts"], 1000);
    assert_eq!(snapshot["totalPosts"], 500);
    assert_eq!(snapshot["activeAccounts"], 150);
    assert_eq!(snapshot["averageTransactions"], 2.0);
    assert!(snapshot["timestamp"].is_string());
}

#[test]
fn test_once_fails_when_node_unreachable() {
    let dir = TempDir::new().unwrap();

    hivestats()
        .args(["--once", "--config", &empty_config(&dir)])
        .args(["--endpoint", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Network error"));
}

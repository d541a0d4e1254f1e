//! Binary-level tests for the `articles` CLI.
//!
//! These cover the paths that need no running Redis: argument parsing,
//! configuration errors, and the unreachable-store failure state.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn articles_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("articles");
    path
}

fn setup_test_env(config_content: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let config_dir = tmp.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_path = config_dir.join("articles.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

/// Config pointing at a port nothing listens on.
fn unreachable_store_config() -> &'static str {
    r#"[store]
url = "redis://127.0.0.1:1/"
retries = 0

[indexes]
capacity = 5
top_k = 5

[logging]
filter = "error"
"#
}

fn run_articles(config_path: &Path, args: &[&str]) -> (String, String, Option<i32>) {
    let binary = articles_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run articles binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code())
}

#[test]
fn test_help_lists_commands() {
    let (_tmp, config_path) = setup_test_env("");
    let (stdout, _, code) = run_articles(&config_path, &["--help"]);
    assert_eq!(code, Some(0));
    for command in [
        "publish", "read", "get", "tag", "latest", "top", "history", "tags", "home", "reconcile",
    ] {
        assert!(stdout.contains(command), "missing {} in help: {}", command, stdout);
    }
}

#[test]
fn test_missing_config_fails() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("absent.toml");
    let (_, stderr, code) = run_articles(&config_path, &["latest"]);
    assert_eq!(code, Some(2));
    assert!(stderr.contains("Failed to read config file"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_capacity_rejected() {
    let (_tmp, config_path) = setup_test_env("[indexes]\ncapacity = 0\n");
    let (_, stderr, code) = run_articles(&config_path, &["latest"]);
    assert_eq!(code, Some(2));
    assert!(stderr.contains("indexes.capacity"), "stderr: {}", stderr);
}

#[test]
fn test_non_numeric_id_rejected_by_parser() {
    let (_tmp, config_path) = setup_test_env(unreachable_store_config());
    let (_, stderr, code) = run_articles(&config_path, &["get", "abc"]);
    assert_eq!(code, Some(2));
    assert!(stderr.contains("invalid value"), "stderr: {}", stderr);
}

#[test]
fn test_read_requires_user() {
    let (_tmp, config_path) = setup_test_env(unreachable_store_config());
    let (_, stderr, code) = run_articles(&config_path, &["read", "1"]);
    assert_eq!(code, Some(2));
    assert!(stderr.contains("--user"), "stderr: {}", stderr);
}

#[test]
fn test_unreachable_store_is_generic_failure() {
    let (_tmp, config_path) = setup_test_env(unreachable_store_config());
    let (stdout, stderr, code) = run_articles(&config_path, &["read", "1", "--user", "alice"]);
    assert_eq!(code, Some(2), "stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Error:"));
    assert!(!stderr.contains("not found"));
}

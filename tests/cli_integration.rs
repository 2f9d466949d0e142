//! CLI integration tests
//!
//! These run the built binary and check parsing, output formats, input
//! sources and exit codes.

use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Helper to get the path to the sitesmith binary
fn sitesmith_bin() -> PathBuf {
    // In tests, the binary should be at target/debug/sitesmith
    let mut path = env::current_exe()
        .expect("Failed to get current executable path")
        .parent()
        .expect("No parent")
        .parent()
        .expect("No parent")
        .to_path_buf();

    // If we're in deps/, go up one more level
    if path.ends_with("deps") {
        path = path.parent().expect("No parent").to_path_buf();
    }

    path.join("sitesmith")
}

fn sitesmith() -> Command {
    let mut command = Command::new(sitesmith_bin());
    command.env_remove("RUST_LOG").env_remove("SITESMITH_LOG_JSON");
    command
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout should be valid JSON")
}

#[test]
fn test_cli_help() {
    let output = sitesmith()
        .arg("--help")
        .output()
        .expect("Failed to execute sitesmith");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sitesmith"));
    assert!(stdout.contains("extract"));
    assert!(stdout.contains("chat"));
    assert!(stdout.contains("config"));
}

#[test]
fn test_cli_version() {
    let output = sitesmith()
        .arg("--version")
        .output()
        .expect("Failed to execute sitesmith");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_extract_human() {
    let output = sitesmith()
        .args(["extract", "I'll make the header blue"])
        .output()
        .expect("Failed to execute sitesmith");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("recolor header -> blue"));
    assert!(stdout.contains("direct_recolor"));
}

#[test]
fn test_extract_json() {
    let output = sitesmith()
        .args([
            "extract",
            "--format",
            "json",
            "You should try changing the background color to #334455",
        ])
        .output()
        .expect("Failed to execute sitesmith");

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["intent"]["type"], "recolor");
    assert_eq!(value["intent"]["target"], "background");
    assert_eq!(value["intent"]["color"], "#334455");
    assert_eq!(value["rule"], "suggested_recolor");
}

#[test]
fn test_extract_no_match_exits_zero() {
    let output = sitesmith()
        .args(["extract", "--format", "json", "Looks good to me"])
        .output()
        .expect("Failed to execute sitesmith");

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["intent"]["type"], "no_match");
    assert!(value.get("rule").is_none());
}

#[test]
fn test_extract_user_source_with_selection() {
    let output = sitesmith()
        .args([
            "extract",
            "--source",
            "user",
            "--selected",
            "nav",
            "--format",
            "yaml",
            "set text to Menu",
        ])
        .output()
        .expect("Failed to execute sitesmith");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("type: set_text"));
    assert!(stdout.contains("target: navigation"));
    assert!(stdout.contains("text: Menu"));
    assert!(stdout.contains("table: user_command"));
}

#[test]
fn test_extract_explain_lists_candidates() {
    let output = sitesmith()
        .args([
            "extract",
            "--explain",
            "--format",
            "json",
            "Let's add a button. I'll make the footer black.",
        ])
        .output()
        .expect("Failed to execute sitesmith");

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["rule"], "direct_recolor");
    let candidates: Vec<&str> = value["candidate_rules"]
        .as_array()
        .expect("candidate_rules should be an array")
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(candidates, vec!["direct_recolor", "direct_addition"]);
}

#[test]
fn test_extract_from_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("reply.txt");
    fs::write(&file_path, "Sounds good.\nLet's add a contact form.\n")
        .expect("Failed to write file");

    let output = sitesmith()
        .arg("extract")
        .arg("--file")
        .arg(&file_path)
        .args(["--format", "json"])
        .output()
        .expect("Failed to execute sitesmith");

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["intent"]["kind"], "contact form");
}

#[test]
fn test_extract_missing_file_fails() {
    let output = sitesmith()
        .args(["extract", "--file", "/nonexistent/path/12345.txt"])
        .output()
        .expect("Failed to execute sitesmith");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read message"));
}

#[test]
fn test_extract_from_stdin() {
    let mut child = sitesmith()
        .args(["extract", "--source", "user", "--format", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn sitesmith");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(b"make the footer red\n")
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for sitesmith");

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["intent"]["target"], "footer");
    assert_eq!(value["intent"]["color"], "red");
}

#[test]
fn test_config_redacts_api_key() {
    let output = sitesmith()
        .args(["config", "--format", "json"])
        .env("SITESMITH_API_KEY", "sk-very-secret")
        .env("SITESMITH_MODEL", "test-model")
        .output()
        .expect("Failed to execute sitesmith");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("sk-very-secret"));
    let value = stdout_json(&output);
    assert_eq!(value["model"], "test-model");
    assert_eq!(value["api_key"], "********");
}

#[test]
fn test_config_rejects_unparseable_value() {
    let output = sitesmith()
        .arg("config")
        .env("SITESMITH_MAX_TOKENS", "plenty")
        .output()
        .expect("Failed to execute sitesmith");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SITESMITH_MAX_TOKENS"));
}

#[test]
fn test_chat_without_api_key_fails() {
    let output = sitesmith()
        .args(["-q", "chat", "make the header blue"])
        .env_remove("SITESMITH_API_KEY")
        .output()
        .expect("Failed to execute sitesmith");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SITESMITH_API_KEY"));
}

#[test]
fn test_invalid_source_is_usage_error() {
    let output = sitesmith()
        .args(["extract", "--source", "robot", "hello"])
        .output()
        .expect("Failed to execute sitesmith");

    assert!(!output.status.success());
}

//! Error scenario integration tests

use std::path::Path;
use std::process::Command;

fn deskkit_bin(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_deskkit"));
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home);
    cmd
}

#[test]
fn missing_subcommand_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let output = deskkit_bin(home.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn config_get_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let output = deskkit_bin(home.path())
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let output = deskkit_bin(home.path())
        .args(["config", "set", "unknown_key", "value"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_log_level() {
    let home = tempfile::tempdir().unwrap();
    let output = deskkit_bin(home.path())
        .args(["config", "set", "log_level", "chatty"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("log_level"), "got: {}", stderr);
}

#[test]
fn config_init_twice_fails() {
    let home = tempfile::tempdir().unwrap();
    let first = deskkit_bin(home.path())
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command");
    assert!(first.status.success());

    let second = deskkit_bin(home.path())
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command");
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("already exists"));
}

#[test]
fn rules_check_missing_file() {
    let home = tempfile::tempdir().unwrap();
    let output = deskkit_bin(home.path())
        .args(["rules", "check", "/nonexistent/rules.toml"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read rule set"), "got: {}", stderr);
}

#[test]
fn rules_check_browser_without_name() {
    let home = tempfile::tempdir().unwrap();
    let rules = home.path().join("bad.toml");
    std::fs::write(
        &rules,
        "defaultBrowser = \"Arc\"\n\n[[handlers]]\nmatch = [\"a*\"]\nbrowser = {}\n",
    )
    .unwrap();

    let output = deskkit_bin(home.path())
        .args(["rules", "check"])
        .arg(&rules)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse rule set"), "got: {}", stderr);
}

#[test]
fn rules_check_empty_match() {
    let home = tempfile::tempdir().unwrap();
    let rules = home.path().join("bad.json");
    std::fs::write(
        &rules,
        r#"{ "defaultBrowser": "Arc", "handlers": [{ "match": [], "browser": "Safari" }] }"#,
    )
    .unwrap();

    let output = deskkit_bin(home.path())
        .args(["rules", "check"])
        .arg(&rules)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Handler #1: match list is empty"), "got: {}", stderr);
}

#[test]
fn rules_check_unsupported_format() {
    let home = tempfile::tempdir().unwrap();
    let output = deskkit_bin(home.path())
        .args(["rules", "check", ".finicky.js"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported rule set format"), "got: {}", stderr);
}

//! End-to-end tests for the dbctl binary
//!
//! Each test runs the compiled binary against a file-backed DuckDB database
//! and a scripts directory inside a temp dir.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Path to the compiled dbctl binary
fn dbctl_bin() -> String {
    env!("CARGO_BIN_EXE_dbctl").to_string()
}

/// Run `dbctl` in `dir` and return (stdout, stderr, exit code).
fn run_dbctl(dir: &Path, args: &[&str]) -> (String, String, Option<i32>) {
    let output = Command::new(dbctl_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("DBCTL_CONNECTOR")
        .env_remove("DBCTL_CONNECTION_STRING")
        .env_remove("DBCTL_SCRIPTS")
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute dbctl with args {:?}: {}", args, e));
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code(),
    )
}

/// Temp project with a dbctl.yml pointing at a local DuckDB file
fn project(scripts: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("dbctl.yml"),
        "connector: duckdb\nconnection_string: app.duckdb\nscripts_path: scripts\napplied_by: ci\n",
    )
    .unwrap();
    std::fs::create_dir(dir.path().join("scripts")).unwrap();
    for (name, body) in scripts {
        std::fs::write(dir.path().join("scripts").join(name), body).unwrap();
    }
    dir
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_dbctl(dir.path(), &["--help"]);
    assert_eq!(code, Some(0));
    for command in ["init", "migrate", "version", "history"] {
        assert!(stdout.contains(command), "help should list {command}");
    }
}

#[test]
fn test_init_then_version() {
    let dir = project(&[]);

    let (_, stderr, code) = run_dbctl(dir.path(), &["init"]);
    assert_eq!(code, Some(0), "init failed: {stderr}");

    let (stdout, _, code) = run_dbctl(dir.path(), &["version"]);
    assert_eq!(code, Some(0));
    assert_eq!(stdout.trim(), "1.0.0");
}

#[test]
fn test_init_twice_fails() {
    let dir = project(&[]);
    run_dbctl(dir.path(), &["init"]);

    let (_, stderr, code) = run_dbctl(dir.path(), &["init"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("[D003]"), "unexpected stderr: {stderr}");
}

#[test]
fn test_version_before_init_fails() {
    let dir = project(&[]);
    let (_, stderr, code) = run_dbctl(dir.path(), &["version"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("[M003]"), "unexpected stderr: {stderr}");
}

#[test]
fn test_missing_connection_string_fails() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_dbctl(dir.path(), &["version"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("--connection-string"), "unexpected stderr: {stderr}");
}

#[test]
fn test_unknown_connector_fails() {
    let dir = project(&[]);
    let (_, stderr, code) = run_dbctl(dir.path(), &["--connector", "oracle", "version"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("[D004]"), "unexpected stderr: {stderr}");
}

#[test]
fn test_migrate_forward_and_back() {
    let dir = project(&[
        ("f-1.1.0-create_users.sql", "CREATE TABLE users (id INTEGER);"),
        ("f-1.2.0-create_orders.sql", "CREATE TABLE orders (id INTEGER);"),
        ("b-1.2.0-drop_orders.sql", "DROP TABLE orders;"),
    ]);
    run_dbctl(dir.path(), &["init"]);

    let (_, stderr, code) = run_dbctl(dir.path(), &["migrate"]);
    assert_eq!(code, Some(0), "migrate failed: {stderr}");
    let (stdout, _, _) = run_dbctl(dir.path(), &["version"]);
    assert_eq!(stdout.trim(), "1.2.0");

    let (_, stderr, code) = run_dbctl(dir.path(), &["migrate", "--backward"]);
    assert_eq!(code, Some(0), "rollback failed: {stderr}");
    let (stdout, _, _) = run_dbctl(dir.path(), &["version"]);
    assert_eq!(stdout.trim(), "1.1.0");
}

#[test]
fn test_history_json_lists_applied_scripts() {
    let dir = project(&[("f-1.1.0-create_users.sql", "CREATE TABLE users (id INTEGER);")]);
    run_dbctl(dir.path(), &["init"]);
    run_dbctl(dir.path(), &["migrate"]);

    let (stdout, stderr, code) = run_dbctl(dir.path(), &["history", "--output", "json"]);
    assert_eq!(code, Some(0), "history failed: {stderr}");

    let entries: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["filename"], "f-1.0.0-Initialize_database_change_log.ddl");
    assert_eq!(entries[0]["applied_by"], "DbCtl");
    assert_eq!(entries[1]["filename"], "f-1.1.0-create_users.sql");
    assert_eq!(entries[1]["applied_by"], "ci");
    assert_eq!(entries[1]["version"], "1.1.0");
    assert_eq!(entries[1]["direction"], "forward");
}

#[test]
fn test_history_table_on_empty_log() {
    let dir = project(&[]);
    let (stdout, _, code) = run_dbctl(dir.path(), &["history"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("No change log entries found."));
}

#[test]
fn test_scripts_flag_overrides_config() {
    let dir = project(&[]);
    std::fs::create_dir(dir.path().join("other")).unwrap();
    std::fs::write(
        dir.path().join("other").join("f-2.0.0-widgets.sql"),
        "CREATE TABLE widgets (id INTEGER);",
    )
    .unwrap();
    run_dbctl(dir.path(), &["init"]);

    let (_, stderr, code) = run_dbctl(dir.path(), &["migrate", "--scripts", "other"]);
    assert_eq!(code, Some(0), "migrate failed: {stderr}");
    let (stdout, _, _) = run_dbctl(dir.path(), &["version"]);
    assert_eq!(stdout.trim(), "2.0.0");
}

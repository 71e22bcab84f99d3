use super::*;
use chrono::{TimeZone, Utc};
use dbctl_db::MemoryConnector;
use std::sync::Arc;

fn entry(filename: &str) -> ChangeLogEntry {
    let at = Utc.with_ymd_and_hms(2020, 2, 14, 0, 0, 0).unwrap();
    ChangeLogEntry::new(filename, "DbCtl", at, b"").unwrap()
}

fn entries(filenames: &[&str]) -> Vec<ChangeLogEntry> {
    filenames.iter().map(|f| entry(f)).collect()
}

fn v(s: &str) -> SemanticVersion {
    s.parse().unwrap()
}

fn resolver(log: Vec<ChangeLogEntry>) -> VersionResolver {
    let connector = Arc::new(MemoryConnector::with_entries(log));
    VersionResolver::new(DatabaseConnection::new(connector, "db-connection-string"))
}

#[tokio::test]
async fn test_returns_the_latest_version() {
    let resolver = resolver(entries(&["f-1.2.1-two.ddl", "f-1.2.0-one.ddl"]));
    assert_eq!(resolver.get_current_version().await.unwrap(), v("1.2.1"));
}

#[tokio::test]
async fn test_single_forward_entry() {
    let resolver = resolver(entries(&["f-1.0.0-Initialize_database_change_log.ddl"]));
    assert_eq!(resolver.get_current_version().await.unwrap(), v("1.0.0"));
}

#[tokio::test]
async fn test_backward_entries_cancel_their_forward_version() {
    let resolver = resolver(entries(&[
        "f-1.2.1-two.ddl",
        "b-1.2.3-undo_one.dml",
        "f-1.2.0-one.ddl",
        "f-1.2.3-one.dml",
        "f-1.2.2-one.dcl",
    ]));
    assert_eq!(resolver.get_current_version().await.unwrap(), v("1.2.2"));
}

#[tokio::test]
async fn test_empty_change_log_is_not_initialized() {
    let err = resolver(Vec::new()).get_current_version().await.unwrap_err();
    assert!(matches!(err, MigrateError::NoChangeLogFound));
    assert!(err.to_string().contains("initialized"));
}

#[test]
fn test_rolling_back_a_middle_version() {
    let log = entries(&[
        "f-1.0.0-init.ddl",
        "f-1.0.1-a.sql",
        "f-1.0.2-b.sql",
        "f-1.0.3-c.sql",
        "b-1.0.1-undo_a.sql",
    ]);
    let effective: Vec<String> = effective_forward_entries(&log)
        .iter()
        .map(|e| e.version().to_string())
        .collect();
    assert_eq!(effective, vec!["1.0.0", "1.0.2", "1.0.3"]);
    assert_eq!(current_version(&log).unwrap(), v("1.0.3"));
}

#[test]
fn test_removing_each_version_in_turn() {
    let forward = ["f-1.0.0-a.sql", "f-1.1.0-b.sql", "f-1.1.5-c.sql", "f-2.0.0-d.sql"];
    let versions = ["1.0.0", "1.1.0", "1.1.5", "2.0.0"];

    for (k, undone) in versions.iter().enumerate() {
        let mut log = entries(&forward);
        log.push(entry(&format!("b-{undone}-undo.sql")));

        let expected = versions
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != k)
            .map(|(_, s)| v(s))
            .max()
            .unwrap();
        assert_eq!(current_version(&log).unwrap(), expected, "undoing {undone}");
    }
}

#[test]
fn test_description_does_not_matter_for_matching() {
    let log = entries(&[
        "f-1.0.0-init.ddl",
        "f-1.0.1-create.sql",
        "b-1.0.1-something_else.sql",
    ]);
    assert_eq!(current_version(&log).unwrap(), v("1.0.0"));
}

#[test]
fn test_reapplied_version_after_rollback_is_effective() {
    let log = entries(&[
        "f-1.0.0-init.ddl",
        "f-1.0.1-a.sql",
        "b-1.0.1-undo_a.sql",
        "f-1.0.1-a.sql",
    ]);
    assert_eq!(current_version(&log).unwrap(), v("1.0.1"));
}

#[test]
fn test_second_rollback_of_reapplied_version() {
    let log = entries(&[
        "f-1.0.0-init.ddl",
        "f-1.0.1-a.sql",
        "b-1.0.1-undo_a.sql",
        "f-1.0.1-a.sql",
        "b-1.0.1-undo_a.sql",
    ]);
    assert_eq!(current_version(&log).unwrap(), v("1.0.0"));
}

#[test]
fn test_latest_application_represents_a_version() {
    let early = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).unwrap();
    let log = vec![
        ChangeLogEntry::new("f-1.0.0-init.ddl", "DbCtl", early, b"").unwrap(),
        ChangeLogEntry::new("f-1.0.1-a.sql", "ops", late, b"v2").unwrap(),
        ChangeLogEntry::new("b-1.0.1-undo_a.sql", "ops", early, b"").unwrap(),
        ChangeLogEntry::new("f-1.0.1-a.sql", "ops", early, b"v1").unwrap(),
    ];
    let effective = effective_forward_entries(&log);
    assert_eq!(effective.len(), 2);
    assert_eq!(effective[1].change_date_time(), late);
}

#[test]
fn test_fully_rolled_back_log_is_invalid() {
    let log = entries(&["f-1.0.0-init.ddl", "b-1.0.0-undo_init.ddl"]);
    assert!(matches!(
        current_version(&log).unwrap_err(),
        MigrateError::NoEffectiveVersion
    ));
}

#[test]
fn test_log_without_forward_entries_is_invalid() {
    let log = entries(&["b-1.0.3-undo.sql"]);
    assert!(matches!(
        current_version(&log).unwrap_err(),
        MigrateError::NoEffectiveVersion
    ));
}

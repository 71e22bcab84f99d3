use super::*;

#[test]
fn test_parse_forward_script() {
    let parsed = ScriptFilename::parse("f-1.0.2-two.ddl").unwrap();
    assert_eq!(parsed.direction, MigrationDirection::Forward);
    assert_eq!(parsed.version, SemanticVersion::new(1, 0, 2));
    assert_eq!(parsed.description, "two");
    assert_eq!(parsed.extension, "ddl");
}

#[test]
fn test_parse_backward_script() {
    let parsed = ScriptFilename::parse("b-1.2.3-undo_one.dml").unwrap();
    assert_eq!(parsed.direction, MigrationDirection::Backward);
    assert_eq!(parsed.version, SemanticVersion::new(1, 2, 3));
    assert_eq!(parsed.description, "undo_one");
}

#[test]
fn test_direction_letter_is_case_insensitive() {
    let upper = ScriptFilename::parse("F-2.0.0-add_users.sql").unwrap();
    let lower = ScriptFilename::parse("f-2.0.0-add_users.sql").unwrap();
    assert_eq!(upper, lower);
    assert_eq!(
        ScriptFilename::parse("B-2.0.0-x.sql").unwrap().direction,
        MigrationDirection::Backward
    );
}

#[test]
fn test_description_is_kept_verbatim() {
    let parsed = ScriptFilename::parse("f-1.0.0-Initialize_database-change.log.ddl").unwrap();
    assert_eq!(parsed.description, "Initialize_database-change.log");
    assert_eq!(parsed.extension, "ddl");
}

#[test]
fn test_directory_components_are_ignored() {
    let unix = ScriptFilename::parse("./scripts/nested/f-1.0.1-one.ddl").unwrap();
    let windows = ScriptFilename::parse(r".\scripts\f-1.0.1-one.ddl").unwrap();
    assert_eq!(unix, windows);
    assert_eq!(unix.to_string(), "f-1.0.1-one.ddl");
}

#[test]
fn test_canonical_names_round_trip() {
    for name in [
        "f-1.0.1-one.ddl",
        "b-1.1.2-five.ddl",
        "f-10.20.30-a_long-description.sql",
        "f-0.0.0-zero.txt",
    ] {
        let parsed = ScriptFilename::parse(name).unwrap();
        assert_eq!(parsed.to_string(), name);
    }
}

#[test]
fn test_rejects_malformed_filenames() {
    let bad = [
        "",
        "readme.md",
        "x-1.0.0-one.ddl",
        "f1.0.0-one.ddl",
        "f-1.0-one.ddl",
        "f-1.0.a-one.ddl",
        "f-1.0.0.ddl",
        "f-1.0.0-.ddl",
        "f-1.0.0-one",
        "f-1.0.0-one.",
        "f-v1.0.0-one.ddl",
    ];
    for name in bad {
        let err = ScriptFilename::parse(name).unwrap_err();
        assert!(
            matches!(err, CoreError::MalformedFilename { .. }),
            "expected MalformedFilename for {name:?}, got {err:?}"
        );
    }
}

#[test]
fn test_error_names_the_file() {
    let err = ScriptFilename::parse("f-1.x.0-one.ddl").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("[C001]"));
    assert!(msg.contains("f-1.x.0-one.ddl"));
}

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use schema_batch::batch::run_batch;
use schema_batch::error::Error;
use schema_batch::schema::load_schema;
use schema_batch::validate_all;

const PERSON_SCHEMA: &str = r#"{
    "type": "object",
    "required": ["name"],
    "properties": {
        "name": {"type": "string"}
    }
}"#;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

fn lines(report: &str) -> BTreeSet<String> {
    report.lines().map(str::to_string).collect()
}

#[test]
fn test_report_lists_only_failing_file() {
    // Schema sits alongside the data and must not be validated against itself
    let dir = tempfile::tempdir().expect("create temp dir");
    let schema_path = write_file(dir.path(), "schema.json", PERSON_SCHEMA);
    write_file(dir.path(), "a.json", r#"{"name": "ok"}"#);
    write_file(dir.path(), "b.json", r#"{"age": 5}"#);

    let report = validate_all(dir.path(), &schema_path).expect("validate dir");

    assert_eq!(report.lines().count(), 1, "got: {:?}", report);
    assert!(report.starts_with("b.json: "), "got: {:?}", report);
    assert!(report.contains("required property"), "got: {:?}", report);
    assert!(report.ends_with(" at #/required\n"), "got: {:?}", report);
}

#[test]
fn test_all_passing_yields_empty_report() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let schema_path = write_file(dir.path(), "schema.json", PERSON_SCHEMA);
    write_file(dir.path(), "a.json", r#"{"name": "a"}"#);
    write_file(dir.path(), "b.json", r#"{"name": "b", "extra": true}"#);

    let report = validate_all(dir.path(), &schema_path).expect("validate dir");
    assert_eq!(report, "");
}

#[test]
fn test_empty_directory_yields_empty_report() {
    let data = tempfile::tempdir().expect("create data dir");
    let schemas = tempfile::tempdir().expect("create schema dir");
    let schema_path = write_file(schemas.path(), "person.json", PERSON_SCHEMA);

    let report = validate_all(data.path(), &schema_path).expect("validate dir");
    assert_eq!(report, "");
}

#[test]
fn test_ineligible_files_are_never_reported() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let schema_path = write_file(dir.path(), "schema.json", PERSON_SCHEMA);
    // All of these would fail (or fail to parse) if they were checked
    write_file(dir.path(), "fooschema.json", r#"{"age": 1}"#);
    write_file(dir.path(), "notes.txt", "not json at all");
    write_file(dir.path(), "c.json.bak", r#"{"age": 1}"#);
    fs::create_dir(dir.path().join("nested")).expect("create subdir");
    write_file(&dir.path().join("nested"), "d.json", r#"{"age": 1}"#);

    let schema = load_schema(&schema_path).expect("load schema");
    let report = run_batch(dir.path(), &schema).expect("validate dir");

    assert!(report.is_clean(), "got: {:?}", report);
    assert_eq!(report.checked, 0);
    assert_eq!(report.to_string(), "");
}

#[test]
fn test_schema_outside_directory() {
    let data = tempfile::tempdir().expect("create data dir");
    let schemas = tempfile::tempdir().expect("create schema dir");
    let schema_path = write_file(schemas.path(), "person.json", PERSON_SCHEMA);
    write_file(data.path(), "one.json", r#"{"name": 1}"#);
    write_file(data.path(), "two.json", r#"{}"#);
    write_file(data.path(), "three.json", r#"{"name": "3"}"#);

    let schema = load_schema(&schema_path).expect("load schema");
    let report = run_batch(data.path(), &schema).expect("validate dir");

    assert_eq!(report.checked, 3);
    assert_eq!(report.failed(), 2);

    let names: BTreeSet<&str> = report
        .entries
        .iter()
        .map(|e| e.file_name.as_str())
        .collect();
    assert_eq!(names, BTreeSet::from(["one.json", "two.json"]));
}

#[test]
fn test_repeated_runs_give_same_lines() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let schema_path = write_file(dir.path(), "schema.json", PERSON_SCHEMA);
    for idx in 0..5 {
        write_file(dir.path(), &format!("bad{}.json", idx), r#"{"name": false}"#);
        write_file(dir.path(), &format!("good{}.json", idx), r#"{"name": "x"}"#);
    }

    let first = validate_all(dir.path(), &schema_path).expect("first run");
    let second = validate_all(dir.path(), &schema_path).expect("second run");

    assert_eq!(lines(&first), lines(&second));
    assert_eq!(lines(&first).len(), 5);
}

#[test]
fn test_malformed_document_aborts_batch() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let schema_path = write_file(dir.path(), "schema.json", PERSON_SCHEMA);
    write_file(dir.path(), "a.json", r#"{"age": 5}"#);
    let broken = write_file(dir.path(), "broken.json", "{ not json");

    let err = validate_all(dir.path(), &schema_path).unwrap_err();
    assert!(
        matches!(err, Error::MalformedJson { ref path, .. } if path == &broken),
        "unexpected error: {:?}",
        err
    );
}

#[test]
fn test_unreadable_entry_aborts_batch() {
    // A directory named like a document cannot be read as one
    let dir = tempfile::tempdir().expect("create temp dir");
    let schema_path = write_file(dir.path(), "schema.json", PERSON_SCHEMA);
    write_file(dir.path(), "a.json", r#"{"name": "ok"}"#);
    fs::create_dir(dir.path().join("folder.json")).expect("create subdir");

    let err = validate_all(dir.path(), &schema_path).unwrap_err();
    assert!(matches!(err, Error::Io { .. }), "unexpected error: {:?}", err);
}

#[test]
fn test_missing_directory_is_not_found() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let schema_path = write_file(dir.path(), "schema.json", PERSON_SCHEMA);

    let err = validate_all(dir.path().join("missing"), &schema_path).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "unexpected error: {:?}", err);
}

#[test]
fn test_bad_schema_fails_before_listing() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let schema_path = write_file(dir.path(), "schema.json", "[1, 2");

    let err = validate_all(dir.path().join("missing"), &schema_path).unwrap_err();
    assert!(
        matches!(err, Error::MalformedJson { ref path, .. } if path == &schema_path),
        "unexpected error: {:?}",
        err
    );
}

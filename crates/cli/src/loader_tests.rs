// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn missing_usage_path_is_empty_index() {
    assert!(load_usage(None).unwrap().is_empty());
}

#[test]
fn usage_from_full_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "usage.json",
        r#"{"models": ["User"], "files": ["models/user.go"], "packages": ["./models/"]}"#,
    );
    let usage = load_usage(Some(&path)).unwrap();
    assert!(usage.models.contains("User"));
    assert!(usage.files.contains("models/user.go"));
    assert!(usage.packages.contains("models"));
}

#[test]
fn usage_from_plain_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "usage.json", r#"["User", "Group"]"#);
    let usage = load_usage(Some(&path)).unwrap();
    assert_eq!(usage.models.len(), 2);
    assert!(usage.packages.is_empty());
}

#[test]
fn usage_with_unknown_keys_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "usage.json", r#"{"modles": ["User"]}"#);
    let err = load_usage(Some(&path)).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn schema_document_from_yaml_openapi() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "openapi.yaml",
        "openapi: 3.0.1\ncomponents:\n  schemas:\n    microsoft.graph.user:\n      type: object\n      properties:\n        mail:\n          type: string\n",
    );
    let document = load_schema_document(&path).unwrap();
    assert_eq!(document.len(), 1);
    assert!(document.get("microsoft.graph.user").is_some());
}

#[test]
fn schema_document_from_json_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "schemas.json", r#"{"a.b": {"properties": {}}, "a.c": {}}"#);
    assert_eq!(load_schema_document(&path).unwrap().len(), 2);
}

#[test]
fn scalar_schema_document_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "schemas.json", "42");
    assert!(matches!(
        load_schema_document(&path).unwrap_err(),
        Error::Parse { .. }
    ));
}

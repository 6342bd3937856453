// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::filter::FileStatus;

const PAYLOAD: &str = r#"{
  "total_commits": 3,
  "html_url": "https://example.test/compare/v1.0.0...v1.1.0",
  "files": [
    {"filename": "models/user.go", "status": "modified", "additions": 1, "deletions": 0,
     "patch": "@@ -1 +1,2 @@\n type User struct {\n+    Email string\n"}
  ]
}"#;

#[test]
fn decodes_compare_payload_aliases() {
    let comparison: Comparison = serde_json::from_str(PAYLOAD).unwrap();
    assert_eq!(comparison.commit_count, 3);
    assert_eq!(
        comparison.compare_url.as_deref(),
        Some("https://example.test/compare/v1.0.0...v1.1.0")
    );
    assert_eq!(comparison.files.len(), 1);
    assert_eq!(comparison.files[0].path, "models/user.go");
    assert_eq!(comparison.files[0].status, FileStatus::Modified);
}

#[test]
fn file_source_reads_fixed_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("compare.json");
    std::fs::write(&file, PAYLOAD).unwrap();

    let source = FileSource::new(&file);
    let comparison = source.compare("org/sdk", "v1.0.0", "v1.1.0").unwrap();
    assert_eq!(comparison.files.len(), 1);
}

#[test]
fn file_source_looks_up_pair_in_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("v1.0.0...v1.1.0.json"), PAYLOAD).unwrap();

    let source = FileSource::new(dir.path());
    assert!(source.compare("org/sdk", "v1.0.0", "v1.1.0").is_ok());

    let err = source.compare("org/sdk", "v1.1.0", "v1.2.0").unwrap_err();
    assert!(matches!(err, SourceError::Unavailable(_)));
    assert!(err.to_string().starts_with("no diff available: org/sdk v1.1.0...v1.2.0"));
}

#[test]
fn invalid_payload_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("compare.json");
    std::fs::write(&file, "{not json").unwrap();

    let err = read_comparison(&file).unwrap_err();
    assert!(matches!(err, SourceError::Decode { .. }));
}

#[test]
fn release_request_display() {
    let request = ReleaseRequest::new("org/sdk", "v1.0.0", "v1.1.0");
    assert_eq!(request.to_string(), "org/sdk v1.0.0...v1.1.0");
}

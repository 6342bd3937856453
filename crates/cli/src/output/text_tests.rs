// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use termcolor::Buffer;

use super::{FormatOptions, TextFormatter};
use crate::filter::FileStatus;
use crate::impact::{ClassifiedFile, ClassifiedItem, ImpactLevel, ItemKind};
use crate::report::ImpactReport;

fn file(path: &str, status: FileStatus, level: ImpactLevel, reason: &'static str) -> ClassifiedFile {
    ClassifiedFile {
        file: path.to_string(),
        status,
        level,
        reason,
        additions: 1,
        deletions: 0,
    }
}

fn report() -> ImpactReport {
    ImpactReport::build(
        vec![
            file("models/photo.go", FileStatus::Removed, ImpactLevel::Critical, "file removed in used package"),
            file("users/a.go", FileStatus::Modified, ImpactLevel::Warning, "modified file in used package"),
            file("users/b.go", FileStatus::Modified, ImpactLevel::Warning, "modified file in used package"),
            file("go.mod", FileStatus::Modified, ImpactLevel::Metadata, "build or license metadata"),
        ],
        vec![ClassifiedItem {
            model: "User".to_string(),
            name: "Legacy".to_string(),
            kind: ItemKind::Field,
            level: ImpactLevel::Critical,
            reason: "field removed from used model",
            detail: Some("*string".to_string()),
        }],
    )
}

fn render(options: FormatOptions, fail_on: ImpactLevel) -> (String, bool) {
    let mut formatter = TextFormatter::with_writer(Buffer::no_color(), options);
    formatter.write_report(&report(), fail_on).unwrap();
    let truncated = formatter.was_truncated();
    let text = String::from_utf8(formatter.into_inner().into_inner()).unwrap();
    (text, truncated)
}

#[test]
fn lists_files_by_level() {
    let (text, truncated) = render(FormatOptions::default(), ImpactLevel::Critical);
    assert!(text.contains("critical (1)\n  models/photo.go [removed]: file removed in used package\n"));
    assert!(text.contains("warning (2)\n"));
    assert!(!truncated);
}

#[test]
fn quiet_levels_are_counted_not_listed() {
    let (text, _) = render(FormatOptions::default(), ImpactLevel::Critical);
    assert!(text.contains("metadata: 1 file\n"));
    assert!(!text.contains("go.mod"));
}

#[test]
fn items_show_model_and_detail() {
    let (text, _) = render(FormatOptions::default(), ImpactLevel::Critical);
    assert!(text.contains("changes:\n"));
    assert!(text.contains("User.Legacy (field): field removed from used model  *string"));
}

#[test]
fn summary_line_reports_verdict() {
    let (text, _) = render(FormatOptions::default(), ImpactLevel::Critical);
    assert!(text.ends_with("4 files, 1 item: BREAKING (highest: critical)\n"));
}

#[test]
fn limit_truncates_levels() {
    let (text, truncated) = render(FormatOptions::with_limit(1), ImpactLevel::Critical);
    assert!(truncated);
    assert!(text.contains("  ... 1 more\n"));
}

#[test]
fn empty_report_is_ok() {
    let mut formatter = TextFormatter::with_writer(Buffer::no_color(), FormatOptions::no_limit());
    formatter
        .write_report(&ImpactReport::default(), ImpactLevel::Critical)
        .unwrap();
    let text = String::from_utf8(formatter.into_inner().into_inner()).unwrap();
    assert_eq!(text, "\n0 files, 0 items: OK\n");
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specifications for the sdkdrift CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

use prelude::*;

// =============================================================================
// COMMAND SPECS
// =============================================================================

/// > sdkdrift (bare invocation) shows help
#[test]
fn bare_invocation_shows_help() {
    sdkdrift_cmd()
        .assert()
        .success()
        .stdout(predicates::str::contains("Usage:"));
}

/// > Exit code 0 when invoked with --help
#[test]
fn help_lists_subcommands() {
    sdkdrift_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("diff"))
        .stdout(predicates::str::contains("schema"))
        .stdout(predicates::str::contains("releases"));
}

/// > Unknown flags are argument errors (clap exits with 2)
#[test]
fn unknown_flag_is_rejected() {
    sdkdrift_cmd()
        .args(["diff", "--compare", "x.json", "--frobnicate"])
        .assert()
        .code(2);
}

// =============================================================================
// DIFF SPECS
// =============================================================================

/// > A removed model file in a used package is critical and fails the run
#[test]
fn diff_removed_model_fails() {
    diff()
        .on("release")
        .args(&["--compare", "compare.json", "--usage", "usage.json"])
        .fails()
        .stdout_has("critical (1)\n  models/photo.go [removed]: file removed in used package\n")
        .stdout_has("BREAKING (highest: critical)");
}

/// > Field removals are critical, additions are opportunities
#[test]
fn diff_lists_classified_items() {
    diff()
        .on("release")
        .args(&["--compare", "compare.json", "--usage", "usage.json"])
        .fails()
        .stdout_has("User.Legacy (field): field removed from used model")
        .stdout_has("User.Owner (field): field added to used model")
        .stdout_has("Userable.GetOwner (method): method added to used interface")
        .stdout_has("PlanType (enum): enum values removed from used model")
        .stdout_lacks("Visibility");
}

/// > Metadata and noise files are counted, not listed
#[test]
fn diff_quiet_levels_are_counted() {
    diff()
        .on("release")
        .args(&["--compare", "compare.json", "--usage", "usage.json"])
        .fails()
        .stdout_has("metadata: 1 file\n")
        .stdout_has("noise: 2 files\n")
        .stdout_lacks("go.mod");
}

/// > JSON output groups files by level and carries the verdict
#[test]
fn diff_json_output() {
    let json = diff()
        .on("release")
        .args(&["--compare", "compare.json", "--usage", "usage.json"])
        .json()
        .fails();

    assert_eq!(json.require("breaking"), true);
    assert!(json.require("timestamp").as_str().unwrap().ends_with('Z'));
    assert_eq!(json.require("commit_count"), 7);
    assert_eq!(json.files_at("critical"), vec!["models/photo.go"]);
    assert_eq!(json.files_at("metadata"), vec!["go.mod"]);

    let legacy = json
        .items()
        .iter()
        .find(|i| i["name"] == "Legacy")
        .expect("Legacy item");
    assert_eq!(legacy["level"], "critical");
    assert_eq!(legacy["kind"], "field");

    let plan = json
        .items()
        .iter()
        .find(|i| i["kind"] == "enum")
        .expect("enum item");
    assert_eq!(plan["level"], "enum_removed");
    assert_eq!(plan["detail"], "removed: standard; added: premium");

    assert_eq!(json.require("report")["summary"]["highest"], "critical");
}

/// > Additions only: exit 0
#[test]
fn diff_additions_pass() {
    diff()
        .on("release")
        .args(&["--compare", "additions.json", "--usage", "usage.json"])
        .passes()
        .stdout_has("OK (highest: warning)");
}

/// > --fail-on lowers the threshold
#[test]
fn diff_fail_on_opportunity() {
    diff()
        .on("release")
        .args(&[
            "--compare",
            "additions.json",
            "--usage",
            "usage.json",
            "--fail-on",
            "opportunity",
        ])
        .fails();
}

/// > A plain list of model names is accepted as usage index
#[test]
fn diff_usage_as_plain_list() {
    diff()
        .on("release")
        .args(&["--compare", "compare.json", "--usage", "usage-list.json"])
        .fails()
        .stdout_has("User.Legacy")
        .stdout_lacks("PlanType (enum)");
}

/// > --verbose prints parse statistics to stderr
#[test]
fn diff_verbose_prints_statistics() {
    diff()
        .on("release")
        .args(&["--compare", "compare.json", "--verbose"])
        .fails()
        .stderr_has("[verbose] === structural parse ===")
        .stderr_has("[verbose] files: ")
        .stderr_has("[verbose] changes: fields +");
}

/// > A missing compare payload is an internal error (exit 3)
#[test]
fn diff_missing_compare_file() {
    diff()
        .on("release")
        .args(&["--compare", "nope.json"])
        .exits(3)
        .stderr_has("sdkdrift: failed to read nope.json");
}

/// > --color always emits escape codes
#[test]
fn diff_color_always() {
    diff()
        .on("release")
        .args(&["--compare", "compare.json", "--color", "always"])
        .fails()
        .stdout_has("\x1b[");
}

/// > Output is plain when stdout is not a terminal
#[test]
fn diff_color_auto_without_tty() {
    diff()
        .on("release")
        .args(&["--compare", "compare.json"])
        .fails()
        .stdout_lacks("\x1b[");
}

// =============================================================================
// CONFIG SPECS
// =============================================================================

/// > sdkdrift.toml in the working directory is picked up
#[test]
fn config_model_dir_and_noise() {
    diff()
        .on("custom-config")
        .args(&["--compare", "compare.json"])
        .fails()
        .stdout_has("User.Legacy (field)")
        .stdout_has("noise: 1 file\n")
        .stdout_lacks("models/user.go");
}

/// > Unsupported config version exits with 2
#[test]
fn config_bad_version() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sdkdrift.toml"), "version = 9\n").unwrap();
    std::fs::copy(
        fixture("release").join("compare.json"),
        dir.path().join("compare.json"),
    )
    .unwrap();

    diff()
        .pwd(dir.path())
        .args(&["--compare", "compare.json"])
        .exits(2)
        .stderr_has("unsupported config version 9");
}

/// > Unknown keys warn but do not fail
#[test]
fn config_unknown_key_warns() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("custom.toml"), "version = 1\nshiny = true\n").unwrap();

    diff()
        .on("release")
        .args(&[
            "--config",
            dir.path().join("custom.toml").to_str().unwrap(),
            "--compare",
            "additions.json",
        ])
        .passes()
        .stderr_has("unrecognized field `shiny`");
}

// =============================================================================
// SCHEMA SPECS
// =============================================================================

/// > A property added to a used schema is an opportunity
#[test]
fn schema_addition_on_used_model() {
    schema()
        .on("schemas")
        .args(&["--old", "old.yaml", "--new", "new.json", "--usage", "usage-user.json"])
        .passes()
        .stdout_has("User (microsoft.graph.user): 1 added")
        .stdout_has("User.preferredLanguage (property): property added to used schema");
}

#[test]
fn schema_fail_on_opportunity() {
    schema()
        .on("schemas")
        .args(&[
            "--old",
            "old.yaml",
            "--new",
            "new.json",
            "--usage",
            "usage-user.json",
            "--fail-on",
            "opportunity",
        ])
        .fails();
}

/// > A removed property on a used schema is breaking
#[test]
fn schema_removed_property_fails() {
    schema()
        .on("schemas")
        .args(&["--old", "old.yaml", "--new", "new.json", "--usage", "usage-group.json"])
        .fails()
        .stdout_has("Group.visibility (property): property removed from used schema");
}

/// > Without a usage index every schema counts, including removed ones
#[test]
fn schema_json_without_usage() {
    let json = schema()
        .on("schemas")
        .args(&["--old", "old.yaml", "--new", "new.json"])
        .json()
        .fails();

    assert_eq!(json.require("breaking"), true);
    assert_eq!(json.require("relevant").as_array().unwrap().len(), 2);
    assert_eq!(
        json.require("comparison")["removed_schemas"][0],
        "microsoft.graph.photo"
    );
    assert!(json.items().iter().any(|i| i["kind"] == "schema" && i["model"] == "Photo"));
}

/// > Malformed usage index is a configuration error
#[test]
fn schema_bad_usage_index() {
    schema()
        .on("schemas")
        .args(&["--old", "old.yaml", "--new", "new.json", "--usage", "usage-bad.json"])
        .exits(2)
        .stderr_has("parse error: usage-bad.json");
}

// =============================================================================
// RELEASES SPECS
// =============================================================================

/// > A missing comparison is reported per release, not fatal
#[test]
fn releases_report_missing_diff() {
    releases()
        .on("releases")
        .args(&[
            "--dir",
            ".",
            "--repo",
            "org/sdk",
            "v1.0.0...v1.1.0",
            "v1.1.0...v1.2.0",
            "v1.2.0...v1.3.0",
        ])
        .fails()
        .stdout_has("== org/sdk v1.0.0...v1.1.0 ==")
        .stdout_has("no diff available: org/sdk v1.2.0...v1.3.0");
}

#[test]
fn releases_json_outcomes() {
    let json = releases()
        .on("releases")
        .args(&["--dir", ".", "v1.1.0...v1.2.0", "v9...v10"])
        .json()
        .passes();

    let releases = json.require("releases").as_array().unwrap();
    assert_eq!(releases.len(), 2);
    assert_eq!(releases[0]["outcome"], "analyzed");
    assert_eq!(releases[1]["outcome"], "no_diff_available");
    assert_eq!(json.require("breaking"), false);
}

#[test]
fn releases_malformed_pair() {
    releases()
        .on("releases")
        .args(&["--dir", ".", "v1.0.0-v1.1.0"])
        .exits(2)
        .stderr_has("invalid version pair `v1.0.0-v1.1.0`");
}

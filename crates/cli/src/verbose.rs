// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verbose output logger for diagnostic information.
//!
//! Writes `[verbose]` prefixed lines to stderr when `--verbose` is given.

use crate::schema::SchemaStatistics;
use crate::stats::{FilterReason, ParseStatistics};

/// Verbose output logger. Writes to stderr with a `[verbose]` prefix.
/// All output is conditional on verbose mode being enabled.
pub struct VerboseLogger {
    enabled: bool,
}

impl VerboseLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Print a verbose line to stderr.
    pub fn log(&self, msg: &str) {
        if self.enabled {
            eprintln!("[verbose] {}", msg);
        }
    }

    /// Print a verbose section header.
    pub fn section(&self, title: &str) {
        if self.enabled {
            eprintln!("[verbose] === {} ===", title);
        }
    }

    /// Parse statistics and filter breakdown of one structural scan.
    pub fn parse_stats(&self, stats: &ParseStatistics) {
        if !self.enabled {
            return;
        }
        for line in parse_stats_lines(stats) {
            self.log(&line);
        }
    }

    pub fn schema_stats(&self, stats: &SchemaStatistics) {
        if !self.enabled {
            return;
        }
        for line in schema_stats_lines(stats) {
            self.log(&line);
        }
    }
}

/// Diagnostic lines for a structural scan.
pub(crate) fn parse_stats_lines(stats: &ParseStatistics) -> Vec<String> {
    let mut lines = vec![
        format!(
            "files: {} total, {} with changes, {} without",
            stats.files_total, stats.files_with_changes, stats.files_without_changes
        ),
        format!(
            "lines: {} processed ({} added, {} removed)",
            stats.lines_processed(),
            stats.lines_added,
            stats.lines_removed
        ),
        format!(
            "changes: fields +{} -{}, methods +{} -{}, embedded +{} -{}",
            stats.fields_added,
            stats.fields_removed,
            stats.methods_added,
            stats.methods_removed,
            stats.embedded_added,
            stats.embedded_removed
        ),
    ];

    let filtered: Vec<String> = FilterReason::ALL
        .iter()
        .map(|&reason| (reason, stats.filtered.count(reason)))
        .filter(|(_, count)| *count > 0)
        .map(|(reason, count)| format!("{} {}", count, reason.as_str()))
        .collect();
    if !filtered.is_empty() {
        lines.push(format!("filtered: {}", filtered.join(", ")));
    }

    if !stats.unchanged_examples.is_empty() {
        lines.push(format!(
            "files without changes: {}",
            stats.unchanged_examples.join(", ")
        ));
    }
    if stats.looks_suspicious() {
        lines.push(
            "most model files produced no structural change; check the diff patterns".to_string(),
        );
    }
    lines
}

pub(crate) fn schema_stats_lines(stats: &SchemaStatistics) -> Vec<String> {
    vec![
        format!(
            "schemas: {} old, {} new, {} added, {} removed",
            stats.schemas_old, stats.schemas_new, stats.schemas_added, stats.schemas_removed
        ),
        format!(
            "compared: {} ({} with changes, {} skipped, {} malformed)",
            stats.schemas_compared,
            stats.schemas_with_changes,
            stats.schemas_skipped,
            stats.schemas_malformed
        ),
        format!(
            "properties: {} added, {} removed, {} type, {} required, {} nullable",
            stats.properties_added,
            stats.properties_removed,
            stats.types_changed,
            stats.required_changed,
            stats.nullable_changed
        ),
    ]
}

#[cfg(test)]
#[path = "verbose_tests.rs"]
mod tests;

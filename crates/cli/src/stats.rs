// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parse statistics for the structural diff scanner.
//!
//! Diagnostic only: nothing here feeds classification. The counters explain
//! how many lines were scanned and why change lines produced no record.

use serde::Serialize;

/// Maximum number of unchanged-file examples kept for diagnostics.
pub const MAX_UNCHANGED_EXAMPLES: usize = 5;

/// Why a change line produced no structural record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterReason {
    /// `//`, `/*`, `*` or `*/` lines.
    Comment,
    /// `package`, `import`, `type`, `const`, `var` lines.
    Declaration,
    /// Function signatures and executable statements.
    Implementation,
    /// Well-formed field or method whose name is not exported.
    Unexported,
    /// Lines made only of braces or parentheses.
    BraceOnly,
    /// Nothing recognizable.
    NoMatch,
}

impl FilterReason {
    pub const ALL: [FilterReason; 6] = [
        FilterReason::Comment,
        FilterReason::Declaration,
        FilterReason::Implementation,
        FilterReason::Unexported,
        FilterReason::BraceOnly,
        FilterReason::NoMatch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterReason::Comment => "comment",
            FilterReason::Declaration => "declaration",
            FilterReason::Implementation => "implementation",
            FilterReason::Unexported => "unexported",
            FilterReason::BraceOnly => "brace-only",
            FilterReason::NoMatch => "no match",
        }
    }
}

/// Breakdown of filtered change lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub comment: usize,
    pub declaration: usize,
    pub implementation: usize,
    pub unexported: usize,
    pub brace_only: usize,
    pub no_match: usize,
}

impl FilterStats {
    pub fn record(&mut self, reason: FilterReason) {
        match reason {
            FilterReason::Comment => self.comment += 1,
            FilterReason::Declaration => self.declaration += 1,
            FilterReason::Implementation => self.implementation += 1,
            FilterReason::Unexported => self.unexported += 1,
            FilterReason::BraceOnly => self.brace_only += 1,
            FilterReason::NoMatch => self.no_match += 1,
        }
    }

    pub fn count(&self, reason: FilterReason) -> usize {
        match reason {
            FilterReason::Comment => self.comment,
            FilterReason::Declaration => self.declaration,
            FilterReason::Implementation => self.implementation,
            FilterReason::Unexported => self.unexported,
            FilterReason::BraceOnly => self.brace_only,
            FilterReason::NoMatch => self.no_match,
        }
    }

    pub fn total(&self) -> usize {
        self.comment
            + self.declaration
            + self.implementation
            + self.unexported
            + self.brace_only
            + self.no_match
    }
}

/// Counters collected during one structural parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStatistics {
    pub files_total: usize,
    pub files_with_changes: usize,
    pub files_without_changes: usize,
    /// Up to [`MAX_UNCHANGED_EXAMPLES`] paths of files that produced no change.
    pub unchanged_examples: Vec<String>,

    pub lines_added: usize,
    pub lines_removed: usize,

    pub fields_added: usize,
    pub fields_removed: usize,
    pub methods_added: usize,
    pub methods_removed: usize,
    pub embedded_added: usize,
    pub embedded_removed: usize,

    pub filtered: FilterStats,
}

impl ParseStatistics {
    /// Sum of all structural change counters.
    pub fn total_changes(&self) -> usize {
        self.fields_added
            + self.fields_removed
            + self.methods_added
            + self.methods_removed
            + self.embedded_added
            + self.embedded_removed
    }

    pub fn lines_processed(&self) -> usize {
        self.lines_added + self.lines_removed
    }

    pub(crate) fn record_unchanged(&mut self, path: &str) {
        self.files_without_changes += 1;
        if self.unchanged_examples.len() < MAX_UNCHANGED_EXAMPLES {
            self.unchanged_examples.push(path.to_string());
        }
    }

    /// True when most files in the diff produced nothing, which usually
    /// means the scanner needs review rather than that nothing changed.
    pub fn looks_suspicious(&self) -> bool {
        self.files_total >= 4 && self.files_with_changes * 4 < self.files_total
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Single-pass structural scanner over unified diff text.
//!
//! Diff text carries no declaration context, so the scanner tracks two
//! pieces of state while walking the lines:
//! - the current file, set by diff headers
//! - whether the scan is inside an interface declaration
//!
//! Interface context is entered on `type X interface {` and left on
//! `type X struct {` or a lone `}`. It is updated from every line, context
//! lines included, because declarations usually sit outside the hunk's
//! changed lines.
//!
//! Change lines are dispatched in a fixed order: embedded type, then
//! interface method (interface context only), then struct field. Context is
//! the only disambiguator between a method and a field.

use std::collections::HashMap;

use serde::Serialize;

use super::patterns::{
    exclusion_reason, is_exported, is_interface_decl, is_struct_decl, match_embedded,
    match_field, match_method,
};
use super::{
    ChangeKind, DeclContext, EmbeddedTypeChange, FieldChange, MethodChange, ModelChange,
    StructuralChange,
};
use crate::stats::{FilterReason, ParseStatistics};

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;

/// Result of scanning one unified diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuralDiff {
    /// Files with at least one structural change, in diff order.
    pub changes: Vec<ModelChange>,
    /// Files seen in the diff that produced no structural change.
    pub unchanged_files: Vec<String>,
    pub stats: ParseStatistics,
}

impl StructuralDiff {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Scan a unified diff and collect per-file structural changes.
///
/// Never fails: malformed or truncated input yields files without changes.
pub fn parse_structural_diff(diff: &str) -> StructuralDiff {
    let mut scanner = Scanner::default();
    let mut lines = diff.lines().enumerate().peekable();
    while let Some((idx, line)) = lines.next() {
        let next = lines.peek().map(|(_, l)| *l);
        scanner.scan_line(idx + 1, line, next);
    }
    scanner.finish()
}

/// What a header line means for the current file.
enum Header<'a> {
    File(&'a str),
    Skip,
}

/// What a change line produced.
enum LineOutcome {
    Change(StructuralChange),
    Filtered(FilterReason),
    Blank,
}

#[derive(Default)]
struct Scanner {
    current_file: Option<usize>,
    in_interface_context: bool,

    models: Vec<ModelChange>,
    index: HashMap<String, usize>,
    stats: ParseStatistics,
}

impl Scanner {
    fn scan_line(&mut self, line_number: usize, line: &str, next: Option<&str>) {
        if let Some(header) = parse_header(line, next) {
            if let Header::File(path) = header {
                self.enter_file(path);
            }
            return;
        }

        let (kind, content) = split_marker(line);
        let trimmed = content.trim();
        self.update_context(trimmed);

        let (Some(kind), Some(idx)) = (kind, self.current_file) else {
            return;
        };
        match kind {
            ChangeKind::Added => self.stats.lines_added += 1,
            ChangeKind::Removed => self.stats.lines_removed += 1,
        }

        match dispatch(trimmed, kind, self.in_interface_context, line_number) {
            LineOutcome::Change(change) => self.record(idx, change),
            LineOutcome::Filtered(reason) => {
                tracing::trace!(line = line_number, ?reason, "filtered: {}", trimmed);
                self.stats.filtered.record(reason);
            }
            LineOutcome::Blank => {}
        }
    }

    fn enter_file(&mut self, path: &str) {
        let idx = match self.index.get(path) {
            Some(&idx) => idx,
            None => {
                self.models.push(ModelChange::new(path));
                let idx = self.models.len() - 1;
                self.index.insert(path.to_string(), idx);
                idx
            }
        };
        self.current_file = Some(idx);
    }

    fn update_context(&mut self, trimmed: &str) {
        if is_interface_decl(trimmed) {
            self.in_interface_context = true;
        } else if is_struct_decl(trimmed) || trimmed == "}" {
            self.in_interface_context = false;
        }
    }

    fn record(&mut self, idx: usize, change: StructuralChange) {
        let stats = &mut self.stats;
        match (&change, change.kind()) {
            (StructuralChange::Field(_), ChangeKind::Added) => stats.fields_added += 1,
            (StructuralChange::Field(_), ChangeKind::Removed) => stats.fields_removed += 1,
            (StructuralChange::Method(_), ChangeKind::Added) => stats.methods_added += 1,
            (StructuralChange::Method(_), ChangeKind::Removed) => stats.methods_removed += 1,
            (StructuralChange::Embedded(_), ChangeKind::Added) => stats.embedded_added += 1,
            (StructuralChange::Embedded(_), ChangeKind::Removed) => stats.embedded_removed += 1,
        }
        if let Some(model) = self.models.get_mut(idx) {
            model.push(change);
        }
    }

    fn finish(mut self) -> StructuralDiff {
        self.stats.files_total = self.models.len();

        let mut changes = Vec::new();
        let mut unchanged_files = Vec::new();
        for model in self.models {
            if model.has_changes() {
                tracing::debug!(
                    file = %model.file_path,
                    changes = model.total_changes(),
                    "structural changes"
                );
                self.stats.files_with_changes += 1;
                changes.push(model);
            } else {
                self.stats.record_unchanged(&model.file_path);
                unchanged_files.push(model.file_path);
            }
        }

        StructuralDiff {
            changes,
            unchanged_files,
            stats: self.stats,
        }
    }
}

/// Recognize diff metadata lines.
///
/// `diff --git` and `+++` name the file on the new side. `---` only names the
/// file when the next line shows the new side is `/dev/null` (a deletion).
fn parse_header<'a>(line: &'a str, next: Option<&str>) -> Option<Header<'a>> {
    if let Some(rest) = line.strip_prefix("diff --git ") {
        return Some(match git_header_path(rest.trim_end()) {
            Some(path) => Header::File(path),
            None => Header::Skip,
        });
    }
    if let Some(rest) = line.strip_prefix("+++ ") {
        return Some(match header_path(rest, "b/") {
            Some(path) => Header::File(path),
            None => Header::Skip,
        });
    }
    if let Some(rest) = line.strip_prefix("--- ") {
        let deleted = next.is_some_and(|n| n.starts_with("+++ /dev/null"));
        return Some(match header_path(rest, "a/") {
            Some(path) if deleted => Header::File(path),
            _ => Header::Skip,
        });
    }

    const METADATA: &[&str] = &[
        "index ",
        "@@",
        "new file mode",
        "deleted file mode",
        "old mode",
        "new mode",
        "similarity index",
        "dissimilarity index",
        "rename from",
        "rename to",
        "copy from",
        "copy to",
        "Binary files",
        "\\ No newline",
    ];
    METADATA
        .iter()
        .any(|prefix| line.starts_with(prefix))
        .then_some(Header::Skip)
}

/// New-side path of a `diff --git a/<old> b/<new>` header.
///
/// When both sides name the same path the header is split at its midpoint,
/// so a path containing ` b/` stays whole. Renames fall back to the last
/// ` b/` separator.
fn git_header_path(rest: &str) -> Option<&str> {
    if rest.len() % 2 == 1 {
        let mid = rest.len() / 2;
        if let (Some(old), Some(" "), Some(new)) =
            (rest.get(..mid), rest.get(mid..mid + 1), rest.get(mid + 1..))
            && let (Some(old), Some(new)) = (old.strip_prefix("a/"), new.strip_prefix("b/"))
            && old == new
        {
            return Some(new);
        }
    }
    rest.rsplit_once(" b/").map(|(_, path)| path.trim())
}

/// Path from a `---`/`+++` header, without its side prefix or timestamp.
fn header_path<'a>(rest: &'a str, side: &str) -> Option<&'a str> {
    let path = rest.split('\t').next().unwrap_or(rest).trim();
    if path == "/dev/null" || path.is_empty() {
        return None;
    }
    Some(path.strip_prefix(side).unwrap_or(path))
}

fn split_marker(line: &str) -> (Option<ChangeKind>, &str) {
    if let Some(rest) = line.strip_prefix('+') {
        (Some(ChangeKind::Added), rest)
    } else if let Some(rest) = line.strip_prefix('-') {
        (Some(ChangeKind::Removed), rest)
    } else if let Some(rest) = line.strip_prefix(' ') {
        (None, rest)
    } else {
        (None, line)
    }
}

fn dispatch(trimmed: &str, kind: ChangeKind, in_interface: bool, line: usize) -> LineOutcome {
    if trimmed.is_empty() {
        return LineOutcome::Blank;
    }
    if let Some(reason) = exclusion_reason(trimmed) {
        return LineOutcome::Filtered(reason);
    }

    if let Some(type_name) = match_embedded(trimmed) {
        return LineOutcome::Change(StructuralChange::Embedded(EmbeddedTypeChange {
            type_name: type_name.to_string(),
            kind,
            context: if in_interface {
                DeclContext::Interface
            } else {
                DeclContext::Struct
            },
            line_number: Some(line),
        }));
    }

    if in_interface {
        if let Some(parts) = match_method(trimmed) {
            if !is_exported(parts.name) {
                return LineOutcome::Filtered(FilterReason::Unexported);
            }
            return LineOutcome::Change(StructuralChange::Method(MethodChange {
                name: parts.name.to_string(),
                parameters: parts.parameters.to_string(),
                return_type: parts.return_type.to_string(),
                kind,
                line_number: Some(line),
            }));
        }
    } else if let Some(parts) = match_field(trimmed) {
        if !is_exported(parts.name) {
            return LineOutcome::Filtered(FilterReason::Unexported);
        }
        return LineOutcome::Change(StructuralChange::Field(FieldChange {
            name: parts.name.to_string(),
            field_type: parts.field_type.to_string(),
            kind,
            line_number: Some(line),
        }));
    }

    LineOutcome::Filtered(FilterReason::NoMatch)
}

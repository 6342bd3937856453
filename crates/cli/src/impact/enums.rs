// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Enum value changes.
//!
//! Generated enums map wire strings to constants in a `func Parse<Name>`
//! function made of `case "value":` arms. Added and removed arms inside that
//! function are the enum's added and removed values. Arms anywhere else, such
//! as discriminator switches in factory functions, are not enum values.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::{ClassifiedItem, ImpactLevel, ItemKind};
use crate::filter::ChangedFile;
use crate::naming::model_name_from_path;

#[cfg(test)]
#[path = "enums_tests.rs"]
mod tests;

/// `case "value":` or `case "a", "b":`, with the diff marker.
#[allow(clippy::expect_used)]
static CASE_ARM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([+-])\s*case\s+("[^"]*"(?:\s*,\s*"[^"]*")*)\s*:"#).expect("valid regex")
});

/// Function context of a hunk header: `@@ -a,b +c,d @@ <context>`.
#[allow(clippy::expect_used)]
static HUNK_CONTEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@@ [^@]* @@ ?(.*)$").expect("valid regex"));

/// `func ParseName(`, the generated enum parser.
#[allow(clippy::expect_used)]
static PARSE_FUNC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^func\s+Parse[A-Z]\w*\(").expect("valid regex"));

#[allow(clippy::expect_used)]
static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("valid regex"));

/// Added and removed values of one enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumChange {
    pub file_path: String,
    pub model_name: String,
    pub added_values: Vec<String>,
    pub removed_values: Vec<String>,
}

impl EnumChange {
    /// Any removal makes the change `enum_removed`, whatever was added.
    pub fn level(&self) -> Option<ImpactLevel> {
        if !self.removed_values.is_empty() {
            Some(ImpactLevel::EnumRemoved)
        } else if !self.added_values.is_empty() {
            Some(ImpactLevel::EnumAdded)
        } else {
            None
        }
    }

    pub fn classify(&self) -> Option<ClassifiedItem> {
        let level = self.level()?;
        let reason = match level {
            ImpactLevel::EnumRemoved => "enum values removed from used model",
            _ => "enum values added to used model",
        };
        Some(ClassifiedItem {
            model: self.model_name.clone(),
            name: self.model_name.clone(),
            kind: ItemKind::Enum,
            level,
            reason,
            detail: Some(self.describe()),
        })
    }

    /// e.g. `removed: draft; added: archived, pending`.
    fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.removed_values.is_empty() {
            parts.push(format!("removed: {}", self.removed_values.join(", ")));
        }
        if !self.added_values.is_empty() {
            parts.push(format!("added: {}", self.added_values.join(", ")));
        }
        parts.join("; ")
    }
}

/// Collect enum value changes per file, in input order.
///
/// Files without any remaining change are omitted.
pub fn parse_enum_changes(files: &[&ChangedFile]) -> Vec<EnumChange> {
    files
        .iter()
        .filter_map(|file| {
            let patch = file.patch.as_deref()?;
            let (added, removed) = enum_values_in_patch(patch);
            if added.is_empty() && removed.is_empty() {
                return None;
            }
            tracing::debug!(
                file = %file.path,
                added = added.len(),
                removed = removed.len(),
                "enum values changed"
            );
            Some(EnumChange {
                file_path: file.path.clone(),
                model_name: model_name_from_path(&file.path),
                added_values: added.into_iter().collect(),
                removed_values: removed.into_iter().collect(),
            })
        })
        .collect()
}

/// Added and removed case values inside the parse function of one patch.
/// A value on both sides moved and counts as neither.
///
/// The enclosing function is known from a hunk header's context or from a
/// `func` line seen earlier in the patch. Arms outside `func Parse<Name>`
/// are skipped.
pub fn enum_values_in_patch(patch: &str) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut added = BTreeSet::new();
    let mut removed = BTreeSet::new();
    let mut in_parse_func = false;

    for line in patch.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            continue;
        }
        if let Some(caps) = HUNK_CONTEXT.captures(line) {
            let context = caps.get(1).map_or("", |m| m.as_str());
            in_parse_func = PARSE_FUNC.is_match(context.trim_start());
            continue;
        }
        let body = line.get(1..).unwrap_or("").trim_start();
        if body.starts_with("func ") {
            in_parse_func = PARSE_FUNC.is_match(body);
            continue;
        }
        if !in_parse_func {
            continue;
        }
        let Some(caps) = CASE_ARM.captures(line) else {
            continue;
        };
        let (Some(marker), Some(values)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let target = if marker.as_str() == "+" {
            &mut added
        } else {
            &mut removed
        };
        for value in QUOTED.captures_iter(values.as_str()) {
            if let Some(v) = value.get(1) {
                target.insert(v.as_str().to_string());
            }
        }
    }

    let moved: BTreeSet<String> = added.intersection(&removed).cloned().collect();
    added.retain(|v| !moved.contains(v));
    removed.retain(|v| !moved.contains(v));
    (added, removed)
}

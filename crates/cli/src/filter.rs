// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Changed-file filtering and unified diff assembly.
//!
//! A version comparison lists every file that changed between two releases.
//! Only files under the model directory feed the structural parser; their
//! patches are stitched back into a single unified diff text.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;

/// Status of a file in a version comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Removed,
    Modified,
    Renamed,
    Copied,
    Unchanged,
    /// Any other status the source reports.
    #[serde(other)]
    Changed,
}

impl FileStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Removed => "removed",
            FileStatus::Modified => "modified",
            FileStatus::Renamed => "renamed",
            FileStatus::Copied => "copied",
            FileStatus::Unchanged => "unchanged",
            FileStatus::Changed => "changed",
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single file entry from a version comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    #[serde(alias = "filename")]
    pub path: String,
    pub status: FileStatus,
    #[serde(default)]
    pub additions: u32,
    #[serde(default)]
    pub deletions: u32,
    /// Patch text; absent for binary files, very large diffs, and whole-file removals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
}

impl ChangedFile {
    pub fn has_patch(&self) -> bool {
        self.patch.as_deref().is_some_and(|p| !p.trim().is_empty())
    }

    /// A file deleted outright, reported without patch content.
    pub fn is_whole_file_removal(&self) -> bool {
        self.status == FileStatus::Removed && !self.has_patch()
    }
}

/// Keep model-directory files that carry a patch, in input order.
///
/// Whole-file removals under the model directory are kept even without a
/// patch and forwarded as a zero-length patch.
pub fn filter_model_files<'a>(files: &'a [ChangedFile], model_dir: &str) -> Vec<&'a ChangedFile> {
    files
        .iter()
        .filter(|f| f.path.starts_with(model_dir))
        .filter(|f| f.has_patch() || f.is_whole_file_removal())
        .collect()
}

/// Model-directory files deleted outright.
pub fn removed_model_files<'a>(files: &'a [ChangedFile], model_dir: &str) -> Vec<&'a ChangedFile> {
    files
        .iter()
        .filter(|f| f.path.starts_with(model_dir) && f.status == FileStatus::Removed)
        .collect()
}

/// Assemble filtered files into one unified diff text.
///
/// Each file gets `diff --git`, `---` and `+++` headers followed by its patch
/// body (empty for whole-file removals).
pub fn build_unified_diff(files: &[&ChangedFile]) -> String {
    let mut out = String::new();
    for file in files {
        let path = &file.path;
        // Writing into a String cannot fail.
        let _ = writeln!(out, "diff --git a/{path} b/{path}");
        let _ = writeln!(out, "--- a/{path}");
        let _ = writeln!(out, "+++ b/{path}");
        if let Some(patch) = file.patch.as_deref() {
            out.push_str(patch);
            if !patch.ends_with('\n') {
                out.push('\n');
            }
        }
    }
    out
}

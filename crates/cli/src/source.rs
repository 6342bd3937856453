// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Where version comparisons come from.
//!
//! Retrieval of diffs is a collaborator concern. The pipeline only sees the
//! [`DiffSource`] trait; the CLI ships a file-backed implementation that reads
//! a compare payload saved to disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::filter::ChangedFile;

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;

/// Failure to obtain a comparison. Never fatal to a batch of analyses.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source has no diff for the requested pair (missing tag, too large, offline).
    #[error("no diff available: {0}")]
    Unavailable(String),

    /// The payload could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload was read but is not a comparison.
    #[error("invalid compare payload {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },
}

/// Changed files between two versions of the library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    #[serde(default)]
    pub files: Vec<ChangedFile>,
    #[serde(default, alias = "total_commits")]
    pub commit_count: u32,
    #[serde(default, alias = "html_url", skip_serializing_if = "Option::is_none")]
    pub compare_url: Option<String>,
}

/// A version pair to analyze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRequest {
    pub repo: String,
    pub old_ref: String,
    pub new_ref: String,
}

impl ReleaseRequest {
    pub fn new(repo: impl Into<String>, old_ref: impl Into<String>, new_ref: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            old_ref: old_ref.into(),
            new_ref: new_ref.into(),
        }
    }
}

impl std::fmt::Display for ReleaseRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}...{}", self.repo, self.old_ref, self.new_ref)
    }
}

/// Produces the comparison between two refs of a repository.
///
/// Implementations must be shareable across threads: independent version
/// pairs are analyzed in parallel.
pub trait DiffSource: Send + Sync {
    fn compare(&self, repo: &str, old_ref: &str, new_ref: &str) -> Result<Comparison, SourceError>;
}

/// Reads comparisons from JSON files.
///
/// With a fixed file every request returns that payload. With a directory,
/// the payload for `old...new` is looked up as `<dir>/<old>...<new>.json`.
#[derive(Debug, Clone)]
pub struct FileSource {
    location: PathBuf,
}

impl FileSource {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
        }
    }

    fn payload_path(&self, old_ref: &str, new_ref: &str) -> PathBuf {
        if self.location.is_dir() {
            self.location.join(format!("{old_ref}...{new_ref}.json"))
        } else {
            self.location.clone()
        }
    }
}

impl DiffSource for FileSource {
    fn compare(&self, repo: &str, old_ref: &str, new_ref: &str) -> Result<Comparison, SourceError> {
        let path = self.payload_path(old_ref, new_ref);
        if !path.exists() {
            return Err(SourceError::Unavailable(format!(
                "{repo} {old_ref}...{new_ref}: {} not found",
                path.display()
            )));
        }
        read_comparison(&path)
    }
}

/// Decode a compare payload from a JSON file.
pub fn read_comparison(path: &Path) -> Result<Comparison, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let comparison: Comparison =
        serde_json::from_str(&content).map_err(|e| SourceError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    tracing::debug!(
        path = %path.display(),
        files = comparison.files.len(),
        "loaded comparison"
    );
    Ok(comparison)
}

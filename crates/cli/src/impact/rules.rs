// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! File-level decision table.

use globset::{Glob, GlobSet, GlobSetBuilder};

use super::{ClassifiedFile, ImpactLevel};
use crate::config::{Config, ImpactConfig};
use crate::filter::{ChangedFile, FileStatus};
use crate::relevance::UsageIndex;

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;

pub const REASON_METADATA: &str = "build or license metadata";
pub const REASON_NOISE: &str = "test, example, docs, or internal path";
pub const REASON_UNUSED_PACKAGE: &str = "package not used";
pub const REASON_REMOVED: &str = "file removed in used package";
pub const REASON_LIKELY_BREAKING: &str = "modified model or client file in used package";
pub const REASON_ADDED: &str = "new file in used package";
pub const REASON_MODIFIED: &str = "modified file in used package";

/// Compiled path patterns for file-level classification.
#[derive(Debug, Clone)]
pub struct ImpactClassifier {
    metadata: GlobSet,
    noise: GlobSet,
    breaking: GlobSet,
}

impl ImpactClassifier {
    /// Build from configuration. Files under the model directory always
    /// count as likely breaking.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.impact, &config.library.model_dir)
    }

    pub fn new(impact: &ImpactConfig, model_dir: &str) -> Self {
        let mut breaking = impact.breaking.clone();
        let model_dir = model_dir.trim_end_matches('/');
        if !model_dir.is_empty() {
            breaking.push(format!("{model_dir}/**"));
        }
        Self {
            metadata: pattern_set("metadata", &impact.metadata),
            noise: pattern_set("noise", &impact.noise),
            breaking: pattern_set("breaking", &breaking),
        }
    }

    /// Level and reason for one changed file. First matching rule wins.
    pub fn classify(&self, file: &ChangedFile, usage: &UsageIndex) -> (ImpactLevel, &'static str) {
        let path = file.path.as_str();
        if self.metadata.is_match(path) {
            return (ImpactLevel::Metadata, REASON_METADATA);
        }
        if self.noise.is_match(path) {
            return (ImpactLevel::Noise, REASON_NOISE);
        }
        if !usage.uses_package_of(path) {
            return (ImpactLevel::Noise, REASON_UNUSED_PACKAGE);
        }
        match file.status {
            FileStatus::Removed => (ImpactLevel::Critical, REASON_REMOVED),
            FileStatus::Modified if self.breaking.is_match(path) => {
                (ImpactLevel::Warning, REASON_LIKELY_BREAKING)
            }
            FileStatus::Added => (ImpactLevel::Safe, REASON_ADDED),
            _ => (ImpactLevel::Warning, REASON_MODIFIED),
        }
    }

    pub fn classify_file(&self, file: &ChangedFile, usage: &UsageIndex) -> ClassifiedFile {
        let (level, reason) = self.classify(file, usage);
        tracing::trace!(file = %file.path, %level, reason, "classified file");
        ClassifiedFile {
            file: file.path.clone(),
            status: file.status,
            level,
            reason,
            additions: file.additions,
            deletions: file.deletions,
        }
    }

    pub fn classify_files(&self, files: &[ChangedFile], usage: &UsageIndex) -> Vec<ClassifiedFile> {
        files.iter().map(|f| self.classify_file(f, usage)).collect()
    }
}

/// Compile one pattern list. Invalid patterns are logged and skipped.
fn pattern_set(list: &str, patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => {
                tracing::warn!("invalid {} pattern '{}': {}", list, pattern, e);
            }
        }
    }
    builder.build().unwrap_or_else(|_| GlobSet::empty())
}

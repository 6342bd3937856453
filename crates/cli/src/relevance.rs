// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Usage-based relevance filtering.
//!
//! The usage index lists what a consuming codebase actually references:
//! model names, file paths, and package directories. Changes outside the
//! index are noise for that consumer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::naming::{model_name_from_schema, parent_dir};
use crate::schema::SchemaChange;
use crate::structural::ModelChange;

#[cfg(test)]
#[path = "relevance_tests.rs"]
mod tests;

/// What the consumer is known to use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsageIndex {
    /// Model or type names, in the library's casing (`User`, `ChatMessage`).
    #[serde(default)]
    pub models: BTreeSet<String>,
    /// Library file paths.
    #[serde(default)]
    pub files: BTreeSet<String>,
    /// Library package directories (`models`, `users/item`).
    #[serde(default)]
    pub packages: BTreeSet<String>,
}

impl UsageIndex {
    /// Index built from model names only.
    pub fn from_models<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            models: models.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages.extend(packages.into_iter().map(|p| {
            let p: String = p.into();
            normalize_dir(&p)
        }));
        self
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.files.is_empty() && self.packages.is_empty()
    }

    /// Model-level membership: the model name or the file path is indexed.
    pub fn uses_model(&self, model_name: &str, file_path: &str) -> bool {
        self.models.contains(model_name) || self.files.contains(file_path)
    }

    /// Schema-level membership after normalizing the dotted schema name.
    pub fn uses_schema(&self, schema_name: &str) -> bool {
        self.models.contains(&model_name_from_schema(schema_name))
    }

    /// Whether the directory containing `path` is a used package.
    ///
    /// With no packages recorded every directory counts as used.
    pub fn uses_package_of(&self, path: &str) -> bool {
        let dir = parent_dir(path);
        self.packages.is_empty() || self.packages.iter().any(|p| normalize_dir(p) == dir)
    }
}

fn normalize_dir(dir: &str) -> String {
    dir.trim_start_matches("./").trim_end_matches('/').to_string()
}

/// Keep model changes whose model name or file path is in the index.
pub fn filter_model_changes(changes: Vec<ModelChange>, index: &UsageIndex) -> Vec<ModelChange> {
    let before = changes.len();
    let kept: Vec<ModelChange> = changes
        .into_iter()
        .filter(|c| index.uses_model(&c.model_name, &c.file_path))
        .collect();
    tracing::debug!(before, after = kept.len(), "filtered model changes by usage");
    kept
}

/// Keep schema changes whose normalized model name is in the index.
pub fn filter_schema_changes(changes: Vec<SchemaChange>, index: &UsageIndex) -> Vec<SchemaChange> {
    let before = changes.len();
    let kept: Vec<SchemaChange> = changes
        .into_iter()
        .filter(|c| index.uses_schema(&c.schema_name))
        .collect();
    tracing::debug!(before, after = kept.len(), "filtered schema changes by usage");
    kept
}

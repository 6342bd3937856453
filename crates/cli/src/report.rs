// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregation of classified files and items.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ExitCode;
use crate::impact::{ClassifiedFile, ClassifiedItem, ImpactLevel};

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// Counts over a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_files: usize,
    pub total_items: usize,
    /// Files per level. Levels with no files are absent.
    pub files: BTreeMap<ImpactLevel, usize>,
    /// Items per level. Levels with no items are absent.
    pub items: BTreeMap<ImpactLevel, usize>,
    /// Some file or item is critical or an enum removal.
    pub breaking: bool,
    /// Most severe level seen across files and items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest: Option<ImpactLevel>,
}

/// Classified files grouped by level, plus classified items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImpactReport {
    pub levels: BTreeMap<ImpactLevel, Vec<ClassifiedFile>>,
    pub items: Vec<ClassifiedItem>,
    pub summary: Summary,
}

impl ImpactReport {
    pub fn build(files: Vec<ClassifiedFile>, items: Vec<ClassifiedItem>) -> Self {
        let mut summary = Summary {
            total_files: files.len(),
            total_items: items.len(),
            ..Default::default()
        };

        let mut levels: BTreeMap<ImpactLevel, Vec<ClassifiedFile>> = BTreeMap::new();
        for file in files {
            *summary.files.entry(file.level).or_default() += 1;
            levels.entry(file.level).or_default().push(file);
        }
        for item in &items {
            *summary.items.entry(item.level).or_default() += 1;
        }

        summary.highest = summary
            .files
            .keys()
            .chain(summary.items.keys())
            .copied()
            .max_by_key(|level| (level.severity(), std::cmp::Reverse(*level)));
        summary.breaking = summary.highest.is_some_and(ImpactLevel::is_breaking);

        Self {
            levels,
            items,
            summary,
        }
    }

    pub fn files_at(&self, level: ImpactLevel) -> &[ClassifiedFile] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn items_at(&self, level: ImpactLevel) -> impl Iterator<Item = &ClassifiedItem> {
        self.items.iter().filter(move |i| i.level == level)
    }

    pub fn is_empty(&self) -> bool {
        self.summary.total_files == 0 && self.summary.total_items == 0
    }

    /// True when any file or item reaches `threshold`.
    pub fn reaches(&self, threshold: ImpactLevel) -> bool {
        self.summary.highest.is_some_and(|h| h.reaches(threshold))
    }

    pub fn exit_code(&self, fail_on: ImpactLevel) -> ExitCode {
        if self.reaches(fail_on) {
            ExitCode::Breaking
        } else {
            ExitCode::Success
        }
    }

    /// Combine with another report.
    pub fn merge(self, other: ImpactReport) -> ImpactReport {
        let files = self
            .levels
            .into_values()
            .chain(other.levels.into_values())
            .flatten()
            .collect();
        let items = self.items.into_iter().chain(other.items).collect();
        ImpactReport::build(files, items)
    }
}

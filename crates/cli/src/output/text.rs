// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! critical (1)
//!   models/photo.go [removed]: file removed in used package
//! warning (2)
//!   ...
//! metadata: 1 file
//!
//! changes:
//!   critical     User.Legacy (field): field removed from used model  *string
//!
//! 4 files, 2 items: BREAKING (highest: critical)
//! ```

use std::io::Write;

use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::FormatOptions;
use crate::analysis::{Analysis, AnalysisOutcome, SchemaAnalysis};
use crate::color::scheme;
use crate::impact::{ClassifiedItem, ImpactLevel};
use crate::report::ImpactReport;
use crate::source::ReleaseRequest;

/// Levels listed as counts only.
const QUIET_LEVELS: [ImpactLevel; 2] = [ImpactLevel::Metadata, ImpactLevel::Noise];

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor = StandardStream> {
    out: W,
    options: FormatOptions,
    truncated: bool,
}

impl TextFormatter<StandardStream> {
    /// Create a formatter writing to stdout.
    pub fn new(color_choice: ColorChoice, options: FormatOptions) -> Self {
        Self::with_writer(StandardStream::stdout(color_choice), options)
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn with_writer(out: W, options: FormatOptions) -> Self {
        Self {
            out,
            options,
            truncated: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Check if any level listing was truncated.
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }

    pub fn write_analysis(&mut self, analysis: &Analysis, fail_on: ImpactLevel) -> std::io::Result<()> {
        if let Some(url) = &analysis.compare_url {
            writeln!(self.out, "compare: {} ({} commits)", url, analysis.commit_count)?;
        }
        if !analysis.removed_models.is_empty() {
            writeln!(self.out, "removed models: {}", analysis.removed_models.len())?;
        }
        self.write_report(&analysis.report, fail_on)
    }

    pub fn write_schema_analysis(
        &mut self,
        analysis: &SchemaAnalysis,
        fail_on: ImpactLevel,
    ) -> std::io::Result<()> {
        let comparison = &analysis.comparison;
        writeln!(
            self.out,
            "schemas: {} compared, {} with changes, {} added, {} removed",
            comparison.stats.schemas_compared,
            comparison.stats.schemas_with_changes,
            comparison.added_schemas.len(),
            comparison.removed_schemas.len()
        )?;
        for change in &analysis.relevant {
            self.out.set_color(&scheme::heading())?;
            write!(self.out, "{}", change.model_name)?;
            self.out.reset()?;
            writeln!(self.out, " ({}): {}", change.schema_name, change.change_summary())?;
        }
        self.write_report(&analysis.report, fail_on)
    }

    pub fn write_release(
        &mut self,
        request: &ReleaseRequest,
        outcome: &AnalysisOutcome,
        fail_on: ImpactLevel,
    ) -> std::io::Result<()> {
        self.out.set_color(&scheme::heading())?;
        writeln!(self.out, "== {} ==", request)?;
        self.out.reset()?;
        match outcome {
            AnalysisOutcome::Analyzed(analysis) => self.write_analysis(analysis, fail_on),
            AnalysisOutcome::NoDiffAvailable { reason } => {
                writeln!(self.out, "{}", reason)
            }
        }
    }

    /// Files by level, then items, then the verdict line.
    pub fn write_report(&mut self, report: &ImpactReport, fail_on: ImpactLevel) -> std::io::Result<()> {
        for (&level, files) in &report.levels {
            if QUIET_LEVELS.contains(&level) {
                continue;
            }
            self.out.set_color(&scheme::level(level))?;
            write!(self.out, "{}", level)?;
            self.out.reset()?;
            writeln!(self.out, " ({})", files.len())?;

            for (shown, file) in files.iter().enumerate() {
                if let Some(limit) = self.options.limit
                    && shown >= limit
                {
                    self.truncated = true;
                    writeln!(self.out, "  ... {} more", files.len() - limit)?;
                    break;
                }
                write!(self.out, "  ")?;
                self.out.set_color(&scheme::path())?;
                write!(self.out, "{}", file.file)?;
                self.out.reset()?;
                writeln!(self.out, " [{}]: {}", file.status, file.reason)?;
            }
        }
        for level in QUIET_LEVELS {
            let count = report.files_at(level).len();
            if count > 0 {
                writeln!(self.out, "{}: {} file{}", level, count, plural(count))?;
            }
        }

        if !report.items.is_empty() {
            writeln!(self.out)?;
            writeln!(self.out, "changes:")?;
            let mut items: Vec<&ClassifiedItem> = report.items.iter().collect();
            items.sort_by_key(|i| i.level);
            for item in items {
                self.write_item(item)?;
            }
        }

        writeln!(self.out)?;
        self.write_summary(report, fail_on)
    }

    fn write_item(&mut self, item: &ClassifiedItem) -> std::io::Result<()> {
        write!(self.out, "  ")?;
        self.out.set_color(&scheme::level(item.level))?;
        write!(self.out, "{:<12}", item.level.as_str())?;
        self.out.reset()?;
        if item.name == item.model {
            write!(self.out, " {}", item.model)?;
        } else {
            write!(self.out, " {}.{}", item.model, item.name)?;
        }
        write!(self.out, " ({}): {}", item.kind.as_str(), item.reason)?;
        if let Some(detail) = &item.detail {
            write!(self.out, "  ")?;
            self.out.set_color(&scheme::detail())?;
            write!(self.out, "{}", detail)?;
            self.out.reset()?;
        }
        writeln!(self.out)
    }

    pub fn write_summary(&mut self, report: &ImpactReport, fail_on: ImpactLevel) -> std::io::Result<()> {
        let summary = &report.summary;
        write!(
            self.out,
            "{} file{}, {} item{}: ",
            summary.total_files,
            plural(summary.total_files),
            summary.total_items,
            plural(summary.total_items)
        )?;
        if report.reaches(fail_on) {
            self.out.set_color(&scheme::breaking())?;
            write!(self.out, "BREAKING")?;
        } else {
            self.out.set_color(&scheme::ok())?;
            write!(self.out, "OK")?;
        }
        self.out.reset()?;
        match summary.highest {
            Some(highest) => writeln!(self.out, " (highest: {})", highest),
            None => writeln!(self.out),
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;

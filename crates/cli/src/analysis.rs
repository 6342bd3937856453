// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end analysis of a version pair.
//!
//! filter -> structural parse -> relevance -> classify -> aggregate, plus the
//! parallel schema pipeline. An empty usage index disables relevance
//! filtering: every model counts as used.

use rayon::prelude::*;
use serde::Serialize;

use crate::config::Config;
use crate::filter::{build_unified_diff, filter_model_files, removed_model_files};
use crate::impact::{
    ClassifiedItem, EnumChange, ImpactClassifier, ImpactLevel, ItemKind, classify_model_change,
    classify_schema_change, parse_enum_changes,
};
use crate::naming::{model_name_from_path, model_name_from_schema};
use crate::relevance::{UsageIndex, filter_model_changes, filter_schema_changes};
use crate::report::ImpactReport;
use crate::schema::{SchemaChange, SchemaComparison, SchemaDocument, compare_schemas};
use crate::source::{Comparison, DiffSource, ReleaseRequest};
use crate::stats::ParseStatistics;
use crate::structural::{ModelChange, parse_structural_diff};

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod tests;

/// Result of analyzing one comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analysis {
    pub commit_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_url: Option<String>,
    /// Structural changes on used models.
    pub model_changes: Vec<ModelChange>,
    /// Structural changes on models the consumer does not use.
    pub unused_changes: usize,
    pub enum_changes: Vec<EnumChange>,
    /// Model files deleted outright.
    pub removed_models: Vec<String>,
    /// Model files whose diff produced no structural change.
    pub unchanged_files: Vec<String>,
    pub stats: ParseStatistics,
    pub report: ImpactReport,
}

/// Outcome of analyzing a release: a missing diff is distinct from an empty analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Analyzed(Box<Analysis>),
    NoDiffAvailable { reason: String },
}

impl AnalysisOutcome {
    pub fn analysis(&self) -> Option<&Analysis> {
        match self {
            AnalysisOutcome::Analyzed(analysis) => Some(analysis),
            AnalysisOutcome::NoDiffAvailable { .. } => None,
        }
    }
}

/// Result of comparing two schema documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaAnalysis {
    pub comparison: SchemaComparison,
    /// Schema changes on used models.
    pub relevant: Vec<SchemaChange>,
    pub report: ImpactReport,
}

/// Configured pipeline, shareable across threads.
#[derive(Debug, Clone)]
pub struct Analyzer<'a> {
    config: &'a Config,
    classifier: ImpactClassifier,
}

impl<'a> Analyzer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            classifier: ImpactClassifier::from_config(config),
        }
    }

    pub fn analyze(&self, comparison: &Comparison, usage: &UsageIndex) -> Analysis {
        let model_dir = self.config.library.model_dir.as_str();
        let files = self.classifier.classify_files(&comparison.files, usage);

        let model_files = filter_model_files(&comparison.files, model_dir);
        let diff = build_unified_diff(&model_files);
        let structural = parse_structural_diff(&diff);
        tracing::debug!(
            files = model_files.len(),
            changed = structural.changes.len(),
            "parsed model diff"
        );

        let total = structural.changes.len();
        let model_changes = if usage.is_empty() {
            structural.changes
        } else {
            filter_model_changes(structural.changes, usage)
        };
        let unused_changes = total - model_changes.len();

        let enum_changes: Vec<EnumChange> = parse_enum_changes(&model_files)
            .into_iter()
            .filter(|e| is_used(usage, &e.model_name, &e.file_path))
            .collect();

        let removed_models: Vec<String> = removed_model_files(&comparison.files, model_dir)
            .into_iter()
            .map(|f| f.path.clone())
            .collect();

        let mut items: Vec<ClassifiedItem> =
            model_changes.iter().flat_map(classify_model_change).collect();
        items.extend(enum_changes.iter().filter_map(EnumChange::classify));
        items.extend(
            removed_models
                .iter()
                .filter_map(|path| removed_model_item(path, usage)),
        );

        Analysis {
            commit_count: comparison.commit_count,
            compare_url: comparison.compare_url.clone(),
            model_changes,
            unused_changes,
            enum_changes,
            removed_models,
            unchanged_files: structural.unchanged_files,
            stats: structural.stats,
            report: ImpactReport::build(files, items),
        }
    }

    pub fn analyze_release(
        &self,
        source: &dyn DiffSource,
        request: &ReleaseRequest,
        usage: &UsageIndex,
    ) -> AnalysisOutcome {
        match source.compare(&request.repo, &request.old_ref, &request.new_ref) {
            Ok(comparison) => AnalysisOutcome::Analyzed(Box::new(self.analyze(&comparison, usage))),
            Err(e) => {
                tracing::warn!(release = %request, "{}", e);
                AnalysisOutcome::NoDiffAvailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn analyze_schemas(
        &self,
        old: &SchemaDocument,
        new: &SchemaDocument,
        usage: &UsageIndex,
    ) -> SchemaAnalysis {
        let namespace = self.config.library.schema_namespace.as_str();
        let comparison = compare_schemas(old, new, namespace);
        let relevant = if usage.is_empty() {
            comparison.changes.clone()
        } else {
            filter_schema_changes(comparison.changes.clone(), usage)
        };

        let mut items: Vec<ClassifiedItem> =
            relevant.iter().flat_map(classify_schema_change).collect();
        items.extend(
            comparison
                .removed_schemas
                .iter()
                .filter(|name| name.starts_with(namespace))
                .filter(|name| usage.is_empty() || usage.uses_schema(name))
                .map(|name| removed_schema_item(name)),
        );

        SchemaAnalysis {
            comparison,
            relevant,
            report: ImpactReport::build(Vec::new(), items),
        }
    }
}

fn is_used(usage: &UsageIndex, model_name: &str, file_path: &str) -> bool {
    usage.is_empty() || usage.uses_model(model_name, file_path)
}

fn removed_model_item(path: &str, usage: &UsageIndex) -> Option<ClassifiedItem> {
    let model = model_name_from_path(path);
    if !is_used(usage, &model, path) {
        return None;
    }
    Some(ClassifiedItem {
        name: model.clone(),
        model,
        kind: ItemKind::Model,
        level: ImpactLevel::Critical,
        reason: "used model file removed",
        detail: Some(path.to_string()),
    })
}

fn removed_schema_item(schema_name: &str) -> ClassifiedItem {
    let model = model_name_from_schema(schema_name);
    ClassifiedItem {
        name: model.clone(),
        model,
        kind: ItemKind::Schema,
        level: ImpactLevel::Critical,
        reason: "used schema removed",
        detail: Some(schema_name.to_string()),
    }
}

/// Analyze one comparison with a fresh pipeline.
pub fn analyze_comparison(comparison: &Comparison, usage: &UsageIndex, config: &Config) -> Analysis {
    Analyzer::new(config).analyze(comparison, usage)
}

/// Fetch and analyze one release. Source failures become
/// [`AnalysisOutcome::NoDiffAvailable`].
pub fn analyze_release(
    source: &dyn DiffSource,
    request: &ReleaseRequest,
    usage: &UsageIndex,
    config: &Config,
) -> AnalysisOutcome {
    Analyzer::new(config).analyze_release(source, request, usage)
}

/// Analyze independent releases in parallel. Results keep request order.
pub fn analyze_many(
    source: &dyn DiffSource,
    requests: &[ReleaseRequest],
    usage: &UsageIndex,
    config: &Config,
) -> Vec<(ReleaseRequest, AnalysisOutcome)> {
    let analyzer = Analyzer::new(config);
    requests
        .par_iter()
        .map(|request| {
            (
                request.clone(),
                analyzer.analyze_release(source, request, usage),
            )
        })
        .collect()
}

pub fn analyze_schemas(
    old: &SchemaDocument,
    new: &SchemaDocument,
    usage: &UsageIndex,
    config: &Config,
) -> SchemaAnalysis {
    Analyzer::new(config).analyze_schemas(old, new, usage)
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diff-driven schema change detection for generated API clients.
//!
//! A version comparison is filtered to model files, scanned line by line for
//! structural changes, narrowed to the models a consumer uses, and classified
//! by impact. Schema documents take a parallel path through [`schema`].

pub mod analysis;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod filter;
pub mod impact;
pub mod loader;
pub mod naming;
pub mod output;
pub mod relevance;
pub mod report;
pub mod schema;
pub mod source;
pub mod stats;
pub mod structural;
pub mod verbose;

pub use analysis::{Analysis, AnalysisOutcome, Analyzer, SchemaAnalysis};
pub use cli::{Cli, ColorMode, Command, OutputFormat};
pub use config::Config;
pub use error::{Error, ExitCode, Result};
pub use impact::{ClassifiedFile, ClassifiedItem, ImpactLevel};
pub use relevance::UsageIndex;
pub use report::ImpactReport;
pub use source::{Comparison, DiffSource, ReleaseRequest, SourceError};
pub use structural::{ModelChange, StructuralDiff, parse_structural_diff};

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::impact::ImpactLevel;
use crate::source::ReleaseRequest;

/// Detect breaking changes between versions of a generated API client.
#[derive(Parser, Debug)]
#[command(name = "sdkdrift", version, about)]
pub struct Cli {
    /// Config file (default: ./sdkdrift.toml when present)
    #[arg(short = 'C', long, global = true, env = "SDKDRIFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print parse statistics and filter diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// When to color text output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze one saved version comparison
    Diff(DiffArgs),
    /// Analyze several version pairs from a directory of comparisons
    Releases(ReleasesArgs),
    /// Compare two OpenAPI schema documents
    Schema(SchemaArgs),
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Compare payload (JSON list of changed files with patches)
    #[arg(long, value_name = "FILE")]
    pub compare: PathBuf,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Args, Debug)]
pub struct ReleasesArgs {
    /// Directory holding `<old>...<new>.json` compare payloads
    #[arg(long, value_name = "DIR")]
    pub dir: PathBuf,

    /// Repository label for the releases
    #[arg(long, default_value = "sdk")]
    pub repo: String,

    /// Version pairs as OLD...NEW
    #[arg(required = true, value_name = "OLD...NEW")]
    pub pairs: Vec<String>,

    #[command(flatten)]
    pub report: ReportArgs,
}

impl ReleasesArgs {
    /// Parse `pairs` into requests. Returns the first malformed pair on failure.
    pub fn requests(&self) -> Result<Vec<ReleaseRequest>, String> {
        self.pairs
            .iter()
            .map(|pair| match pair.split_once("...") {
                Some((old, new)) if !old.is_empty() && !new.is_empty() => {
                    Ok(ReleaseRequest::new(&self.repo, old, new))
                }
                _ => Err(pair.clone()),
            })
            .collect()
    }
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Schema document of the old version (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub old: PathBuf,

    /// Schema document of the new version (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub new: PathBuf,

    #[command(flatten)]
    pub report: ReportArgs,
}

/// Options shared by every analysis command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Usage index (JSON object with models/files/packages, or a list of model names)
    #[arg(long, value_name = "FILE")]
    pub usage: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Lowest impact level that fails the run (overrides config)
    #[arg(long, value_name = "LEVEL", value_parser = parse_level)]
    pub fail_on: Option<ImpactLevel>,

    /// Maximum files listed per level
    #[arg(long, default_value_t = 15, conflicts_with = "no_limit")]
    pub limit: usize,

    /// List every file
    #[arg(long)]
    pub no_limit: bool,
}

impl ReportArgs {
    pub fn limit(&self) -> Option<usize> {
        if self.no_limit { None } else { Some(self.limit) }
    }
}

fn parse_level(s: &str) -> Result<ImpactLevel, String> {
    ImpactLevel::from_name(s).ok_or_else(|| {
        let names: Vec<&str> = ImpactLevel::ALL.iter().map(|l| l.as_str()).collect();
        format!("expected one of: {}", names.join(", "))
    })
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

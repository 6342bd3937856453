// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diff and releases command implementation.

use sdkdrift::analysis::{AnalysisOutcome, Analyzer};
use sdkdrift::cli::{Cli, DiffArgs, OutputFormat, ReleasesArgs, ReportArgs};
use sdkdrift::color::resolve_color;
use sdkdrift::config::{self, Config};
use sdkdrift::error::{Error, ExitCode};
use sdkdrift::impact::ImpactLevel;
use sdkdrift::loader::load_usage;
use sdkdrift::output::FormatOptions;
use sdkdrift::output::json::JsonFormatter;
use sdkdrift::output::text::TextFormatter;
use sdkdrift::source::{FileSource, read_comparison};
use sdkdrift::verbose::VerboseLogger;

/// Failure threshold: `--fail-on` over config.
pub(crate) fn fail_on(args: &ReportArgs, config: &Config) -> ImpactLevel {
    args.fail_on.unwrap_or(config.impact.fail_on)
}

pub(crate) fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = config::load_or_default(cli.config.as_deref())?;
    tracing::debug!(
        model_dir = %config.library.model_dir,
        namespace = %config.library.schema_namespace,
        "config loaded"
    );
    Ok(config)
}

/// Run the diff command.
pub fn run(cli: &Cli, args: &DiffArgs) -> anyhow::Result<ExitCode> {
    let verbose = VerboseLogger::new(cli.verbose);
    let config = load_config(cli)?;
    let usage = load_usage(args.report.usage.as_deref())?;
    let comparison = read_comparison(&args.compare).map_err(Error::from)?;

    let analysis = Analyzer::new(&config).analyze(&comparison, &usage);

    verbose.section("structural parse");
    verbose.parse_stats(&analysis.stats);
    verbose.log(&format!(
        "{} changed models used, {} not used",
        analysis.model_changes.len(),
        analysis.unused_changes
    ));

    let threshold = fail_on(&args.report, &config);
    let breaking = analysis.report.reaches(threshold);
    match args.report.output {
        OutputFormat::Text => {
            let options = FormatOptions::from(&args.report);
            let mut formatter = TextFormatter::new(resolve_color(cli.color), options);
            formatter.write_analysis(&analysis, threshold)?;
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout().lock()).write_analysis(&analysis, breaking)?;
        }
    }

    Ok(analysis.report.exit_code(threshold))
}

/// Run the releases command. A missing comparison is reported, not fatal.
pub fn run_releases(cli: &Cli, args: &ReleasesArgs) -> anyhow::Result<ExitCode> {
    let verbose = VerboseLogger::new(cli.verbose);
    let config = load_config(cli)?;
    let usage = load_usage(args.report.usage.as_deref())?;
    let requests = args
        .requests()
        .map_err(|pair| Error::Argument(format!("invalid version pair `{pair}` (expected OLD...NEW)")))?;

    let source = FileSource::new(&args.dir);
    let results = sdkdrift::analysis::analyze_many(&source, &requests, &usage, &config);

    let threshold = fail_on(&args.report, &config);
    let mut breaking = false;
    for (request, outcome) in &results {
        match outcome {
            AnalysisOutcome::Analyzed(analysis) => {
                verbose.section(&request.to_string());
                verbose.parse_stats(&analysis.stats);
                breaking |= analysis.report.reaches(threshold);
            }
            AnalysisOutcome::NoDiffAvailable { reason } => {
                verbose.log(&format!("{request}: {reason}"));
            }
        }
    }

    match args.report.output {
        OutputFormat::Text => {
            let options = FormatOptions::from(&args.report);
            let mut formatter = TextFormatter::new(resolve_color(cli.color), options);
            for (request, outcome) in &results {
                formatter.write_release(request, outcome, threshold)?;
            }
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout().lock()).write_releases(&results, breaking)?;
        }
    }

    Ok(if breaking {
        ExitCode::Breaking
    } else {
        ExitCode::Success
    })
}

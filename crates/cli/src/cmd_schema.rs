// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Schema command implementation.

use sdkdrift::analysis::analyze_schemas;
use sdkdrift::cli::{Cli, OutputFormat, SchemaArgs};
use sdkdrift::color::resolve_color;
use sdkdrift::error::ExitCode;
use sdkdrift::loader::{load_schema_document, load_usage};
use sdkdrift::output::FormatOptions;
use sdkdrift::output::json::JsonFormatter;
use sdkdrift::output::text::TextFormatter;
use sdkdrift::verbose::VerboseLogger;

use crate::cmd_diff::{fail_on, load_config};

/// Run the schema command.
pub fn run(cli: &Cli, args: &SchemaArgs) -> anyhow::Result<ExitCode> {
    let verbose = VerboseLogger::new(cli.verbose);
    let config = load_config(cli)?;
    let usage = load_usage(args.report.usage.as_deref())?;
    let old = load_schema_document(&args.old)?;
    let new = load_schema_document(&args.new)?;

    let analysis = analyze_schemas(&old, &new, &usage, &config);

    verbose.section("schema comparison");
    verbose.schema_stats(&analysis.comparison.stats);

    let threshold = fail_on(&args.report, &config);
    match args.report.output {
        OutputFormat::Text => {
            let options = FormatOptions::from(&args.report);
            let mut formatter = TextFormatter::new(resolve_color(cli.color), options);
            formatter.write_schema_analysis(&analysis, threshold)?;
        }
        OutputFormat::Json => {
            let breaking = analysis.report.reaches(threshold);
            JsonFormatter::new(std::io::stdout().lock())
                .write_schema_analysis(&analysis, breaking)?;
        }
    }

    Ok(analysis.report.exit_code(threshold))
}

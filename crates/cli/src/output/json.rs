// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written at the end (not streamed). Every document
//! carries an RFC 3339 `timestamp` and the `breaking` verdict.

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use crate::analysis::{Analysis, AnalysisOutcome, SchemaAnalysis};
use crate::source::ReleaseRequest;

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    timestamp: String,
    breaking: bool,
    #[serde(flatten)]
    body: &'a T,
}

#[derive(Debug, Serialize)]
struct ReleaseEntry<'a> {
    release: &'a ReleaseRequest,
    #[serde(flatten)]
    outcome: &'a AnalysisOutcome,
}

#[derive(Debug, Serialize)]
struct Releases<'a> {
    releases: Vec<ReleaseEntry<'a>>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_analysis(&mut self, analysis: &Analysis, breaking: bool) -> std::io::Result<()> {
        self.write_document(analysis, breaking)
    }

    pub fn write_schema_analysis(
        &mut self,
        analysis: &SchemaAnalysis,
        breaking: bool,
    ) -> std::io::Result<()> {
        self.write_document(analysis, breaking)
    }

    pub fn write_releases(
        &mut self,
        results: &[(ReleaseRequest, AnalysisOutcome)],
        breaking: bool,
    ) -> std::io::Result<()> {
        let releases = Releases {
            releases: results
                .iter()
                .map(|(release, outcome)| ReleaseEntry { release, outcome })
                .collect(),
        };
        self.write_document(&releases, breaking)
    }

    fn write_document<T: Serialize>(&mut self, body: &T, breaking: bool) -> std::io::Result<()> {
        let envelope = Envelope {
            timestamp: timestamp(),
            breaking,
            body,
        };
        let json = serde_json::to_string_pretty(&envelope).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

/// Current time, e.g. `2026-01-21T10:30:00Z`.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;

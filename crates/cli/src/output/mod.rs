// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for analysis results.

pub mod json;
pub mod text;

use crate::cli::ReportArgs;

/// Output formatting options.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Files listed per impact level before `... N more` (None = all).
    pub limit: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { limit: Some(15) }
    }
}

impl FormatOptions {
    /// Create options with no limit.
    pub fn no_limit() -> Self {
        Self { limit: None }
    }

    /// Create options with a specific limit.
    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}

impl From<&ReportArgs> for FormatOptions {
    fn from(args: &ReportArgs) -> Self {
        Self {
            limit: args.limit(),
        }
    }
}

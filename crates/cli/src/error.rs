// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use crate::source::SourceError;

/// sdkdrift error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file could not be decoded (compare payload, schema document, usage index).
    #[error("parse error: {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// The diff source could not produce a comparison.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type using sdkdrift Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// No change reached the failure threshold
    Success = 0,
    /// At least one change reached the failure threshold
    Breaking = 1,
    /// Configuration or argument error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) | Error::Parse { .. } => {
                ExitCode::ConfigError
            }
            Error::Io { .. } | Error::Source(_) | Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

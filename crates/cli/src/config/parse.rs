// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parse helper functions for configuration.

use std::path::Path;

use super::{ImpactConfig, LibraryConfig};
use crate::error::{Error, Result};
use crate::impact::ImpactLevel;

/// Parse a TOML array of strings into a Vec<String>.
pub(super) fn parse_string_array(value: Option<&toml::Value>) -> Option<Vec<String>> {
    value?.as_array().map(|arr| {
        arr.iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()
    })
}

/// Parse a TOML array of strings with a default function.
pub(super) fn parse_string_array_or_else<F>(value: Option<&toml::Value>, default: F) -> Vec<String>
where
    F: FnOnce() -> Vec<String>,
{
    parse_string_array(value).unwrap_or_else(default)
}

/// Parse a TOML string value with a default function.
fn parse_string_or_else<F>(value: Option<&toml::Value>, default: F) -> String
where
    F: FnOnce() -> String,
{
    value
        .and_then(|v| v.as_str())
        .map(String::from)
        .unwrap_or_else(default)
}

/// Warn about an unrecognized config key.
pub(super) fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "sdkdrift: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

/// Parse `[library]` from TOML value.
pub(super) fn parse_library_config(value: Option<&toml::Value>, path: &Path) -> LibraryConfig {
    const KNOWN: &[&str] = &["model_dir", "schema_namespace"];

    let Some(toml::Value::Table(t)) = value else {
        return LibraryConfig::default();
    };

    for key in t.keys() {
        if !KNOWN.contains(&key.as_str()) {
            warn_unknown_key(path, &format!("library.{}", key));
        }
    }

    LibraryConfig {
        model_dir: parse_string_or_else(t.get("model_dir"), LibraryConfig::default_model_dir),
        schema_namespace: parse_string_or_else(
            t.get("schema_namespace"),
            LibraryConfig::default_schema_namespace,
        ),
    }
}

/// Parse `[impact]` from TOML value.
///
/// An unknown `fail_on` level is an error: silently falling back would change
/// the exit status of CI runs.
pub(super) fn parse_impact_config(value: Option<&toml::Value>, path: &Path) -> Result<ImpactConfig> {
    const KNOWN: &[&str] = &["metadata", "noise", "breaking", "fail_on"];

    let Some(toml::Value::Table(t)) = value else {
        return Ok(ImpactConfig::default());
    };

    for key in t.keys() {
        if !KNOWN.contains(&key.as_str()) {
            warn_unknown_key(path, &format!("impact.{}", key));
        }
    }

    let fail_on = match t.get("fail_on").and_then(|v| v.as_str()) {
        None => ImpactConfig::default_fail_on(),
        Some(level) => ImpactLevel::from_name(level).ok_or_else(|| Error::Config {
            message: format!(
                "impact.fail_on: unknown level `{}` (expected one of: {})",
                level,
                ImpactLevel::ALL
                    .iter()
                    .map(|l| l.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            path: Some(path.to_path_buf()),
        })?,
    };

    Ok(ImpactConfig {
        metadata: parse_string_array_or_else(t.get("metadata"), ImpactConfig::default_metadata),
        noise: parse_string_array_or_else(t.get("noise"), ImpactConfig::default_noise),
        breaking: parse_string_array_or_else(t.get("breaking"), ImpactConfig::default_breaking),
        fail_on,
    })
}

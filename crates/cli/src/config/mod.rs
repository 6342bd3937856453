// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles sdkdrift.toml parsing with version validation and unknown key warnings.

mod parse;

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::impact::ImpactLevel;
use parse::{parse_impact_config, parse_library_config, warn_unknown_key};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "sdkdrift.toml";

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: i64,

    #[serde(default)]
    library: Option<toml::Value>,

    #[serde(default)]
    impact: Option<toml::Value>,

    #[serde(flatten)]
    unknown: std::collections::BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Layout of the generated library.
    #[serde(default)]
    pub library: LibraryConfig,

    /// Impact classification rules.
    #[serde(default)]
    pub impact: ImpactConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            library: LibraryConfig::default(),
            impact: ImpactConfig::default(),
        }
    }
}

/// Layout of the generated client library.
#[derive(Debug, Clone, Deserialize)]
pub struct LibraryConfig {
    /// Path prefix of the model/type directory (default: "models/").
    #[serde(default = "LibraryConfig::default_model_dir")]
    pub model_dir: String,

    /// Schema-name prefix of the library's models (default: "microsoft.graph.").
    #[serde(default = "LibraryConfig::default_schema_namespace")]
    pub schema_namespace: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            model_dir: Self::default_model_dir(),
            schema_namespace: Self::default_schema_namespace(),
        }
    }
}

impl LibraryConfig {
    pub(crate) fn default_model_dir() -> String {
        "models/".to_string()
    }

    pub(crate) fn default_schema_namespace() -> String {
        "microsoft.graph.".to_string()
    }
}

/// Impact classification configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ImpactConfig {
    /// Build, lock, and license files: never actionable.
    #[serde(default = "ImpactConfig::default_metadata")]
    pub metadata: Vec<String>,

    /// Test, example, docs, workflow, and internal paths.
    #[serde(default = "ImpactConfig::default_noise")]
    pub noise: Vec<String>,

    /// Files whose modification is likely breaking (models, clients).
    #[serde(default = "ImpactConfig::default_breaking")]
    pub breaking: Vec<String>,

    /// Lowest level that makes the run fail (default: critical).
    #[serde(default = "ImpactConfig::default_fail_on")]
    pub fail_on: ImpactLevel,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            metadata: Self::default_metadata(),
            noise: Self::default_noise(),
            breaking: Self::default_breaking(),
            fail_on: Self::default_fail_on(),
        }
    }
}

impl ImpactConfig {
    pub(crate) fn default_metadata() -> Vec<String> {
        vec![
            "**/go.mod".to_string(),
            "**/go.sum".to_string(),
            "**/LICENSE*".to_string(),
            "**/CHANGELOG*".to_string(),
            "**/CODEOWNERS".to_string(),
            "**/.gitignore".to_string(),
            "**/.gitattributes".to_string(),
            "**/*.lock".to_string(),
        ]
    }

    pub(crate) fn default_noise() -> Vec<String> {
        vec![
            "**/*_test.go".to_string(),
            "**/test/**".to_string(),
            "**/tests/**".to_string(),
            "**/testdata/**".to_string(),
            "**/examples/**".to_string(),
            "**/docs/**".to_string(),
            "**/*.md".to_string(),
            ".github/**".to_string(),
            "**/internal/**".to_string(),
        ]
    }

    pub(crate) fn default_breaking() -> Vec<String> {
        vec![
            "**/*_client.go".to_string(),
            "**/*_request_builder.go".to_string(),
            "**/*interface*.go".to_string(),
            "**/*model*.go".to_string(),
            "**/*types*.go".to_string(),
        ]
    }

    pub(crate) fn default_fail_on() -> ImpactLevel {
        ImpactLevel::Critical
    }
}

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "library", "impact"];

/// Load config from `path`, or defaults when `path` is `None` and no
/// `sdkdrift.toml` exists in the working directory.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_with_warnings(path),
        None => {
            let default_path = Path::new(CONFIG_FILE);
            if default_path.is_file() {
                load_with_warnings(default_path)
            } else {
                tracing::debug!("no {} found, using defaults", CONFIG_FILE);
                Ok(Config::default())
            }
        }
    }
}

/// Load config with warnings for unknown keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_with_warnings(&content, path)
}

/// Parse config, warning on unknown keys.
///
/// The version is checked before any section is read.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<Config> {
    check_version(content, path)?;

    let flexible: FlexibleConfig = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, key);
        }
    }

    let library = parse_library_config(flexible.library.as_ref(), path);
    let impact = parse_impact_config(flexible.impact.as_ref(), path)?;

    Ok(Config {
        version: flexible.version,
        library,
        impact,
    })
}

fn check_version(content: &str, path: &Path) -> Result<()> {
    let version_check: VersionOnly = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    let version = version_check.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})\n  Upgrade sdkdrift to use this config.",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

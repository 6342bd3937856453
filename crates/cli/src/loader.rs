// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Input file loading for the CLI.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::relevance::UsageIndex;
use crate::schema::SchemaDocument;

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

/// A usage index file: the full index or a plain list of model names.
#[derive(Deserialize)]
#[serde(untagged)]
enum UsageFile {
    Index(UsageIndex),
    Models(Vec<String>),
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn parse_error(path: &Path, message: impl ToString) -> Error {
    Error::Parse {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Load a usage index. Without a path the index is empty, so every model counts as used.
pub fn load_usage(path: Option<&Path>) -> Result<UsageIndex> {
    let Some(path) = path else {
        return Ok(UsageIndex::default());
    };
    let content = read(path)?;
    let usage = match serde_json::from_str::<UsageFile>(&content)
        .map_err(|e| parse_error(path, e))?
    {
        UsageFile::Index(UsageIndex {
            models,
            files,
            packages,
        }) => UsageIndex::from_models(models)
            .with_files(files)
            .with_packages(packages),
        UsageFile::Models(models) => UsageIndex::from_models(models),
    };
    tracing::debug!(
        models = usage.models.len(),
        files = usage.files.len(),
        packages = usage.packages.len(),
        "loaded usage index"
    );
    Ok(usage)
}

/// Load an OpenAPI document or bare schema map from JSON or YAML.
///
/// `.yaml`/`.yml` files are read as YAML; anything else is tried as JSON first.
pub fn load_schema_document(path: &Path) -> Result<SchemaDocument> {
    let content = read(path)?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let value: Value = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| parse_error(path, e))?
    } else {
        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(json_err) => serde_yaml::from_str(&content)
                .map_err(|_| parse_error(path, json_err))?,
        }
    };

    if !value.is_object() {
        return Err(parse_error(path, "expected an OpenAPI document or a schema map"));
    }
    let document = SchemaDocument::from_value(value);
    tracing::debug!(path = %path.display(), schemas = document.len(), "loaded schema document");
    Ok(document)
}

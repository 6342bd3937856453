// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Name casing transforms shared by the diff and schema pipelines.
//!
//! Generated model files are named `chat_message.go` while the schema calls
//! the same type `microsoft.graph.chatMessage`; both normalize to `ChatMessage`.

use std::path::Path;

/// Convert a word-separated identifier into a capitalized compound name.
///
/// Splits on `_`, `-`, `.` and whitespace, upper-cases the first character of
/// each part and keeps the rest of the part as written, so `chatMessage`
/// becomes `ChatMessage` and `chat_message` does too.
pub fn to_pascal_case(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '-' || c == '.' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Derive a model name from a file path (`models/chat_message.go` -> `ChatMessage`).
pub fn model_name_from_path(path: &str) -> String {
    let stem = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path);
    to_pascal_case(stem)
}

/// Derive a model name from a dotted schema name (`microsoft.graph.user` -> `User`).
pub fn model_name_from_schema(schema_name: &str) -> String {
    let last = schema_name.rsplit('.').next().unwrap_or(schema_name);
    to_pascal_case(last)
}

/// Directory portion of a path, without a trailing slash (`""` for root files).
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;

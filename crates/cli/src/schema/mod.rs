// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Property-level comparison of two OpenAPI schema documents.
//!
//! Works on already-parsed schema maps (schema name to raw schema object).
//! Each schema's properties are flattened across `allOf` composition before
//! the two versions are compared.

pub mod compare;
pub mod flatten;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::naming::model_name_from_schema;

pub use compare::{SchemaComparison, SchemaStatistics, compare_schemas};
pub use flatten::flatten_properties;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// Schema name to raw schema object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDocument {
    schemas: BTreeMap<String, Value>,
}

impl SchemaDocument {
    pub fn new(schemas: BTreeMap<String, Value>) -> Self {
        Self { schemas }
    }

    /// Build from either a full OpenAPI document (`components.schemas`) or a
    /// bare schema map. Anything else yields an empty document.
    pub fn from_value(value: Value) -> Self {
        let value = match value {
            Value::Object(mut doc) => match doc.remove("components") {
                Some(Value::Object(mut components)) => {
                    components.remove("schemas").unwrap_or(Value::Null)
                }
                Some(other) => {
                    doc.insert("components".to_string(), other);
                    Value::Object(doc)
                }
                None => Value::Object(doc),
            },
            other => other,
        };

        match value {
            Value::Object(map) => Self {
                schemas: map.into_iter().collect(),
            },
            _ => Self::default(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, schema: Value) {
        self.schemas.insert(name.into(), schema);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Validation and documentation attributes of a property.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub write_only: bool,
}

/// One property after composition flattening.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyInfo {
    #[serde(rename = "type")]
    pub property_type: String,
    pub required: bool,
    pub nullable: bool,
    #[serde(flatten)]
    pub metadata: PropertyMetadata,
}

/// How a property differs between versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyChangeKind {
    Added,
    Removed,
    TypeChanged,
    RequiredChanged,
    NullableChanged,
}

impl PropertyChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyChangeKind::Added => "added",
            PropertyChangeKind::Removed => "removed",
            PropertyChangeKind::TypeChanged => "type_changed",
            PropertyChangeKind::RequiredChanged => "required_changed",
            PropertyChangeKind::NullableChanged => "nullable_changed",
        }
    }
}

/// A single property-level difference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyChange {
    pub property_name: String,
    pub kind: PropertyChangeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_type: Option<String>,
    pub old_required: bool,
    pub new_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_nullable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_nullable: Option<bool>,
    /// Attributes from the new version when present, otherwise the old one.
    #[serde(flatten)]
    pub metadata: PropertyMetadata,
}

impl PropertyChange {
    /// Build a change from the property's state in each version.
    pub fn between(
        name: &str,
        kind: PropertyChangeKind,
        old: Option<&PropertyInfo>,
        new: Option<&PropertyInfo>,
    ) -> Self {
        let metadata = new
            .or(old)
            .map(|info| info.metadata.clone())
            .unwrap_or_default();
        Self {
            property_name: name.to_string(),
            kind,
            old_type: old.map(|p| p.property_type.clone()),
            new_type: new.map(|p| p.property_type.clone()),
            old_required: old.is_some_and(|p| p.required),
            new_required: new.is_some_and(|p| p.required),
            old_nullable: old.map(|p| p.nullable),
            new_nullable: new.map(|p| p.nullable),
            metadata,
        }
    }

    /// Removal, type change, or a property becoming required.
    pub fn is_breaking(&self) -> bool {
        match self.kind {
            PropertyChangeKind::Removed | PropertyChangeKind::TypeChanged => true,
            PropertyChangeKind::RequiredChanged => !self.old_required && self.new_required,
            PropertyChangeKind::Added | PropertyChangeKind::NullableChanged => false,
        }
    }
}

/// All property changes of one schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaChange {
    pub schema_name: String,
    pub model_name: String,
    pub added: Vec<PropertyChange>,
    pub removed: Vec<PropertyChange>,
    pub type_changed: Vec<PropertyChange>,
    pub required_changed: Vec<PropertyChange>,
    pub nullable_changed: Vec<PropertyChange>,
}

impl SchemaChange {
    pub fn new(schema_name: &str) -> Self {
        Self {
            schema_name: schema_name.to_string(),
            model_name: model_name_from_schema(schema_name),
            added: Vec::new(),
            removed: Vec::new(),
            type_changed: Vec::new(),
            required_changed: Vec::new(),
            nullable_changed: Vec::new(),
        }
    }

    pub fn has_changes(&self) -> bool {
        self.all_changes().next().is_some()
    }

    pub fn has_breaking_changes(&self) -> bool {
        self.breaking_changes().next().is_some()
    }

    pub fn breaking_changes(&self) -> impl Iterator<Item = &PropertyChange> {
        self.all_changes().filter(|c| c.is_breaking())
    }

    pub fn all_changes(&self) -> impl Iterator<Item = &PropertyChange> {
        self.added
            .iter()
            .chain(&self.removed)
            .chain(&self.type_changed)
            .chain(&self.required_changed)
            .chain(&self.nullable_changed)
    }

    pub(crate) fn push(&mut self, change: PropertyChange) {
        match change.kind {
            PropertyChangeKind::Added => self.added.push(change),
            PropertyChangeKind::Removed => self.removed.push(change),
            PropertyChangeKind::TypeChanged => self.type_changed.push(change),
            PropertyChangeKind::RequiredChanged => self.required_changed.push(change),
            PropertyChangeKind::NullableChanged => self.nullable_changed.push(change),
        }
    }

    /// e.g. `2 added, 1 removed, 1 type changed`.
    pub fn change_summary(&self) -> String {
        let parts: Vec<String> = [
            (self.added.len(), "added"),
            (self.removed.len(), "removed"),
            (self.type_changed.len(), "type changed"),
            (self.required_changed.len(), "required changed"),
            (self.nullable_changed.len(), "nullable changed"),
        ]
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, label)| format!("{count} {label}"))
        .collect();

        if parts.is_empty() {
            "no changes".to_string()
        } else {
            parts.join(", ")
        }
    }
}

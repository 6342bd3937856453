// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Schema document comparison.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;

use super::flatten::flatten_properties;
use super::{PropertyChange, PropertyChangeKind, PropertyInfo, SchemaChange, SchemaDocument};

#[cfg(test)]
#[path = "compare_tests.rs"]
mod tests;

/// Counters collected while comparing two schema documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaStatistics {
    pub schemas_old: usize,
    pub schemas_new: usize,
    pub schemas_added: usize,
    pub schemas_removed: usize,
    /// Present in both versions and inside the namespace.
    pub schemas_compared: usize,
    /// Present in both versions but outside the namespace.
    pub schemas_skipped: usize,
    /// Compared schemas whose value was not an object on either side.
    pub schemas_malformed: usize,
    pub schemas_with_changes: usize,

    pub properties_added: usize,
    pub properties_removed: usize,
    pub types_changed: usize,
    pub required_changed: usize,
    pub nullable_changed: usize,
}

/// Result of comparing two schema documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaComparison {
    /// Schemas with at least one property change, sorted by name.
    pub changes: Vec<SchemaChange>,
    pub added_schemas: Vec<String>,
    pub removed_schemas: Vec<String>,
    pub stats: SchemaStatistics,
}

/// Compare every schema present in both documents whose name starts with `namespace`.
///
/// Schemas only present on one side are listed, not deep-compared. Schemas
/// without property changes are dropped from the result but still counted.
pub fn compare_schemas(
    old: &SchemaDocument,
    new: &SchemaDocument,
    namespace: &str,
) -> SchemaComparison {
    let old_names: BTreeSet<&str> = old.names().collect();
    let new_names: BTreeSet<&str> = new.names().collect();

    let added_schemas: Vec<String> = new_names
        .difference(&old_names)
        .map(|s| s.to_string())
        .collect();
    let removed_schemas: Vec<String> = old_names
        .difference(&new_names)
        .map(|s| s.to_string())
        .collect();

    let mut stats = SchemaStatistics {
        schemas_old: old.len(),
        schemas_new: new.len(),
        schemas_added: added_schemas.len(),
        schemas_removed: removed_schemas.len(),
        ..Default::default()
    };

    let mut changes = Vec::new();
    for name in old_names.intersection(&new_names) {
        if !name.starts_with(namespace) {
            stats.schemas_skipped += 1;
            continue;
        }
        let (Some(old_schema), Some(new_schema)) = (old.get(name), new.get(name)) else {
            continue;
        };

        stats.schemas_compared += 1;
        if !old_schema.is_object() || !new_schema.is_object() {
            tracing::warn!(schema = %name, "schema is not an object, treating as empty");
            stats.schemas_malformed += 1;
        }

        let change = compare_schema(name, old_schema, new_schema);
        stats.properties_added += change.added.len();
        stats.properties_removed += change.removed.len();
        stats.types_changed += change.type_changed.len();
        stats.required_changed += change.required_changed.len();
        stats.nullable_changed += change.nullable_changed.len();

        if change.has_changes() {
            tracing::debug!(schema = %name, summary = %change.change_summary(), "schema changed");
            stats.schemas_with_changes += 1;
            changes.push(change);
        }
    }

    SchemaComparison {
        changes,
        added_schemas,
        removed_schemas,
        stats,
    }
}

/// Compare one schema's flattened properties across versions.
pub fn compare_schema(name: &str, old: &Value, new: &Value) -> SchemaChange {
    let old_props = flatten_properties(old);
    let new_props = flatten_properties(new);
    diff_properties(name, &old_props, &new_props)
}

/// Diff two flattened property maps.
///
/// Type, required, and nullable differences are independent checks: one
/// property can land in several lists.
pub fn diff_properties(
    name: &str,
    old: &BTreeMap<String, PropertyInfo>,
    new: &BTreeMap<String, PropertyInfo>,
) -> SchemaChange {
    let mut change = SchemaChange::new(name);

    for (prop, info) in new {
        if !old.contains_key(prop) {
            change.push(PropertyChange::between(
                prop,
                PropertyChangeKind::Added,
                None,
                Some(info),
            ));
        }
    }

    for (prop, old_info) in old {
        let Some(new_info) = new.get(prop) else {
            change.push(PropertyChange::between(
                prop,
                PropertyChangeKind::Removed,
                Some(old_info),
                None,
            ));
            continue;
        };

        let axes = [
            (
                old_info.property_type != new_info.property_type,
                PropertyChangeKind::TypeChanged,
            ),
            (
                old_info.required != new_info.required,
                PropertyChangeKind::RequiredChanged,
            ),
            (
                old_info.nullable != new_info.nullable,
                PropertyChangeKind::NullableChanged,
            ),
        ];
        for (differs, kind) in axes {
            if differs {
                change.push(PropertyChange::between(
                    prop,
                    kind,
                    Some(old_info),
                    Some(new_info),
                ));
            }
        }
    }

    change
}

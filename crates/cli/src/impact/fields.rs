// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Item-level classification of structural and schema changes.
//!
//! Callers pass only changes on models the consumer uses; relevance
//! filtering happens upstream.

use super::{ClassifiedItem, ImpactLevel, ItemKind};
use crate::schema::{PropertyChange, PropertyChangeKind, SchemaChange};
use crate::structural::{ChangeKind, ModelChange, StructuralChange};

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;

/// Classify every field, method, and embedded-type change of a model.
///
/// Additions are opportunities, removals are critical.
pub fn classify_model_change(change: &ModelChange) -> Vec<ClassifiedItem> {
    change
        .changes()
        .map(|c| {
            let (level, reason) = structural_impact(&c);
            ClassifiedItem {
                model: change.model_name.clone(),
                name: c.name().to_string(),
                kind: item_kind(&c),
                level,
                reason,
                detail: Some(c.detail()),
            }
        })
        .collect()
}

fn item_kind(change: &StructuralChange) -> ItemKind {
    match change {
        StructuralChange::Field(_) => ItemKind::Field,
        StructuralChange::Method(_) => ItemKind::Method,
        StructuralChange::Embedded(_) => ItemKind::EmbeddedType,
    }
}

fn structural_impact(change: &StructuralChange) -> (ImpactLevel, &'static str) {
    match (change, change.kind()) {
        (StructuralChange::Field(_), ChangeKind::Added) => {
            (ImpactLevel::Opportunity, "field added to used model")
        }
        (StructuralChange::Field(_), ChangeKind::Removed) => {
            (ImpactLevel::Critical, "field removed from used model")
        }
        (StructuralChange::Method(_), ChangeKind::Added) => {
            (ImpactLevel::Opportunity, "method added to used interface")
        }
        (StructuralChange::Method(_), ChangeKind::Removed) => {
            (ImpactLevel::Critical, "method removed from used interface")
        }
        (StructuralChange::Embedded(_), ChangeKind::Added) => {
            (ImpactLevel::Opportunity, "embedded type added to used model")
        }
        (StructuralChange::Embedded(_), ChangeKind::Removed) => {
            (ImpactLevel::Critical, "embedded type removed from used model")
        }
    }
}

/// Classify every property change of a schema.
///
/// A property listed under several change kinds yields one item per kind.
pub fn classify_schema_change(change: &SchemaChange) -> Vec<ClassifiedItem> {
    change
        .all_changes()
        .map(|p| {
            let (level, reason) = property_impact(p);
            ClassifiedItem {
                model: change.model_name.clone(),
                name: p.property_name.clone(),
                kind: ItemKind::Property,
                level,
                reason,
                detail: property_detail(p),
            }
        })
        .collect()
}

fn property_impact(change: &PropertyChange) -> (ImpactLevel, &'static str) {
    match change.kind {
        PropertyChangeKind::Added => (ImpactLevel::Opportunity, "property added to used schema"),
        PropertyChangeKind::Removed => (ImpactLevel::Critical, "property removed from used schema"),
        PropertyChangeKind::TypeChanged => (ImpactLevel::Critical, "property type changed"),
        PropertyChangeKind::RequiredChanged if change.is_breaking() => {
            (ImpactLevel::Critical, "property became required")
        }
        PropertyChangeKind::RequiredChanged => (ImpactLevel::Warning, "property no longer required"),
        PropertyChangeKind::NullableChanged => (ImpactLevel::Warning, "property nullability changed"),
    }
}

fn property_detail(change: &PropertyChange) -> Option<String> {
    let describe = |ty: &Option<String>| ty.as_deref().unwrap_or("?").to_string();
    match change.kind {
        PropertyChangeKind::Added => change.new_type.clone(),
        PropertyChangeKind::Removed => change.old_type.clone(),
        PropertyChangeKind::TypeChanged => Some(format!(
            "{} -> {}",
            describe(&change.old_type),
            describe(&change.new_type)
        )),
        PropertyChangeKind::RequiredChanged => Some(format!(
            "required: {} -> {}",
            change.old_required, change.new_required
        )),
        PropertyChangeKind::NullableChanged => match (change.old_nullable, change.new_nullable) {
            (Some(old), Some(new)) => Some(format!("nullable: {old} -> {new}")),
            _ => None,
        },
    }
}

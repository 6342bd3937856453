// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Impact classification.
//!
//! Files are classified by path and status through a first-match decision
//! table ([`rules`]). Structural, schema, and enum changes are classified at
//! item level ([`fields`], [`enums`]).

pub mod enums;
pub mod fields;
pub mod rules;

use serde::{Deserialize, Serialize};

use crate::filter::FileStatus;

pub use enums::{EnumChange, parse_enum_changes};
pub use fields::{classify_model_change, classify_schema_change};
pub use rules::ImpactClassifier;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// How much a change matters to the consumer.
///
/// Declaration order is report order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Critical,
    EnumRemoved,
    Warning,
    EnumAdded,
    Opportunity,
    Safe,
    Metadata,
    Noise,
}

impl ImpactLevel {
    pub const ALL: [ImpactLevel; 8] = [
        ImpactLevel::Critical,
        ImpactLevel::EnumRemoved,
        ImpactLevel::Warning,
        ImpactLevel::EnumAdded,
        ImpactLevel::Opportunity,
        ImpactLevel::Safe,
        ImpactLevel::Metadata,
        ImpactLevel::Noise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ImpactLevel::Critical => "critical",
            ImpactLevel::EnumRemoved => "enum_removed",
            ImpactLevel::Warning => "warning",
            ImpactLevel::EnumAdded => "enum_added",
            ImpactLevel::Opportunity => "opportunity",
            ImpactLevel::Safe => "safe",
            ImpactLevel::Metadata => "metadata",
            ImpactLevel::Noise => "noise",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == name)
    }

    /// Severity rank. `EnumRemoved` ranks with `Critical`.
    pub fn severity(self) -> u8 {
        match self {
            ImpactLevel::Critical | ImpactLevel::EnumRemoved => 6,
            ImpactLevel::Warning => 5,
            ImpactLevel::EnumAdded => 4,
            ImpactLevel::Opportunity => 3,
            ImpactLevel::Safe => 2,
            ImpactLevel::Metadata => 1,
            ImpactLevel::Noise => 0,
        }
    }

    /// True when this level is at least as severe as `threshold`.
    pub fn reaches(self, threshold: ImpactLevel) -> bool {
        self.severity() >= threshold.severity()
    }

    pub fn is_breaking(self) -> bool {
        self.reaches(ImpactLevel::Critical)
    }
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A changed file with its file-level impact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedFile {
    pub file: String,
    pub status: FileStatus,
    #[serde(skip)]
    pub level: ImpactLevel,
    pub reason: &'static str,
    pub additions: u32,
    pub deletions: u32,
}

/// What a classified item refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Field,
    Method,
    EmbeddedType,
    Property,
    Enum,
    Model,
    Schema,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Field => "field",
            ItemKind::Method => "method",
            ItemKind::EmbeddedType => "embedded type",
            ItemKind::Property => "property",
            ItemKind::Enum => "enum",
            ItemKind::Model => "model",
            ItemKind::Schema => "schema",
        }
    }
}

/// A field, method, property, enum, or whole model with its impact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedItem {
    pub model: String,
    pub name: String,
    pub kind: ItemKind,
    pub level: ImpactLevel,
    pub reason: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

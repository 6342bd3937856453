// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structural change detection from unified diff text.
//!
//! Recognizes added and removed struct fields, interface methods, and
//! embedded types in generated model files without parsing the language.
//! See [`parser::parse_structural_diff`] for the scanning rules.

pub mod parser;
pub(crate) mod patterns;

use serde::Serialize;

use crate::naming::model_name_from_path;

pub use parser::{StructuralDiff, parse_structural_diff};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// Direction of a structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Removed,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
        }
    }
}

/// Declaration an embedded type appeared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclContext {
    Struct,
    Interface,
}

/// A struct field that appeared or disappeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub kind: ChangeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
}

/// An interface method signature that appeared or disappeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodChange {
    pub name: String,
    pub parameters: String,
    pub return_type: String,
    pub kind: ChangeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
}

impl MethodChange {
    /// Display form, e.g. `GetOwner() (string, error)`.
    pub fn signature(&self) -> String {
        if self.return_type.is_empty() {
            format!("{}({})", self.name, self.parameters)
        } else {
            format!("{}({}) {}", self.name, self.parameters, self.return_type)
        }
    }
}

/// A type embedded by reference that appeared or disappeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddedTypeChange {
    pub type_name: String,
    pub kind: ChangeKind,
    pub context: DeclContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
}

/// Any single structural change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum StructuralChange {
    Field(FieldChange),
    Method(MethodChange),
    Embedded(EmbeddedTypeChange),
}

impl StructuralChange {
    pub fn kind(&self) -> ChangeKind {
        match self {
            StructuralChange::Field(f) => f.kind,
            StructuralChange::Method(m) => m.kind,
            StructuralChange::Embedded(e) => e.kind,
        }
    }

    /// Field name, method name, or embedded type name.
    pub fn name(&self) -> &str {
        match self {
            StructuralChange::Field(f) => &f.name,
            StructuralChange::Method(m) => &m.name,
            StructuralChange::Embedded(e) => &e.type_name,
        }
    }

    /// Short label for reports: `field`, `method`, or `embedded type`.
    pub fn category(&self) -> &'static str {
        match self {
            StructuralChange::Field(_) => "field",
            StructuralChange::Method(_) => "method",
            StructuralChange::Embedded(_) => "embedded type",
        }
    }

    /// Human detail: the field type, the method signature, or the embedding context.
    pub fn detail(&self) -> String {
        match self {
            StructuralChange::Field(f) => f.field_type.clone(),
            StructuralChange::Method(m) => m.signature(),
            StructuralChange::Embedded(e) => match e.context {
                DeclContext::Struct => "embedded in struct".to_string(),
                DeclContext::Interface => "embedded in interface".to_string(),
            },
        }
    }
}

/// All structural changes found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelChange {
    pub file_path: String,
    pub model_name: String,
    pub fields_added: Vec<FieldChange>,
    pub fields_removed: Vec<FieldChange>,
    pub methods_added: Vec<MethodChange>,
    pub methods_removed: Vec<MethodChange>,
    pub embedded_added: Vec<EmbeddedTypeChange>,
    pub embedded_removed: Vec<EmbeddedTypeChange>,
}

impl ModelChange {
    pub fn new(file_path: &str) -> Self {
        Self {
            file_path: file_path.to_string(),
            model_name: model_name_from_path(file_path),
            fields_added: Vec::new(),
            fields_removed: Vec::new(),
            methods_added: Vec::new(),
            methods_removed: Vec::new(),
            embedded_added: Vec::new(),
            embedded_removed: Vec::new(),
        }
    }

    pub fn has_changes(&self) -> bool {
        self.total_changes() > 0
    }

    pub fn total_changes(&self) -> usize {
        self.fields_added.len()
            + self.fields_removed.len()
            + self.methods_added.len()
            + self.methods_removed.len()
            + self.embedded_added.len()
            + self.embedded_removed.len()
    }

    /// Append a change to the list matching its category and direction.
    pub fn push(&mut self, change: StructuralChange) {
        match change {
            StructuralChange::Field(f) => match f.kind {
                ChangeKind::Added => self.fields_added.push(f),
                ChangeKind::Removed => self.fields_removed.push(f),
            },
            StructuralChange::Method(m) => match m.kind {
                ChangeKind::Added => self.methods_added.push(m),
                ChangeKind::Removed => self.methods_removed.push(m),
            },
            StructuralChange::Embedded(e) => match e.kind {
                ChangeKind::Added => self.embedded_added.push(e),
                ChangeKind::Removed => self.embedded_removed.push(e),
            },
        }
    }

    /// Every change in the file, grouped by category with additions first.
    pub fn changes(&self) -> impl Iterator<Item = StructuralChange> + '_ {
        let fields = self
            .fields_added
            .iter()
            .chain(&self.fields_removed)
            .cloned()
            .map(StructuralChange::Field);
        let methods = self
            .methods_added
            .iter()
            .chain(&self.methods_removed)
            .cloned()
            .map(StructuralChange::Method);
        let embedded = self
            .embedded_added
            .iter()
            .chain(&self.embedded_removed)
            .cloned()
            .map(StructuralChange::Embedded);
        fields.chain(methods).chain(embedded)
    }
}

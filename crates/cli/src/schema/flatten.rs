// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Property flattening across `allOf` composition.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use super::{PropertyInfo, PropertyMetadata};

#[cfg(test)]
#[path = "flatten_tests.rs"]
mod tests;

/// Composition branches are walked to this depth at most.
const MAX_COMPOSITION_DEPTH: usize = 16;

/// Flatten a schema's properties into one map.
///
/// Properties from `allOf` branches are merged in order, later branches
/// overriding earlier ones, and the schema's own `properties` override every
/// branch. A property is required when any merged `required` list names it.
/// Non-object input yields an empty map.
pub fn flatten_properties(schema: &Value) -> BTreeMap<String, PropertyInfo> {
    let mut raw: BTreeMap<String, &Value> = BTreeMap::new();
    let mut required: BTreeSet<&str> = BTreeSet::new();
    collect(schema, &mut raw, &mut required, 0);

    raw.into_iter()
        .map(|(name, prop)| {
            let info = property_info(prop, required.contains(name.as_str()));
            (name, info)
        })
        .collect()
}

fn collect<'a>(
    schema: &'a Value,
    raw: &mut BTreeMap<String, &'a Value>,
    required: &mut BTreeSet<&'a str>,
    depth: usize,
) {
    let Some(obj) = schema.as_object() else {
        return;
    };

    if depth < MAX_COMPOSITION_DEPTH
        && let Some(branches) = obj.get("allOf").and_then(Value::as_array)
    {
        for branch in branches {
            collect(branch, raw, required, depth + 1);
        }
    }

    if let Some(props) = obj.get("properties").and_then(Value::as_object) {
        for (name, prop) in props {
            raw.insert(name.clone(), prop);
        }
    }
    if let Some(names) = obj.get("required").and_then(Value::as_array) {
        required.extend(names.iter().filter_map(Value::as_str));
    }
}

fn property_info(prop: &Value, required: bool) -> PropertyInfo {
    let empty = Map::new();
    let obj = prop.as_object().unwrap_or(&empty);

    PropertyInfo {
        property_type: resolve_type(obj),
        required,
        nullable: is_nullable(obj),
        metadata: PropertyMetadata {
            description: string_field(obj, "description"),
            enum_values: obj
                .get("enum")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            format: string_field(obj, "format"),
            pattern: string_field(obj, "pattern"),
            min_length: obj.get("minLength").and_then(Value::as_u64),
            max_length: obj.get("maxLength").and_then(Value::as_u64),
            minimum: obj.get("minimum").and_then(Value::as_f64),
            maximum: obj.get("maximum").and_then(Value::as_f64),
            default: obj.get("default").cloned(),
            example: obj.get("example").cloned(),
            deprecated: bool_field(obj, "deprecated"),
            read_only: bool_field(obj, "readOnly"),
            write_only: bool_field(obj, "writeOnly"),
        },
    }
}

/// Resolve a property's type name.
///
/// An explicit `type` wins (arrays carry their item type as `array<item>`).
/// Without one, a `$ref` contributes the referenced schema name. A single
/// referenced branch of `anyOf`/`oneOf`/`allOf` counts as a `$ref`.
/// Anything else is `unknown`.
pub(crate) fn resolve_type(obj: &Map<String, Value>) -> String {
    if let Some(base) = explicit_type(obj) {
        if base == "array"
            && let Some(items) = obj.get("items").and_then(Value::as_object)
        {
            let item = resolve_type(items);
            if item != "unknown" {
                return format!("array<{item}>");
            }
        }
        return base.to_string();
    }

    if let Some(name) = obj.get("$ref").and_then(Value::as_str) {
        return ref_name(name).to_string();
    }

    for key in ["anyOf", "oneOf", "allOf"] {
        let refs: Vec<&str> = obj
            .get(key)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|branch| branch.get("$ref").and_then(Value::as_str))
            .collect();
        if let [single] = refs.as_slice() {
            return ref_name(single).to_string();
        }
    }

    "unknown".to_string()
}

/// `type: "string"` or, in OpenAPI 3.1, the first non-null entry of `type: ["string", "null"]`.
fn explicit_type(obj: &Map<String, Value>) -> Option<&str> {
    match obj.get("type")? {
        Value::String(s) => Some(s.as_str()),
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null"),
        _ => None,
    }
}

fn is_nullable(obj: &Map<String, Value>) -> bool {
    if bool_field(obj, "nullable") {
        return true;
    }
    if let Some(Value::Array(types)) = obj.get("type")
        && types.iter().any(|t| t.as_str() == Some("null"))
    {
        return true;
    }
    // Nullable references: anyOf [{$ref}, {type: object, nullable: true}]
    ["anyOf", "oneOf"].iter().any(|key| {
        obj.get(*key)
            .and_then(Value::as_array)
            .is_some_and(|branches| {
                branches.iter().any(|b| {
                    b.get("nullable").and_then(Value::as_bool) == Some(true)
                        || b.get("type").and_then(Value::as_str) == Some("null")
                })
            })
    })
}

/// Last path segment of a `$ref` (`#/components/schemas/microsoft.graph.user` -> `microsoft.graph.user`).
fn ref_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(String::from)
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

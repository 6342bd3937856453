// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use serde_json::json;
use yare::parameterized;

#[test]
fn direct_properties_with_required() {
    let schema = json!({
        "type": "object",
        "properties": {
            "id": {"type": "string"},
            "displayName": {"type": "string", "nullable": true}
        },
        "required": ["id"]
    });

    let props = flatten_properties(&schema);
    assert_eq!(props.len(), 2);
    assert!(props["id"].required);
    assert!(!props["id"].nullable);
    assert!(!props["displayName"].required);
    assert!(props["displayName"].nullable);
}

#[test]
fn all_of_branches_merge_with_direct_properties_winning() {
    let schema = json!({
        "allOf": [
            {"properties": {"id": {"type": "string"}, "kind": {"type": "string"}}, "required": ["id"]},
            {"properties": {"kind": {"type": "integer"}, "size": {"type": "integer"}}}
        ],
        "properties": {"size": {"type": "number"}}
    });

    let props = flatten_properties(&schema);
    assert_eq!(props["id"].property_type, "string");
    assert!(props["id"].required);
    assert_eq!(props["kind"].property_type, "integer", "later branch overrides earlier");
    assert_eq!(props["size"].property_type, "number", "direct property overrides branches");
}

#[test]
fn nested_all_of_is_walked() {
    let schema = json!({
        "allOf": [
            {"allOf": [{"properties": {"deep": {"type": "boolean"}}}]},
            {"title": "microsoft.graph.user", "properties": {"mail": {"type": "string"}}}
        ]
    });
    let props = flatten_properties(&schema);
    assert!(props.contains_key("deep"));
    assert!(props.contains_key("mail"));
}

#[test]
fn ref_only_branches_contribute_nothing() {
    let schema = json!({
        "allOf": [
            {"$ref": "#/components/schemas/microsoft.graph.directoryObject"},
            {"properties": {"mail": {"type": "string"}}}
        ]
    });
    let props = flatten_properties(&schema);
    assert_eq!(props.keys().collect::<Vec<_>>(), vec!["mail"]);
}

#[parameterized(
    explicit = { json!({"type": "string"}), "string" },
    explicit_beats_ref = { json!({"type": "object", "$ref": "#/components/schemas/x"}), "object" },
    reference = { json!({"$ref": "#/components/schemas/microsoft.graph.identitySet"}), "microsoft.graph.identitySet" },
    nullable_reference = { json!({"anyOf": [{"$ref": "#/components/schemas/microsoft.graph.identitySet"}, {"type": "object", "nullable": true}]}), "microsoft.graph.identitySet" },
    array_of_strings = { json!({"type": "array", "items": {"type": "string"}}), "array<string>" },
    array_of_refs = { json!({"type": "array", "items": {"$ref": "#/components/schemas/microsoft.graph.user"}}), "array<microsoft.graph.user>" },
    bare_array = { json!({"type": "array"}), "array" },
    openapi_31_list = { json!({"type": ["string", "null"]}), "string" },
    unknown = { json!({"description": "no type"}), "unknown" },
)]
fn type_resolution(prop: serde_json::Value, expected: &str) {
    assert_eq!(resolve_type(prop.as_object().unwrap()), expected);
}

#[test]
fn nullable_detection_variants() {
    let schema = json!({
        "properties": {
            "flag": {"type": "string", "nullable": true},
            "listed": {"type": ["string", "null"]},
            "reference": {"anyOf": [{"$ref": "#/x"}, {"type": "object", "nullable": true}]},
            "plain": {"type": "string"}
        }
    });
    let props = flatten_properties(&schema);
    assert!(props["flag"].nullable);
    assert!(props["listed"].nullable);
    assert!(props["reference"].nullable);
    assert!(!props["plain"].nullable);
}

#[test]
fn validation_metadata_is_captured() {
    let schema = json!({
        "properties": {
            "status": {
                "type": "string",
                "description": "Current status",
                "enum": ["active", "disabled"],
                "format": "token",
                "pattern": "^[a-z]+$",
                "minLength": 1,
                "maxLength": 20,
                "default": "active",
                "example": "disabled",
                "deprecated": true,
                "readOnly": true
            },
            "count": {"type": "integer", "minimum": 0, "maximum": 100, "writeOnly": true}
        }
    });

    let props = flatten_properties(&schema);
    let status = &props["status"].metadata;
    assert_eq!(status.description.as_deref(), Some("Current status"));
    assert_eq!(status.enum_values, vec![json!("active"), json!("disabled")]);
    assert_eq!(status.format.as_deref(), Some("token"));
    assert_eq!(status.pattern.as_deref(), Some("^[a-z]+$"));
    assert_eq!(status.min_length, Some(1));
    assert_eq!(status.max_length, Some(20));
    assert_eq!(status.default, Some(json!("active")));
    assert_eq!(status.example, Some(json!("disabled")));
    assert!(status.deprecated);
    assert!(status.read_only);
    assert!(!status.write_only);

    let count = &props["count"].metadata;
    assert_eq!(count.minimum, Some(0.0));
    assert_eq!(count.maximum, Some(100.0));
    assert!(count.write_only);
}

#[test]
fn malformed_inputs_yield_empty_or_unknown() {
    assert!(flatten_properties(&json!("not a schema")).is_empty());
    assert!(flatten_properties(&json!({"properties": ["a", "b"]})).is_empty());

    let props = flatten_properties(&json!({"properties": {"odd": 42}}));
    assert_eq!(props["odd"].property_type, "unknown");
}

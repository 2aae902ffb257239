// crates/crosscall-schema/src/param/tests.rs
// ============================================================================
// Module: Parameter and File Schema Tests
// Description: Unit tests for parameter and file sub-schema parsing.
// Purpose: Validate documented defaults and value conformance checks.
// Dependencies: crosscall-schema, serde_json
// ============================================================================

//! ## Overview
//! Validates sub-schema defaults and the parameter conformance check over
//! kind, emptiness, and closed value sets.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::json;

use crate::kind::ValueKind;
use crate::param::FileSchema;
use crate::param::ParamSchema;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a parameter schema from an inline mapping under the given name.
fn param(name: &str, mapping: serde_json::Value) -> ParamSchema {
    let schema: ParamSchema = serde_json::from_value(mapping).expect("param schema");
    schema.with_name(name)
}

// ============================================================================
// SECTION: Parameter Defaults
// ============================================================================

#[test]
fn absent_fields_take_documented_defaults() {
    let schema = param("q", json!({}));
    assert_eq!(schema.name(), "q");
    assert_eq!(schema.kind(), ValueKind::String);
    assert!(!schema.required());
    assert!(schema.default_value().is_none());
    assert!(!schema.allow_empty());
    assert!(schema.allowed().is_empty());
}

#[test]
fn explicit_fields_round_trip() {
    let schema = param(
        "limit",
        json!({
            "type": "integer",
            "required": true,
            "default": 25,
            "enum": [10, 25, 50]
        }),
    );
    assert_eq!(schema.kind(), ValueKind::Integer);
    assert!(schema.required());
    assert_eq!(schema.default_value(), Some(&json!(25)));
    assert_eq!(schema.allowed(), &[json!(10), json!(25), json!(50)]);
}

// ============================================================================
// SECTION: Parameter Conformance
// ============================================================================

#[test]
fn accepts_rejects_kind_mismatches() {
    let schema = param("limit", json!({"type": "integer"}));
    assert!(schema.accepts(&json!(10)));
    assert!(!schema.accepts(&json!("10")));
    assert!(!schema.accepts(&json!(10.5)));
}

#[test]
fn accepts_rejects_empty_values_unless_allowed() {
    let strict = param("q", json!({}));
    assert!(!strict.accepts(&json!("")));
    assert!(strict.accepts(&json!("term")));
    let permissive = param("q", json!({"allow_empty": true}));
    assert!(permissive.accepts(&json!("")));
}

#[test]
fn accepts_enforces_closed_value_sets() {
    let schema = param("order", json!({"enum": ["asc", "desc"]}));
    assert!(schema.accepts(&json!("asc")));
    assert!(!schema.accepts(&json!("random")));
}

#[test]
fn float_kind_accepts_any_numeric_value() {
    let schema = param("ratio", json!({"type": "float"}));
    assert!(schema.accepts(&json!(0.5)));
    assert!(schema.accepts(&json!(2)));
    assert!(!schema.accepts(&json!("0.5")));
}

// ============================================================================
// SECTION: File Defaults
// ============================================================================

#[test]
fn file_schema_defaults_to_plain_text() {
    let schema: FileSchema = serde_json::from_value(json!({})).expect("file schema");
    let schema = schema.with_name("report");
    assert_eq!(schema.name(), "report");
    assert_eq!(schema.mime(), "text/plain");
    assert!(!schema.required());
    assert!(schema.max_bytes().is_none());
}

#[test]
fn file_schema_round_trips_explicit_fields() {
    let schema: FileSchema =
        serde_json::from_value(json!({"mime": "image/png", "required": true, "max_bytes": 1024}))
            .expect("file schema");
    let schema = schema.with_name("avatar");
    assert_eq!(schema.mime(), "image/png");
    assert!(schema.required());
    assert_eq!(schema.max_bytes(), Some(1024));
}

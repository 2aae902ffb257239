// crates/crosscall-schema/tests/proptest_calls.rs
// ============================================================================
// Module: Call Matching Property-Based Tests
// Description: Property tests for call permission matching.
// Purpose: Check the matching conjunction against a reference predicate.
// ============================================================================

//! Property-based tests for call descriptor matching invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use crosscall_schema::ActionSchema;
use proptest::prelude::*;
use serde_json::Value;
use serde_json::json;

/// Builds an action schema declaring the given call descriptors.
fn schema_with_calls(descriptors: &[Value]) -> ActionSchema {
    ActionSchema::from_mapping("probe", &json!({"calls": descriptors}))
        .unwrap_or_else(|err| panic!("schema must parse: {err}"))
}

/// Reference predicate: every provided filter is present and equal.
fn reference_match(
    descriptor: &(String, Option<String>, Option<String>),
    service: &str,
    version: Option<&str>,
    action: Option<&str>,
) -> bool {
    let service_ok = descriptor.0 == service;
    let version_ok = version.is_none_or(|wanted| descriptor.1.as_deref() == Some(wanted));
    let action_ok = action.is_none_or(|wanted| descriptor.2.as_deref() == Some(wanted));
    service_ok && version_ok && action_ok
}

/// Strategy over a small field alphabet so collisions are frequent.
fn field() -> impl Strategy<Value = String> {
    prop_oneof![Just("a".to_string()), Just("b".to_string()), Just("c".to_string())]
}

/// Strategy over optional fields from the same alphabet.
fn optional_field() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), field().prop_map(Some)]
}

proptest! {
    #[test]
    fn has_call_agrees_with_the_reference_conjunction(
        declared in prop::collection::vec((field(), optional_field(), optional_field()), 0 .. 4),
        service in field(),
        version in optional_field(),
        action in optional_field(),
    ) {
        let mappings: Vec<Value> = declared
            .iter()
            .map(|(service, version, action)| {
                let mut mapping = serde_json::Map::new();
                mapping.insert("service".to_string(), json!(service));
                if let Some(version) = version {
                    mapping.insert("version".to_string(), json!(version));
                }
                if let Some(action) = action {
                    mapping.insert("action".to_string(), json!(action));
                }
                Value::Object(mapping)
            })
            .collect();
        let schema = schema_with_calls(&mappings);
        let expected = declared
            .iter()
            .any(|descriptor| reference_match(descriptor, &service, version.as_deref(), action.as_deref()));
        let actual = schema.has_call(&service, version.as_deref(), action.as_deref());
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn matching_never_holds_for_undeclared_services(
        declared in prop::collection::vec((field(), optional_field(), optional_field()), 0 .. 4),
    ) {
        let mappings: Vec<Value> = declared
            .iter()
            .map(|(service, _, _)| json!({"service": service}))
            .collect();
        let schema = schema_with_calls(&mappings);
        prop_assert!(!schema.has_call("zz", None, None));
    }
}

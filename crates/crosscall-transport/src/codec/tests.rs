// crates/crosscall-transport/src/codec/tests.rs
// ============================================================================
// Module: Envelope Codec Tests
// Description: Unit tests for MessagePack envelope encoding and decoding.
// Purpose: Validate the documented nested wire shape survives the codec.
// Dependencies: crosscall-transport, serde_json
// ============================================================================

//! ## Overview
//! Validates that encoded envelopes decode back into the documented nested
//! mapping and that malformed frames report decode failures.

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

use crate::codec::EnvelopeCodec;
use crate::codec::MsgpackCodec;
use crate::envelope::ActionIdentity;
use crate::envelope::CalleeTarget;
use crate::envelope::RuntimeEnvelope;
use crate::error::CodecError;

// ============================================================================
// SECTION: Round Trip
// ============================================================================

#[test]
fn encoded_envelope_decodes_into_the_documented_shape() {
    let envelope = RuntimeEnvelope::for_call(
        ActionIdentity::new("frontend", "1.0.0", "render"),
        &CalleeTarget::new("users", "2.1", "read"),
        json!({"request_id": "r-1"}),
        vec![json!({"name": "id", "value": 42})],
        vec![],
    );
    let codec = MsgpackCodec;
    let frame = codec.encode(&envelope).expect("encode");
    let decoded = codec.decode(&frame).expect("decode");
    assert_eq!(decoded["meta"]["service"], json!("service"));
    assert_eq!(decoded["command"]["name"], json!("runtime-call"));
    let arguments = &decoded["command"]["arguments"];
    assert_eq!(arguments["action"]["action"], json!("render"));
    assert_eq!(arguments["callee"], json!(["users", "2.1", "read"]));
    assert_eq!(arguments["transport"], json!({"request_id": "r-1"}));
    assert_eq!(arguments["params"], json!([{"name": "id", "value": 42}]));
    assert_eq!(arguments["files"], json!([]));
}

#[test]
fn envelope_round_trips_through_its_typed_form() {
    let envelope = RuntimeEnvelope::for_call(
        ActionIdentity::new("frontend", "1.0.0", "render"),
        &CalleeTarget::new("users", "2.1", "read"),
        json!({}),
        vec![],
        vec![],
    );
    let frame = MsgpackCodec.encode(&envelope).expect("encode");
    let restored: RuntimeEnvelope = rmp_serde::from_slice(&frame).expect("typed decode");
    assert_eq!(restored, envelope);
}

// ============================================================================
// SECTION: Failures
// ============================================================================

#[test]
fn malformed_frames_report_decode_failures() {
    let err = MsgpackCodec.decode(&[0xc1]).expect_err("reserved byte must fail");
    assert!(matches!(err, CodecError::Decode(_)));
}

// crates/crosscall-transport/src/codec.rs
// ============================================================================
// Module: Crosscall Envelope Codec
// Description: Codec seam and MessagePack reference implementation.
// Purpose: Encode envelopes and decode reply frames behind a stable trait.
// Dependencies: rmp-serde, serde_json, crate::{envelope, error}
// ============================================================================

//! ## Overview
//! The binary encoding scheme is external to the call protocol: the
//! transport only needs an encoder for outgoing envelopes and a decoder for
//! the single reply frame. [`MsgpackCodec`] is the reference implementation;
//! deployments may substitute any codec honoring the documented nested
//! shape.
//! Invariants:
//! - Encoding preserves field names (string-keyed maps on the wire).
//! - Decoding never panics on malformed frames; failures are reported as
//!   [`CodecError::Decode`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::envelope::RuntimeEnvelope;
use crate::error::CodecError;

// ============================================================================
// SECTION: Codec Trait
// ============================================================================

/// Encodes envelopes and decodes reply frames.
pub trait EnvelopeCodec: Send + Sync {
    /// Encodes the envelope into one wire frame.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] when serialization fails.
    fn encode(&self, envelope: &RuntimeEnvelope) -> Result<Vec<u8>, CodecError>;

    /// Decodes one reply frame into a generic value.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decode`] when the frame is not interpretable.
    fn decode(&self, frame: &[u8]) -> Result<Value, CodecError>;
}

// ============================================================================
// SECTION: MessagePack Codec
// ============================================================================

/// MessagePack reference codec.
///
/// # Invariants
/// - Structs encode as string-keyed maps so the documented nested shape
///   survives the round trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgpackCodec;

impl EnvelopeCodec for MsgpackCodec {
    fn encode(&self, envelope: &RuntimeEnvelope) -> Result<Vec<u8>, CodecError> {
        rmp_serde::to_vec_named(envelope).map_err(|err| CodecError::Encode(err.to_string()))
    }

    fn decode(&self, frame: &[u8]) -> Result<Value, CodecError> {
        rmp_serde::from_slice(frame).map_err(|err| CodecError::Decode(err.to_string()))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;

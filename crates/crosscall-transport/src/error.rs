// crates/crosscall-transport/src/error.rs
// ============================================================================
// Module: Crosscall Transport Errors
// Description: Error taxonomy for runtime call execution.
// Purpose: Report endpoint, codec, and timeout failures with call context.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Transport errors split by seam: endpoint errors cover binding and frame
//! exchange, codec errors cover envelope encoding and reply decoding, and
//! [`RuntimeCallError`] is the call-level taxonomy delivered to callers.
//! Invariants:
//! - A timeout always names the unreachable (service, version, action)
//!   triple and the expired window.
//! - Seam errors convert into [`RuntimeCallError`] at the transport
//!   boundary without losing their message.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Codec Errors
// ============================================================================

/// Errors raised by envelope codecs.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Envelope encoding failed.
    #[error("envelope encode failed: {0}")]
    Encode(String),
    /// Reply frame decoding failed.
    #[error("reply decode failed: {0}")]
    Decode(String),
}

// ============================================================================
// SECTION: Endpoint Errors
// ============================================================================

/// Errors raised by reply endpoint binding and frame exchange.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// Bind address failed to parse as a scheme-qualified address.
    #[error("invalid bind address {address}: {reason}")]
    InvalidAddress {
        /// Offending address string.
        address: String,
        /// Parse failure description.
        reason: String,
    },
    /// Another endpoint is already bound at the address.
    #[error("address already bound: {address}")]
    AddressInUse {
        /// Contended address string.
        address: String,
    },
    /// No endpoint is bound at the address.
    #[error("address not bound: {address}")]
    NotBound {
        /// Requested address string.
        address: String,
    },
    /// The service side of the binding was already taken.
    #[error("address already connected: {address}")]
    AlreadyConnected {
        /// Contended address string.
        address: String,
    },
    /// Frame send failed.
    #[error("frame send failed: {0}")]
    Send(String),
    /// Frame receive failed.
    #[error("frame receive failed: {0}")]
    Receive(String),
}

// ============================================================================
// SECTION: Runtime Call Errors
// ============================================================================

/// Errors raised by runtime call execution.
///
/// # Invariants
/// - `Timeout` identifies the unreachable callee triple.
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeCallError {
    /// No reply arrived within the configured window.
    #[error(
        "runtime call to service {service} ({version}) action {action} \
         timed out after {timeout_ms} ms"
    )]
    Timeout {
        /// Target service name.
        service: String,
        /// Target service version.
        version: String,
        /// Target action name.
        action: String,
        /// Expired window in milliseconds.
        timeout_ms: u64,
    },
    /// A call is already in flight on this transport instance.
    #[error("runtime call already in flight on this transport")]
    InFlight,
    /// Endpoint binding or frame exchange failed.
    #[error("endpoint failure: {0}")]
    Endpoint(#[from] EndpointError),
    /// Envelope encoding or reply decoding failed.
    #[error("codec failure: {0}")]
    Codec(#[from] CodecError),
}

// crates/crosscall-transport/src/envelope.rs
// ============================================================================
// Module: Crosscall Runtime Envelope
// Description: Wire envelope built per runtime call.
// Purpose: Carry the caller identity, callee tuple, and forwarded payloads.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`RuntimeEnvelope`] is built once per call and discarded with it. The
//! serialized shape is the documented nested mapping: a `meta.service` tag
//! and a `runtime-call` command whose arguments carry the calling action
//! identity, the `[service, version, action]` callee sequence, the caller's
//! transport-state snapshot, and the forwarded params and files.
//! Invariants:
//! - Field names and the command name are stable wire contracts.
//! - The envelope is never mutated after construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Wire Constants
// ============================================================================

/// Protocol version control byte sent as the first frame.
pub const PROTOCOL_VERSION: u8 = 0x01;

/// Command name for runtime calls.
pub const RUNTIME_CALL_COMMAND: &str = "runtime-call";

/// Meta scope tag marking service-originated commands.
pub const SERVICE_SCOPE: &str = "service";

// ============================================================================
// SECTION: Identities
// ============================================================================

/// Identity of the calling action.
///
/// # Invariants
/// - All fields are non-empty for envelopes built by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionIdentity {
    /// Calling service name.
    pub service: String,
    /// Calling service version.
    pub version: String,
    /// Calling action name.
    pub action: String,
}

impl ActionIdentity {
    /// Creates a calling action identity.
    #[must_use]
    pub fn new(
        service: impl Into<String>,
        version: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
            action: action.into(),
        }
    }
}

/// Callee tuple identifying the remote action to invoke.
///
/// # Invariants
/// - Serializes as the `[service, version, action]` sequence on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalleeTarget {
    /// Target service name.
    pub service: String,
    /// Target service version.
    pub version: String,
    /// Target action name.
    pub action: String,
}

impl CalleeTarget {
    /// Creates a callee target tuple.
    #[must_use]
    pub fn new(
        service: impl Into<String>,
        version: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
            action: action.into(),
        }
    }

    /// Returns the wire sequence form of the tuple.
    #[must_use]
    pub fn as_sequence(&self) -> (String, String, String) {
        (self.service.clone(), self.version.clone(), self.action.clone())
    }
}

// ============================================================================
// SECTION: Envelope
// ============================================================================

/// Meta block tagging the command scope.
///
/// # Invariants
/// - `service` always holds [`SERVICE_SCOPE`] for runtime calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    /// Command scope tag.
    pub service: String,
}

/// Arguments block of the runtime call command.
///
/// # Invariants
/// - `callee` serializes as a three-element sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandArguments {
    /// Calling action identity.
    pub action: ActionIdentity,
    /// Callee tuple as a `[service, version, action]` sequence.
    pub callee: (String, String, String),
    /// Caller's transport-state snapshot.
    pub transport: Value,
    /// Forwarded parameter list.
    pub params: Vec<Value>,
    /// Forwarded file list.
    pub files: Vec<Value>,
}

/// Command block of the envelope.
///
/// # Invariants
/// - `name` always holds [`RUNTIME_CALL_COMMAND`] for runtime calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeCommand {
    /// Command name.
    pub name: String,
    /// Command arguments.
    pub arguments: CommandArguments,
}

/// Wire envelope built per runtime call.
///
/// # Invariants
/// - Built once per call; never reused across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeEnvelope {
    /// Meta block.
    pub meta: EnvelopeMeta,
    /// Command block.
    pub command: EnvelopeCommand,
}

impl RuntimeEnvelope {
    /// Builds the envelope for one runtime call.
    #[must_use]
    pub fn for_call(
        caller: ActionIdentity,
        callee: &CalleeTarget,
        transport: Value,
        params: Vec<Value>,
        files: Vec<Value>,
    ) -> Self {
        Self {
            meta: EnvelopeMeta {
                service: SERVICE_SCOPE.to_string(),
            },
            command: EnvelopeCommand {
                name: RUNTIME_CALL_COMMAND.to_string(),
                arguments: CommandArguments {
                    action: caller,
                    callee: callee.as_sequence(),
                    transport,
                    params,
                    files,
                },
            },
        }
    }
}

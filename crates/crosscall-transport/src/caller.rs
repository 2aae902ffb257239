// crates/crosscall-transport/src/caller.rs
// ============================================================================
// Module: Crosscall Calling Action Contract
// Description: Collaborator contract for the action issuing a runtime call.
// Purpose: Provide identity, transport snapshot, and the reply entry point.
// Dependencies: serde_json, crate::{envelope, error}
// ============================================================================

//! ## Overview
//! The calling action is external to the transport. It exposes its identity,
//! a serializable snapshot of its transport state, and one entry point that
//! receives the call outcome. Successes and failures travel through the
//! same entry point, distinguished by the [`ReplyOutcome`] variant, so
//! callers have one place to handle both.
//! Invariants:
//! - `process_reply` is invoked exactly once per completed call.
//! - The transport never interprets the snapshot or the decoded reply.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::envelope::ActionIdentity;
use crate::error::RuntimeCallError;

// ============================================================================
// SECTION: Reply Outcome
// ============================================================================

/// Outcome of one runtime call, delivered through the caller's entry point.
///
/// # Invariants
/// - Exactly one outcome exists per completed call.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyOutcome {
    /// Decoded reply payload.
    Reply(Value),
    /// Terminal call failure (timeout, endpoint, or decode error).
    Failure(RuntimeCallError),
}

impl ReplyOutcome {
    /// Returns true for the reply variant.
    #[must_use]
    pub const fn is_reply(&self) -> bool {
        matches!(self, Self::Reply(_))
    }
}

// ============================================================================
// SECTION: Calling Action Contract
// ============================================================================

/// Contract implemented by the action issuing a runtime call.
pub trait CallingAction: Send + Sync {
    /// Returns the calling action identity embedded in the envelope.
    fn identity(&self) -> ActionIdentity;

    /// Returns a snapshot of the calling action's transport state.
    fn transport_snapshot(&self) -> Value;

    /// Receives the call outcome; all further interpretation happens here.
    fn process_reply(&self, outcome: ReplyOutcome);
}

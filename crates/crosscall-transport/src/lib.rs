// crates/crosscall-transport/src/lib.rs
// ============================================================================
// Module: Crosscall Transport Library
// Description: Synchronous cross-service runtime call client.
// Purpose: Build envelopes, race replies against timeouts, deliver outcomes.
// Dependencies: async-trait, rmp-serde, serde, serde_json, thiserror, tokio, url
// ============================================================================

//! ## Overview
//! Crosscall Transport performs exactly one synchronous cross-service call
//! per invocation: it binds a reply endpoint at a caller-supplied address,
//! sends the control byte and the encoded envelope, and races the single
//! reply frame against a one-shot timeout. The broker binding and the
//! binary codec stay behind trait seams with in-process reference
//! implementations.
//! Invariants:
//! - Exactly one outcome reaches the calling action per completed call.
//! - Bound endpoints are released on every exit path.
//! - No retries: a timed-out call is terminal.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod call;
pub mod caller;
pub mod codec;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod telemetry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use call::RuntimeCall;
pub use caller::CallingAction;
pub use caller::ReplyOutcome;
pub use codec::EnvelopeCodec;
pub use codec::MsgpackCodec;
pub use endpoint::ChannelBinder;
pub use endpoint::FrameBatch;
pub use endpoint::ReplyBinder;
pub use endpoint::ReplyEndpoint;
pub use endpoint::ServiceChannel;
pub use envelope::ActionIdentity;
pub use envelope::CalleeTarget;
pub use envelope::PROTOCOL_VERSION;
pub use envelope::RUNTIME_CALL_COMMAND;
pub use envelope::RuntimeEnvelope;
pub use error::CodecError;
pub use error::EndpointError;
pub use error::RuntimeCallError;
pub use telemetry::CALL_LATENCY_BUCKETS_MS;
pub use telemetry::CallMetricEvent;
pub use telemetry::CallOutcome;
pub use telemetry::CallTelemetry;
pub use telemetry::NoopTelemetry;

// crates/crosscall-transport/src/call.rs
// ============================================================================
// Module: Crosscall Runtime Call
// Description: Single synchronous cross-service call with a timeout race.
// Purpose: Deliver exactly one outcome per call and release every resource.
// Dependencies: serde_json, tokio, crate::{caller, codec, endpoint, envelope, error, telemetry}
// ============================================================================

//! ## Overview
//! [`RuntimeCall`] performs exactly one synchronous cross-service call:
//! build the envelope, bind the reply endpoint, send the two-frame message,
//! and race the reply against a one-shot timeout. Whichever completes first
//! wins; the loser is cancelled and can never deliver. The bound endpoint
//! is a scoped resource released on every exit path.
//! Invariants:
//! - Exactly one [`ReplyOutcome`] reaches the caller per completed call.
//! - A reply arriving after the timeout is discarded, never delivered.
//! - An instance refuses a second call while one is in flight.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

use serde_json::Value;

use crate::caller::CallingAction;
use crate::caller::ReplyOutcome;
use crate::codec::EnvelopeCodec;
use crate::endpoint::ReplyBinder;
use crate::envelope::CalleeTarget;
use crate::envelope::PROTOCOL_VERSION;
use crate::envelope::RuntimeEnvelope;
use crate::error::RuntimeCallError;
use crate::telemetry::CallMetricEvent;
use crate::telemetry::CallOutcome;
use crate::telemetry::CallTelemetry;
use crate::telemetry::NoopTelemetry;

// ============================================================================
// SECTION: In-Flight Guard
// ============================================================================

/// One-shot in-flight marker released when the call completes.
///
/// # Invariants
/// - Acquisition fails while another guard is alive on the same flag.
struct InFlightGuard<'a> {
    /// Shared in-flight flag on the owning transport.
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    /// Acquires the flag, refusing when a call is already in flight.
    fn acquire(flag: &'a AtomicBool) -> Result<Self, RuntimeCallError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| RuntimeCallError::InFlight)?;
        Ok(Self {
            flag,
        })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// ============================================================================
// SECTION: Runtime Call Transport
// ============================================================================

/// Transport performing one synchronous cross-service call.
///
/// # Invariants
/// - At most one call is in flight per instance.
/// - The binder and codec seams are never invoked after the call returns.
pub struct RuntimeCall {
    /// Binder providing per-call reply endpoints.
    binder: Arc<dyn ReplyBinder>,
    /// Codec for envelope encoding and reply decoding.
    codec: Arc<dyn EnvelopeCodec>,
    /// Telemetry sink for call metrics.
    telemetry: Arc<dyn CallTelemetry>,
    /// In-flight marker enforcing one call per instance.
    in_flight: AtomicBool,
}

impl RuntimeCall {
    /// Creates a transport over the given binder and codec.
    #[must_use]
    pub fn new(binder: impl ReplyBinder + 'static, codec: impl EnvelopeCodec + 'static) -> Self {
        Self {
            binder: Arc::new(binder),
            codec: Arc::new(codec),
            telemetry: Arc::new(NoopTelemetry),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Replaces the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: impl CallTelemetry + 'static) -> Self {
        self.telemetry = Arc::new(telemetry);
        self
    }

    /// Performs one synchronous cross-service call.
    ///
    /// Once the reply/timeout race has run, exactly one [`ReplyOutcome`] is
    /// delivered through the caller's entry point and the call returns
    /// `Ok`. Timeout, endpoint, and decode failures after send travel
    /// inside [`ReplyOutcome::Failure`] so callers handle both outcomes in
    /// one place.
    ///
    /// # Errors
    ///
    /// Returns an error only for pre-flight failures that deliver no
    /// outcome: [`RuntimeCallError::InFlight`] when a call is already
    /// running on this instance, and bind, encode, or send failures.
    pub async fn call(
        &self,
        caller: &dyn CallingAction,
        callee: &CalleeTarget,
        bind_address: &str,
        params: Vec<Value>,
        files: Vec<Value>,
        timeout: Duration,
    ) -> Result<(), RuntimeCallError> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        let envelope = RuntimeEnvelope::for_call(
            caller.identity(),
            callee,
            caller.transport_snapshot(),
            params,
            files,
        );
        let encoded = self.codec.encode(&envelope)?;
        let request_bytes = encoded.len();
        let mut endpoint = self.binder.bind(bind_address)?;
        endpoint.send(vec![vec![PROTOCOL_VERSION], encoded]).await?;
        let started = Instant::now();
        let outcome = match tokio::time::timeout(timeout, endpoint.recv()).await {
            Ok(Ok(frame)) => match self.codec.decode(&frame) {
                Ok(value) => ReplyOutcome::Reply(value),
                Err(err) => ReplyOutcome::Failure(RuntimeCallError::Codec(err)),
            },
            Ok(Err(err)) => ReplyOutcome::Failure(RuntimeCallError::Endpoint(err)),
            Err(_elapsed) => ReplyOutcome::Failure(RuntimeCallError::Timeout {
                service: callee.service.clone(),
                version: callee.version.clone(),
                action: callee.action.clone(),
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        };
        drop(endpoint);
        let event = CallMetricEvent {
            service: callee.service.clone(),
            version: callee.version.clone(),
            action: callee.action.clone(),
            outcome: outcome_label(&outcome),
            request_bytes,
        };
        self.telemetry.record_call(event.clone());
        self.telemetry.record_latency(event, started.elapsed());
        caller.process_reply(outcome);
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Classifies an outcome for telemetry labeling.
const fn outcome_label(outcome: &ReplyOutcome) -> CallOutcome {
    match outcome {
        ReplyOutcome::Reply(_) => CallOutcome::Reply,
        ReplyOutcome::Failure(RuntimeCallError::Timeout {
            ..
        }) => CallOutcome::Timeout,
        ReplyOutcome::Failure(_) => CallOutcome::Error,
    }
}

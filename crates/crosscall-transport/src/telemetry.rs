// crates/crosscall-transport/src/telemetry.rs
// ============================================================================
// Module: Crosscall Call Telemetry
// Description: Observability hooks for runtime call execution.
// Purpose: Provide metric events and latency buckets without hard deps.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for runtime call counters
//! and latency histograms. It is intentionally dependency-light so
//! downstream deployments can plug in Prometheus or OpenTelemetry without
//! redesign.
//! Invariants:
//! - Labels are stable for telemetry aggregation.
//! - Telemetry must never observe payload contents, only sizes and labels.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default latency buckets in milliseconds for runtime call histograms.
pub const CALL_LATENCY_BUCKETS_MS: &[u64] =
    &[1, 2, 5, 10, 25, 50, 100, 250, 500, 1_000, 2_500, 5_000, 10_000, 30_000];

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// Runtime call outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// Reply decoded and delivered.
    Reply,
    /// Timer expired before a reply arrived.
    Timeout,
    /// Endpoint or decode failure after send.
    Error,
}

impl CallOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reply => "reply",
            Self::Timeout => "timeout",
            Self::Error => "error",
        }
    }
}

/// Runtime call metric event payload.
///
/// # Invariants
/// - Labels identify the callee, never the payload contents.
#[derive(Debug, Clone)]
pub struct CallMetricEvent {
    /// Target service name.
    pub service: String,
    /// Target service version.
    pub version: String,
    /// Target action name.
    pub action: String,
    /// Call outcome.
    pub outcome: CallOutcome,
    /// Encoded request envelope size in bytes.
    pub request_bytes: usize,
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Metrics sink for runtime calls and latencies.
pub trait CallTelemetry: Send + Sync {
    /// Records a call counter event.
    fn record_call(&self, event: CallMetricEvent);
    /// Records a latency observation for the call.
    fn record_latency(&self, event: CallMetricEvent, latency: Duration);
}

/// No-op metrics sink.
///
/// # Invariants
/// - Metrics are intentionally discarded.
pub struct NoopTelemetry;

impl CallTelemetry for NoopTelemetry {
    fn record_call(&self, _event: CallMetricEvent) {}

    fn record_latency(&self, _event: CallMetricEvent, _latency: Duration) {}
}

// crates/crosscall-schema/src/error.rs
// ============================================================================
// Module: Crosscall Schema Errors
// Description: Error taxonomy for schema construction and resolution.
// Purpose: Report missing declarations and malformed mappings with context.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Schema errors split into two families: resolution errors raised at lookup
//! time (a requested param, file, entity segment, or action is not declared)
//! and malformed-mapping errors raised at construction time when a present
//! field cannot be interpreted as its declared shape.
//! Invariants:
//! - Every variant carries enough context (action or service name plus the
//!   offending key or path) to diagnose the failure without a stack trace.
//! - Absent fields never produce errors; they take documented defaults.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Schema Errors
// ============================================================================

/// Errors raised by schema construction and lookup operations.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Requested parameter is not declared on the action.
    #[error("action {action} has no parameter named {name}")]
    ParamMissing {
        /// Action whose parameters were consulted.
        action: String,
        /// Requested parameter name.
        name: String,
    },
    /// Requested file is not declared on the action.
    #[error("action {action} has no file named {name}")]
    FileMissing {
        /// Action whose files were consulted.
        action: String,
        /// Requested file name.
        name: String,
    },
    /// Entity path resolution failed on a missing segment.
    #[error("action {action} cannot resolve entity path {path}: missing segment {segment}")]
    EntityPath {
        /// Action whose entity descriptor drove the resolution.
        action: String,
        /// Full configured entity path.
        path: String,
        /// First path segment absent from the data.
        segment: String,
    },
    /// Requested action is not declared in the service definition.
    #[error("service {service} has no action named {action}")]
    ActionMissing {
        /// Service whose definition was consulted.
        service: String,
        /// Requested action name.
        action: String,
    },
    /// A present mapping field could not be interpreted as its declared shape.
    #[error("malformed schema mapping for action {action}: {reason}")]
    Malformed {
        /// Action being constructed.
        action: String,
        /// Interpretation failure description.
        reason: String,
    },
    /// A service definition could not be loaded or interpreted.
    #[error("malformed service definition for {service}: {reason}")]
    Definition {
        /// Service whose definition failed to load.
        service: String,
        /// Interpretation failure description.
        reason: String,
    },
}

// crates/crosscall-schema/src/lib.rs
// ============================================================================
// Module: Crosscall Schema Library
// Description: Action schema model for cross-service runtime calls.
// Purpose: Parse service definitions and serve lookup and predicate queries.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Crosscall Schema models the descriptor for one callable action: its
//! parameters, files, entity location, relations, tags, declared call
//! permissions, and timeout. Schemas are built once from a static service
//! definition at startup and shared read-only across concurrently handled
//! requests.
//! Invariants:
//! - Absent mapping fields take documented defaults; present fields that
//!   cannot be interpreted fail construction.
//! - Lookup failures carry the action name and the missing key or path.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod action;
pub mod calls;
pub mod definition;
pub mod entity;
pub mod error;
pub mod kind;
pub mod metadata;
pub mod param;
pub mod relation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use action::ActionSchema;
pub use action::DEFAULT_TIMEOUT_MS;
pub use calls::CallDescriptor;
pub use calls::RemoteCallDescriptor;
pub use definition::ServiceDefinition;
pub use entity::EntityDescriptor;
pub use error::SchemaError;
pub use kind::ValueKind;
pub use metadata::HttpActionSchema;
pub use metadata::ReturnValueSchema;
pub use metadata::TransportFallbackSchema;
pub use param::FileSchema;
pub use param::ParamSchema;
pub use relation::RelationKind;
pub use relation::RelationSchema;

// crates/crosscall-schema/src/metadata.rs
// ============================================================================
// Module: Crosscall Action Metadata Schemas
// Description: Return value, HTTP, and transport fallback sub-schemas.
// Purpose: Carry declared result kinds and opaque per-action metadata.
// Dependencies: serde, serde_json, crate::kind
// ============================================================================

//! ## Overview
//! The return value schema declares the kind of an action's result. HTTP and
//! transport fallback metadata are opaque to this crate: their mappings are
//! stored verbatim and interpreted by outer layers.
//! Invariants:
//! - Opaque mappings are never normalized or rewritten.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use crate::kind::ValueKind;

// ============================================================================
// SECTION: Return Value Schema
// ============================================================================

/// Declared kind of an action's return value.
///
/// # Invariants
/// - Absent `type` defaults to string, matching parameter kind defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ReturnValueSchema {
    /// Declared result kind.
    #[serde(rename = "type", default)]
    kind: ValueKind,
}

impl ReturnValueSchema {
    /// Returns the declared result kind.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }
}

// ============================================================================
// SECTION: HTTP Action Schema
// ============================================================================

/// Opaque HTTP metadata declared for an action.
///
/// # Invariants
/// - The mapping is stored verbatim; this crate assigns it no semantics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct HttpActionSchema {
    /// Raw HTTP metadata mapping.
    mapping: Map<String, Value>,
}

impl HttpActionSchema {
    /// Returns the raw HTTP metadata mapping.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.mapping
    }

    /// Returns one metadata value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.mapping.get(key)
    }
}

// ============================================================================
// SECTION: Transport Fallback Schema
// ============================================================================

/// Opaque transport fallback payload declared for an action.
///
/// # Invariants
/// - The mapping is stored verbatim; this crate assigns it no semantics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TransportFallbackSchema {
    /// Raw fallback payload mapping.
    mapping: Map<String, Value>,
}

impl TransportFallbackSchema {
    /// Returns the raw fallback payload mapping.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.mapping
    }

    /// Returns one fallback value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.mapping.get(key)
    }
}

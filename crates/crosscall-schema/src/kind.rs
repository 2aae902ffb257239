// crates/crosscall-schema/src/kind.rs
// ============================================================================
// Module: Crosscall Value Kinds
// Description: Declared value kinds for parameters and return values.
// Purpose: Provide stable wire labels and conformance checks for JSON values.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`ValueKind`] names the value shapes a schema may declare for parameters
//! and return values. Labels are stable lowercase strings on the wire.
//! Invariants:
//! - Variants are stable for serialization and contract matching.
//! - `matches` accepts any numeric JSON value for `Float`; `Integer` is
//!   restricted to values without a fractional representation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Value Kind
// ============================================================================

/// Declared value kind for a parameter or return value.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// JSON null.
    Null,
    /// Boolean value.
    Boolean,
    /// Integer value (no fractional part).
    Integer,
    /// Floating point value; accepts any numeric value.
    Float,
    /// UTF-8 string value.
    #[default]
    String,
    /// Array value.
    Array,
    /// Object (mapping) value.
    Object,
    /// Binary payload, carried as an encoded string.
    Binary,
}

impl ValueKind {
    /// Returns the stable lowercase label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Binary => "binary",
        }
    }

    /// Returns true when the JSON value conforms to the declared kind.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Null => value.is_null(),
            Self::Boolean => value.is_boolean(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Float => value.is_number(),
            Self::String | Self::Binary => value.is_string(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

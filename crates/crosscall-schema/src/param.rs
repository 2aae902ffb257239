// crates/crosscall-schema/src/param.rs
// ============================================================================
// Module: Crosscall Parameter and File Schemas
// Description: Typed schemas for declared action parameters and files.
// Purpose: Parse per-name sub-mappings and check candidate values.
// Dependencies: serde, serde_json, crate::kind
// ============================================================================

//! ## Overview
//! Parameters and files are declared per action in sub-mappings keyed by
//! name; the name is taken from the containing key, never from a field
//! inside the value. Every field not present takes its documented default so
//! partial and older definitions remain loadable.
//! Invariants:
//! - `name` is unique within the owning action (map-keyed source).
//! - Schemas are immutable once the owning action is constructed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Value;

use crate::kind::ValueKind;

// ============================================================================
// SECTION: Parameter Schema
// ============================================================================

/// Schema for one declared action parameter.
///
/// # Invariants
/// - `name` matches the key the schema was declared under.
/// - Absent fields hold their documented defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParamSchema {
    /// Parameter name, injected from the containing map key.
    #[serde(skip)]
    name: String,
    /// Declared value kind; defaults to string.
    #[serde(rename = "type", default)]
    kind: ValueKind,
    /// Indicates the parameter must be supplied.
    #[serde(default)]
    required: bool,
    /// Default value applied when the parameter is absent.
    #[serde(default)]
    default: Option<Value>,
    /// Permits empty strings, arrays, and objects.
    #[serde(default)]
    allow_empty: bool,
    /// Closed set of accepted values; empty means unrestricted.
    #[serde(rename = "enum", default)]
    allowed: Vec<Value>,
}

impl ParamSchema {
    /// Injects the declaration name taken from the containing map key.
    pub(crate) fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared value kind.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Returns true when the parameter must be supplied.
    #[must_use]
    pub const fn required(&self) -> bool {
        self.required
    }

    /// Returns the default value applied when the parameter is absent.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns true when empty strings, arrays, and objects are accepted.
    #[must_use]
    pub const fn allow_empty(&self) -> bool {
        self.allow_empty
    }

    /// Returns the closed set of accepted values (empty means unrestricted).
    #[must_use]
    pub fn allowed(&self) -> &[Value] {
        &self.allowed
    }

    /// Returns true when the candidate value conforms to this schema.
    ///
    /// Conformance covers the declared kind, the empty-value rule, and the
    /// closed value set when one is declared. Absence is handled by the
    /// caller through [`ParamSchema::required`].
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        if !self.kind.matches(value) {
            return false;
        }
        if !self.allow_empty && is_empty_value(value) {
            return false;
        }
        if !self.allowed.is_empty() && !self.allowed.contains(value) {
            return false;
        }
        true
    }
}

// ============================================================================
// SECTION: File Schema
// ============================================================================

/// Default mime type for declared files.
const DEFAULT_FILE_MIME: &str = "text/plain";

/// Returns the default mime type for declared files.
fn default_mime() -> String {
    DEFAULT_FILE_MIME.to_string()
}

/// Schema for one declared action file.
///
/// # Invariants
/// - `name` matches the key the schema was declared under.
/// - Absent fields hold their documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileSchema {
    /// File name, injected from the containing map key.
    #[serde(skip)]
    name: String,
    /// Declared mime type; defaults to `text/plain`.
    #[serde(default = "default_mime")]
    mime: String,
    /// Indicates the file must be supplied.
    #[serde(default)]
    required: bool,
    /// Optional maximum payload size in bytes.
    #[serde(default)]
    max_bytes: Option<u64>,
}

impl FileSchema {
    /// Injects the declaration name taken from the containing map key.
    pub(crate) fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Returns the file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared mime type.
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Returns true when the file must be supplied.
    #[must_use]
    pub const fn required(&self) -> bool {
        self.required
    }

    /// Returns the optional maximum payload size in bytes.
    #[must_use]
    pub const fn max_bytes(&self) -> Option<u64> {
        self.max_bytes
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true for empty strings, arrays, and objects.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;

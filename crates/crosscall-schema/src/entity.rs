// crates/crosscall-schema/src/entity.rs
// ============================================================================
// Module: Crosscall Entity Descriptor
// Description: Entity location and shape metadata for action response data.
// Purpose: Locate the primary result inside arbitrary nested response data.
// Dependencies: serde, serde_json, crate::error
// ============================================================================

//! ## Overview
//! An [`EntityDescriptor`] tells action code where the primary result lives
//! inside response data: a delimiter-joined path descended one segment at a
//! time. An empty path means no resolution is needed and data passes through
//! unchanged.
//! Invariants:
//! - `delimiter` is never empty once the owning action is constructed.
//! - Resolution fails on the first absent segment, never partway silently.
//! - Descent treats every level as a mapping; arrays are not special-cased.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::SchemaError;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default path delimiter for entity resolution.
const DEFAULT_DELIMITER: &str = "/";

/// Default primary key name for entity records.
const DEFAULT_PRIMARY_KEY: &str = "id";

/// Returns the default path delimiter.
fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

/// Returns the default primary key name.
fn default_primary_key() -> String {
    DEFAULT_PRIMARY_KEY.to_string()
}

// ============================================================================
// SECTION: Entity Descriptor
// ============================================================================

/// Entity location and shape metadata for one action.
///
/// # Invariants
/// - An empty `path` means no resolution is configured.
/// - `definition` is opaque to this crate and stored verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntityDescriptor {
    /// Delimiter-joined path to the entity inside response data.
    #[serde(rename = "entity_path", default)]
    path: String,
    /// Delimiter splitting `path` into segments.
    #[serde(rename = "path_delimiter", default = "default_delimiter")]
    delimiter: String,
    /// Primary key name for entity records.
    #[serde(rename = "primary_key", default = "default_primary_key")]
    primary_key: String,
    /// Indicates the action returns a collection of entities.
    #[serde(default)]
    collection: bool,
    /// Declared entity shape, stored verbatim.
    #[serde(rename = "entity", default)]
    definition: Map<String, Value>,
}

impl Default for EntityDescriptor {
    fn default() -> Self {
        Self {
            path: String::new(),
            delimiter: default_delimiter(),
            primary_key: default_primary_key(),
            collection: false,
            definition: Map::new(),
        }
    }
}

impl EntityDescriptor {
    /// Returns the configured entity path (empty means no resolution).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the configured path delimiter.
    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Returns the primary key name for entity records.
    #[must_use]
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Returns true when the action returns a collection of entities.
    #[must_use]
    pub const fn collection(&self) -> bool {
        self.collection
    }

    /// Returns the declared entity shape mapping.
    #[must_use]
    pub const fn definition(&self) -> &Map<String, Value> {
        &self.definition
    }

    /// Returns true when an entity shape is declared.
    #[must_use]
    pub fn has_definition(&self) -> bool {
        !self.definition.is_empty()
    }

    /// Validates descriptor fields that cannot be checked by deserialization.
    pub(crate) fn validate(&self, action: &str) -> Result<(), SchemaError> {
        if self.delimiter.is_empty() {
            return Err(SchemaError::Malformed {
                action: action.to_string(),
                reason: "path_delimiter must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Resolves the entity inside `data` by descending the configured path.
    ///
    /// An empty path returns `data` unchanged. Each segment is looked up as
    /// a mapping key at the current level.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EntityPath`] on the first absent segment.
    pub(crate) fn resolve<'a>(
        &self,
        action: &str,
        data: &'a Value,
    ) -> Result<&'a Value, SchemaError> {
        if self.path.is_empty() {
            return Ok(data);
        }
        let mut current = data;
        for segment in self.path.split(self.delimiter.as_str()) {
            current = current.get(segment).ok_or_else(|| SchemaError::EntityPath {
                action: action.to_string(),
                path: self.path.clone(),
                segment: segment.to_string(),
            })?;
        }
        Ok(current)
    }
}

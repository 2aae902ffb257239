// crates/crosscall-schema/src/definition.rs
// ============================================================================
// Module: Crosscall Service Definition
// Description: Startup loader for a service's compiled action definitions.
// Purpose: Build every action schema once and serve them by name.
// Dependencies: serde, serde_json, crate::{action, error}
// ============================================================================

//! ## Overview
//! A [`ServiceDefinition`] holds every [`ActionSchema`] for one service
//! version, built once at startup from a compiled definition mapping and
//! shared read-only afterwards. Loading accepts an in-memory mapping, a
//! JSON string, or a file path.
//! Invariants:
//! - Action names are unique (map-keyed source).
//! - The definition is immutable after construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::action::ActionSchema;
use crate::error::SchemaError;

// ============================================================================
// SECTION: Raw Mapping Shape
// ============================================================================

/// Raw deserialization shape for a service definition mapping.
///
/// # Invariants
/// - `actions` sub-mappings are keyed by action name.
#[derive(Debug, Deserialize)]
struct DefinitionMapping {
    /// Action mappings keyed by action name.
    #[serde(default)]
    actions: BTreeMap<String, Value>,
}

// ============================================================================
// SECTION: Service Definition
// ============================================================================

/// Compiled action schemas for one service version.
///
/// # Invariants
/// - Immutable after construction; safely shared across requests.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDefinition {
    /// Service name.
    service: String,
    /// Service version.
    version: String,
    /// Action schemas keyed by unique action name.
    actions: BTreeMap<String, ActionSchema>,
}

impl ServiceDefinition {
    /// Builds the definition from one nested generic mapping.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Definition`] when the mapping shape is not
    /// interpretable, or the underlying [`SchemaError::Malformed`] when one
    /// of the contained actions fails to parse.
    pub fn from_mapping(
        service: &str,
        version: &str,
        mapping: &Value,
    ) -> Result<Self, SchemaError> {
        let raw: DefinitionMapping =
            serde_json::from_value(mapping.clone()).map_err(|err| SchemaError::Definition {
                service: service.to_string(),
                reason: err.to_string(),
            })?;
        let mut actions = BTreeMap::new();
        for (name, action_mapping) in raw.actions {
            let schema = ActionSchema::from_mapping(&name, &action_mapping)?;
            actions.insert(name, schema);
        }
        Ok(Self {
            service: service.to_string(),
            version: version.to_string(),
            actions,
        })
    }

    /// Builds the definition from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Definition`] when the string is not valid
    /// JSON, plus every error [`ServiceDefinition::from_mapping`] reports.
    pub fn from_json_str(service: &str, version: &str, json: &str) -> Result<Self, SchemaError> {
        let mapping: Value =
            serde_json::from_str(json).map_err(|err| SchemaError::Definition {
                service: service.to_string(),
                reason: err.to_string(),
            })?;
        Self::from_mapping(service, version, &mapping)
    }

    /// Builds the definition from a JSON file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Definition`] when the file cannot be read,
    /// plus every error [`ServiceDefinition::from_json_str`] reports.
    pub fn from_path(service: &str, version: &str, path: &Path) -> Result<Self, SchemaError> {
        let json = std::fs::read_to_string(path).map_err(|err| SchemaError::Definition {
            service: service.to_string(),
            reason: err.to_string(),
        })?;
        Self::from_json_str(service, version, &json)
    }

    /// Returns the service name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the service version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns true when an action with the given name is declared.
    #[must_use]
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Returns the schema for the named action.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ActionMissing`] when the action is not
    /// declared.
    pub fn action(&self, name: &str) -> Result<&ActionSchema, SchemaError> {
        self.actions.get(name).ok_or_else(|| SchemaError::ActionMissing {
            service: self.service.clone(),
            action: name.to_string(),
        })
    }

    /// Returns every declared action schema keyed by name.
    #[must_use]
    pub const fn actions(&self) -> &BTreeMap<String, ActionSchema> {
        &self.actions
    }
}

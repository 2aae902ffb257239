// crates/crosscall-schema/src/action.rs
// ============================================================================
// Module: Crosscall Action Schema
// Description: Full descriptor for one callable action.
// Purpose: Compose sub-schemas and expose lookup and predicate operations.
// Dependencies: serde, serde_json, crate::{calls, entity, error, kind, metadata, param, relation}
// ============================================================================

//! ## Overview
//! An [`ActionSchema`] composes every sub-schema declared for one callable
//! action and exposes the lookup and predicate surface request-handling code
//! consults. Construction is permissive: absent fields take documented
//! defaults so partial and older definitions remain loadable; a present
//! field that cannot be interpreted as its declared shape fails fast.
//! Invariants:
//! - Parameter and file names are unique within the action (map-keyed).
//! - `timeout_ms` is strictly positive.
//! - Instances are immutable and safely shared across concurrent requests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use crate::calls::CallDescriptor;
use crate::calls::RemoteCallDescriptor;
use crate::entity::EntityDescriptor;
use crate::error::SchemaError;
use crate::kind::ValueKind;
use crate::metadata::HttpActionSchema;
use crate::metadata::ReturnValueSchema;
use crate::metadata::TransportFallbackSchema;
use crate::param::FileSchema;
use crate::param::ParamSchema;
use crate::relation::RelationSchema;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default call timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 1_000;

/// Returns the default call timeout in milliseconds.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

// ============================================================================
// SECTION: Raw Mapping Shape
// ============================================================================

/// Raw deserialization shape for one action mapping.
///
/// # Invariants
/// - Every field is optional in the source; defaults are documented on
///   [`ActionSchema`] and the sub-schema types.
#[derive(Debug, Deserialize)]
struct ActionMapping {
    /// Call timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    timeout: u64,
    /// Deprecation flag.
    #[serde(default)]
    is_deprecated: bool,
    /// Entity descriptor fields, declared at the action mapping top level.
    #[serde(flatten)]
    entity: EntityDescriptor,
    /// Parameter sub-mappings keyed by name.
    #[serde(default)]
    params: BTreeMap<String, ParamSchema>,
    /// File sub-mappings keyed by name.
    #[serde(default)]
    files: BTreeMap<String, FileSchema>,
    /// Ordered relation declarations.
    #[serde(default)]
    relations: Vec<RelationSchema>,
    /// Tag set.
    #[serde(default)]
    tags: BTreeSet<String>,
    /// Declared local call permissions.
    #[serde(default)]
    calls: Vec<CallDescriptor>,
    /// Declared deferred call permissions.
    #[serde(default)]
    deferred_calls: Vec<CallDescriptor>,
    /// Declared remote call permissions.
    #[serde(default)]
    remote_calls: Vec<RemoteCallDescriptor>,
    /// Declared return value schema.
    #[serde(rename = "return", default)]
    return_value: Option<ReturnValueSchema>,
    /// Opaque HTTP metadata.
    #[serde(default)]
    http: Option<HttpActionSchema>,
    /// Opaque transport fallback payload.
    #[serde(default)]
    fallback: Option<TransportFallbackSchema>,
}

// ============================================================================
// SECTION: Action Schema
// ============================================================================

/// Full descriptor for one callable action.
///
/// # Invariants
/// - Immutable after construction; lookups never mutate.
/// - `timeout_ms` is strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSchema {
    /// Action name, unique within a service version.
    name: String,
    /// Call timeout in milliseconds.
    timeout_ms: u64,
    /// Deprecation flag.
    deprecated: bool,
    /// Entity descriptor.
    entity: EntityDescriptor,
    /// Parameter schemas keyed by unique name.
    params: BTreeMap<String, ParamSchema>,
    /// File schemas keyed by unique name.
    files: BTreeMap<String, FileSchema>,
    /// Ordered relation declarations.
    relations: Vec<RelationSchema>,
    /// Tag set.
    tags: BTreeSet<String>,
    /// Declared local call permissions.
    calls: Vec<CallDescriptor>,
    /// Declared deferred call permissions.
    deferred_calls: Vec<CallDescriptor>,
    /// Declared remote call permissions.
    remote_calls: Vec<RemoteCallDescriptor>,
    /// Declared return value schema.
    return_value: Option<ReturnValueSchema>,
    /// Opaque HTTP metadata.
    http: Option<HttpActionSchema>,
    /// Opaque transport fallback payload.
    fallback: Option<TransportFallbackSchema>,
}

impl ActionSchema {
    /// Builds the full schema tree from one nested generic mapping.
    ///
    /// Absent fields take their documented defaults. Parameter and file
    /// names are taken from the keys of their sub-mappings.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Malformed`] when a present field cannot be
    /// interpreted as its declared shape, when `timeout` is zero, or when
    /// `path_delimiter` is empty.
    pub fn from_mapping(name: &str, mapping: &Value) -> Result<Self, SchemaError> {
        let raw: ActionMapping =
            serde_json::from_value(mapping.clone()).map_err(|err| SchemaError::Malformed {
                action: name.to_string(),
                reason: err.to_string(),
            })?;
        if raw.timeout == 0 {
            return Err(SchemaError::Malformed {
                action: name.to_string(),
                reason: "timeout must be greater than zero".to_string(),
            });
        }
        raw.entity.validate(name)?;
        let params = raw
            .params
            .into_iter()
            .map(|(param_name, schema)| (param_name.clone(), schema.with_name(&param_name)))
            .collect();
        let files = raw
            .files
            .into_iter()
            .map(|(file_name, schema)| (file_name.clone(), schema.with_name(&file_name)))
            .collect();
        Ok(Self {
            name: name.to_string(),
            timeout_ms: raw.timeout,
            deprecated: raw.is_deprecated,
            entity: raw.entity,
            params,
            files,
            relations: raw.relations,
            tags: raw.tags,
            calls: raw.calls,
            deferred_calls: raw.deferred_calls,
            remote_calls: raw.remote_calls,
            return_value: raw.return_value,
            http: raw.http,
            fallback: raw.fallback,
        })
    }

    /// Returns the action name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the call timeout in milliseconds.
    #[must_use]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Returns true when the action is deprecated.
    #[must_use]
    pub const fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Returns true when the action returns a collection of entities.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        self.entity.collection()
    }

    /// Returns the configured entity path (empty means no resolution).
    #[must_use]
    pub fn entity_path(&self) -> &str {
        self.entity.path()
    }

    /// Returns the configured entity path delimiter.
    #[must_use]
    pub fn path_delimiter(&self) -> &str {
        self.entity.delimiter()
    }

    /// Returns the entity primary key name.
    #[must_use]
    pub fn primary_key(&self) -> &str {
        self.entity.primary_key()
    }

    /// Returns true when an entity shape is declared.
    #[must_use]
    pub fn has_entity(&self) -> bool {
        self.entity.has_definition()
    }

    /// Returns the entity descriptor.
    #[must_use]
    pub const fn entity(&self) -> &EntityDescriptor {
        &self.entity
    }

    /// Returns the declared entity shape mapping (empty when undeclared).
    #[must_use]
    pub const fn entity_definition(&self) -> &Map<String, Value> {
        self.entity.definition()
    }

    /// Resolves the entity inside `data` using the configured path.
    ///
    /// When no entity path is configured, `data` is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EntityPath`] naming this action when any path
    /// segment is absent from the data.
    pub fn resolve_entity<'a>(&self, data: &'a Value) -> Result<&'a Value, SchemaError> {
        self.entity.resolve(&self.name, data)
    }

    /// Returns true when a parameter with the given name is declared.
    #[must_use]
    pub fn has_param(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Returns the schema for the named parameter.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ParamMissing`] when the parameter is not
    /// declared.
    pub fn param_schema(&self, name: &str) -> Result<&ParamSchema, SchemaError> {
        self.params.get(name).ok_or_else(|| SchemaError::ParamMissing {
            action: self.name.clone(),
            name: name.to_string(),
        })
    }

    /// Returns every declared parameter schema keyed by name.
    #[must_use]
    pub const fn params(&self) -> &BTreeMap<String, ParamSchema> {
        &self.params
    }

    /// Returns true when a file with the given name is declared.
    #[must_use]
    pub fn has_file(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    /// Returns the schema for the named file.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::FileMissing`] when the file is not declared.
    pub fn file_schema(&self, name: &str) -> Result<&FileSchema, SchemaError> {
        self.files.get(name).ok_or_else(|| SchemaError::FileMissing {
            action: self.name.clone(),
            name: name.to_string(),
        })
    }

    /// Returns every declared file schema keyed by name.
    #[must_use]
    pub const fn files(&self) -> &BTreeMap<String, FileSchema> {
        &self.files
    }

    /// Returns true when the tag is declared on the action.
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains(name)
    }

    /// Returns the declared tag set.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Returns true when relations are declared.
    #[must_use]
    pub fn has_relations(&self) -> bool {
        !self.relations.is_empty()
    }

    /// Returns the ordered relation declarations.
    #[must_use]
    pub fn relations(&self) -> &[RelationSchema] {
        &self.relations
    }

    /// Returns true when a matching local call is declared.
    ///
    /// A declared descriptor matches iff every provided filter equals the
    /// corresponding descriptor field; absent filters act as wildcards.
    #[must_use]
    pub fn has_call(&self, service: &str, version: Option<&str>, action: Option<&str>) -> bool {
        self.calls.iter().any(|descriptor| descriptor.matches(service, version, action))
    }

    /// Returns true when a matching deferred call is declared.
    #[must_use]
    pub fn has_defer_call(
        &self,
        service: &str,
        version: Option<&str>,
        action: Option<&str>,
    ) -> bool {
        self.deferred_calls.iter().any(|descriptor| descriptor.matches(service, version, action))
    }

    /// Returns true when a matching remote call is declared.
    ///
    /// Remote matching additionally requires exact address equality.
    #[must_use]
    pub fn has_remote_call(
        &self,
        address: &str,
        service: &str,
        version: Option<&str>,
        action: Option<&str>,
    ) -> bool {
        self.remote_calls
            .iter()
            .any(|descriptor| descriptor.matches(address, service, version, action))
    }

    /// Returns the declared local call descriptors in order.
    #[must_use]
    pub fn calls(&self) -> &[CallDescriptor] {
        &self.calls
    }

    /// Returns the declared deferred call descriptors in order.
    #[must_use]
    pub fn deferred_calls(&self) -> &[CallDescriptor] {
        &self.deferred_calls
    }

    /// Returns the declared remote call descriptors in order.
    #[must_use]
    pub fn remote_calls(&self) -> &[RemoteCallDescriptor] {
        &self.remote_calls
    }

    /// Returns true when a return value schema is declared.
    #[must_use]
    pub const fn has_return(&self) -> bool {
        self.return_value.is_some()
    }

    /// Returns the declared return value kind, when present.
    #[must_use]
    pub fn return_kind(&self) -> Option<ValueKind> {
        self.return_value.map(|schema| schema.kind())
    }

    /// Returns the opaque HTTP metadata, when declared.
    #[must_use]
    pub const fn http_schema(&self) -> Option<&HttpActionSchema> {
        self.http.as_ref()
    }

    /// Returns the opaque transport fallback payload, when declared.
    #[must_use]
    pub const fn fallback_schema(&self) -> Option<&TransportFallbackSchema> {
        self.fallback.as_ref()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

// crates/crosscall-schema/src/relation.rs
// ============================================================================
// Module: Crosscall Relation Schemas
// Description: Declared relations between an action's entity and other services.
// Purpose: Parse ordered relation declarations with stable cardinality labels.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Relations declare how an action's entity links to entities owned by other
//! services. Declaration order is preserved.
//! Invariants:
//! - Variants are stable for serialization and contract matching.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Relation Cardinality
// ============================================================================

/// Cardinality of a declared relation.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    /// One related entity.
    #[default]
    One,
    /// Many related entities.
    Many,
}

impl RelationKind {
    /// Returns the stable lowercase label for the cardinality.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Many => "many",
        }
    }
}

// ============================================================================
// SECTION: Relation Schema
// ============================================================================

/// One declared relation to another service's entity.
///
/// # Invariants
/// - `name` identifies the related service and is required in the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelationSchema {
    /// Related service name.
    name: String,
    /// Relation cardinality; defaults to one.
    #[serde(rename = "type", default)]
    kind: RelationKind,
}

impl RelationSchema {
    /// Returns the related service name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the relation cardinality.
    #[must_use]
    pub const fn kind(&self) -> RelationKind {
        self.kind
    }
}

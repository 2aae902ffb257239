// crates/crosscall-schema/src/calls.rs
// ============================================================================
// Module: Crosscall Call Descriptors
// Description: Declared cross-service call permissions and matching.
// Purpose: Decide whether a candidate call is declared as permitted.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Call descriptors declare which cross-service calls an action may issue,
//! in three ordered sequences: local calls, deferred calls, and remote
//! calls. A query matches a descriptor iff every filter the query supplies
//! is present and equal on the descriptor; absent filters act as wildcards.
//! Invariants:
//! - Matching is an explicit all-provided-filters-pass conjunction per
//!   descriptor, with early exit on the first matching descriptor.
//! - Remote matching additionally requires exact address equality.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;

// ============================================================================
// SECTION: Call Descriptor
// ============================================================================

/// One declared local or deferred call permission.
///
/// # Invariants
/// - `service` is required; absent `version` or `action` means any.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallDescriptor {
    /// Target service name.
    service: String,
    /// Target service version; absent means any version.
    #[serde(default)]
    version: Option<String>,
    /// Target action name; absent means any action.
    #[serde(default)]
    action: Option<String>,
}

impl CallDescriptor {
    /// Returns the target service name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the target service version, when pinned.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the target action name, when pinned.
    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Returns true when every provided filter equals this descriptor.
    ///
    /// A filter left as `None` is a wildcard. A provided filter must be
    /// present and equal on the descriptor for the conjunction to hold.
    #[must_use]
    pub fn matches(&self, service: &str, version: Option<&str>, action: Option<&str>) -> bool {
        if self.service != service {
            return false;
        }
        if let Some(version) = version
            && self.version.as_deref() != Some(version)
        {
            return false;
        }
        if let Some(action) = action
            && self.action.as_deref() != Some(action)
        {
            return false;
        }
        true
    }
}

// ============================================================================
// SECTION: Remote Call Descriptor
// ============================================================================

/// One declared remote call permission with a public address.
///
/// # Invariants
/// - `address` and `service` are required; absent `version` or `action`
///   means any.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteCallDescriptor {
    /// Public address of the remote gateway.
    address: String,
    /// Target service name.
    service: String,
    /// Target service version; absent means any version.
    #[serde(default)]
    version: Option<String>,
    /// Target action name; absent means any action.
    #[serde(default)]
    action: Option<String>,
}

impl RemoteCallDescriptor {
    /// Returns the public address of the remote gateway.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the target service name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the target service version, when pinned.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the target action name, when pinned.
    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Returns true when the address matches exactly and every provided
    /// filter equals this descriptor.
    #[must_use]
    pub fn matches(
        &self,
        address: &str,
        service: &str,
        version: Option<&str>,
        action: Option<&str>,
    ) -> bool {
        if self.address != address {
            return false;
        }
        if self.service != service {
            return false;
        }
        if let Some(version) = version
            && self.version.as_deref() != Some(version)
        {
            return false;
        }
        if let Some(action) = action
            && self.action.as_deref() != Some(action)
        {
            return false;
        }
        true
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

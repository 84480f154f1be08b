// crates/access-gate-core/src/core/user.rs
// ============================================================================
// Module: User Access Record
// Description: Resolved per-session principal with scope and permissions.
// Purpose: Carry the normalized authority data consumed by filter and gate.
// Dependencies: serde, crate::core
// ============================================================================

//! ## Overview
//! [`UserAccessRecord`] is the normalized output of directory resolution. It
//! is created once per authenticated session, never mutated afterwards, and
//! discarded on sign-out. Every field is fully defaulted by the resolver; a
//! partial record is never constructed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::Email;
use crate::core::identifiers::HierarchyPath;
use crate::core::identifiers::RoleTitle;
use crate::core::permissions::PermissionFlags;
use crate::core::scope::AccessScope;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default organizational level when the stored value is absent or invalid.
pub const DEFAULT_LEVEL: i64 = 5;

/// Default role title when the stored value is absent.
pub const DEFAULT_ROLE_TITLE: &str = "User";

/// Serde default for [`UserAccessRecord::level`].
const fn default_level() -> i64 {
    DEFAULT_LEVEL
}

/// Serde default for [`UserAccessRecord::is_active`].
const fn default_true() -> bool {
    true
}

// ============================================================================
// SECTION: User Access Record
// ============================================================================

/// Resolved, session-scoped principal record.
///
/// # Invariants
/// - `email` is normalized (trimmed, lowercased).
/// - `level` is the raw stored value; scope derivation is the job of
///   [`AccessScope::from_level`], which treats out-of-range values as PLANT.
/// - `access_scope` is authoritative for filtering; it is either the stored
///   label (when it parses) or derived from `level`.
/// - Wire form is camelCase matching the backing store rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccessRecord {
    /// Normalized email address (unique lookup key).
    pub email: Email,
    /// Display name; defaults to the email local part.
    pub name: String,
    /// Role title keying the permission lookup; defaults to `"User"`.
    pub role_title: RoleTitle,
    /// Enterprise unit label, when assigned.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub enterprise: Option<String>,
    /// Segment unit label, when assigned.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub segment: Option<String>,
    /// Platform unit label, when assigned.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub platform: Option<String>,
    /// Division unit label, when assigned.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub division: Option<String>,
    /// Plant unit label, when assigned.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub plant: Option<String>,
    /// Position in the organizational tree; may be empty.
    #[serde(rename = "hierarchyString", default)]
    pub hierarchy: HierarchyPath,
    /// Numeric organizational level; lower is broader.
    #[serde(default = "default_level")]
    pub level: i64,
    /// Whether the account is active; only an explicit stored `false` clears it.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Role-group names driving the HR-only gate (orthogonal to scope).
    #[serde(rename = "cognitoGroups", default)]
    pub groups: Vec<String>,
    /// Coarse authority tier.
    pub access_scope: AccessScope,
    /// Capability flags resolved for `role_title`.
    #[serde(default)]
    pub permissions: PermissionFlags,
}

impl UserAccessRecord {
    /// Returns true when the user belongs to the named role group.
    #[must_use]
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|candidate| candidate == group)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

// crates/access-gate-core/src/core/identifiers.rs
// ============================================================================
// Module: Access Gate Identifiers
// Description: Canonical identifiers for principals, roles, and hierarchy paths.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the identifier newtypes used throughout Access Gate.
//! Identifiers serialize as plain strings on the wire. [`Email`] enforces
//! normalization (trim + lowercase) at the construction boundary so every
//! lookup and comparison downstream operates on the canonical form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Normalized email address used as the unique directory lookup key.
///
/// # Invariants
/// - Always trimmed and lowercased; comparisons are byte-exact.
/// - Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Normalizes a raw address (trim + lowercase); returns `None` when the
    /// result is empty.
    #[must_use]
    pub fn normalize(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }
        Some(Self(normalized))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the local part of the address (everything before the first
    /// `@`, or the whole address when no `@` is present).
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role title used to key the role-permission lookup.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleTitle(String);

impl RoleTitle {
    /// Creates a new role title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RoleTitle {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RoleTitle {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Delimited path encoding a position in the organizational tree.
///
/// # Invariants
/// - Opaque UTF-8 string; the delimiter is chosen by the backing store and
///   never interpreted here beyond prefix/equality matching.
/// - May be empty; empty paths never match a scoped filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HierarchyPath(String);

impl HierarchyPath {
    /// Creates a new hierarchy path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the path is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for HierarchyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for HierarchyPath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for HierarchyPath {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use super::Email;

    #[test]
    fn email_normalizes_case_and_whitespace() {
        let email = Email::normalize("  Jane.Doe@Acme.COM ").expect("normalized");
        assert_eq!(email.as_str(), "jane.doe@acme.com");
    }

    #[test]
    fn email_rejects_blank_input() {
        assert!(Email::normalize("   ").is_none());
        assert!(Email::normalize("").is_none());
    }

    #[test]
    fn email_local_part_falls_back_to_whole_address() {
        let email = Email::normalize("jane@acme.com").expect("normalized");
        assert_eq!(email.local_part(), "jane");
        let bare = Email::normalize("jane").expect("normalized");
        assert_eq!(bare.local_part(), "jane");
    }
}

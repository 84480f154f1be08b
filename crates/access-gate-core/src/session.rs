// crates/access-gate-core/src/session.rs
// ============================================================================
// Module: Session Access State
// Description: Explicit lifecycle for the per-session resolved user record.
// Purpose: Replace ambient singleton state with an owned, scoped value.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! [`AccessState`] is the explicit session-scoped holder for the resolved
//! [`UserAccessRecord`]. It begins as `Loading` when a sign-in starts,
//! becomes `Resolved` on a successful directory lookup or `Anonymous` when
//! resolution completes without a record, and returns to `Anonymous` on
//! sign-out. Consumers (the gate, the filter) treat `Loading` as a distinct
//! transient state, never as a denial.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::UserAccessRecord;

// ============================================================================
// SECTION: Access State
// ============================================================================

/// Session access lifecycle.
///
/// # Invariants
/// - The resolved record is immutable for the session's duration.
/// - `Loading` is transient and must not be conflated with `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessState {
    /// Sign-in started; directory resolution in flight.
    Loading,
    /// No resolved user (signed out, or resolution found no record).
    Anonymous,
    /// Directory resolution succeeded.
    Resolved(UserAccessRecord),
}

impl AccessState {
    /// Starts a session lifecycle (resolution in flight).
    #[must_use]
    pub const fn begin() -> Self {
        Self::Loading
    }

    /// Completes resolution with a record, or anonymously when none was found.
    #[must_use]
    pub fn complete(record: Option<UserAccessRecord>) -> Self {
        record.map_or(Self::Anonymous, Self::Resolved)
    }

    /// Tears the session down on sign-out.
    pub fn sign_out(&mut self) {
        *self = Self::Anonymous;
    }

    /// Returns the resolved record, when present.
    #[must_use]
    pub const fn resolved(&self) -> Option<&UserAccessRecord> {
        match self {
            Self::Resolved(record) => Some(record),
            Self::Loading | Self::Anonymous => None,
        }
    }

    /// Returns true while resolution is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

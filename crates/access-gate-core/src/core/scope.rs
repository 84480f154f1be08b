// crates/access-gate-core/src/core/scope.rs
// ============================================================================
// Module: Access Scope
// Description: Coarse authority tiers derived from the organizational level.
// Purpose: Provide the single source of truth for level-to-scope mapping.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`AccessScope`] is the coarse authority tier controlling how broadly a
//! user's record visibility extends. Lower numeric levels map to broader
//! scopes; anything unknown, absent, or out of range collapses to the
//! minimum-privilege PLANT tier.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Access Scope
// ============================================================================

/// Coarse authority tier for hierarchical record visibility.
///
/// # Invariants
/// - Wire form is the SCREAMING_SNAKE_CASE tier name (`ENTERPRISE`, ...).
/// - `Plant` is the fail-safe minimum-privilege default for every input the
///   mapping does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessScope {
    /// Broadest tier; sees every record regardless of hierarchy.
    Enterprise,
    /// Segment tier; sees its own subtree and all descendants.
    Segment,
    /// Platform tier; sees its own subtree and all descendants.
    Platform,
    /// Division tier; sees its own subtree and all descendants.
    Division,
    /// Leaf tier; sees exact hierarchy matches only.
    Plant,
}

impl AccessScope {
    /// Maps a numeric organizational level to a scope.
    ///
    /// `1` maps to `ENTERPRISE`, `2` to `SEGMENT`, `3` to `PLATFORM`, `4` to
    /// `DIVISION`; every other value (including out-of-range levels) maps to
    /// `PLANT`.
    #[must_use]
    pub const fn from_level(level: i64) -> Self {
        match level {
            1 => Self::Enterprise,
            2 => Self::Segment,
            3 => Self::Platform,
            4 => Self::Division,
            _ => Self::Plant,
        }
    }

    /// Parses a stored scope label; unknown labels return `None` so callers
    /// fall back to the level-derived scope.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "ENTERPRISE" => Some(Self::Enterprise),
            "SEGMENT" => Some(Self::Segment),
            "PLATFORM" => Some(Self::Platform),
            "DIVISION" => Some(Self::Division),
            "PLANT" => Some(Self::Plant),
            _ => None,
        }
    }

    /// Returns the stable wire label for the scope.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enterprise => "ENTERPRISE",
            Self::Segment => "SEGMENT",
            Self::Platform => "PLATFORM",
            Self::Division => "DIVISION",
            Self::Plant => "PLANT",
        }
    }
}

impl fmt::Display for AccessScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

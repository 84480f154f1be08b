// crates/access-gate-core/src/runtime/filter.rs
// ============================================================================
// Module: Hierarchical Record Filter
// Description: Scope-based prefix/exact matching over hierarchy paths.
// Purpose: Project a record set down to the subset visible to a user.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The filter decides record visibility from a user's access scope and
//! hierarchy path. ENTERPRISE sees everything; SEGMENT, PLATFORM, and
//! DIVISION see their own subtree and all descendants (prefix match); PLANT
//! sees exact matches only. Records with an absent or empty hierarchy path
//! never match a scoped filter.
//!
//! An unresolved user passes every record through unchanged. This fail-open
//! window is a display convenience during session load, not a security
//! boundary; the backing store's own authorization rules remain the
//! enforcement point.
//!
//! Invariants:
//! - Filtering is a pure projection; input records are never mutated.
//! - Idempotent: applying the filter twice equals applying it once.
//! - O(n) single pass with no nested lookups.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::AccessScope;
use crate::core::ScopedRecord;
use crate::core::UserAccessRecord;

// ============================================================================
// SECTION: Scope Matching
// ============================================================================

/// Applies the scope matching rule to a single target hierarchy path.
///
/// This is the single-target form shared by the permission gate; the list
/// filter applies the same rule per record.
#[must_use]
pub fn scope_allows(user: &UserAccessRecord, target: Option<&str>) -> bool {
    match user.access_scope {
        AccessScope::Enterprise => true,
        AccessScope::Segment | AccessScope::Platform | AccessScope::Division => target
            .is_some_and(|path| !path.is_empty() && path.starts_with(user.hierarchy.as_str())),
        AccessScope::Plant => {
            target.is_some_and(|path| !path.is_empty() && path == user.hierarchy.as_str())
        }
    }
}

// ============================================================================
// SECTION: Record Filter
// ============================================================================

/// Returns the subset of `records` visible to `user`.
///
/// A `None` user (still resolving) returns the records unchanged.
#[must_use]
pub fn filter_by_scope<R: ScopedRecord>(
    records: Vec<R>,
    user: Option<&UserAccessRecord>,
) -> Vec<R> {
    let Some(user) = user else {
        return records;
    };
    records.into_iter().filter(|record| scope_allows(user, record.hierarchy_path())).collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

// crates/access-gate-directory/src/discovery.rs
// ============================================================================
// Module: Table Discovery
// Description: Name-pattern fallback locating directory tables.
// Purpose: Pick the most specific table when no explicit name is configured.
// Dependencies: none
// ============================================================================

//! ## Overview
//! When no explicit table name is configured, the resolver locates directory
//! tables by substring match over the reachable table names, preferring the
//! longest match. Longer names carry environment suffixes
//! (`UserAccess-prod-2`), so the longest match is the most production-like
//! candidate among shorter aliases. This is a degraded mode; explicit
//! configuration always wins and discovery use is reported via audit.

// ============================================================================
// SECTION: Discovery
// ============================================================================

/// Returns the longest table name containing `pattern`, if any.
///
/// Ties keep the first candidate in listing order so the choice is
/// deterministic for a stable listing.
#[must_use]
pub fn discover_table(names: &[String], pattern: &str) -> Option<String> {
    let mut best: Option<&String> = None;
    for name in names {
        if !name.contains(pattern) {
            continue;
        }
        if best.is_none_or(|current| name.len() > current.len()) {
            best = Some(name);
        }
    }
    best.cloned()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

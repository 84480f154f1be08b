// crates/access-gate-core/src/core/record.rs
// ============================================================================
// Module: Scoped Records
// Description: Domain record kinds, lifecycle states, and the hierarchy seam.
// Purpose: Define the generic surface the hierarchical filter operates over.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Domain records (incidents, observations, lessons learned, quick fixes,
//! safety alerts) optionally carry a hierarchy path. [`ScopedRecord`] is the
//! only seam the filter needs; [`SafetyRecord`] is the concrete envelope used
//! by the gate's record-level action checks and by the CLI.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::HierarchyPath;

// ============================================================================
// SECTION: Record Kinds
// ============================================================================

/// Domain record categories carried by the platform.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Injury or incident report.
    Incident,
    /// Safety observation.
    Observation,
    /// Lesson learned entry.
    LessonLearned,
    /// Quick-fix action item.
    QuickFix,
    /// Safety alert broadcast.
    SafetyAlert,
}

// ============================================================================
// SECTION: Record Status
// ============================================================================

/// Record lifecycle status.
///
/// # Invariants
/// - `Draft` is the draft-equivalent state required by delete checks.
/// - `PendingReview` is the pending-review-equivalent state required by
///   approval checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Record is an unsubmitted draft.
    Draft,
    /// Record is awaiting review/approval.
    PendingReview,
    /// Record is open.
    Open,
    /// Record is closed.
    Closed,
}

// ============================================================================
// SECTION: Scoped Record Seam
// ============================================================================

/// Seam for any record that optionally carries a hierarchy path.
///
/// The filter treats an absent or empty path as "matches no scoped filter";
/// only the ENTERPRISE tier sees such records.
pub trait ScopedRecord {
    /// Returns the record's hierarchy path when present.
    fn hierarchy_path(&self) -> Option<&str>;
}

/// Concrete domain record envelope.
///
/// # Invariants
/// - `hierarchy` is optional; an empty path behaves exactly like an absent one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyRecord {
    /// Record identifier.
    pub id: String,
    /// Record category.
    pub kind: RecordKind,
    /// Lifecycle status.
    pub status: RecordStatus,
    /// Position in the organizational tree, when assigned.
    #[serde(rename = "hierarchyString", skip_serializing_if = "Option::is_none", default)]
    pub hierarchy: Option<HierarchyPath>,
}

impl ScopedRecord for SafetyRecord {
    fn hierarchy_path(&self) -> Option<&str> {
        self.hierarchy.as_ref().map(HierarchyPath::as_str)
    }
}

impl<R: ScopedRecord> ScopedRecord for &R {
    fn hierarchy_path(&self) -> Option<&str> {
        (**self).hierarchy_path()
    }
}

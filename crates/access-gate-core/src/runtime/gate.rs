// crates/access-gate-core/src/runtime/gate.rs
// ============================================================================
// Module: Permission Gate
// Description: Render-time guard combining flags, scope, and record checks.
// Purpose: Decide whether a protected control is shown, hidden, or pending.
// Dependencies: crate::core, crate::runtime::filter, crate::session
// ============================================================================

//! ## Overview
//! The gate evaluates a set of independent criteria against a session's
//! access state. While the user record is still resolving the outcome is
//! `Pending`, a transient third state distinct from allow and deny. With no
//! criteria supplied the gate is open (used for structural wrapping).
//!
//! Multiple supplied criteria combine with OR semantics by default;
//! `require_all` opts into AND. The permissive default is a deliberate
//! policy decision and is pinned by tests.
//!
//! Invariants:
//! - Evaluation is pure and deterministic for identical inputs.
//! - A missing user after load completes always denies.
//! - Record-level action checks require hierarchy access before any
//!   action-specific rule is consulted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::AccessScope;
use crate::core::RecordStatus;
use crate::core::SafetyRecord;
use crate::core::ScopedRecord;
use crate::core::UserAccessRecord;
use crate::runtime::filter::scope_allows;
use crate::session::AccessState;

// ============================================================================
// SECTION: Gate Outcome
// ============================================================================

/// Tri-state gate outcome.
///
/// # Invariants
/// - `Pending` occurs only while the session is still resolving; it must be
///   rendered as a neutral placeholder, never as the protected content and
///   never as the denial fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateOutcome {
    /// Show the protected content.
    Allow,
    /// Show the fallback.
    Deny,
    /// Session still resolving; show a neutral placeholder.
    Pending,
}

impl GateOutcome {
    /// Returns true for [`GateOutcome::Allow`].
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Returns the stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for GateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Record Actions
// ============================================================================

/// Actions checked by the record-level composite rule.
///
/// # Invariants
/// - Unrecognized action names fail to parse; callers must deny on `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordAction {
    /// View the record.
    View,
    /// Edit the record.
    Edit,
    /// Delete the record.
    Delete,
    /// Approve the record.
    Approve,
}

impl RecordAction {
    /// Parses an action label; unknown labels return `None`.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "view" => Some(Self::View),
            "edit" => Some(Self::Edit),
            "delete" => Some(Self::Delete),
            "approve" => Some(Self::Approve),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Gate Criteria
// ============================================================================

/// Independent criteria evaluated by the gate.
///
/// Every field is optional; only supplied criteria contribute conditions.
/// `record` and `action` form one composite condition and are only
/// considered when both are present.
///
/// # Invariants
/// - With zero criteria supplied the gate is open.
/// - `require_all` switches the combination from OR (default) to AND.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateCriteria<'a> {
    /// Name of the permission flag that must be set; unknown names are
    /// treated as an unset flag (fail closed).
    pub permission: Option<&'a str>,
    /// Maximum numeric level; passes when `user.level <= level`.
    pub level: Option<i64>,
    /// Target hierarchy path checked with the scope matching rule.
    pub hierarchy: Option<&'a str>,
    /// Role group the user must belong to (HR-only gate).
    pub group: Option<&'a str>,
    /// Record checked by the composite record/action rule.
    pub record: Option<&'a SafetyRecord>,
    /// Action checked by the composite record/action rule.
    pub action: Option<RecordAction>,
    /// Combine criteria with AND instead of the default OR.
    pub require_all: bool,
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates the gate criteria against a session's access state.
#[must_use]
pub fn evaluate(state: &AccessState, criteria: &GateCriteria<'_>) -> GateOutcome {
    let user = match state {
        AccessState::Loading => return GateOutcome::Pending,
        AccessState::Anonymous => return GateOutcome::Deny,
        AccessState::Resolved(user) => user,
    };

    let mut conditions: Vec<bool> = Vec::new();
    if let Some(name) = criteria.permission {
        conditions.push(user.permissions.get_named(name));
    }
    if let Some(level) = criteria.level {
        conditions.push(user.level <= level);
    }
    if let Some(target) = criteria.hierarchy {
        conditions.push(scope_allows(user, Some(target)));
    }
    if let Some(group) = criteria.group {
        conditions.push(user.in_group(group));
    }
    if let (Some(record), Some(action)) = (criteria.record, criteria.action) {
        conditions.push(record_action_allowed(user, record, action));
    }

    if conditions.is_empty() {
        return GateOutcome::Allow;
    }
    let allowed = if criteria.require_all {
        conditions.iter().all(|condition| *condition)
    } else {
        conditions.iter().any(|condition| *condition)
    };
    if allowed { GateOutcome::Allow } else { GateOutcome::Deny }
}

/// Applies the composite record/action rule.
///
/// Hierarchy access must pass before any action-specific rule; a record the
/// user cannot see is never editable, deletable, or approvable.
fn record_action_allowed(
    user: &UserAccessRecord,
    record: &SafetyRecord,
    action: RecordAction,
) -> bool {
    if !scope_allows(user, record.hierarchy_path()) {
        return false;
    }
    match action {
        RecordAction::View => user.permissions.can_view_open_closed_reports,
        RecordAction::Edit => {
            user.permissions.can_take_incident_rca_actions
                || user.permissions.can_take_first_report_actions
                || user.permissions.can_perform_approval_incident_closure
        }
        RecordAction::Delete => {
            user.access_scope == AccessScope::Enterprise && record.status == RecordStatus::Draft
        }
        RecordAction::Approve => {
            user.permissions.can_perform_approval_incident_closure
                && record.status == RecordStatus::PendingReview
        }
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

    use super::GateCriteria;
    use super::GateOutcome;
    use super::RecordAction;
    use super::evaluate;
    use crate::core::AccessScope;
    use crate::core::Email;
    use crate::core::HierarchyPath;
    use crate::core::PermissionFlags;
    use crate::core::PermissionKey;
    use crate::core::RecordKind;
    use crate::core::RecordStatus;
    use crate::core::RoleTitle;
    use crate::core::SafetyRecord;
    use crate::core::UserAccessRecord;
    use crate::session::AccessState;

    /// Builds a resolved session with the given scope, hierarchy, and flags.
    fn resolved(scope: AccessScope, hierarchy: &str, permissions: PermissionFlags) -> AccessState {
        AccessState::Resolved(UserAccessRecord {
            email: Email::normalize("jane@acme.com").expect("email"),
            name: "jane".to_string(),
            role_title: RoleTitle::new("User"),
            enterprise: None,
            segment: None,
            platform: None,
            division: None,
            plant: None,
            hierarchy: HierarchyPath::new(hierarchy),
            level: 5,
            is_active: true,
            groups: vec!["HR".to_string()],
            access_scope: scope,
            permissions,
        })
    }

    /// Builds a record in the user's subtree with the given status.
    fn record(status: RecordStatus) -> SafetyRecord {
        SafetyRecord {
            id: "rec-1".to_string(),
            kind: RecordKind::Incident,
            status,
            hierarchy: Some(HierarchyPath::new("NA>US>OH")),
        }
    }

    #[test]
    fn loading_session_is_pending_not_denied() {
        let criteria = GateCriteria {
            permission: Some("canViewDashboard"),
            ..GateCriteria::default()
        };
        assert_eq!(evaluate(&AccessState::Loading, &criteria), GateOutcome::Pending);
    }

    #[test]
    fn anonymous_session_denies() {
        assert_eq!(evaluate(&AccessState::Anonymous, &GateCriteria::default()), GateOutcome::Deny);
    }

    #[test]
    fn zero_criteria_is_an_open_gate() {
        let state = resolved(AccessScope::Plant, "NA>US>OH", PermissionFlags::none());
        assert_eq!(evaluate(&state, &GateCriteria::default()), GateOutcome::Allow);
    }

    #[test]
    fn default_combination_is_or() {
        let state = resolved(AccessScope::Plant, "NA>US>OH", PermissionFlags::none());
        let criteria = GateCriteria {
            permission: Some("canViewDashboard"),
            group: Some("HR"),
            ..GateCriteria::default()
        };
        assert_eq!(evaluate(&state, &criteria), GateOutcome::Allow);
    }

    #[test]
    fn require_all_tightens_the_combination() {
        let state = resolved(AccessScope::Plant, "NA>US>OH", PermissionFlags::none());
        let criteria = GateCriteria {
            permission: Some("canViewDashboard"),
            group: Some("HR"),
            require_all: true,
            ..GateCriteria::default()
        };
        assert_eq!(evaluate(&state, &criteria), GateOutcome::Deny);
    }

    #[test]
    fn level_passes_broader_or_equal_authority() {
        let mut state = resolved(AccessScope::Platform, "NA>US>OH", PermissionFlags::none());
        if let AccessState::Resolved(user) = &mut state {
            user.level = 3;
        }
        let pass = GateCriteria {
            level: Some(3),
            ..GateCriteria::default()
        };
        let fail = GateCriteria {
            level: Some(2),
            ..GateCriteria::default()
        };
        assert_eq!(evaluate(&state, &pass), GateOutcome::Allow);
        assert_eq!(evaluate(&state, &fail), GateOutcome::Deny);
    }

    #[test]
    fn edit_accepts_any_of_the_three_flags() {
        for key in [
            PermissionKey::CanTakeIncidentRcaActions,
            PermissionKey::CanTakeFirstReportActions,
            PermissionKey::CanPerformApprovalIncidentClosure,
        ] {
            let mut flags = PermissionFlags::none();
            flags.set(key, true);
            let state = resolved(AccessScope::Division, "NA>US>OH", flags);
            let record = record(RecordStatus::Open);
            let criteria = GateCriteria {
                record: Some(&record),
                action: Some(RecordAction::Edit),
                ..GateCriteria::default()
            };
            assert_eq!(evaluate(&state, &criteria), GateOutcome::Allow, "{key} should allow edit");
        }
    }

    #[test]
    fn edit_denies_with_all_three_flags_clear() {
        let state = resolved(AccessScope::Division, "NA>US>OH", PermissionFlags::none());
        let record = record(RecordStatus::Open);
        let criteria = GateCriteria {
            record: Some(&record),
            action: Some(RecordAction::Edit),
            ..GateCriteria::default()
        };
        assert_eq!(evaluate(&state, &criteria), GateOutcome::Deny);
    }

    #[test]
    fn edit_denies_outside_hierarchy_regardless_of_flags() {
        let mut flags = PermissionFlags::none();
        flags.set(PermissionKey::CanTakeIncidentRcaActions, true);
        let state = resolved(AccessScope::Plant, "NA>US>PA", flags);
        let record = record(RecordStatus::Open);
        let criteria = GateCriteria {
            record: Some(&record),
            action: Some(RecordAction::Edit),
            ..GateCriteria::default()
        };
        assert_eq!(evaluate(&state, &criteria), GateOutcome::Deny);
    }

    #[test]
    fn delete_requires_enterprise_and_draft() {
        let record_draft = record(RecordStatus::Draft);
        let record_open = record(RecordStatus::Open);
        let criteria_draft = GateCriteria {
            record: Some(&record_draft),
            action: Some(RecordAction::Delete),
            ..GateCriteria::default()
        };
        let criteria_open = GateCriteria {
            record: Some(&record_open),
            action: Some(RecordAction::Delete),
            ..GateCriteria::default()
        };

        let enterprise = resolved(AccessScope::Enterprise, "", PermissionFlags::none());
        let division = resolved(AccessScope::Division, "NA>US>OH", PermissionFlags::none());
        assert_eq!(evaluate(&enterprise, &criteria_draft), GateOutcome::Allow);
        assert_eq!(evaluate(&enterprise, &criteria_open), GateOutcome::Deny);
        assert_eq!(evaluate(&division, &criteria_draft), GateOutcome::Deny);
    }

    #[test]
    fn approve_requires_closure_flag_and_pending_review() {
        let mut flags = PermissionFlags::none();
        flags.set(PermissionKey::CanPerformApprovalIncidentClosure, true);
        let state = resolved(AccessScope::Division, "NA>US>OH", flags);

        let pending = record(RecordStatus::PendingReview);
        let open = record(RecordStatus::Open);
        let criteria_pending = GateCriteria {
            record: Some(&pending),
            action: Some(RecordAction::Approve),
            ..GateCriteria::default()
        };
        let criteria_open = GateCriteria {
            record: Some(&open),
            action: Some(RecordAction::Approve),
            ..GateCriteria::default()
        };
        assert_eq!(evaluate(&state, &criteria_pending), GateOutcome::Allow);
        assert_eq!(evaluate(&state, &criteria_open), GateOutcome::Deny);

        let unflagged = resolved(AccessScope::Division, "NA>US>OH", PermissionFlags::none());
        assert_eq!(evaluate(&unflagged, &criteria_pending), GateOutcome::Deny);
    }

    #[test]
    fn view_requires_open_closed_reports_flag() {
        let mut flags = PermissionFlags::none();
        flags.set(PermissionKey::CanViewOpenClosedReports, true);
        let state = resolved(AccessScope::Division, "NA>US>OH", flags);
        let target = record(RecordStatus::Open);
        let criteria = GateCriteria {
            record: Some(&target),
            action: Some(RecordAction::View),
            ..GateCriteria::default()
        };
        assert_eq!(evaluate(&state, &criteria), GateOutcome::Allow);
    }

    #[test]
    fn unknown_action_labels_fail_to_parse() {
        assert_eq!(RecordAction::parse("edit"), Some(RecordAction::Edit));
        assert_eq!(RecordAction::parse("destroy"), None);
        assert_eq!(RecordAction::parse(""), None);
    }
}

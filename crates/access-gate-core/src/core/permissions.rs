// crates/access-gate-core/src/core/permissions.rs
// ============================================================================
// Module: Permission Flags
// Description: Named capability flags gating protected UI actions.
// Purpose: Provide an all-or-nothing, fail-closed permission bundle.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`PermissionFlags`] is the 15-flag capability bundle resolved per role
//! title. Every flag defaults to `false`; a missing role row therefore yields
//! a bundle that denies everything. [`PermissionKey`] names each flag for
//! by-name lookup at the gate boundary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Permission Keys
// ============================================================================

/// Names of the individual capability flags.
///
/// # Invariants
/// - `as_str` labels match the backing row attribute names exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionKey {
    /// Report a new injury.
    CanReportInjury,
    /// View personally identifiable information.
    CanViewPii,
    /// Take first-report actions on an incident.
    CanTakeFirstReportActions,
    /// Take quick-fix actions.
    CanTakeQuickFixActions,
    /// Take incident RCA actions.
    CanTakeIncidentRcaActions,
    /// Approve incident closure.
    CanPerformApprovalIncidentClosure,
    /// View and manage OSHA logs.
    CanViewManageOshaLogs,
    /// View open and closed reports.
    CanViewOpenClosedReports,
    /// View safety alerts.
    CanViewSafetyAlerts,
    /// View lessons learned.
    CanViewLessonsLearned,
    /// View the dashboard.
    CanViewDashboard,
    /// Submit a DSA ticket.
    CanSubmitDsaTicket,
    /// Approve lessons learned.
    CanApproveLessonsLearned,
    /// Report an observation.
    CanReportObservation,
    /// Award safety recognition.
    CanSafetyRecognition,
}

impl PermissionKey {
    /// All keys in declaration order.
    pub const ALL: [Self; 15] = [
        Self::CanReportInjury,
        Self::CanViewPii,
        Self::CanTakeFirstReportActions,
        Self::CanTakeQuickFixActions,
        Self::CanTakeIncidentRcaActions,
        Self::CanPerformApprovalIncidentClosure,
        Self::CanViewManageOshaLogs,
        Self::CanViewOpenClosedReports,
        Self::CanViewSafetyAlerts,
        Self::CanViewLessonsLearned,
        Self::CanViewDashboard,
        Self::CanSubmitDsaTicket,
        Self::CanApproveLessonsLearned,
        Self::CanReportObservation,
        Self::CanSafetyRecognition,
    ];

    /// Returns the stable row-attribute label for the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CanReportInjury => "canReportInjury",
            Self::CanViewPii => "canViewPII",
            Self::CanTakeFirstReportActions => "canTakeFirstReportActions",
            Self::CanTakeQuickFixActions => "canTakeQuickFixActions",
            Self::CanTakeIncidentRcaActions => "canTakeIncidentRCAActions",
            Self::CanPerformApprovalIncidentClosure => "canPerformApprovalIncidentClosure",
            Self::CanViewManageOshaLogs => "canViewManageOSHALogs",
            Self::CanViewOpenClosedReports => "canViewOpenClosedReports",
            Self::CanViewSafetyAlerts => "canViewSafetyAlerts",
            Self::CanViewLessonsLearned => "canViewLessonsLearned",
            Self::CanViewDashboard => "canViewDashboard",
            Self::CanSubmitDsaTicket => "canSubmitDSATicket",
            Self::CanApproveLessonsLearned => "canApproveLessonsLearned",
            Self::CanReportObservation => "canReportObservation",
            Self::CanSafetyRecognition => "canSafetyRecognition",
        }
    }

    /// Parses a row-attribute label; unknown labels return `None`.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == label)
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Permission Bundle
// ============================================================================

/// Capability flag bundle resolved per role title.
///
/// # Invariants
/// - Every flag defaults to `false` (fail closed).
/// - Wire attribute names match the backing role-permission row exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PermissionFlags {
    /// Report a new injury.
    pub can_report_injury: bool,
    /// View personally identifiable information.
    #[serde(rename = "canViewPII")]
    pub can_view_pii: bool,
    /// Take first-report actions on an incident.
    pub can_take_first_report_actions: bool,
    /// Take quick-fix actions.
    pub can_take_quick_fix_actions: bool,
    /// Take incident RCA actions.
    #[serde(rename = "canTakeIncidentRCAActions")]
    pub can_take_incident_rca_actions: bool,
    /// Approve incident closure.
    pub can_perform_approval_incident_closure: bool,
    /// View and manage OSHA logs.
    #[serde(rename = "canViewManageOSHALogs")]
    pub can_view_manage_osha_logs: bool,
    /// View open and closed reports.
    pub can_view_open_closed_reports: bool,
    /// View safety alerts.
    pub can_view_safety_alerts: bool,
    /// View lessons learned.
    pub can_view_lessons_learned: bool,
    /// View the dashboard.
    pub can_view_dashboard: bool,
    /// Submit a DSA ticket.
    #[serde(rename = "canSubmitDSATicket")]
    pub can_submit_dsa_ticket: bool,
    /// Approve lessons learned.
    pub can_approve_lessons_learned: bool,
    /// Report an observation.
    pub can_report_observation: bool,
    /// Award safety recognition.
    pub can_safety_recognition: bool,
}

impl PermissionFlags {
    /// Returns the bundle with every flag false.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Looks up a flag by row-attribute name; unknown names are false.
    #[must_use]
    pub fn get_named(&self, name: &str) -> bool {
        PermissionKey::parse(name).is_some_and(|key| self.get(key))
    }

    /// Looks up a flag by key.
    #[must_use]
    pub const fn get(&self, key: PermissionKey) -> bool {
        match key {
            PermissionKey::CanReportInjury => self.can_report_injury,
            PermissionKey::CanViewPii => self.can_view_pii,
            PermissionKey::CanTakeFirstReportActions => self.can_take_first_report_actions,
            PermissionKey::CanTakeQuickFixActions => self.can_take_quick_fix_actions,
            PermissionKey::CanTakeIncidentRcaActions => self.can_take_incident_rca_actions,
            PermissionKey::CanPerformApprovalIncidentClosure => {
                self.can_perform_approval_incident_closure
            }
            PermissionKey::CanViewManageOshaLogs => self.can_view_manage_osha_logs,
            PermissionKey::CanViewOpenClosedReports => self.can_view_open_closed_reports,
            PermissionKey::CanViewSafetyAlerts => self.can_view_safety_alerts,
            PermissionKey::CanViewLessonsLearned => self.can_view_lessons_learned,
            PermissionKey::CanViewDashboard => self.can_view_dashboard,
            PermissionKey::CanSubmitDsaTicket => self.can_submit_dsa_ticket,
            PermissionKey::CanApproveLessonsLearned => self.can_approve_lessons_learned,
            PermissionKey::CanReportObservation => self.can_report_observation,
            PermissionKey::CanSafetyRecognition => self.can_safety_recognition,
        }
    }

    /// Sets a flag by key.
    pub const fn set(&mut self, key: PermissionKey, value: bool) {
        match key {
            PermissionKey::CanReportInjury => self.can_report_injury = value,
            PermissionKey::CanViewPii => self.can_view_pii = value,
            PermissionKey::CanTakeFirstReportActions => {
                self.can_take_first_report_actions = value;
            }
            PermissionKey::CanTakeQuickFixActions => self.can_take_quick_fix_actions = value,
            PermissionKey::CanTakeIncidentRcaActions => {
                self.can_take_incident_rca_actions = value;
            }
            PermissionKey::CanPerformApprovalIncidentClosure => {
                self.can_perform_approval_incident_closure = value;
            }
            PermissionKey::CanViewManageOshaLogs => self.can_view_manage_osha_logs = value,
            PermissionKey::CanViewOpenClosedReports => {
                self.can_view_open_closed_reports = value;
            }
            PermissionKey::CanViewSafetyAlerts => self.can_view_safety_alerts = value,
            PermissionKey::CanViewLessonsLearned => self.can_view_lessons_learned = value,
            PermissionKey::CanViewDashboard => self.can_view_dashboard = value,
            PermissionKey::CanSubmitDsaTicket => self.can_submit_dsa_ticket = value,
            PermissionKey::CanApproveLessonsLearned => {
                self.can_approve_lessons_learned = value;
            }
            PermissionKey::CanReportObservation => self.can_report_observation = value,
            PermissionKey::CanSafetyRecognition => self.can_safety_recognition = value,
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

    use super::PermissionFlags;
    use super::PermissionKey;

    #[test]
    fn default_bundle_denies_every_flag() {
        let flags = PermissionFlags::none();
        for key in PermissionKey::ALL {
            assert!(!flags.get(key), "{key} should default to false");
        }
    }

    #[test]
    fn set_and_get_round_trip_by_key() {
        let mut flags = PermissionFlags::none();
        flags.set(PermissionKey::CanViewPii, true);
        assert!(flags.get(PermissionKey::CanViewPii));
        assert!(!flags.get(PermissionKey::CanReportInjury));
    }

    #[test]
    fn named_lookup_fails_closed_on_unknown_names() {
        let mut flags = PermissionFlags::none();
        flags.set(PermissionKey::CanViewDashboard, true);
        assert!(flags.get_named("canViewDashboard"));
        assert!(!flags.get_named("canViewPII"));
        assert!(!flags.get_named("canDoAnything"));
        assert!(!flags.get_named(""));
    }

    #[test]
    fn key_labels_parse_back() {
        for key in PermissionKey::ALL {
            assert_eq!(PermissionKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(PermissionKey::parse("canDoAnything"), None);
    }

    #[test]
    fn wire_names_match_row_attributes() {
        let mut flags = PermissionFlags::none();
        flags.set(PermissionKey::CanViewPii, true);
        flags.set(PermissionKey::CanSubmitDsaTicket, true);
        let value = serde_json::to_value(flags).expect("serialize");
        assert_eq!(value["canViewPII"], serde_json::Value::Bool(true));
        assert_eq!(value["canSubmitDSATicket"], serde_json::Value::Bool(true));
        assert_eq!(value["canViewManageOSHALogs"], serde_json::Value::Bool(false));
        assert_eq!(value["canTakeIncidentRCAActions"], serde_json::Value::Bool(false));
    }
}

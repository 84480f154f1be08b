// crates/access-gate-directory/src/normalize.rs
// ============================================================================
// Module: Row Normalization
// Description: Conversion of raw store rows into complete access records.
// Purpose: Guarantee fully defaulted records; never a partial one.
// Dependencies: access-gate-core, serde_json
// ============================================================================

//! ## Overview
//! Store rows are untrusted JSON objects. Normalization extracts the known
//! attributes and defaults every absent or malformed one: the display name
//! falls back to the email local part, the role title to `"User"`, the level
//! to 5, and the active flag to true. Group lists are filtered to strings
//! only. The access scope is taken verbatim when the stored label parses and
//! derived from the level otherwise, so an unknown label can never widen
//! visibility.
//!
//! Permission flags are coerced with JavaScript-style truthiness per flag:
//! missing, `null`, `false`, `0`, and `""` are false; everything else is
//! true. A missing row yields the all-false bundle.

// ============================================================================
// SECTION: Imports
// ============================================================================

use access_gate_core::AccessScope;
use access_gate_core::Email;
use access_gate_core::HierarchyPath;
use access_gate_core::PermissionFlags;
use access_gate_core::PermissionKey;
use access_gate_core::RoleTitle;
use access_gate_core::UserAccessRecord;
use access_gate_core::core::DEFAULT_LEVEL;
use access_gate_core::core::DEFAULT_ROLE_TITLE;
use serde_json::Value;

use crate::store::Row;

// ============================================================================
// SECTION: Row Attributes
// ============================================================================

/// Row attribute carrying the display name.
const NAME_ATTR: &str = "name";
/// Row attribute carrying the role title.
const ROLE_TITLE_ATTR: &str = "roleTitle";
/// Row attribute carrying the hierarchy path.
const HIERARCHY_ATTR: &str = "hierarchyString";
/// Row attribute carrying the numeric level.
const LEVEL_ATTR: &str = "level";
/// Row attribute carrying the active flag.
const IS_ACTIVE_ATTR: &str = "isActive";
/// Row attribute carrying the role-group list.
const GROUPS_ATTR: &str = "cognitoGroups";
/// Row attribute carrying the stored access scope label.
const ACCESS_SCOPE_ATTR: &str = "accessScope";
/// Row attributes carrying organizational unit labels, in record order.
const UNIT_ATTRS: [&str; 5] = ["enterprise", "segment", "platform", "division", "plant"];

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Builds a fully defaulted access record from a raw store row.
///
/// `permissions` stays all-false; hydration is a separate resolver step.
#[must_use]
pub fn normalize_row(email: &Email, row: &Row) -> UserAccessRecord {
    let level = integer_attr(row, LEVEL_ATTR).unwrap_or(DEFAULT_LEVEL);
    let access_scope = string_attr(row, ACCESS_SCOPE_ATTR)
        .and_then(|label| AccessScope::parse(&label))
        .unwrap_or_else(|| AccessScope::from_level(level));
    let [enterprise, segment, platform, division, plant] =
        UNIT_ATTRS.map(|attr| string_attr(row, attr));
    UserAccessRecord {
        email: email.clone(),
        name: string_attr(row, NAME_ATTR).unwrap_or_else(|| email.local_part().to_string()),
        role_title: string_attr(row, ROLE_TITLE_ATTR)
            .map_or_else(|| RoleTitle::new(DEFAULT_ROLE_TITLE), RoleTitle::new),
        enterprise,
        segment,
        platform,
        division,
        plant,
        hierarchy: HierarchyPath::new(string_attr(row, HIERARCHY_ATTR).unwrap_or_default()),
        level,
        is_active: row.get(IS_ACTIVE_ATTR).and_then(Value::as_bool).unwrap_or(true),
        groups: groups_attr(row),
        access_scope,
        permissions: PermissionFlags::none(),
    }
}

/// Coerces a role-permission row into a flag bundle, one flag at a time.
#[must_use]
pub fn flags_from_row(row: &Row) -> PermissionFlags {
    let mut flags = PermissionFlags::none();
    for key in PermissionKey::ALL {
        flags.set(key, row.get(key.as_str()).is_some_and(truthy));
    }
    flags
}

// ============================================================================
// SECTION: Attribute Helpers
// ============================================================================

/// Extracts a string attribute.
fn string_attr(row: &Row, attr: &str) -> Option<String> {
    row.get(attr).and_then(Value::as_str).map(str::to_string)
}

/// Extracts an integer attribute, accepting numeric strings.
fn integer_attr(row: &Row, attr: &str) -> Option<i64> {
    match row.get(attr)? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Extracts the group list, keeping string entries only.
fn groups_attr(row: &Row) -> Vec<String> {
    row.get(GROUPS_ATTR)
        .and_then(Value::as_array)
        .map(|values| {
            values.iter().filter_map(Value::as_str).map(str::to_string).collect()
        })
        .unwrap_or_default()
}

/// JavaScript-style truthiness for stored flag values.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|float| float != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
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

    use access_gate_core::AccessScope;
    use access_gate_core::Email;
    use access_gate_core::PermissionKey;
    use serde_json::json;

    use super::flags_from_row;
    use super::normalize_row;
    use crate::store::Row;

    /// Builds a row from a JSON object literal.
    fn row(value: serde_json::Value) -> Row {
        match value {
            serde_json::Value::Object(map) => map,
            _ => Row::new(),
        }
    }

    #[test]
    fn empty_row_gets_every_documented_default() {
        let email = Email::normalize("jane.doe@acme.com").expect("email");
        let record = normalize_row(&email, &Row::new());
        assert_eq!(record.name, "jane.doe");
        assert_eq!(record.role_title.as_str(), "User");
        assert_eq!(record.level, 5);
        assert!(record.is_active);
        assert!(record.groups.is_empty());
        assert!(record.hierarchy.is_empty());
        assert_eq!(record.access_scope, AccessScope::Plant);
        assert_eq!(record.enterprise, None);
    }

    #[test]
    fn stored_scope_label_wins_over_level_when_it_parses() {
        let email = Email::normalize("jane@acme.com").expect("email");
        let record = normalize_row(&email, &row(json!({"level": 5, "accessScope": "SEGMENT"})));
        assert_eq!(record.access_scope, AccessScope::Segment);
    }

    #[test]
    fn unknown_scope_label_falls_back_to_the_level() {
        let email = Email::normalize("jane@acme.com").expect("email");
        let record = normalize_row(&email, &row(json!({"level": 3, "accessScope": "GALAXY"})));
        assert_eq!(record.access_scope, AccessScope::Platform);
    }

    #[test]
    fn numeric_string_levels_are_accepted() {
        let email = Email::normalize("jane@acme.com").expect("email");
        let record = normalize_row(&email, &row(json!({"level": " 2 "})));
        assert_eq!(record.level, 2);
        assert_eq!(record.access_scope, AccessScope::Segment);
    }

    #[test]
    fn group_lists_keep_strings_only() {
        let email = Email::normalize("jane@acme.com").expect("email");
        let record =
            normalize_row(&email, &row(json!({"cognitoGroups": ["HR", 7, null, "Safety"]})));
        assert_eq!(record.groups, vec!["HR".to_string(), "Safety".to_string()]);
    }

    #[test]
    fn only_an_explicit_false_clears_the_active_flag() {
        let email = Email::normalize("jane@acme.com").expect("email");
        assert!(!normalize_row(&email, &row(json!({"isActive": false}))).is_active);
        assert!(normalize_row(&email, &row(json!({"isActive": "no"}))).is_active);
        assert!(normalize_row(&email, &Row::new()).is_active);
    }

    #[test]
    fn flag_coercion_follows_truthiness() {
        let flags = flags_from_row(&row(json!({
            "canReportInjury": true,
            "canViewPII": 1,
            "canTakeFirstReportActions": "yes",
            "canTakeQuickFixActions": 0,
            "canTakeIncidentRCAActions": "",
            "canPerformApprovalIncidentClosure": null,
        })));
        assert!(flags.can_report_injury);
        assert!(flags.can_view_pii);
        assert!(flags.can_take_first_report_actions);
        assert!(!flags.can_take_quick_fix_actions);
        assert!(!flags.can_take_incident_rca_actions);
        assert!(!flags.can_perform_approval_incident_closure);
        assert!(!flags.can_view_dashboard);
    }

    #[test]
    fn missing_permission_row_denies_every_flag() {
        let flags = flags_from_row(&Row::new());
        for key in PermissionKey::ALL {
            assert!(!flags.get(key));
        }
    }
}

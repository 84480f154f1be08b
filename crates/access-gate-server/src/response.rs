// crates/access-gate-server/src/response.rs
// ============================================================================
// Module: Response Envelope
// Description: Wire envelope for the user-access resolution endpoint.
// Purpose: Keep the response shape stable for UI consumers.
// Dependencies: access-gate-core, access-gate-directory, serde
// ============================================================================

//! ## Overview
//! The endpoint answers with one envelope shape for every outcome: `ok`
//! flags success, `modelUsed` names the tier that produced the record,
//! `user` carries the resolved record, `error` carries the failure message,
//! and `probes` carries per-tier diagnostics. Optional fields are omitted
//! when absent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use access_gate_core::UserAccessRecord;
use access_gate_directory::Resolution;
use access_gate_directory::TierProbe;
use serde::Serialize;

// ============================================================================
// SECTION: Envelope
// ============================================================================

/// Response envelope for `GET /api/user-access`.
///
/// # Invariants
/// - `ok` is true exactly when `user` is present.
/// - `probes` lists every tier probed, in chain order, for 200 and 404.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccessResponse {
    /// Whether a record was resolved.
    pub ok: bool,
    /// Tier that produced the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    /// Resolved record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserAccessRecord>,
    /// Failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-tier lookup diagnostics.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub probes: Vec<TierProbe>,
}

impl UserAccessResponse {
    /// Builds the envelope for a resolution that found a record.
    #[must_use]
    pub fn found(resolution: Resolution) -> Self {
        Self {
            ok: true,
            model_used: resolution.model_used,
            user: resolution.user,
            error: None,
            probes: resolution.probes,
        }
    }

    /// Builds the envelope for a resolution that exhausted every tier.
    #[must_use]
    pub fn not_found(resolution: Resolution) -> Self {
        Self {
            ok: false,
            model_used: None,
            user: None,
            error: Some("user not found in any store".to_string()),
            probes: resolution.probes,
        }
    }

    /// Builds the envelope for a failure before or outside the tier chain.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            model_used: None,
            user: None,
            error: Some(message.into()),
            probes: Vec::new(),
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

    use access_gate_directory::Resolution;
    use access_gate_directory::TierOutcome;
    use access_gate_directory::TierProbe;

    use super::UserAccessResponse;

    #[test]
    fn not_found_envelope_keeps_probe_diagnostics() {
        let resolution = Resolution {
            user: None,
            model_used: None,
            probes: vec![
                TierProbe {
                    model: "structured:service".to_string(),
                    outcome: TierOutcome::Miss,
                },
                TierProbe {
                    model: "structured:caller".to_string(),
                    outcome: TierOutcome::Unavailable("timeout".to_string()),
                },
            ],
        };
        let value =
            serde_json::to_value(UserAccessResponse::not_found(resolution)).expect("serialize");
        assert_eq!(value["ok"], serde_json::Value::Bool(false));
        assert_eq!(value["probes"][0]["model"], "structured:service");
        assert_eq!(value["probes"][0]["status"], "miss");
        assert_eq!(value["probes"][1]["status"], "unavailable");
        assert_eq!(value["probes"][1]["reason"], "timeout");
        assert!(value.get("user").is_none());
        assert!(value.get("modelUsed").is_none());
    }

    #[test]
    fn failure_envelope_omits_empty_probes() {
        let value =
            serde_json::to_value(UserAccessResponse::failure("boom")).expect("serialize");
        assert_eq!(value["ok"], serde_json::Value::Bool(false));
        assert_eq!(value["error"], "boom");
        assert!(value.get("probes").is_none());
    }
}

// crates/access-gate-directory/src/audit.rs
// ============================================================================
// Module: Directory Audit Hooks
// Description: Observability seam for resolution outcomes and degraded modes.
// Purpose: Surface lookup diagnostics without hard observability deps.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The audit sink receives one event per resolution plus a notice whenever
//! table discovery runs in place of explicit configuration. The seam is
//! intentionally dependency-light so deployments can plug in a structured
//! log shipper without redesign.
//!
//! Events carry the lookup key, tier labels, and outcomes only — never
//! permission values or raw store rows.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use serde::Serialize;

// ============================================================================
// SECTION: Audit Events
// ============================================================================

/// Directory audit event payloads.
///
/// # Invariants
/// - Variants are stable for downstream log processing.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent<'a> {
    /// A resolution completed.
    Resolution {
        /// Normalized lookup key.
        email: &'a str,
        /// Stable outcome label (`found` or `not_found`).
        outcome: &'static str,
        /// Tier that produced the record, when one did.
        model_used: Option<&'a str>,
        /// Number of tiers probed.
        tiers_probed: usize,
    },
    /// Table discovery ran because no explicit name was configured.
    DegradedDiscovery {
        /// Name pattern used for the match.
        pattern: &'a str,
        /// Selected table name.
        table: &'a str,
    },
}

// ============================================================================
// SECTION: Sink Trait
// ============================================================================

/// Audit sink for directory events.
pub trait AuditSink: Send + Sync {
    /// Records a single audit event.
    fn record(&self, event: &AuditEvent<'_>);
}

/// Audit sink writing single-line JSON events to stderr.
///
/// # Invariants
/// - Serialization or write failures are swallowed; auditing never affects
///   resolution outcomes.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &AuditEvent<'_>) {
        let Ok(line) = serde_json::to_string(event) else {
            return;
        };
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{line}");
    }
}

/// No-op audit sink.
///
/// # Invariants
/// - Events are intentionally discarded.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &AuditEvent<'_>) {}
}

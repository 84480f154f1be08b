// crates/access-gate-server/src/lib.rs
// ============================================================================
// Module: Access Gate Server
// Description: HTTP surface exposing user-access resolution.
// Purpose: Serve the resolution endpoint plus health and readiness probes.
// Dependencies: access-gate-directory, access-gate-config, axum, tokio
// ============================================================================

//! ## Overview
//! This crate wires the tiered directory resolver behind an HTTP surface:
//! `GET /api/user-access` resolves a principal and returns the record with
//! per-tier diagnostics; `GET /healthz` and `GET /readyz` back deployment
//! probes. Resolution is synchronous under the hood and bridged onto the
//! async runtime with a blocking section.
//!
//! Invariants:
//! - Status mapping is stable: 200 found, 400 unresolvable email, 404 no
//!   record in any store, 500 unexpected failure.
//! - The 404 body carries the full probe diagnostics.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod response;
pub mod server;
pub mod telemetry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use response::UserAccessResponse;
pub use server::AccessGateServer;
pub use server::ServerError;
pub use telemetry::NoopMetrics;
pub use telemetry::RequestMetricEvent;
pub use telemetry::RequestMetrics;

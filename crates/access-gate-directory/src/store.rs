// crates/access-gate-directory/src/store.rs
// ============================================================================
// Module: Store Interfaces
// Description: Backend-agnostic interfaces for the directory backing stores.
// Purpose: Define the contract surfaces the tiered resolver depends on.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Two store shapes back the directory: a structured record store queried by
//! model name under an explicit credential mode, and a generic key-value
//! store discovered by table name and scanned with a field filter. Both are
//! consumed behind traits so deployments can swap the HTTP gateway for the
//! in-memory implementation without touching the resolver.
//!
//! Implementations must be deterministic for identical inputs and fail
//! closed on malformed responses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Rows and Filters
// ============================================================================

/// A single store row as a JSON object.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Exact-match filter on a single string attribute.
///
/// # Invariants
/// - Matching is byte-exact string equality; stores must not normalize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilter {
    /// Attribute name to match.
    pub field: String,
    /// Required attribute value.
    pub value: String,
}

impl FieldFilter {
    /// Creates an exact-match filter.
    #[must_use]
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Returns true when the row's attribute equals the filter value.
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        row.get(&self.field).and_then(serde_json::Value::as_str) == Some(self.value.as_str())
    }
}

/// Structured store list query.
///
/// # Invariants
/// - `selection` is a projection hint; stores may return additional fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Model name to query.
    pub model: String,
    /// Exact-match filter.
    pub filter: FieldFilter,
    /// Requested attribute projection.
    pub selection: Vec<String>,
    /// Maximum number of rows to return.
    pub limit: usize,
}

// ============================================================================
// SECTION: Credential Modes
// ============================================================================

/// Credential mode for structured store queries.
///
/// # Invariants
/// - Variants are stable for telemetry and probe labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Elevated service credential.
    Service,
    /// The caller's own credential.
    Caller,
}

impl AuthMode {
    /// Returns the stable label for the credential mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Caller => "caller",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("store io error: {0}")]
    Io(String),
    /// Store returned malformed or oversized data.
    #[error("store invalid data: {0}")]
    Invalid(String),
    /// Store could not be reached or refused the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

// ============================================================================
// SECTION: Store Traits
// ============================================================================

/// Structured record store queried by model name.
pub trait StructuredStore: Send + Sync {
    /// Lists rows matching the query under the given credential mode.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be queried.
    fn list(&self, auth: AuthMode, query: &ListQuery) -> Result<Vec<Row>, StoreError>;

    /// Reports store readiness for liveness/readiness probes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn readiness(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Generic key-value store with table discovery and scans.
pub trait KeyValueStore: Send + Sync {
    /// Returns the names of all reachable tables.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when table names cannot be listed.
    fn table_names(&self) -> Result<Vec<String>, StoreError>;

    /// Scans a table for rows matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the scan fails.
    fn scan(&self, table: &str, filter: &FieldFilter, limit: usize)
    -> Result<Vec<Row>, StoreError>;

    /// Reports store readiness for liveness/readiness probes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn readiness(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

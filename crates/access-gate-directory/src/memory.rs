// crates/access-gate-directory/src/memory.rs
// ============================================================================
// Module: In-Memory Directory Store
// Description: BTreeMap-backed store implementing both store interfaces.
// Purpose: Back tests and local runs without a network gateway.
// Dependencies: crate::store
// ============================================================================

//! ## Overview
//! [`MemoryDirectoryStore`] holds structured models and key-value tables in
//! memory. It implements both store traits so a single instance can back the
//! whole resolver. Failure injection for the structured side lets tests
//! exercise the unavailable-tier path deterministically.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::store::AuthMode;
use crate::store::FieldFilter;
use crate::store::KeyValueStore;
use crate::store::ListQuery;
use crate::store::Row;
use crate::store::StoreError;
use crate::store::StructuredStore;

// ============================================================================
// SECTION: Memory Store
// ============================================================================

/// In-memory store backing tests and the `memory` store mode.
///
/// # Invariants
/// - Scans return rows in insertion order.
/// - `selection` projections are treated as hints; full rows are returned.
#[derive(Debug, Default)]
pub struct MemoryDirectoryStore {
    /// Structured model rows keyed by model name.
    models: BTreeMap<String, Vec<Row>>,
    /// Key-value table rows keyed by table name.
    tables: BTreeMap<String, Vec<Row>>,
    /// When set, structured queries fail with this reason.
    structured_error: Option<String>,
}

impl MemoryDirectoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Injects a structured-store failure for every subsequent query.
    #[must_use]
    pub fn with_structured_error(mut self, reason: impl Into<String>) -> Self {
        self.structured_error = Some(reason.into());
        self
    }

    /// Adds a row to a structured model, creating the model as needed.
    pub fn insert_model_row(&mut self, model: impl Into<String>, row: Row) {
        self.models.entry(model.into()).or_default().push(row);
    }

    /// Adds a row to a key-value table, creating the table as needed.
    pub fn insert_table_row(&mut self, table: impl Into<String>, row: Row) {
        self.tables.entry(table.into()).or_default().push(row);
    }

    /// Creates an empty key-value table so discovery can see it.
    pub fn create_table(&mut self, table: impl Into<String>) {
        self.tables.entry(table.into()).or_default();
    }
}

impl StructuredStore for MemoryDirectoryStore {
    fn list(&self, _auth: AuthMode, query: &ListQuery) -> Result<Vec<Row>, StoreError> {
        if let Some(reason) = &self.structured_error {
            return Err(StoreError::Unavailable(reason.clone()));
        }
        let rows = self.models.get(&query.model).map(Vec::as_slice).unwrap_or_default();
        Ok(rows
            .iter()
            .filter(|row| query.filter.matches(row))
            .take(query.limit)
            .cloned()
            .collect())
    }
}

impl KeyValueStore for MemoryDirectoryStore {
    fn table_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.tables.keys().cloned().collect())
    }

    fn scan(
        &self,
        table: &str,
        filter: &FieldFilter,
        limit: usize,
    ) -> Result<Vec<Row>, StoreError> {
        let Some(rows) = self.tables.get(table) else {
            return Err(StoreError::Unavailable(format!("table not found: {table}")));
        };
        Ok(rows.iter().filter(|row| filter.matches(row)).take(limit).cloned().collect())
    }
}

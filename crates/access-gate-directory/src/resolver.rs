// crates/access-gate-directory/src/resolver.rs
// ============================================================================
// Module: Tiered Directory Resolver
// Description: Ordered fallback lookup resolving emails to access records.
// Purpose: Produce complete records with per-tier diagnostics, never partials.
// Dependencies: access-gate-core, access-gate-config, crate::store
// ============================================================================

//! ## Overview
//! The resolver walks an ordered chain of lookup tiers — structured store
//! under the service credential, structured store under the caller
//! credential, then a key-value table scan — and short-circuits on the first
//! hit. Every tier outcome is recorded as a [`TierProbe`]: a store failure
//! becomes `Unavailable` with its reason and the chain continues, so a
//! transient outage on one tier degrades to the next instead of failing the
//! caller. Only validation problems are errors; exhausting every tier is a
//! [`Resolution`] with no record and the full probe list.
//!
//! Invariants:
//! - The email is normalized before any store is queried.
//! - A hit from any tier always yields a fully normalized record.
//! - Permission hydration failures degrade to the all-false bundle.
//! - Explicit table configuration wins over discovery; discovery is audited
//!   as degraded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use access_gate_config::AccessGateConfig;
use access_gate_config::DirectoryConfig;
use access_gate_config::StoreMode;
use access_gate_core::Email;
use access_gate_core::PermissionFlags;
use access_gate_core::RoleTitle;
use access_gate_core::UserAccessRecord;
use serde::Serialize;
use thiserror::Error;

use crate::audit::AuditEvent;
use crate::audit::AuditSink;
use crate::discovery::discover_table;
use crate::http::HttpDirectoryStore;
use crate::memory::MemoryDirectoryStore;
use crate::normalize::flags_from_row;
use crate::normalize::normalize_row;
use crate::store::AuthMode;
use crate::store::FieldFilter;
use crate::store::KeyValueStore;
use crate::store::ListQuery;
use crate::store::Row;
use crate::store::StoreError;
use crate::store::StructuredStore;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Structured model queried for user access rows.
pub const USER_ACCESS_MODEL: &str = "UserAccess";

/// Row attribute keying the user lookup.
const EMAIL_ATTR: &str = "email";

/// Row attribute keying the permission lookup.
const ROLE_TITLE_ATTR: &str = "roleTitle";

/// Attributes projected by structured user queries.
const USER_SELECTION: [&str; 13] = [
    "email",
    "name",
    "roleTitle",
    "enterprise",
    "segment",
    "platform",
    "division",
    "plant",
    "hierarchyString",
    "level",
    "isActive",
    "cognitoGroups",
    "accessScope",
];

// ============================================================================
// SECTION: Probes and Outcomes
// ============================================================================

/// Outcome of probing a single lookup tier.
///
/// # Invariants
/// - `Miss` and `Unavailable` both fall through to the next tier; they are
///   distinguished here so outages stay observable in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum TierOutcome {
    /// The tier returned a row.
    Hit,
    /// The tier answered with no matching row.
    Miss,
    /// The tier could not be queried.
    Unavailable(String),
}

/// Record of one probed tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierProbe {
    /// Tier label (`structured:service`, `structured:caller`,
    /// `key-value:<table>`).
    pub model: String,
    /// Probe outcome.
    #[serde(flatten)]
    pub outcome: TierOutcome,
}

/// Final resolution outcome with diagnostics.
///
/// # Invariants
/// - `model_used` is present exactly when `user` is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// Resolved record, when any tier hit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserAccessRecord>,
    /// Tier label that produced the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    /// Every tier probed, in chain order.
    pub probes: Vec<TierProbe>,
}

impl Resolution {
    /// Returns true when a record was resolved.
    #[must_use]
    pub const fn found(&self) -> bool {
        self.user.is_some()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Resolution errors.
///
/// # Invariants
/// - Store failures are never surfaced here; they become tier probes.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Missing or unresolvable email, rejected before any store is queried.
    #[error("validation error: {0}")]
    Validation(String),
    /// Failure outside the guarded tiers.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Tiered directory resolver.
pub struct DirectoryResolver {
    /// Structured record store (tiers one and two).
    structured: Box<dyn StructuredStore>,
    /// Key-value store (tier three and permission hydration).
    key_value: Box<dyn KeyValueStore>,
    /// Directory lookup settings.
    config: DirectoryConfig,
    /// Audit sink for resolution events.
    audit: Arc<dyn AuditSink>,
}

impl DirectoryResolver {
    /// Creates a resolver over the given stores.
    #[must_use]
    pub fn new(
        structured: Box<dyn StructuredStore>,
        key_value: Box<dyn KeyValueStore>,
        config: DirectoryConfig,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            structured,
            key_value,
            config,
            audit,
        }
    }

    /// Builds a resolver with stores selected by the root configuration.
    ///
    /// Memory mode backs both seams with empty in-memory stores; http mode
    /// opens two gateway clients against the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the http mode is selected without gateway
    /// settings or a gateway client cannot be constructed.
    pub fn from_config(
        config: &AccessGateConfig,
        audit: Arc<dyn AuditSink>,
    ) -> Result<Self, StoreError> {
        let (structured, key_value): (Box<dyn StructuredStore>, Box<dyn KeyValueStore>) =
            match config.stores.mode {
                StoreMode::Memory => (
                    Box::new(MemoryDirectoryStore::new()),
                    Box::new(MemoryDirectoryStore::new()),
                ),
                StoreMode::Http => {
                    let http = config.stores.http.as_ref().ok_or_else(|| {
                        StoreError::Invalid("http store mode requires stores.http".to_string())
                    })?;
                    (
                        Box::new(HttpDirectoryStore::from_config(http)?),
                        Box::new(HttpDirectoryStore::from_config(http)?),
                    )
                }
            };
        Ok(Self::new(structured, key_value, config.directory.clone(), audit))
    }

    /// Resolves an email through the tier chain.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Validation`] when no email can be normalized
    /// from the input. Exhausting every tier is not an error.
    pub fn resolve(&self, raw_email: &str) -> Result<Resolution, ResolveError> {
        let Some(email) = Email::normalize(raw_email) else {
            return Err(ResolveError::Validation("email is required".to_string()));
        };
        let mut probes: Vec<TierProbe> = Vec::new();

        for auth in [AuthMode::Service, AuthMode::Caller] {
            let tier = format!("structured:{}", auth.as_str());
            match self.structured.list(auth, &self.user_query(&email)) {
                Ok(rows) => {
                    if let Some(row) = rows.into_iter().next() {
                        probes.push(probe(&tier, TierOutcome::Hit));
                        return Ok(self.complete(&email, &row, tier, probes));
                    }
                    probes.push(probe(&tier, TierOutcome::Miss));
                }
                Err(error) => probes.push(probe(&tier, TierOutcome::Unavailable(error.to_string()))),
            }
        }

        match self.user_table() {
            Ok(Some(table)) => {
                let tier = format!("key-value:{table}");
                let filter = FieldFilter::equals(EMAIL_ATTR, email.as_str());
                match self.key_value.scan(&table, &filter, self.config.scan_limit) {
                    Ok(rows) => {
                        if let Some(row) = rows.into_iter().next() {
                            probes.push(probe(&tier, TierOutcome::Hit));
                            return Ok(self.complete(&email, &row, tier, probes));
                        }
                        probes.push(probe(&tier, TierOutcome::Miss));
                    }
                    Err(error) => {
                        probes.push(probe(&tier, TierOutcome::Unavailable(error.to_string())));
                    }
                }
            }
            Ok(None) => probes.push(probe(
                "key-value:discovery",
                TierOutcome::Unavailable("no user access table located".to_string()),
            )),
            Err(error) => probes.push(probe(
                "key-value:discovery",
                TierOutcome::Unavailable(error.to_string()),
            )),
        }

        self.audit.record(&AuditEvent::Resolution {
            email: email.as_str(),
            outcome: "not_found",
            model_used: None,
            tiers_probed: probes.len(),
        });
        Ok(Resolution {
            user: None,
            model_used: None,
            probes,
        })
    }

    /// Hydrates the permission bundle for a role title.
    ///
    /// Any failure along the way (no table, scan error, no row) degrades to
    /// the all-false bundle.
    #[must_use]
    pub fn hydrate_permissions(&self, role_title: &RoleTitle) -> PermissionFlags {
        let Ok(Some(table)) = self.permission_table() else {
            return PermissionFlags::none();
        };
        let filter = FieldFilter::equals(ROLE_TITLE_ATTR, role_title.as_str());
        match self.key_value.scan(&table, &filter, self.config.scan_limit) {
            Ok(rows) => rows.first().map(flags_from_row).unwrap_or_default(),
            Err(_) => PermissionFlags::none(),
        }
    }

    /// Reports readiness of both backing stores.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] from the first store that is not ready.
    pub fn readiness(&self) -> Result<(), StoreError> {
        self.structured.readiness()?;
        self.key_value.readiness()
    }

    /// Finishes a hit: normalization, permission hydration, audit.
    fn complete(
        &self,
        email: &Email,
        row: &Row,
        tier: String,
        probes: Vec<TierProbe>,
    ) -> Resolution {
        let mut record = normalize_row(email, row);
        record.permissions = self.hydrate_permissions(&record.role_title);
        self.audit.record(&AuditEvent::Resolution {
            email: email.as_str(),
            outcome: "found",
            model_used: Some(&tier),
            tiers_probed: probes.len(),
        });
        Resolution {
            user: Some(record),
            model_used: Some(tier),
            probes,
        }
    }

    /// Builds the structured user query.
    fn user_query(&self, email: &Email) -> ListQuery {
        ListQuery {
            model: USER_ACCESS_MODEL.to_string(),
            filter: FieldFilter::equals(EMAIL_ATTR, email.as_str()),
            selection: USER_SELECTION.iter().map(|attr| (*attr).to_string()).collect(),
            limit: self.config.scan_limit,
        }
    }

    /// Locates the user-access table (explicit name, else discovery).
    fn user_table(&self) -> Result<Option<String>, StoreError> {
        self.locate_table(
            self.config.user_access_table.as_deref(),
            &self.config.user_table_pattern,
        )
    }

    /// Locates the role-permission table (explicit name, else discovery).
    fn permission_table(&self) -> Result<Option<String>, StoreError> {
        self.locate_table(
            self.config.role_permission_table.as_deref(),
            &self.config.permission_table_pattern,
        )
    }

    /// Shared explicit-name-else-discovery logic with degraded-mode audit.
    fn locate_table(
        &self,
        configured: Option<&str>,
        pattern: &str,
    ) -> Result<Option<String>, StoreError> {
        if let Some(name) = configured {
            return Ok(Some(name.to_string()));
        }
        let names = self.key_value.table_names()?;
        let selected = discover_table(&names, pattern);
        if let Some(table) = &selected {
            self.audit.record(&AuditEvent::DegradedDiscovery {
                pattern,
                table,
            });
        }
        Ok(selected)
    }
}

/// Builds a probe record.
fn probe(model: &str, outcome: TierOutcome) -> TierProbe {
    TierProbe {
        model: model.to_string(),
        outcome,
    }
}

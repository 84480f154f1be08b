// crates/access-gate-directory/src/http.rs
// ============================================================================
// Module: HTTP Directory Store
// Description: HTTP store gateway client for both store interfaces.
// Purpose: Reach the structured and key-value stores over a JSON gateway.
// Dependencies: access-gate-config, reqwest, serde, url
// ============================================================================

//! ## Overview
//! [`HttpDirectoryStore`] talks to the store gateway over JSON POST
//! endpoints: `structured/list` for the record store, `tables/list` and
//! `tables/scan` for the key-value store. Credential modes map to bearer
//! tokens; the service token backs elevated queries and key-value scans, the
//! caller token backs caller-credential queries.
//!
//! Invariants:
//! - Non-success gateway statuses fail closed as unavailable.
//! - Redirects are rejected.
//! - Response bodies are capped at the configured byte limit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use access_gate_config::HttpStoreConfig;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde::Serialize;
use url::Url;

use crate::store::AuthMode;
use crate::store::FieldFilter;
use crate::store::KeyValueStore;
use crate::store::ListQuery;
use crate::store::Row;
use crate::store::StoreError;
use crate::store::StructuredStore;

// ============================================================================
// SECTION: Wire Payloads
// ============================================================================

/// Key-value scan request payload.
#[derive(Debug, Serialize)]
struct ScanRequest<'a> {
    /// Table to scan.
    table: &'a str,
    /// Exact-match filter.
    filter: &'a FieldFilter,
    /// Maximum number of rows to return.
    limit: usize,
}

/// Structured list response payload.
#[derive(Debug, Deserialize)]
struct ListResponse {
    /// Matching rows.
    data: Vec<Row>,
}

/// Table listing response payload.
#[derive(Debug, Deserialize)]
struct TablesResponse {
    /// Reachable table names.
    tables: Vec<String>,
}

/// Key-value scan response payload.
#[derive(Debug, Deserialize)]
struct ScanResponse {
    /// Matching rows.
    items: Vec<Row>,
}

// ============================================================================
// SECTION: HTTP Store
// ============================================================================

/// HTTP store gateway client.
pub struct HttpDirectoryStore {
    /// Blocking HTTP client with timeout and no redirects.
    client: Client,
    /// Gateway base URL.
    base: Url,
    /// Bearer token for the elevated service credential.
    service_token: Option<String>,
    /// Bearer token for the caller credential.
    caller_token: Option<String>,
    /// Maximum accepted response body size in bytes.
    max_response_bytes: usize,
}

impl HttpDirectoryStore {
    /// Builds a gateway client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when the base URL does not parse and
    /// [`StoreError::Io`] when the HTTP client cannot be constructed.
    pub fn from_config(config: &HttpStoreConfig) -> Result<Self, StoreError> {
        let base = Url::parse(&config.base_url)
            .map_err(|err| StoreError::Invalid(format!("invalid base url: {err}")))?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(Policy::none())
            .build()
            .map_err(|err| StoreError::Io(format!("client build failed: {err}")))?;
        Ok(Self {
            client,
            base,
            service_token: config.service_token.clone(),
            caller_token: config.caller_token.clone(),
            max_response_bytes: config.max_response_bytes,
        })
    }

    /// Returns the bearer token for a credential mode, when configured.
    fn token_for(&self, auth: AuthMode) -> Option<&str> {
        match auth {
            AuthMode::Service => self.service_token.as_deref(),
            AuthMode::Caller => self.caller_token.as_deref(),
        }
    }

    /// Posts a JSON payload and parses the capped JSON response.
    fn post<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &impl Serialize,
    ) -> Result<T, StoreError> {
        let url = self
            .base
            .join(path)
            .map_err(|err| StoreError::Invalid(format!("invalid gateway path: {err}")))?;
        let mut request = self.client.post(url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response =
            request.send().map_err(|err| StoreError::Unavailable(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Unavailable(format!("gateway status {status}")));
        }
        let body = self.read_capped(response)?;
        serde_json::from_slice(&body)
            .map_err(|err| StoreError::Invalid(format!("malformed gateway response: {err}")))
    }

    /// Reads a response body, enforcing the configured byte cap.
    fn read_capped(&self, response: reqwest::blocking::Response) -> Result<Vec<u8>, StoreError> {
        let cap = u64::try_from(self.max_response_bytes).unwrap_or(u64::MAX);
        let mut body = Vec::new();
        response
            .take(cap.saturating_add(1))
            .read_to_end(&mut body)
            .map_err(|err| StoreError::Io(format!("response read failed: {err}")))?;
        if body.len() > self.max_response_bytes {
            return Err(StoreError::Invalid("response exceeds size limit".to_string()));
        }
        Ok(body)
    }
}

impl StructuredStore for HttpDirectoryStore {
    fn list(&self, auth: AuthMode, query: &ListQuery) -> Result<Vec<Row>, StoreError> {
        let response: ListResponse = self.post("structured/list", self.token_for(auth), query)?;
        Ok(response.data)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        self.table_names().map(|_| ())
    }
}

impl KeyValueStore for HttpDirectoryStore {
    fn table_names(&self) -> Result<Vec<String>, StoreError> {
        let response: TablesResponse =
            self.post("tables/list", self.token_for(AuthMode::Service), &serde_json::json!({}))?;
        Ok(response.tables)
    }

    fn scan(
        &self,
        table: &str,
        filter: &FieldFilter,
        limit: usize,
    ) -> Result<Vec<Row>, StoreError> {
        let request = ScanRequest {
            table,
            filter,
            limit,
        };
        let response: ScanResponse =
            self.post("tables/scan", self.token_for(AuthMode::Service), &request)?;
        Ok(response.items)
    }
}

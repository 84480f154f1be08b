// crates/access-gate-config/src/lib.rs
// ============================================================================
// Module: Access Gate Configuration
// Description: Canonical configuration model, TOML loading, and validation.
// Purpose: Provide one validated config surface for directory, stores, server.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! This crate defines [`AccessGateConfig`], the single configuration surface
//! consumed by the directory resolver, the HTTP server, and the CLI. Configs
//! load from TOML, are overlaid with environment overrides for the directory
//! table names, and then validate fail-closed: an invalid value is a
//! [`ConfigError`] with a stable message, never a silently patched default.
//!
//! Invariants:
//! - Explicitly configured table names take precedence over name-pattern
//!   discovery; discovery is a fallback only.
//! - Validation messages are stable strings asserted by tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Environment Overrides
// ============================================================================

/// Environment variable overriding the user-access table name.
pub const USER_ACCESS_TABLE_ENV: &str = "USER_ACCESS_TABLE_NAME";

/// Environment variable overriding the role-permission table name.
pub const ROLE_PERMISSION_TABLE_ENV: &str = "ROLE_PERMISSION_TABLE_NAME";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Configuration failed validation.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Directory Config
// ============================================================================

/// Directory lookup configuration.
///
/// # Invariants
/// - Explicit table names, when present, skip name-pattern discovery.
/// - Patterns must be non-empty; they seed the longest-match heuristic used
///   only in the degraded discovery mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Explicit user-access table name (skips discovery when set).
    pub user_access_table: Option<String>,
    /// Explicit role-permission table name (skips discovery when set).
    pub role_permission_table: Option<String>,
    /// Name pattern locating the user-access table during discovery.
    pub user_table_pattern: String,
    /// Name pattern locating the role-permission table during discovery.
    pub permission_table_pattern: String,
    /// Row limit for directory scans.
    pub scan_limit: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            user_access_table: None,
            role_permission_table: None,
            user_table_pattern: "UserAccess".to_string(),
            permission_table_pattern: "RolePermission".to_string(),
            scan_limit: 1,
        }
    }
}

// ============================================================================
// SECTION: Store Config
// ============================================================================

/// Backing store selection.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreMode {
    /// In-memory tables (tests and local runs).
    Memory,
    /// HTTP store gateway.
    Http,
}

/// HTTP store gateway configuration.
///
/// # Invariants
/// - `base_url` must carry an http/https scheme.
/// - Tokens, when present, are non-empty and contain no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpStoreConfig {
    /// Gateway base URL.
    pub base_url: String,
    /// Bearer token for the elevated service credential.
    pub service_token: Option<String>,
    /// Bearer token for the caller credential.
    pub caller_token: Option<String>,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum accepted response body size in bytes.
    pub max_response_bytes: usize,
}

impl Default for HttpStoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            service_token: None,
            caller_token: None,
            timeout_ms: 10_000,
            max_response_bytes: 1024 * 1024,
        }
    }
}

/// Backing store configuration.
///
/// # Invariants
/// - `http` is required when `mode` is [`StoreMode::Http`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoresConfig {
    /// Selected store mode.
    pub mode: StoreMode,
    /// HTTP gateway settings (required in http mode).
    pub http: Option<HttpStoreConfig>,
}

impl Default for StoresConfig {
    fn default() -> Self {
        Self {
            mode: StoreMode::Memory,
            http: None,
        }
    }
}

// ============================================================================
// SECTION: Server Config
// ============================================================================

/// HTTP server configuration.
///
/// # Invariants
/// - `bind` must parse as a socket address.
/// - `max_body_bytes` is a hard upper bound on request bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    pub bind: String,
    /// Maximum allowed request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            max_body_bytes: 64 * 1024,
        }
    }
}

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Root Access Gate configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessGateConfig {
    /// Directory lookup settings.
    pub directory: DirectoryConfig,
    /// Backing store settings.
    pub stores: StoresConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
}

impl AccessGateConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid TOML for
    /// this model.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it cannot be parsed.
    pub fn from_toml_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Overlays directory table names from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Overlays directory table names from an arbitrary lookup.
    ///
    /// Blank values are ignored; an override never clears a configured name.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(USER_ACCESS_TABLE_ENV)
            && !value.trim().is_empty()
        {
            self.directory.user_access_table = Some(value);
        }
        if let Some(value) = lookup(ROLE_PERMISSION_TABLE_ENV)
            && !value.trim().is_empty()
        {
            self.directory.role_permission_table = Some(value);
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] with a stable message for the first
    /// violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_directory(&self.directory)?;
        validate_stores(&self.stores)?;
        validate_server(&self.server)?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates the directory section.
fn validate_directory(directory: &DirectoryConfig) -> Result<(), ConfigError> {
    if let Some(name) = &directory.user_access_table
        && name.trim().is_empty()
    {
        return Err(ConfigError::Invalid(
            "directory.user_access_table must be non-empty when set".to_string(),
        ));
    }
    if let Some(name) = &directory.role_permission_table
        && name.trim().is_empty()
    {
        return Err(ConfigError::Invalid(
            "directory.role_permission_table must be non-empty when set".to_string(),
        ));
    }
    if directory.user_table_pattern.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "directory.user_table_pattern must be non-empty".to_string(),
        ));
    }
    if directory.permission_table_pattern.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "directory.permission_table_pattern must be non-empty".to_string(),
        ));
    }
    if directory.scan_limit == 0 {
        return Err(ConfigError::Invalid(
            "directory.scan_limit must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Validates the stores section.
fn validate_stores(stores: &StoresConfig) -> Result<(), ConfigError> {
    match stores.mode {
        StoreMode::Memory => Ok(()),
        StoreMode::Http => {
            let Some(http) = &stores.http else {
                return Err(ConfigError::Invalid(
                    "http store mode requires stores.http".to_string(),
                ));
            };
            validate_http_store(http)
        }
    }
}

/// Validates the HTTP store gateway settings.
fn validate_http_store(http: &HttpStoreConfig) -> Result<(), ConfigError> {
    if !(http.base_url.starts_with("http://") || http.base_url.starts_with("https://")) {
        return Err(ConfigError::Invalid(
            "stores.http.base_url must start with http:// or https://".to_string(),
        ));
    }
    for (label, token) in [
        ("stores.http.service_token", http.service_token.as_ref()),
        ("stores.http.caller_token", http.caller_token.as_ref()),
    ] {
        if let Some(token) = token {
            if token.is_empty() {
                return Err(ConfigError::Invalid(format!("{label} must be non-empty when set")));
            }
            if token.chars().any(char::is_whitespace) {
                return Err(ConfigError::Invalid(format!("{label} must not contain whitespace")));
            }
        }
    }
    if http.timeout_ms == 0 {
        return Err(ConfigError::Invalid(
            "stores.http.timeout_ms must be greater than zero".to_string(),
        ));
    }
    if http.max_response_bytes == 0 {
        return Err(ConfigError::Invalid(
            "stores.http.max_response_bytes must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Validates the server section.
fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.bind.parse::<SocketAddr>().is_err() {
        return Err(ConfigError::Invalid(
            "server.bind must be a valid socket address".to_string(),
        ));
    }
    if server.max_body_bytes == 0 {
        return Err(ConfigError::Invalid(
            "server.max_body_bytes must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

//! Config loading tests for access-gate-config.
// crates/access-gate-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Tests
// Description: Validate TOML parsing, file loading, and default application.
// Purpose: Ensure configs load deterministically and defaults stay documented.
// =============================================================================

use std::io::Write;

use access_gate_config::AccessGateConfig;
use access_gate_config::StoreMode;

mod common;

type TestResult = Result<(), String>;

#[test]
fn empty_toml_yields_documented_defaults() -> TestResult {
    let config = AccessGateConfig::from_toml_str("").map_err(|err| err.to_string())?;
    if config.directory.user_table_pattern != "UserAccess" {
        return Err("default user table pattern changed".to_string());
    }
    if config.directory.permission_table_pattern != "RolePermission" {
        return Err("default permission table pattern changed".to_string());
    }
    if config.stores.mode != StoreMode::Memory {
        return Err("default store mode changed".to_string());
    }
    if config.server.bind != "127.0.0.1:8080" {
        return Err("default bind changed".to_string());
    }
    config.validate().map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn malformed_toml_is_a_parse_error() -> TestResult {
    match AccessGateConfig::from_toml_str("[directory") {
        Err(error) => {
            if error.to_string().starts_with("config parse error") {
                Ok(())
            } else {
                Err(format!("unexpected error: {error}"))
            }
        }
        Ok(_) => Err("expected parse error".to_string()),
    }
}

#[test]
fn file_load_round_trips() -> TestResult {
    let mut file = tempfile::NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(
        br#"
        [directory]
        user_access_table = "UserAccess-prod"

        [server]
        bind = "127.0.0.1:9090"
        "#,
    )
    .map_err(|err| err.to_string())?;
    let config =
        AccessGateConfig::from_toml_path(file.path()).map_err(|err| err.to_string())?;
    if config.directory.user_access_table.as_deref() != Some("UserAccess-prod") {
        return Err("table override not loaded".to_string());
    }
    if config.server.bind != "127.0.0.1:9090" {
        return Err("bind not loaded".to_string());
    }
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() -> TestResult {
    let path = std::path::Path::new("/nonexistent/access-gate.toml");
    match AccessGateConfig::from_toml_path(path) {
        Err(error) => {
            if error.to_string().starts_with("config io error") {
                Ok(())
            } else {
                Err(format!("unexpected error: {error}"))
            }
        }
        Ok(_) => Err("expected io error".to_string()),
    }
}

#[test]
fn fixture_from_common_module_is_reusable() -> TestResult {
    common::minimal_config().map_err(|err| err.to_string())?.validate().map_err(|err| err.to_string())
}

//! Directory config validation tests for access-gate-config.
// crates/access-gate-config/tests/directory_validation.rs
// =============================================================================
// Module: Directory Config Validation Tests
// Description: Validate table names, discovery patterns, and scan limits.
// Purpose: Ensure directory lookup settings fail closed on invalid values.
// =============================================================================

use access_gate_config::ConfigError;

mod common;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<(), ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(()) => Err("expected invalid config".to_string()),
    }
}

#[test]
fn minimal_config_is_valid() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn blank_user_access_table_override_is_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.directory.user_access_table = Some("   ".to_string());
    assert_invalid(config.validate(), "directory.user_access_table must be non-empty")?;
    Ok(())
}

#[test]
fn blank_role_permission_table_override_is_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.directory.role_permission_table = Some(String::new());
    assert_invalid(config.validate(), "directory.role_permission_table must be non-empty")?;
    Ok(())
}

#[test]
fn empty_user_table_pattern_is_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.directory.user_table_pattern = String::new();
    assert_invalid(config.validate(), "directory.user_table_pattern must be non-empty")?;
    Ok(())
}

#[test]
fn empty_permission_table_pattern_is_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.directory.permission_table_pattern = "  ".to_string();
    assert_invalid(config.validate(), "directory.permission_table_pattern must be non-empty")?;
    Ok(())
}

#[test]
fn zero_scan_limit_is_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.directory.scan_limit = 0;
    assert_invalid(config.validate(), "directory.scan_limit must be greater than zero")?;
    Ok(())
}

#[test]
fn env_override_replaces_configured_table_names() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.directory.user_access_table = Some("UserAccess-dev".to_string());
    config.apply_overrides_from(|key| match key {
        access_gate_config::USER_ACCESS_TABLE_ENV => Some("UserAccess-prod".to_string()),
        access_gate_config::ROLE_PERMISSION_TABLE_ENV => Some("RolePermission-prod".to_string()),
        _ => None,
    });
    if config.directory.user_access_table.as_deref() != Some("UserAccess-prod") {
        return Err("user access override not applied".to_string());
    }
    if config.directory.role_permission_table.as_deref() != Some("RolePermission-prod") {
        return Err("role permission override not applied".to_string());
    }
    Ok(())
}

#[test]
fn blank_env_override_is_ignored() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.directory.user_access_table = Some("UserAccess-dev".to_string());
    config.apply_overrides_from(|_| Some("  ".to_string()));
    if config.directory.user_access_table.as_deref() != Some("UserAccess-dev") {
        return Err("blank override should not clear the configured name".to_string());
    }
    Ok(())
}

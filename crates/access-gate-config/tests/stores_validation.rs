//! Store config validation tests for access-gate-config.
// crates/access-gate-config/tests/stores_validation.rs
// =============================================================================
// Module: Store Config Validation Tests
// Description: Validate store mode, gateway URL, token, and limit constraints.
// Purpose: Ensure backing store settings fail closed and enforce limits.
// =============================================================================

use access_gate_config::ConfigError;
use access_gate_config::HttpStoreConfig;
use access_gate_config::StoreMode;

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

/// Valid gateway settings used as the mutation base.
fn gateway() -> HttpStoreConfig {
    HttpStoreConfig {
        base_url: "https://stores.internal.example".to_string(),
        ..HttpStoreConfig::default()
    }
}

#[test]
fn http_mode_requires_gateway_settings() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.stores.mode = StoreMode::Http;
    config.stores.http = None;
    assert_invalid(config.validate(), "http store mode requires stores.http")?;
    Ok(())
}

#[test]
fn gateway_url_requires_http_scheme() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.stores.mode = StoreMode::Http;
    config.stores.http = Some(HttpStoreConfig {
        base_url: "ftp://stores.internal.example".to_string(),
        ..gateway()
    });
    assert_invalid(config.validate(), "stores.http.base_url must start with http")?;
    Ok(())
}

#[test]
fn empty_service_token_is_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.stores.mode = StoreMode::Http;
    config.stores.http = Some(HttpStoreConfig {
        service_token: Some(String::new()),
        ..gateway()
    });
    assert_invalid(config.validate(), "stores.http.service_token must be non-empty")?;
    Ok(())
}

#[test]
fn token_with_whitespace_is_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.stores.mode = StoreMode::Http;
    config.stores.http = Some(HttpStoreConfig {
        caller_token: Some("bad token".to_string()),
        ..gateway()
    });
    assert_invalid(config.validate(), "stores.http.caller_token must not contain whitespace")?;
    Ok(())
}

#[test]
fn zero_timeout_is_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.stores.mode = StoreMode::Http;
    config.stores.http = Some(HttpStoreConfig {
        timeout_ms: 0,
        ..gateway()
    });
    assert_invalid(config.validate(), "stores.http.timeout_ms must be greater than zero")?;
    Ok(())
}

#[test]
fn zero_response_cap_is_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.stores.mode = StoreMode::Http;
    config.stores.http = Some(HttpStoreConfig {
        max_response_bytes: 0,
        ..gateway()
    });
    assert_invalid(config.validate(), "stores.http.max_response_bytes must be greater than zero")?;
    Ok(())
}

#[test]
fn memory_mode_ignores_gateway_settings() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.stores.mode = StoreMode::Memory;
    config.stores.http = Some(HttpStoreConfig {
        base_url: "not a url".to_string(),
        ..HttpStoreConfig::default()
    });
    config.validate().map_err(|err| err.to_string())?;
    Ok(())
}

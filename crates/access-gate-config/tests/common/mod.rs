//! Shared fixtures for access-gate-config integration tests.
// crates/access-gate-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Fixtures
// Description: Minimal valid configuration shared across validation tests.
// Purpose: Keep per-test setup focused on the constraint under test.
// =============================================================================

use access_gate_config::AccessGateConfig;
use access_gate_config::ConfigError;

/// Minimal valid configuration used as the mutation base for tests.
pub fn minimal_config() -> Result<AccessGateConfig, ConfigError> {
    AccessGateConfig::from_toml_str(
        r#"
        [directory]
        user_table_pattern = "UserAccess"
        permission_table_pattern = "RolePermission"

        [stores]
        mode = "memory"

        [server]
        bind = "127.0.0.1:8080"
        "#,
    )
}

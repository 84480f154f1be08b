// crates/access-gate-core/src/lib.rs
// ============================================================================
// Module: Access Gate Core
// Description: Data model and decision logic for hierarchical access control.
// Purpose: Provide pure, deterministic scope, filter, and gate primitives.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This crate defines the Access Gate data model (user access records,
//! permission flags, scoped records) and the pure decision logic built on it:
//! the level-to-scope mapping, the hierarchical record filter, and the
//! permission gate. Nothing in this crate performs I/O; directory resolution
//! and transport live in sibling crates.
//!
//! Invariants:
//! - Decision functions are pure and deterministic for identical inputs.
//! - Unknown or absent authority data collapses to the most restrictive
//!   scope (PLANT) and to all-false permission flags.
//! - An unresolved user is a distinct transient state, never conflated with
//!   a denial.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod runtime;
pub mod session;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use self::core::AccessScope;
pub use self::core::Email;
pub use self::core::HierarchyPath;
pub use self::core::PermissionFlags;
pub use self::core::PermissionKey;
pub use self::core::RecordKind;
pub use self::core::RecordStatus;
pub use self::core::RoleTitle;
pub use self::core::SafetyRecord;
pub use self::core::ScopedRecord;
pub use self::core::UserAccessRecord;
pub use self::runtime::filter_by_scope;
pub use self::runtime::gate::GateCriteria;
pub use self::runtime::gate::GateOutcome;
pub use self::runtime::gate::RecordAction;
pub use self::runtime::gate::evaluate;
pub use self::runtime::scope_allows;
pub use self::session::AccessState;

// crates/access-gate-core/src/core/mod.rs
// ============================================================================
// Module: Access Gate Core Model
// Description: Canonical data model for users, permissions, and records.
// Purpose: Define the types shared by the filter, gate, and directory layers.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The core model groups the identifier newtypes, the access scope enum, the
//! permission flag bundle, the resolved user access record, and the scoped
//! domain records. All types carry stable camelCase wire forms matching the
//! backing store rows.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod identifiers;
pub mod permissions;
pub mod record;
pub mod scope;
pub mod user;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::Email;
pub use identifiers::HierarchyPath;
pub use identifiers::RoleTitle;
pub use permissions::PermissionFlags;
pub use permissions::PermissionKey;
pub use record::RecordKind;
pub use record::RecordStatus;
pub use record::SafetyRecord;
pub use record::ScopedRecord;
pub use scope::AccessScope;
pub use user::DEFAULT_LEVEL;
pub use user::DEFAULT_ROLE_TITLE;
pub use user::UserAccessRecord;

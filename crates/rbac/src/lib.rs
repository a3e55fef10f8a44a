//! # SchoolGate RBAC
//!
//! Role-based access control for the school ERP.
//!
//! ## Components
//!
//! - `PolicyTable` - Static role → module → permission lookup
//! - `Permissions` - Session-bound evaluator over an explicit `RoleSource`
//! - `PermissionGuard` - Allow/deny decision for a piece of content
//!
//! ```
//! use rbac::{PermissionGuard, Permissions, PolicyTable};
//! use shared::UserProfile;
//!
//! let table = PolicyTable::school_default();
//! let profile = Some(UserProfile::new("u-1", "teacher"));
//! let perms = Permissions::new(&table, &profile);
//!
//! assert!(perms.can_view("students"));
//! assert!(!perms.can_delete("students"));
//!
//! let guard = PermissionGuard::hide_if_no_permission("students", Some("delete"));
//! assert!(!guard.render(&perms, "Delete", Some("Read only")).is_allowed());
//! ```

pub mod guard;
pub mod permissions;
pub mod policy_table;
pub mod role_source;

pub use guard::{AccessNotice, DenyReason, Fallback, GuardDecision, GuardOutcome, PermissionGuard};
pub use permissions::Permissions;
pub use policy_table::PolicyTable;
pub use role_source::{RoleFn, RoleSource};

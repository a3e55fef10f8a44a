//! # SchoolGate Shared
//!
//! Common types used across all SchoolGate packages: the role and profile
//! data model, the module/permission catalog, the policy file format and
//! error types.

pub mod catalog;
pub mod config;
pub mod error;
pub mod role;

// Re-exports
pub use catalog::{modules, permissions};
pub use config::*;
pub use error::*;
pub use role::*;

//! Error types for SchoolGate

use thiserror::Error;

/// Error returned when an explicit access check fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Role '{role}' may not access {}: {reason}", target(.module, .permission))]
pub struct AccessDeniedError {
    /// Role that was checked ("none" when there was no session)
    pub role: String,
    pub module: String,
    pub permission: Option<String>,
    pub reason: String,
}

fn target(module: &str, permission: &Option<String>) -> String {
    match permission {
        Some(p) => format!("'{}' on module '{}'", p, module),
        None => format!("module '{}'", module),
    }
}

/// Error returned when a specific role was requested but is not defined
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Role '{role_id}' not found. Available roles: {}", available_roles.join(", "))]
pub struct RoleNotFoundError {
    pub role_id: String,
    pub available_roles: Vec<String>,
}

/// General SchoolGate error type
#[derive(Debug, Error)]
pub enum SchoolGateError {
    #[error(transparent)]
    AccessDenied(#[from] AccessDeniedError),

    #[error(transparent)]
    RoleNotFound(#[from] RoleNotFoundError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SchoolGateError>;

//! Role and user profile types

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Permission sets keyed by module
pub type ModuleGrants = BTreeMap<String, BTreeSet<String>>;

/// Role definition: a label, a description and the modules it may use
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDefinition {
    /// Human-readable role label (e.g., 'Teacher')
    #[serde(default)]
    pub name: String,

    /// Role description shown on the dashboard
    #[serde(default)]
    pub description: String,

    /// Module → permission set. A module with an empty set still grants
    /// module access.
    #[serde(default)]
    pub modules: ModuleGrants,
}

impl RoleDefinition {
    /// Create a role with a label and no modules
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: grant permissions on a module. Granting the same module twice
    /// merges the permission sets.
    pub fn grant<I, P>(mut self, module: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.modules
            .entry(module.into())
            .or_default()
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Check whether the module is a key of this role's mapping
    pub fn has_module(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    /// Check whether the module's permission set contains the permission
    pub fn allows(&self, module: &str, permission: &str) -> bool {
        self.modules
            .get(module)
            .map(|perms| perms.contains(permission))
            .unwrap_or(false)
    }

    /// Total number of (module, permission) pairs
    pub fn permission_count(&self) -> usize {
        self.modules.values().map(|p| p.len()).sum()
    }
}

/// Profile of the signed-in user as handed over by the authentication layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,

    #[serde(default)]
    pub display_name: String,

    /// Role of the user; a profile without one grants nothing
    pub role: Option<String>,
}

impl UserProfile {
    /// Create a profile with a role
    pub fn new(user_id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: String::new(),
            role: Some(role.into()),
        }
    }

    /// Create a profile whose role has not been assigned yet
    pub fn without_role(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: String::new(),
            role: None,
        }
    }

    /// Builder: set display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }
}

/// Summary info for a role in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub module_count: usize,
    pub permission_count: usize,
}

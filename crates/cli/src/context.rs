//! Shared state for a single CLI invocation

use rbac::{Permissions, PolicyTable};
use std::path::Path;

/// Policy table, session role and output mode for one invocation
#[derive(Debug, Clone)]
pub struct AppContext {
    pub table: PolicyTable,
    pub role: Option<String>,
    pub json: bool,
}

impl AppContext {
    /// Load the policy file if one is given, otherwise use the built-in table
    pub fn load(policy: Option<&Path>, role: Option<String>, json: bool) -> shared::Result<Self> {
        let table = match policy {
            Some(path) => PolicyTable::from_config(shared::PolicyConfig::from_file(path)?),
            None => PolicyTable::school_default(),
        };

        if let Some(r) = role.as_deref() {
            if table.get_role(r).is_none() {
                tracing::warn!(role = r, "Role is not defined in the policy; every check will be denied");
            }
        }

        Ok(Self { table, role, json })
    }

    /// Built-in table with the given session role
    pub fn with_role(role: Option<&str>) -> Self {
        Self {
            table: PolicyTable::school_default(),
            role: role.map(str::to_string),
            json: false,
        }
    }

    /// Evaluator bound to the session role
    pub fn permissions(&self) -> Permissions<'_, &Option<String>> {
        Permissions::new(&self.table, &self.role)
    }

    /// Session role, or an error naming the flag to pass
    pub fn require_role(&self) -> anyhow::Result<&str> {
        self.role
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("This command needs a role; pass --role <ROLE>"))
    }
}

//! Permissions - Permission checks for the signed-in user

use crate::{PolicyTable, RoleSource};
use shared::{permissions, AccessDeniedError};

/// Session-bound view over a [`PolicyTable`].
///
/// The role is re-read from the source on every call. With no role, every
/// check is `false`, every list is empty and the description is empty.
#[derive(Debug, Clone, Copy)]
pub struct Permissions<'t, S> {
    table: &'t PolicyTable,
    source: S,
}

impl<'t, S: RoleSource> Permissions<'t, S> {
    /// Bind a table to a role source
    pub fn new(table: &'t PolicyTable, source: S) -> Self {
        Self { table, source }
    }

    pub fn table(&self) -> &'t PolicyTable {
        self.table
    }

    /// Current role, if any
    pub fn current_role(&self) -> Option<String> {
        self.source.current_role()
    }

    /// Whether a user is signed in (with or without a role)
    pub fn is_logged_in(&self) -> bool {
        self.source.is_authenticated()
    }

    // ============== Checks ==============

    pub fn check_module_access(&self, module: &str) -> bool {
        match self.current_role() {
            Some(role) => self.table.has_module_access(&role, module),
            None => false,
        }
    }

    pub fn check_permission(&self, module: &str, permission: &str) -> bool {
        match self.current_role() {
            Some(role) => self.table.has_permission(&role, module, permission),
            None => false,
        }
    }

    /// Modules available to the current user
    pub fn get_user_modules(&self) -> Vec<String> {
        self.current_role()
            .map(|role| self.table.get_modules_for_role(&role))
            .unwrap_or_default()
    }

    /// Permissions of the current user on a module
    pub fn get_module_permissions(&self, module: &str) -> Vec<String> {
        self.current_role()
            .map(|role| self.table.get_permissions_for_module(&role, module))
            .unwrap_or_default()
    }

    pub fn get_user_role_description(&self) -> String {
        self.current_role()
            .map(|role| self.table.get_role_description(&role))
            .unwrap_or_default()
    }

    /// Label of the current role, empty without one
    pub fn get_user_role_name(&self) -> String {
        self.current_role()
            .map(|role| self.table.get_role_name(&role))
            .unwrap_or_default()
    }

    // ============== Convenience checks ==============

    pub fn can_view(&self, module: &str) -> bool {
        self.check_permission(module, permissions::VIEW)
    }

    pub fn can_create(&self, module: &str) -> bool {
        self.check_permission(module, permissions::CREATE)
    }

    pub fn can_edit(&self, module: &str) -> bool {
        self.check_permission(module, permissions::EDIT)
    }

    pub fn can_delete(&self, module: &str) -> bool {
        self.check_permission(module, permissions::DELETE)
    }

    pub fn can_manage(&self, module: &str) -> bool {
        self.check_permission(module, permissions::MANAGE)
    }

    pub fn can_approve(&self, module: &str) -> bool {
        self.check_permission(module, permissions::APPROVE)
    }

    pub fn can_assign(&self, module: &str) -> bool {
        self.check_permission(module, permissions::ASSIGN)
    }

    pub fn can_grade(&self, module: &str) -> bool {
        self.check_permission(module, permissions::GRADE)
    }

    // ============== Enforcement ==============

    /// Check access and return an error if it is not granted.
    ///
    /// Intended for the code path that performs the protected action, where a
    /// boolean is easy to ignore.
    pub fn require(&self, module: &str, permission: Option<&str>) -> Result<(), AccessDeniedError> {
        let role = self.current_role();
        let deny = |reason: &str| {
            tracing::debug!(
                role = role.as_deref().unwrap_or("none"),
                module,
                permission,
                reason,
                "Access denied"
            );
            AccessDeniedError {
                role: role.clone().unwrap_or_else(|| "none".to_string()),
                module: module.to_string(),
                permission: permission.map(str::to_string),
                reason: reason.to_string(),
            }
        };

        let Some(role_id) = role.as_deref() else {
            return Err(deny("no active session"));
        };
        if !self.table.has_module_access(role_id, module) {
            return Err(deny("module not granted"));
        }
        if let Some(p) = permission {
            if !self.table.has_permission(role_id, module, p) {
                return Err(deny("permission not granted"));
            }
        }
        Ok(())
    }
}

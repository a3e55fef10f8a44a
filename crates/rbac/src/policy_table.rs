//! PolicyTable - Static role → module → permission lookup

use shared::{modules, permissions, PolicyConfig, RoleDefinition, RoleNotFoundError, RoleSummary};
use std::collections::BTreeMap;

/// Read-only authorization table.
///
/// Every query is a pure function of the table and its arguments. Unknown
/// roles, modules and permissions are never errors; they answer "no access".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyTable {
    roles: BTreeMap<String, RoleDefinition>,
}

impl PolicyTable {
    /// Create an empty table (denies everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a role, replacing any previous definition with the same id
    pub fn register_role(&mut self, id: impl Into<String>, role: RoleDefinition) {
        self.roles.insert(id.into(), role);
    }

    /// Builder form of [`PolicyTable::register_role`]
    pub fn with_role(mut self, id: impl Into<String>, role: RoleDefinition) -> Self {
        self.register_role(id, role);
        self
    }

    /// Build a table from a validated policy file
    pub fn from_config(config: PolicyConfig) -> Self {
        Self { roles: config.roles }
    }

    /// Convert back into the policy file representation
    pub fn to_config(&self) -> PolicyConfig {
        PolicyConfig {
            version: None,
            roles: self.roles.clone(),
        }
    }

    // ============== Core lookups ==============

    /// True iff the role exists and lists the module, even with an empty
    /// permission set
    pub fn has_module_access(&self, role: &str, module: &str) -> bool {
        self.roles
            .get(role)
            .map(|r| r.has_module(module))
            .unwrap_or(false)
    }

    /// True iff the role has module access and the module's permission set
    /// contains the permission
    pub fn has_permission(&self, role: &str, module: &str, permission: &str) -> bool {
        self.roles
            .get(role)
            .map(|r| r.allows(module, permission))
            .unwrap_or(false)
    }

    /// All modules of a role, empty for unknown roles
    pub fn get_modules_for_role(&self, role: &str) -> Vec<String> {
        self.roles
            .get(role)
            .map(|r| r.modules.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// All permissions of a role on a module, empty if either is unknown
    pub fn get_permissions_for_module(&self, role: &str, module: &str) -> Vec<String> {
        self.roles
            .get(role)
            .and_then(|r| r.modules.get(module))
            .map(|perms| perms.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Role description, empty for unknown roles
    pub fn get_role_description(&self, role: &str) -> String {
        self.roles
            .get(role)
            .map(|r| r.description.clone())
            .unwrap_or_default()
    }

    // ============== Role queries ==============

    /// Role label, empty for unknown roles
    pub fn get_role_name(&self, role: &str) -> String {
        self.roles.get(role).map(|r| r.name.clone()).unwrap_or_default()
    }

    /// Get a role by ID
    pub fn get_role(&self, id: &str) -> Option<&RoleDefinition> {
        self.roles.get(id)
    }

    /// Get a role by ID, reporting the available roles when it is missing
    pub fn lookup_role(&self, id: &str) -> Result<&RoleDefinition, RoleNotFoundError> {
        self.roles.get(id).ok_or_else(|| RoleNotFoundError {
            role_id: id.to_string(),
            available_roles: self.roles.keys().cloned().collect(),
        })
    }

    /// Get all role IDs
    pub fn get_role_ids(&self) -> Vec<&str> {
        self.roles.keys().map(|s| s.as_str()).collect()
    }

    /// Roles holding a permission on a module
    pub fn get_roles_with_permission(&self, module: &str, permission: &str) -> Vec<&str> {
        self.roles
            .iter()
            .filter(|(_, r)| r.allows(module, permission))
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Summaries of every role for listings
    pub fn summaries(&self) -> Vec<RoleSummary> {
        self.roles
            .iter()
            .map(|(id, r)| RoleSummary {
                id: id.clone(),
                name: r.name.clone(),
                description: r.description.clone(),
                module_count: r.modules.len(),
                permission_count: r.permission_count(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    // ============== Built-in table ==============

    /// The school ERP's default policy
    pub fn school_default() -> Self {
        use modules::*;
        use permissions::*;

        let admin = modules::ALL.iter().fold(
            RoleDefinition::new("Administrator")
                .with_description("Full access to every module, user and setting of the school"),
            |role, module| role.grant(*module, permissions::ALL.iter().copied()),
        );

        let teacher = RoleDefinition::new("Teacher")
            .with_description("Manages classes, attendance, examinations and grading")
            .grant(STUDENTS, [VIEW, EDIT])
            .grant(ATTENDANCE, [VIEW, CREATE, EDIT])
            .grant(EXAMINATIONS, [VIEW, CREATE, EDIT, GRADE])
            .grant(TIMETABLE, [VIEW])
            .grant(LIBRARY, [VIEW])
            .grant(COMMUNICATION, [VIEW, CREATE])
            .grant(REPORTS, [VIEW]);

        let student = RoleDefinition::new("Student")
            .with_description("Views own attendance, results, timetable and fees")
            .grant(ATTENDANCE, [VIEW])
            .grant(EXAMINATIONS, [VIEW])
            .grant(TIMETABLE, [VIEW])
            .grant(FEES, [VIEW])
            .grant(LIBRARY, [VIEW])
            .grant(TRANSPORT, [VIEW])
            .grant(COMMUNICATION, [VIEW]);

        let parent = RoleDefinition::new("Parent")
            .with_description("Follows a child's progress, attendance and fee payments")
            .grant(STUDENTS, [VIEW])
            .grant(ATTENDANCE, [VIEW])
            .grant(EXAMINATIONS, [VIEW])
            .grant(FEES, [VIEW])
            .grant(TRANSPORT, [VIEW])
            .grant(COMMUNICATION, [VIEW, CREATE]);

        let accountant = RoleDefinition::new("Accountant")
            .with_description("Handles fee collection, invoices and financial reports")
            .grant(STUDENTS, [VIEW])
            .grant(STAFF, [VIEW])
            .grant(FEES, [VIEW, CREATE, EDIT, MANAGE, APPROVE])
            .grant(INVENTORY, [VIEW])
            .grant(REPORTS, [VIEW, CREATE]);

        let librarian = RoleDefinition::new("Librarian")
            .with_description("Maintains the book catalogue and issues books")
            .grant(STUDENTS, [VIEW])
            .grant(LIBRARY, [VIEW, CREATE, EDIT, DELETE, MANAGE, ASSIGN])
            .grant(REPORTS, [VIEW]);

        let transport_manager = RoleDefinition::new("Transport Manager")
            .with_description("Plans routes, vehicles and student transport assignments")
            .grant(STUDENTS, [VIEW])
            .grant(TRANSPORT, [VIEW, CREATE, EDIT, DELETE, MANAGE, ASSIGN])
            .grant(REPORTS, [VIEW]);

        Self::new()
            .with_role("admin", admin)
            .with_role("teacher", teacher)
            .with_role("student", student)
            .with_role("parent", parent)
            .with_role("accountant", accountant)
            .with_role("librarian", librarian)
            .with_role("transport_manager", transport_manager)
    }
}

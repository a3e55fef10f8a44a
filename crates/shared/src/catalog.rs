//! Well-known module and permission keys of the school ERP.
//!
//! The policy table accepts any string, these constants only keep the
//! built-in table, the dashboard and callers from drifting apart on
//! spelling.
//!
//! ```
//! use shared::{modules, permissions};
//!
//! assert_eq!(modules::STUDENTS, "students");
//! assert_eq!(permissions::APPROVE, "approve");
//! ```

/// Functional areas subject to access control
pub mod modules {
    pub const STUDENTS: &str = "students";
    pub const STAFF: &str = "staff";
    pub const ATTENDANCE: &str = "attendance";
    pub const EXAMINATIONS: &str = "examinations";
    pub const TIMETABLE: &str = "timetable";
    pub const FEES: &str = "fees";
    pub const LIBRARY: &str = "library";
    pub const TRANSPORT: &str = "transport";
    pub const INVENTORY: &str = "inventory";
    pub const COMMUNICATION: &str = "communication";
    pub const REPORTS: &str = "reports";
    pub const SETTINGS: &str = "settings";

    /// Every well-known module, in menu order
    pub const ALL: &[&str] = &[
        STUDENTS,
        STAFF,
        ATTENDANCE,
        EXAMINATIONS,
        TIMETABLE,
        FEES,
        LIBRARY,
        TRANSPORT,
        INVENTORY,
        COMMUNICATION,
        REPORTS,
        SETTINGS,
    ];
}

/// Actions within a module
pub mod permissions {
    pub const VIEW: &str = "view";
    pub const CREATE: &str = "create";
    pub const EDIT: &str = "edit";
    pub const DELETE: &str = "delete";
    pub const MANAGE: &str = "manage";
    pub const APPROVE: &str = "approve";
    pub const ASSIGN: &str = "assign";
    pub const GRADE: &str = "grade";

    pub const ALL: &[&str] = &[VIEW, CREATE, EDIT, DELETE, MANAGE, APPROVE, ASSIGN, GRADE];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_module_keys_are_unique() {
        let unique: HashSet<_> = modules::ALL.iter().collect();
        assert_eq!(unique.len(), modules::ALL.len());
    }

    #[test]
    fn test_permission_keys_are_unique() {
        let unique: HashSet<_> = permissions::ALL.iter().collect();
        assert_eq!(unique.len(), permissions::ALL.len());
    }

    #[test]
    fn test_keys_are_lowercase_identifiers() {
        for key in modules::ALL.iter().chain(permissions::ALL) {
            assert!(key.chars().all(|c| c.is_ascii_lowercase() || c == '_'), "bad key {}", key);
        }
    }
}

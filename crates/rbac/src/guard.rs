//! PermissionGuard - Decides whether guarded content is shown
//!
//! The guard does not render anything. It returns a [`GuardOutcome`] that
//! the view layer interprets: the children when access is granted, otherwise
//! the fallback, a generic notice, or nothing.

use crate::{Permissions, RoleSource};
use serde::Serialize;

/// Message of the generic access-denied notice
pub const ACCESS_DENIED_MESSAGE: &str = "You don't have permission to access this content.";

/// Constraints gating a piece of content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionGuard {
    module: Option<String>,
    permission: Option<String>,
    required_roles: Option<Vec<String>>,
    show_alert: bool,
}

/// Why a guard denied access
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenyReason {
    /// A role list was given and the current role is missing or not in it
    RoleNotAllowed { role: Option<String> },
    /// The current role cannot open the module
    NoModuleAccess { module: String },
    /// The module is open but the permission is not granted
    MissingPermission { module: String, permission: String },
}

/// Result of evaluating a guard's constraints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    Allow,
    Deny(DenyReason),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Generic access-denied notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessNotice {
    pub message: &'static str,
}

impl Default for AccessNotice {
    fn default() -> Self {
        Self {
            message: ACCESS_DENIED_MESSAGE,
        }
    }
}

/// What to show in place of denied content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback<T> {
    Content(T),
    Notice(AccessNotice),
    Nothing,
}

/// Outcome handed to the view layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome<T> {
    Allowed(T),
    Denied(Fallback<T>),
}

impl<T> GuardOutcome<T> {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardOutcome::Allowed(_))
    }

    /// Content to display, if any: the children or a content fallback
    pub fn into_content(self) -> Option<T> {
        match self {
            GuardOutcome::Allowed(children) => Some(children),
            GuardOutcome::Denied(Fallback::Content(fallback)) => Some(fallback),
            GuardOutcome::Denied(_) => None,
        }
    }
}

impl PermissionGuard {
    /// A guard with no constraints (always allows)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: require access to a module
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Builder: require a permission on the module. Without a module this
    /// imposes no constraint.
    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Builder: restrict to the listed roles
    pub fn required_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.required_roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    /// Builder: show the generic notice when denied and no fallback is given
    pub fn show_alert(mut self, show: bool) -> Self {
        self.show_alert = show;
        self
    }

    /// Gate on a module and optionally one of its permissions
    pub fn hide_if_no_permission(module: impl Into<String>, permission: Option<&str>) -> Self {
        let guard = Self::new().module(module);
        match permission {
            Some(p) => guard.permission(p),
            None => guard,
        }
    }

    /// Gate on role membership only
    pub fn show_for_roles<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self::new().required_roles(roles)
    }

    /// Evaluate the constraints in order; the first failing check wins
    pub fn decide<S: RoleSource>(&self, perms: &Permissions<'_, S>) -> GuardDecision {
        let role = perms.current_role();

        if let Some(allowed) = &self.required_roles {
            let permitted = role
                .as_deref()
                .map(|r| allowed.iter().any(|a| a == r))
                .unwrap_or(false);
            if !permitted {
                return GuardDecision::Deny(DenyReason::RoleNotAllowed { role });
            }
        }

        if let Some(module) = &self.module {
            if !perms.check_module_access(module) {
                return GuardDecision::Deny(DenyReason::NoModuleAccess {
                    module: module.clone(),
                });
            }

            if let Some(permission) = &self.permission {
                if !perms.check_permission(module, permission) {
                    return GuardDecision::Deny(DenyReason::MissingPermission {
                        module: module.clone(),
                        permission: permission.clone(),
                    });
                }
            }
        }

        GuardDecision::Allow
    }

    /// Decide and pick what to show
    pub fn render<T, S: RoleSource>(
        &self,
        perms: &Permissions<'_, S>,
        children: T,
        fallback: Option<T>,
    ) -> GuardOutcome<T> {
        match self.decide(perms) {
            GuardDecision::Allow => GuardOutcome::Allowed(children),
            GuardDecision::Deny(reason) => {
                tracing::debug!(?reason, guard = ?self, "Guard denied content");
                GuardOutcome::Denied(match fallback {
                    Some(content) => Fallback::Content(content),
                    None if self.show_alert => Fallback::Notice(AccessNotice::default()),
                    None => Fallback::Nothing,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PolicyTable;
    use shared::{RoleDefinition, UserProfile};

    fn teacher_table() -> PolicyTable {
        PolicyTable::new()
            .with_role(
                "teacher",
                RoleDefinition::new("Teacher").grant("students", ["view", "edit"]),
            )
            .with_role("admin", RoleDefinition::new("Admin").grant("students", ["view", "delete"]))
    }

    // ============== Default Tests ==============

    #[test]
    fn test_unconstrained_guard_always_allows() {
        let table = teacher_table();
        let guard = PermissionGuard::new();

        for source in [None, Some("teacher".to_string()), Some("janitor".to_string())] {
            let perms = Permissions::new(&table, source);
            assert_eq!(guard.render(&perms, "child", None), GuardOutcome::Allowed("child"));
        }
    }

    #[test]
    fn test_permission_without_module_imposes_nothing() {
        let table = teacher_table();
        let perms = Permissions::new(&table, "teacher");
        let guard = PermissionGuard::new().permission("delete");

        assert!(guard.decide(&perms).is_allowed());
    }

    // ============== Teacher Scenario ==============

    #[test]
    fn test_teacher_delete_renders_fallback() {
        let table = teacher_table();
        let perms = Permissions::new(&table, "teacher");
        let guard = PermissionGuard::new().module("students").permission("delete");

        assert_eq!(
            guard.render(&perms, "delete button", Some("read only")),
            GuardOutcome::Denied(Fallback::Content("read only"))
        );
        assert_eq!(
            guard.decide(&perms),
            GuardDecision::Deny(DenyReason::MissingPermission {
                module: "students".to_string(),
                permission: "delete".to_string(),
            })
        );
    }

    #[test]
    fn test_teacher_view_renders_children() {
        let table = teacher_table();
        let perms = Permissions::new(&table, "teacher");
        let guard = PermissionGuard::new().module("students").permission("view");

        assert_eq!(
            guard.render(&perms, "view button", Some("read only")),
            GuardOutcome::Allowed("view button")
        );
    }

    #[test]
    fn test_missing_module_checked_before_permission() {
        let table = teacher_table();
        let perms = Permissions::new(&table, "teacher");
        let guard = PermissionGuard::new().module("fees").permission("view");

        assert_eq!(
            guard.decide(&perms),
            GuardDecision::Deny(DenyReason::NoModuleAccess {
                module: "fees".to_string()
            })
        );
    }

    // ============== Role List Tests ==============

    mod roles {
        use super::*;

        #[test]
        fn test_excluded_role_never_renders_children() {
            let table = teacher_table();
            let perms = Permissions::new(&table, "teacher");

            let plain = PermissionGuard::show_for_roles(["admin"]);
            assert_eq!(plain.render(&perms, 1, None), GuardOutcome::Denied(Fallback::Nothing));

            let alert = PermissionGuard::show_for_roles(["admin"]).show_alert(true);
            assert_eq!(
                alert.render(&perms, 1, None),
                GuardOutcome::Denied(Fallback::Notice(AccessNotice::default()))
            );

            assert_eq!(alert.render(&perms, 1, Some(2)), GuardOutcome::Denied(Fallback::Content(2)));
        }

        #[test]
        fn test_listed_role_allowed() {
            let table = teacher_table();
            let perms = Permissions::new(&table, "teacher");
            let guard = PermissionGuard::show_for_roles(["admin", "teacher"]);

            assert!(guard.render(&perms, (), None).is_allowed());
        }

        #[test]
        fn test_role_list_without_session_denies() {
            let table = teacher_table();
            let perms = Permissions::new(&table, None::<UserProfile>);
            let guard = PermissionGuard::show_for_roles(["admin"]);

            assert_eq!(
                guard.decide(&perms),
                GuardDecision::Deny(DenyReason::RoleNotAllowed { role: None })
            );
        }

        #[test]
        fn test_empty_role_list_denies_everyone() {
            let table = teacher_table();
            let perms = Permissions::new(&table, "admin");
            let guard = PermissionGuard::show_for_roles(Vec::<String>::new());

            assert!(!guard.decide(&perms).is_allowed());
        }

        #[test]
        fn test_role_list_checked_before_module() {
            let table = teacher_table();
            let perms = Permissions::new(&table, "teacher");
            let guard = PermissionGuard::show_for_roles(["admin"]).module("fees");

            assert_eq!(
                guard.decide(&perms),
                GuardDecision::Deny(DenyReason::RoleNotAllowed {
                    role: Some("teacher".to_string())
                })
            );
        }

        #[test]
        fn test_listed_role_still_needs_module() {
            let table = teacher_table();
            let perms = Permissions::new(&table, "teacher");
            let guard = PermissionGuard::show_for_roles(["teacher"]).module("fees");

            assert!(!guard.decide(&perms).is_allowed());
        }
    }

    // ============== Helper Tests ==============

    #[test]
    fn test_hide_if_no_permission_module_only() {
        let table = teacher_table();
        let perms = Permissions::new(&table, "teacher");

        assert!(PermissionGuard::hide_if_no_permission("students", None)
            .decide(&perms)
            .is_allowed());
        assert_eq!(
            PermissionGuard::hide_if_no_permission("fees", None).render(&perms, "x", None),
            GuardOutcome::Denied(Fallback::Nothing)
        );
    }

    #[test]
    fn test_no_session_denies_module_guard() {
        let table = teacher_table();
        let perms = Permissions::new(&table, None::<String>);
        let guard = PermissionGuard::hide_if_no_permission("students", Some("view")).show_alert(true);

        assert_eq!(
            guard.render(&perms, "x", None),
            GuardOutcome::Denied(Fallback::Notice(AccessNotice::default()))
        );
    }

    #[test]
    fn test_into_content() {
        assert_eq!(GuardOutcome::Allowed(1).into_content(), Some(1));
        assert_eq!(GuardOutcome::Denied(Fallback::Content(2)).into_content(), Some(2));
        assert_eq!(GuardOutcome::<i32>::Denied(Fallback::Nothing).into_content(), None);
        assert_eq!(
            GuardOutcome::<i32>::Denied(Fallback::Notice(AccessNotice::default())).into_content(),
            None
        );
    }

    #[test]
    fn test_decision_serializes_with_reason() {
        let decision = GuardDecision::Deny(DenyReason::NoModuleAccess {
            module: "fees".to_string(),
        });
        let json = serde_json::to_value(&decision).unwrap();

        assert_eq!(json["decision"], "deny");
        assert_eq!(json["reason"], "no_module_access");
        assert_eq!(json["module"], "fees");
    }

    #[test]
    fn test_decision_is_recomputed() {
        let table = teacher_table();
        let guard = PermissionGuard::new().module("students").permission("delete");

        assert!(!guard.decide(&Permissions::new(&table, "teacher")).is_allowed());
        assert!(guard.decide(&Permissions::new(&table, "admin")).is_allowed());
    }
}

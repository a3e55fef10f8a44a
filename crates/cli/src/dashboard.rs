//! Role-based dashboard report
//!
//! Builds the school dashboard for the current user out of permission
//! guards, then renders it as text or JSON.

use console::style;
use rbac::{PermissionGuard, Permissions, RoleSource};
use serde::Serialize;
use shared::{modules, permissions};

struct CardSpec {
    title: &'static str,
    description: &'static str,
    module: &'static str,
    create_action: &'static str,
    manage_action: &'static str,
}

const CARDS: &[CardSpec] = &[
    CardSpec {
        title: "Students",
        description: "Manage student records",
        module: modules::STUDENTS,
        create_action: "Add Student",
        manage_action: "Manage Students",
    },
    CardSpec {
        title: "Staff",
        description: "Staff management",
        module: modules::STAFF,
        create_action: "Add Staff",
        manage_action: "Manage Staff",
    },
    CardSpec {
        title: "Attendance",
        description: "Track attendance",
        module: modules::ATTENDANCE,
        create_action: "Mark Attendance",
        manage_action: "View Reports",
    },
    CardSpec {
        title: "Fees",
        description: "Fee management",
        module: modules::FEES,
        create_action: "Create Invoice",
        manage_action: "Manage Payments",
    },
    CardSpec {
        title: "Library",
        description: "Book management",
        module: modules::LIBRARY,
        create_action: "Add Book",
        manage_action: "Manage Library",
    },
    CardSpec {
        title: "Transport",
        description: "Transport system",
        module: modules::TRANSPORT,
        create_action: "Add Route",
        manage_action: "Manage Transport",
    },
];

struct StatSpec {
    title: &'static str,
    value: &'static str,
    note: &'static str,
    roles: &'static [&'static str],
}

const STATS: &[StatSpec] = &[
    StatSpec {
        title: "Total Students",
        value: "1,234",
        note: "+20 from last month",
        roles: &["admin", "teacher"],
    },
    StatSpec {
        title: "Monthly Revenue",
        value: "$45,231",
        note: "+15% from last month",
        roles: &["admin", "accountant"],
    },
    StatSpec {
        title: "Attendance",
        value: "92%",
        note: "This month",
        roles: &["student", "parent"],
    },
    StatSpec {
        title: "Books Issued",
        value: "342",
        note: "This week",
        roles: &["admin", "librarian"],
    },
];

const ADMIN_TOOLS: &[&str] = &["View Reports", "Manage Inventory", "System Settings"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatView {
    pub title: String,
    pub value: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub title: String,
    pub description: String,
    pub module: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleAccess {
    pub title: String,
    pub module: String,
    pub granted: bool,
}

/// Everything the current user gets to see on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub role: Option<String>,
    pub role_label: String,
    pub role_description: String,
    pub modules: Vec<String>,
    pub stats: Vec<StatView>,
    pub cards: Vec<CardView>,
    pub admin_tools: Vec<String>,
    pub module_access: Vec<ModuleAccess>,
}

impl DashboardView {
    /// Compose the dashboard from guards evaluated for the current user
    pub fn build<S: RoleSource>(perms: &Permissions<'_, S>) -> Self {
        let stats: Vec<StatView> = STATS
            .iter()
            .filter_map(|stat| {
                let view = StatView {
                    title: stat.title.to_string(),
                    value: stat.value.to_string(),
                    note: stat.note.to_string(),
                };
                PermissionGuard::show_for_roles(stat.roles.iter().copied())
                    .render(perms, view, None)
                    .into_content()
            })
            .collect();

        let cards: Vec<CardView> = CARDS
            .iter()
            .filter_map(|card| {
                let actions: Vec<String> = [
                    (permissions::VIEW, format!("View {}", card.title)),
                    (permissions::CREATE, card.create_action.to_string()),
                    (permissions::MANAGE, card.manage_action.to_string()),
                ]
                .into_iter()
                .filter_map(|(permission, label)| {
                    PermissionGuard::hide_if_no_permission(card.module, Some(permission))
                        .render(perms, label, None)
                        .into_content()
                })
                .collect();

                let view = CardView {
                    title: card.title.to_string(),
                    description: card.description.to_string(),
                    module: card.module.to_string(),
                    actions,
                };
                PermissionGuard::hide_if_no_permission(card.module, None)
                    .render(perms, view, None)
                    .into_content()
            })
            .collect();

        let admin_tools = PermissionGuard::show_for_roles(["admin"])
            .render(perms, ADMIN_TOOLS.iter().map(|t| t.to_string()).collect::<Vec<_>>(), None)
            .into_content()
            .unwrap_or_default();

        let module_access: Vec<ModuleAccess> = CARDS
            .iter()
            .map(|card| ModuleAccess {
                title: card.title.to_string(),
                module: card.module.to_string(),
                granted: perms.check_module_access(card.module),
            })
            .collect();

        Self {
            role: perms.current_role(),
            role_label: perms.get_user_role_name(),
            role_description: perms.get_user_role_description(),
            modules: perms.get_user_modules(),
            stats,
            cards,
            admin_tools,
            module_access,
        }
    }

    /// Plain-text rendering
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let label = match (&self.role, self.role_label.is_empty()) {
            (None, _) => "signed out".to_string(),
            (Some(role), true) => role.replace('_', " "),
            (Some(_), false) => self.role_label.clone(),
        };

        out.push_str(&format!("{} [{}]\n", style("Welcome to School ERP").bold(), label));
        if !self.role_description.is_empty() {
            out.push_str(&format!("{}\n", self.role_description));
        }
        out.push_str(&format!("You have access to {} modules\n", self.modules.len()));

        if !self.stats.is_empty() {
            out.push('\n');
            for stat in &self.stats {
                out.push_str(&format!("  {:<16} {:>8}  {}\n", stat.title, stat.value, style(&stat.note).dim()));
            }
        }

        for card in &self.cards {
            out.push_str(&format!("\n{} - {}\n", style(&card.title).bold(), card.description));
            for action in &card.actions {
                out.push_str(&format!("  [{}]\n", action));
            }
        }

        if !self.admin_tools.is_empty() {
            out.push_str(&format!("\n{}\n", style("System Administration").bold()));
            out.push_str(&format!("  {}\n", self.admin_tools.join(" | ")));
        }

        out.push_str(&format!("\n{}\n", style("Current permissions").dim()));
        out.push_str(&format!("  Role: {}\n", self.role.as_deref().unwrap_or("none")));
        out.push_str(&format!("  Modules: {}\n", self.modules.join(", ")));
        for access in &self.module_access {
            out.push_str(&format!("  {:<12} {}\n", access.title, mark(access.granted)));
        }

        out
    }
}

/// Styled allow/deny mark
pub fn mark(granted: bool) -> console::StyledObject<&'static str> {
    if granted {
        style("✓").green()
    } else {
        style("✗").red()
    }
}

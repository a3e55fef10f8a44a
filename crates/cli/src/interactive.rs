//! Interactive session mode
//!
//! Simulates a signed-in session: log in as a role, log out, and query the
//! policy in between. Every check re-reads the session role.

use crate::dashboard::{mark, DashboardView};
use rbac::{Permissions, PolicyTable};
use std::io::{self, Write};

/// Interactive CLI over a policy table
pub struct InteractiveCli {
    table: PolicyTable,
    current_role: Option<String>,
}

impl InteractiveCli {
    pub fn new(table: PolicyTable, current_role: Option<String>) -> Self {
        Self { table, current_role }
    }

    fn permissions(&self) -> Permissions<'_, &Option<String>> {
        Permissions::new(&self.table, &self.current_role)
    }

    /// Run the interactive REPL
    pub fn run(&mut self) -> anyhow::Result<()> {
        println!("SchoolGate Interactive Mode");
        println!("Type /help for commands, /quit to exit");
        println!();

        loop {
            let role = self.current_role.as_deref().unwrap_or("signed out");
            print!("[{}] > ", role);
            io::stdout().flush()?;

            let mut input = String::new();
            if io::stdin().read_line(&mut input)? == 0 {
                break;
            }
            let input = input.trim();

            if input.is_empty() {
                continue;
            }

            if input.starts_with('/') {
                match self.handle_command(input) {
                    Ok(true) => break,
                    Ok(false) => continue,
                    Err(e) => {
                        println!("Error: {}", e);
                        continue;
                    }
                }
            }

            println!("Commands start with '/'; type /help");
        }

        Ok(())
    }

    fn handle_command(&mut self, input: &str) -> anyhow::Result<bool> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Goodbye!");
                return Ok(true);
            }
            "/help" | "/h" => {
                println!("Commands:");
                println!("  /login <role>               - Sign in as a role");
                println!("  /logout                     - Sign out");
                println!("  /roles                      - List roles");
                println!("  /check <module> [perm]      - Check access");
                println!("  /modules                    - Modules of the current role");
                println!("  /dashboard                  - Show the dashboard");
                println!("  /status                     - Show current status");
                println!("  /quit                       - Exit");
            }
            "/login" => {
                let role = parts
                    .get(1)
                    .ok_or_else(|| anyhow::anyhow!("Usage: /login <role>"))?;
                self.table.lookup_role(role)?;
                tracing::info!(role = *role, "Signed in");
                self.current_role = Some(role.to_string());
                println!("Signed in as {}", self.table.get_role_name(role));
            }
            "/logout" => {
                if let Some(role) = self.current_role.take() {
                    tracing::info!(role = role.as_str(), "Signed out");
                }
                println!("Signed out");
            }
            "/roles" => {
                println!("Available roles:");
                for id in self.table.get_role_ids() {
                    println!("  {:<18} {}", id, self.table.get_role_name(id));
                }
            }
            "/check" => {
                let module = parts
                    .get(1)
                    .ok_or_else(|| anyhow::anyhow!("Usage: /check <module> [permission]"))?;
                let permission = parts.get(2).copied();
                match self.permissions().require(module, permission) {
                    Ok(()) => println!("{} allowed", mark(true)),
                    Err(e) => println!("{} {}", mark(false), e),
                }
            }
            "/modules" => {
                let perms = self.permissions();
                let modules = perms.get_user_modules();
                if modules.is_empty() {
                    println!("(no modules)");
                }
                for module in modules {
                    println!("  {:<14} {}", module, perms.get_module_permissions(&module).join(", "));
                }
            }
            "/dashboard" => {
                println!("{}", DashboardView::build(&self.permissions()).to_text());
            }
            "/status" => {
                let perms = self.permissions();
                println!("Status:");
                println!("  Role: {}", perms.current_role().unwrap_or_else(|| "none".to_string()));
                println!("  Modules: {}", perms.get_user_modules().len());
            }
            _ => {
                println!("Unknown command: {}", cmd);
            }
        }

        Ok(false)
    }
}

impl Default for InteractiveCli {
    fn default() -> Self {
        Self::new(PolicyTable::school_default(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============== Basic Creation Tests ==============

    #[test]
    fn test_default_cli() {
        let cli = InteractiveCli::default();
        assert!(cli.current_role.is_none());
        assert!(!cli.table.is_empty());
    }

    #[test]
    fn test_new_with_role() {
        let cli = InteractiveCli::new(PolicyTable::school_default(), Some("parent".to_string()));
        assert!(cli.permissions().can_view("fees"));
    }

    // ============== Command Handling Tests ==============

    #[test]
    fn test_handle_quit_commands() {
        let mut cli = InteractiveCli::default();
        for cmd in ["/quit", "/exit", "/q"] {
            assert!(cli.handle_command(cmd).unwrap());
        }
    }

    #[test]
    fn test_informational_commands_do_not_exit() {
        let mut cli = InteractiveCli::default();
        for cmd in ["/help", "/h", "/roles", "/modules", "/dashboard", "/status", "/unknown", "/"] {
            assert!(!cli.handle_command(cmd).unwrap(), "{} exited", cmd);
        }
    }

    // ============== Session Tests ==============

    #[test]
    fn test_login_and_logout() {
        let mut cli = InteractiveCli::default();

        cli.handle_command("/login teacher").unwrap();
        assert_eq!(cli.current_role.as_deref(), Some("teacher"));
        assert!(cli.permissions().can_edit("students"));

        cli.handle_command("/logout").unwrap();
        assert!(cli.current_role.is_none());
        assert!(!cli.permissions().can_view("students"));
    }

    #[test]
    fn test_login_unknown_role_keeps_session() {
        let mut cli = InteractiveCli::default();
        cli.handle_command("/login librarian").unwrap();

        let err = cli.handle_command("/login janitor").unwrap_err();
        assert!(err.to_string().contains("janitor"));
        assert_eq!(cli.current_role.as_deref(), Some("librarian"));
    }

    #[test]
    fn test_login_requires_argument() {
        let mut cli = InteractiveCli::default();
        assert!(cli.handle_command("/login").is_err());
    }

    #[test]
    fn test_check_requires_module() {
        let mut cli = InteractiveCli::default();
        assert!(cli.handle_command("/check").is_err());
        assert!(!cli.handle_command("/check students view").unwrap());
    }

    #[test]
    fn test_switching_roles_changes_answers() {
        let mut cli = InteractiveCli::default();

        cli.handle_command("/login accountant").unwrap();
        assert!(cli.permissions().can_approve("fees"));

        cli.handle_command("/login student").unwrap();
        assert!(!cli.permissions().can_approve("fees"));
        assert!(cli.permissions().can_view("fees"));
    }
}

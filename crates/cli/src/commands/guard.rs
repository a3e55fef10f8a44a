//! schoolgate guard command

use crate::dashboard::mark;
use crate::AppContext;
use clap::Args;
use rbac::{Fallback, GuardOutcome, PermissionGuard};
use serde_json::json;

/// Evaluate a permission guard for --role and print what would be shown
#[derive(Debug, Args)]
pub struct GuardCommand {
    /// Module the content belongs to
    #[arg(short, long)]
    pub module: Option<String>,

    /// Permission required within the module
    #[arg(short, long)]
    pub permission: Option<String>,

    /// Restrict to these roles (repeatable)
    #[arg(short = 'a', long = "allow-role")]
    pub allow_roles: Vec<String>,

    /// Content shown when access is granted
    #[arg(short, long, default_value = "<protected content>")]
    pub content: String,

    /// Content shown instead when access is denied
    #[arg(short, long)]
    pub fallback: Option<String>,

    /// Show the access-denied notice when denied and no fallback is given
    #[arg(long)]
    pub show_alert: bool,
}

impl GuardCommand {
    pub fn run(&self, ctx: &AppContext) -> anyhow::Result<()> {
        println!("{}", self.execute(ctx)?);
        Ok(())
    }

    pub fn guard(&self) -> PermissionGuard {
        let mut guard = PermissionGuard::new().show_alert(self.show_alert);
        if let Some(module) = &self.module {
            guard = guard.module(module);
        }
        if let Some(permission) = &self.permission {
            guard = guard.permission(permission);
        }
        if !self.allow_roles.is_empty() {
            guard = guard.required_roles(&self.allow_roles);
        }
        guard
    }

    pub fn execute(&self, ctx: &AppContext) -> anyhow::Result<String> {
        let perms = ctx.permissions();
        let guard = self.guard();
        let decision = guard.decide(&perms);
        let outcome = guard.render(&perms, self.content.as_str(), self.fallback.as_deref());

        if ctx.json {
            let shown = match &outcome {
                GuardOutcome::Allowed(children) => json!({ "kind": "children", "content": children }),
                GuardOutcome::Denied(Fallback::Content(fallback)) => {
                    json!({ "kind": "fallback", "content": fallback })
                }
                GuardOutcome::Denied(Fallback::Notice(notice)) => {
                    json!({ "kind": "notice", "content": notice.message })
                }
                GuardOutcome::Denied(Fallback::Nothing) => json!({ "kind": "nothing" }),
            };
            return Ok(serde_json::to_string_pretty(&json!({
                "role": perms.current_role(),
                "decision": decision,
                "shown": shown,
            }))?);
        }

        Ok(match outcome {
            GuardOutcome::Allowed(children) => format!("{} {}", mark(true), children),
            GuardOutcome::Denied(Fallback::Content(fallback)) => format!("{} {}", mark(false), fallback),
            GuardOutcome::Denied(Fallback::Notice(notice)) => format!("{} {}", mark(false), notice.message),
            GuardOutcome::Denied(Fallback::Nothing) => format!("{} (nothing rendered)", mark(false)),
        })
    }
}

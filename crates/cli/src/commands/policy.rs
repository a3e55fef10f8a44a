//! schoolgate policy command

use crate::dashboard::mark;
use crate::AppContext;
use clap::{Args, Subcommand, ValueEnum};
use serde_json::json;
use shared::PolicyFormat;

#[derive(Debug, Args)]
pub struct PolicyCommand {
    #[command(subcommand)]
    pub command: PolicySubcommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Yaml,
    Json,
}

impl From<ExportFormat> for PolicyFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Yaml => PolicyFormat::Yaml,
            ExportFormat::Json => PolicyFormat::Json,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum PolicySubcommand {
    /// List all roles
    Roles,
    /// Check module access (and optionally a permission) for --role
    Check {
        /// Module to check
        #[arg(short, long)]
        module: String,
        /// Permission within the module
        #[arg(short, long)]
        permission: Option<String>,
    },
    /// Show modules and permissions granted to --role
    Modules,
    /// List roles holding a permission on a module
    Who {
        #[arg(short, long)]
        module: String,
        #[arg(short, long)]
        permission: String,
    },
    /// Print the active policy as a policy file
    Export {
        #[arg(short, long, value_enum, default_value = "yaml")]
        format: ExportFormat,
    },
}

impl PolicyCommand {
    pub fn run(&self, ctx: &AppContext) -> anyhow::Result<()> {
        println!("{}", self.execute(ctx)?);
        Ok(())
    }

    pub fn execute(&self, ctx: &AppContext) -> anyhow::Result<String> {
        match &self.command {
            PolicySubcommand::Roles => Ok(roles(ctx)?),
            PolicySubcommand::Check { module, permission } => check(ctx, module, permission.as_deref()),
            PolicySubcommand::Modules => modules(ctx),
            PolicySubcommand::Who { module, permission } => who(ctx, module, permission),
            PolicySubcommand::Export { format } => Ok(ctx.table.to_config().render((*format).into())?),
        }
    }
}

fn roles(ctx: &AppContext) -> serde_json::Result<String> {
    let summaries = ctx.table.summaries();
    if ctx.json {
        return serde_json::to_string_pretty(&summaries);
    }

    let mut out = String::from("Available roles:");
    for s in &summaries {
        let current = if ctx.role.as_deref() == Some(s.id.as_str()) { " (current)" } else { "" };
        out.push_str(&format!(
            "\n  {:<18} {:<18} {:>2} modules  {}{}",
            s.id, s.name, s.module_count, s.description, current
        ));
    }
    Ok(out)
}

fn check(ctx: &AppContext, module: &str, permission: Option<&str>) -> anyhow::Result<String> {
    let perms = ctx.permissions();
    let result = perms.require(module, permission);

    if ctx.json {
        return Ok(serde_json::to_string_pretty(&json!({
            "role": perms.current_role(),
            "module": module,
            "permission": permission,
            "allowed": result.is_ok(),
            "reason": result.as_ref().err().map(|e| e.reason.clone()),
        }))?);
    }

    Ok(match result {
        Ok(()) => format!(
            "{} {} may access {}",
            mark(true),
            perms.current_role().unwrap_or_default(),
            target(module, permission)
        ),
        Err(e) => format!("{} {}", mark(false), e),
    })
}

fn target(module: &str, permission: Option<&str>) -> String {
    match permission {
        Some(p) => format!("'{}' on module '{}'", p, module),
        None => format!("module '{}'", module),
    }
}

fn modules(ctx: &AppContext) -> anyhow::Result<String> {
    let role_id = ctx.require_role()?;
    let role = ctx.table.lookup_role(role_id)?;

    if ctx.json {
        return Ok(serde_json::to_string_pretty(&json!({
            "role": role_id,
            "name": role.name,
            "description": role.description,
            "modules": role.modules,
        }))?);
    }

    let mut out = format!("{} ({})", role.name, role_id);
    if !role.description.is_empty() {
        out.push_str(&format!("\n{}", role.description));
    }
    for module in ctx.table.get_modules_for_role(role_id) {
        let granted = ctx.table.get_permissions_for_module(role_id, &module);
        let listed = if granted.is_empty() { "(module access only)".to_string() } else { granted.join(", ") };
        out.push_str(&format!("\n  {:<14} {}", module, listed));
    }
    Ok(out)
}

fn who(ctx: &AppContext, module: &str, permission: &str) -> anyhow::Result<String> {
    let holders = ctx.table.get_roles_with_permission(module, permission);

    if ctx.json {
        return Ok(serde_json::to_string_pretty(&holders)?);
    }
    if holders.is_empty() {
        return Ok(format!("No role holds '{}' on module '{}'", permission, module));
    }
    Ok(format!("Roles with '{}' on module '{}': {}", permission, module, holders.join(", ")))
}

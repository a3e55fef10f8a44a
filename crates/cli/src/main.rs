//! SchoolGate CLI - Inspect and exercise the school ERP access policy
//!
//! Usage:
//!   schoolgate                                   - Start interactive mode
//!   schoolgate policy roles                      - List roles
//!   schoolgate -r teacher policy check -m students -p edit
//!   schoolgate -r teacher policy modules         - Modules of a role
//!   schoolgate policy who -m fees -p approve     - Roles holding a permission
//!   schoolgate policy export --format json       - Dump the active policy
//!   schoolgate -r parent guard -m fees -p view   - Evaluate a guard
//!   schoolgate -r admin dashboard                - Role-based dashboard

use clap::{Parser, Subcommand};
use cli::commands::{DashboardCommand, GuardCommand, PolicyCommand};
use cli::interactive::InteractiveCli;
use cli::AppContext;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "schoolgate")]
#[command(about = "SchoolGate - Role-based access control for the school ERP")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Role of the signed-in user (omit for a signed-out session)
    #[arg(short, long, global = true)]
    role: Option<String>,

    /// Policy file (.yaml, .yml or .json); defaults to the built-in policy
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the policy table
    Policy(PolicyCommand),
    /// Evaluate a permission guard
    Guard(GuardCommand),
    /// Show the role-based dashboard
    Dashboard(DashboardCommand),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::load(cli.policy.as_deref(), cli.role, cli.json)?;

    match cli.command {
        Some(Commands::Policy(cmd)) => cmd.run(&ctx),
        Some(Commands::Guard(cmd)) => cmd.run(&ctx),
        Some(Commands::Dashboard(cmd)) => cmd.run(&ctx),
        None => {
            // No subcommand - start interactive mode
            let mut interactive = InteractiveCli::new(ctx.table, ctx.role);
            interactive.run()
        }
    }
}

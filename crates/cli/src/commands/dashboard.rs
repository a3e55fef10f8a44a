//! schoolgate dashboard command

use crate::dashboard::DashboardView;
use crate::AppContext;
use clap::Args;

/// Print the role-based dashboard for --role
#[derive(Debug, Args)]
pub struct DashboardCommand {}

impl DashboardCommand {
    pub fn run(&self, ctx: &AppContext) -> anyhow::Result<()> {
        println!("{}", self.execute(ctx)?);
        Ok(())
    }

    pub fn execute(&self, ctx: &AppContext) -> anyhow::Result<String> {
        let view = DashboardView::build(&ctx.permissions());
        if ctx.json {
            return Ok(serde_json::to_string_pretty(&view)?);
        }
        Ok(view.to_text())
    }
}

//! CLI Commands

pub mod dashboard;
pub mod guard;
pub mod policy;

pub use dashboard::DashboardCommand;
pub use guard::GuardCommand;
pub use policy::PolicyCommand;

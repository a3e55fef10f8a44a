//! SchoolGate CLI library: command implementations shared by the binary and
//! its tests.

pub mod commands;
pub mod context;
pub mod dashboard;
pub mod interactive;

pub use context::AppContext;

//! CLI commands
//!
//! Command implementations for the `triage` binary.

mod auth;
mod context;
mod display;
mod menu;
mod progress;
mod style;
mod watch;

pub use auth::{run_auth_setup, run_auth_test};
pub use context::CommandContext;
pub use menu::{run_interactive, run_list};
pub use watch::run_watch;

//! renovate-triage - triage and batch-process Renovate dependency PRs
//!
//! The library holds everything with real logic: classification and
//! grouping of PRs, the batch rebase/merge dispatcher, and the post-merge
//! deployment watcher. The `triage` binary wraps it in an interactive menu.

pub mod actions;
pub mod auth;
pub mod clock;
pub mod cluster;
pub mod config;
pub mod error;
pub mod platform;
pub mod triage;
pub mod types;
pub mod watch;

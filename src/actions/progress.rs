//! Progress callback trait for interface-agnostic updates
//!
//! Batch operations report through this trait so the terminal menu, a
//! log-only runner and tests can all observe the same events.

use crate::error::Error;
use async_trait::async_trait;
use std::fmt;

/// Batch phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Attaching the rebase label
    Labeling,
    /// Dispatching the rebuild workflow
    TriggeringWorkflow,
    /// Merging PRs one by one
    Merging,
    /// Batch finished
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Labeling => write!(f, "Adding rebase label"),
            Self::TriggeringWorkflow => write!(f, "Triggering Renovate workflow"),
            Self::Merging => write!(f, "Merging"),
            Self::Complete => write!(f, "Done"),
        }
    }
}

/// Per-PR status within a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    /// Work on the PR started
    Started,
    /// The PR was handled
    Success,
    /// Dry run; nothing was sent
    Skipped,
    /// Merge conflict, trying again
    Retrying {
        /// Attempt about to be made (2-based)
        attempt: u32,
        /// Attempt limit
        max_attempts: u32,
    },
    /// The PR failed with an error message
    Failed(String),
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => write!(f, "started"),
            Self::Success => write!(f, "done"),
            Self::Skipped => write!(f, "skipped (dry run)"),
            Self::Retrying {
                attempt,
                max_attempts,
            } => write!(f, "base branch moved, retry {attempt}/{max_attempts}"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

/// Progress callback trait
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called when a PR changes status
    async fn on_item(&self, pr_number: u64, status: ItemStatus);

    /// Called when an error occurs (non-fatal)
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_item(&self, _pr_number: u64, _status: ItemStatus) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}

//! Hosting platform services
//!
//! Provides the PR operations the triage session needs: listing the bot's
//! open PRs, labeling, dispatching the Renovate workflow and merging.

mod factory;
mod github;

pub use factory::create_platform_service;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{ChangeRequest, PlatformConfig, RateLimit};
use async_trait::async_trait;

/// Platform service trait for PR operations
///
/// Implementations are thin wrappers over the hosting API. Batch logic
/// lives in [`crate::actions`] and only talks to this trait, so tests can
/// substitute a mock.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List open PRs, newest first, optionally restricted to one author.
    ///
    /// Returned PRs are uncategorized (`Category::Unknown`).
    async fn list_open_change_requests(&self, author: Option<&str>)
    -> Result<Vec<ChangeRequest>>;

    /// Attach a label to a PR
    async fn add_label(&self, pr_number: u64, label: &str) -> Result<()>;

    /// Dispatch a workflow run on `git_ref`
    async fn trigger_workflow(&self, workflow: &str, git_ref: &str) -> Result<()>;

    /// Merge a PR with a merge commit.
    ///
    /// A rejection because the base branch moved must surface as
    /// [`crate::error::Error::MergeConflict`] so callers can retry.
    async fn merge_change_request(&self, pr_number: u64) -> Result<()>;

    /// Current core API rate limit
    async fn rate_limit(&self) -> Result<RateLimit>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}

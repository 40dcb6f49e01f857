//! Merge batch
//!
//! Planning is pure: [`MergePlan::new`] resolves the app name of every PR
//! up front so the watch set is known before anything is merged.
//! [`execute_merge_batch`] then merges sequentially, one platform call per
//! PR, with a bounded retry on base-branch conflicts.

use crate::actions::RetryPolicy;
use crate::actions::progress::{ItemStatus, Phase, ProgressCallback};
use crate::clock::Clock;
use crate::config::TriageConfig;
use crate::error::Result;
use crate::platform::PlatformService;
use crate::triage::extract_app_name;
use crate::types::ChangeRequest;
use tracing::{debug, warn};

/// One PR scheduled for merging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeItem {
    /// PR number
    pub number: u64,
    /// PR title (for display)
    pub title: String,
    /// App to watch after the merge, if the title names one
    pub app_name: Option<String>,
}

/// Ordered list of PRs to merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    /// Items in merge order
    pub items: Vec<MergeItem>,
}

impl MergePlan {
    /// Plan a merge of `requests` in the given order
    pub fn new(requests: &[ChangeRequest]) -> Self {
        let items = requests
            .iter()
            .map(|pr| MergeItem {
                number: pr.number,
                title: pr.title.clone(),
                app_name: extract_app_name(&pr.title),
            })
            .collect();
        Self { items }
    }

    /// Bulk merges need an explicit confirmation from the operator
    pub fn needs_confirmation(&self) -> bool {
        self.items.len() > 1
    }

    /// Number of PRs in the plan
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the plan is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Outcome of a merge batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeBatchResult {
    /// PRs merged (or that would be, in a dry run)
    pub merged: Vec<u64>,
    /// PRs that failed, with the error text
    pub failed: Vec<(u64, String)>,
    /// Distinct app names of merged PRs, first-seen order
    pub watch_targets: Vec<String>,
    /// Nothing was sent to the platform
    pub dry_run: bool,
}

impl MergeBatchResult {
    /// Number of PRs attempted
    pub fn total(&self) -> usize {
        self.merged.len() + self.failed.len()
    }

    /// Whether there is anything to hand to the watcher
    pub fn has_watch_targets(&self) -> bool {
        !self.watch_targets.is_empty()
    }
}

/// Execute a merge plan (EFFECTFUL)
///
/// Every item is attempted; a failure is recorded and the batch moves on.
/// Only merged items with an app name contribute to `watch_targets`. In a
/// dry run no platform call is made and the watch set stays empty.
pub async fn execute_merge_batch(
    platform: &dyn PlatformService,
    clock: &dyn Clock,
    config: &TriageConfig,
    plan: &MergePlan,
    progress: &dyn ProgressCallback,
) -> MergeBatchResult {
    let mut result = MergeBatchResult {
        dry_run: config.dry_run,
        ..Default::default()
    };

    if plan.is_empty() {
        return result;
    }

    progress.on_phase(Phase::Merging).await;

    for item in &plan.items {
        progress.on_item(item.number, ItemStatus::Started).await;

        if config.dry_run {
            debug!(pr_number = item.number, app = ?item.app_name, "dry run: would merge");
            progress.on_item(item.number, ItemStatus::Skipped).await;
            result.merged.push(item.number);
            continue;
        }

        wait_for_rate_limit(platform, clock, progress).await;

        match merge_with_retry(platform, clock, item.number, config.merge_retry, progress).await {
            Ok(()) => {
                progress.on_item(item.number, ItemStatus::Success).await;
                result.merged.push(item.number);
                if let Some(app) = &item.app_name
                    && !result.watch_targets.contains(app)
                {
                    result.watch_targets.push(app.clone());
                }
            }
            Err(e) => {
                warn!(pr_number = item.number, error = %e, "merge failed");
                progress
                    .on_item(item.number, ItemStatus::Failed(e.to_string()))
                    .await;
                result.failed.push((item.number, e.to_string()));
            }
        }
    }

    progress.on_phase(Phase::Complete).await;
    result
}

/// Merge one PR, retrying base-branch conflicts per `policy`
async fn merge_with_retry(
    platform: &dyn PlatformService,
    clock: &dyn Clock,
    pr_number: u64,
    policy: RetryPolicy,
    progress: &dyn ProgressCallback,
) -> Result<()> {
    let mut attempt = 1;
    loop {
        match platform.merge_change_request(pr_number).await {
            Ok(()) => return Ok(()),
            Err(e) if e.is_merge_conflict() && policy.allows_retry_after(attempt) => {
                attempt += 1;
                debug!(pr_number, attempt, "base branch moved, retrying merge");
                progress
                    .on_item(
                        pr_number,
                        ItemStatus::Retrying {
                            attempt,
                            max_attempts: policy.max_attempts,
                        },
                    )
                    .await;
                clock.sleep(policy.delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Block until the core rate limit has requests left.
///
/// A failed query is logged and treated as "not limited".
async fn wait_for_rate_limit(
    platform: &dyn PlatformService,
    clock: &dyn Clock,
    progress: &dyn ProgressCallback,
) {
    let limit = match platform.rate_limit().await {
        Ok(limit) => limit,
        Err(e) => {
            warn!(error = %e, "could not check rate limit");
            return;
        }
    };

    if limit.remaining > 0 {
        return;
    }

    let Ok(wait) = (limit.reset_at - clock.wall_time()).to_std() else {
        return;
    };

    progress
        .on_message(&format!(
            "Rate limit exhausted, waiting {}s for reset",
            wait.as_secs()
        ))
        .await;
    clock.sleep(wait).await;
}

//! Rebase batch: label each PR, then dispatch Renovate once

use crate::actions::progress::{ItemStatus, Phase, ProgressCallback};
use crate::config::TriageConfig;
use crate::platform::PlatformService;
use crate::types::ChangeRequest;
use tracing::{debug, warn};

/// Outcome of a rebase batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebaseBatchResult {
    /// PRs that were labeled (or would be, in a dry run)
    pub labeled: Vec<u64>,
    /// PRs whose label could not be attached, with the error text
    pub failed: Vec<(u64, String)>,
    /// Whether the workflow dispatch succeeded; `None` if it was not attempted
    pub workflow_triggered: Option<bool>,
    /// Nothing was sent to the platform
    pub dry_run: bool,
}

impl RebaseBatchResult {
    /// Number of PRs in the batch
    pub fn total(&self) -> usize {
        self.labeled.len() + self.failed.len()
    }

    /// Whether every PR was labeled and the workflow ran
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.workflow_triggered != Some(false)
    }
}

/// Attach the rebase label to every PR in `items`, in order.
///
/// A failed label never stops the batch. The rebuild workflow is
/// dispatched once, and only if at least one label was attached.
pub async fn execute_rebase_batch(
    platform: &dyn PlatformService,
    config: &TriageConfig,
    items: &[ChangeRequest],
    progress: &dyn ProgressCallback,
) -> RebaseBatchResult {
    let mut result = RebaseBatchResult {
        dry_run: config.dry_run,
        ..Default::default()
    };

    if items.is_empty() {
        return result;
    }

    progress.on_phase(Phase::Labeling).await;

    for pr in items {
        progress.on_item(pr.number, ItemStatus::Started).await;

        if config.dry_run {
            debug!(pr_number = pr.number, "dry run: would add rebase label");
            progress.on_item(pr.number, ItemStatus::Skipped).await;
            result.labeled.push(pr.number);
            continue;
        }

        match platform.add_label(pr.number, &config.rebase_label).await {
            Ok(()) => {
                progress.on_item(pr.number, ItemStatus::Success).await;
                result.labeled.push(pr.number);
            }
            Err(e) => {
                warn!(pr_number = pr.number, error = %e, "failed to add rebase label");
                progress
                    .on_item(pr.number, ItemStatus::Failed(e.to_string()))
                    .await;
                result.failed.push((pr.number, e.to_string()));
            }
        }
    }

    if !config.dry_run && !result.labeled.is_empty() {
        progress.on_phase(Phase::TriggeringWorkflow).await;
        match platform
            .trigger_workflow(&config.workflow, &config.workflow_ref)
            .await
        {
            Ok(()) => result.workflow_triggered = Some(true),
            Err(e) => {
                warn!(workflow = %config.workflow, error = %e, "failed to trigger workflow");
                progress.on_error(&e).await;
                result.workflow_triggered = Some(false);
            }
        }
    }

    progress.on_phase(Phase::Complete).await;
    result
}

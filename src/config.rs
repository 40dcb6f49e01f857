//! Run configuration
//!
//! Every tunable of a triage run lives in one [`TriageConfig`] value that is
//! built once in `main` and handed to the components that need it.

use crate::actions::RetryPolicy;
use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use chrono_tz::Tz;
use std::time::Duration;

/// Repository whose PRs are triaged
pub const DEFAULT_REPO: &str = "gavinmcfall/home-ops";
/// Login of the update bot
pub const DEFAULT_BOT_AUTHOR: &str = "nerdz-bot[bot]";
/// Label that asks Renovate to rebase a PR
pub const DEFAULT_REBASE_LABEL: &str = "renovate/force-rebase";
/// Workflow that runs Renovate
pub const DEFAULT_WORKFLOW: &str = "renovate.yaml";
/// Git ref the workflow is dispatched on
pub const DEFAULT_WORKFLOW_REF: &str = "main";
/// Timezone used for listing timestamps
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Pacific::Auckland;
/// Watch timeout in seconds
pub const DEFAULT_WATCH_TIMEOUT_SECS: u64 = 600;
/// Watch poll interval in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Title substrings that are never batch-processed
pub const DEFAULT_DONT_TOUCH: &[&str] = &[
    "itzg/minecraft-server",
    "minecraft",
    "ghcr.io/immich-app/immich-server",
    "ghcr.io/immich-app/immich-machine-learning",
    "ingress-nginx",
];

/// Configuration for one triage session
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// Target repository
    pub platform: PlatformConfig,
    /// Only PRs authored by this login are listed (None = all)
    pub bot_author: Option<String>,
    /// Label attached by the rebase batch
    pub rebase_label: String,
    /// Workflow file or id dispatched after labeling
    pub workflow: String,
    /// Ref the workflow is dispatched on
    pub workflow_ref: String,
    /// Timezone for rendered timestamps
    pub timezone: Tz,
    /// Upper bound on a watch session
    pub watch_timeout: Duration,
    /// Sleep between watch ticks
    pub poll_interval: Duration,
    /// Case-insensitive title substrings forcing `dont_touch`
    pub dont_touch: Vec<String>,
    /// Retry policy for merges rejected with a base-branch conflict
    pub merge_retry: RetryPolicy,
    /// Report actions without performing them
    pub dry_run: bool,
}

impl Default for TriageConfig {
    fn default() -> Self {
        let (owner, repo) = DEFAULT_REPO
            .split_once('/')
            .unwrap_or((DEFAULT_REPO, DEFAULT_REPO));
        Self {
            platform: PlatformConfig {
                owner: owner.to_string(),
                repo: repo.to_string(),
                host: None,
            },
            bot_author: Some(DEFAULT_BOT_AUTHOR.to_string()),
            rebase_label: DEFAULT_REBASE_LABEL.to_string(),
            workflow: DEFAULT_WORKFLOW.to_string(),
            workflow_ref: DEFAULT_WORKFLOW_REF.to_string(),
            timezone: DEFAULT_TIMEZONE,
            watch_timeout: Duration::from_secs(DEFAULT_WATCH_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            dont_touch: DEFAULT_DONT_TOUCH.iter().map(ToString::to_string).collect(),
            merge_retry: RetryPolicy::default(),
            dry_run: false,
        }
    }
}

impl TriageConfig {
    /// Point the config at another `owner/repo`
    pub fn with_repo(mut self, slug: &str) -> Result<Self> {
        self.platform = parse_repo_slug(slug)?;
        Ok(self)
    }

    /// Use a different display timezone (IANA name)
    pub fn with_timezone(mut self, name: &str) -> Result<Self> {
        self.timezone = name
            .parse::<Tz>()
            .map_err(|e| Error::Config(format!("unknown timezone {name}: {e}")))?;
        Ok(self)
    }

    /// Poll the cluster every `secs` seconds while watching; zero is rejected
    pub fn with_poll_interval(mut self, secs: u64) -> Result<Self> {
        if secs == 0 {
            return Err(Error::Config("poll interval must be at least 1 second".to_string()));
        }
        self.poll_interval = Duration::from_secs(secs);
        Ok(self)
    }
}

/// Parse `owner/repo` into platform coordinates
pub fn parse_repo_slug(slug: &str) -> Result<PlatformConfig> {
    let trimmed = slug.trim().trim_end_matches(".git");
    match trimmed.split_once('/') {
        Some((owner, repo))
            if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
        {
            Ok(PlatformConfig {
                owner: owner.to_string(),
                repo: repo.to_string(),
                host: None,
            })
        }
        _ => Err(Error::Config(format!(
            "expected repository as owner/repo, got {slug:?}"
        ))),
    }
}

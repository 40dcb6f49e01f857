//! Shared command context for CLI commands

use renovate_triage::clock::SystemClock;
use renovate_triage::cluster::KubectlService;
use renovate_triage::config::TriageConfig;
use renovate_triage::error::Result;
use renovate_triage::platform::{PlatformService, create_platform_service};
use renovate_triage::triage::TriageSnapshot;
use tracing::debug;

/// Everything a command needs to talk to GitHub and the cluster
pub struct CommandContext {
    /// Run configuration
    pub config: TriageConfig,
    /// GitHub service
    pub platform: Box<dyn PlatformService>,
    /// Cluster queries for the watcher
    pub cluster: KubectlService,
    /// Time source
    pub clock: SystemClock,
}

impl CommandContext {
    /// Resolve authentication and build the platform service
    pub async fn new(config: TriageConfig) -> Result<Self> {
        let platform = create_platform_service(&config.platform).await?;
        Ok(Self {
            config,
            platform,
            cluster: KubectlService::new(),
            clock: SystemClock,
        })
    }

    /// Fetch the bot's open PRs and classify, group and number them
    pub async fn fetch_snapshot(&self) -> Result<TriageSnapshot> {
        let requests = self
            .platform
            .list_open_change_requests(self.config.bot_author.as_deref())
            .await?;
        debug!(count = requests.len(), "fetched PRs");
        Ok(TriageSnapshot::build(requests, &self.config.dont_touch))
    }
}

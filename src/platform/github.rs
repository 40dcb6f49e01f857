//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{Category, ChangeRequest, PlatformConfig, RateLimit};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use tracing::debug;

/// Error text GitHub returns when a merge races a push to the base branch
const BASE_MODIFIED: &str = "Base branch was modified";

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(ref h) = host {
            builder = builder
                .base_uri(format!("https://{h}/api/v3"))
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            config: PlatformConfig { owner, repo, host },
        })
    }
}

/// Helper to convert an octocrab PR to our `ChangeRequest` type
fn change_request_from_octocrab(pr: octocrab::models::pulls::PullRequest) -> ChangeRequest {
    ChangeRequest {
        number: pr.number,
        title: pr.title.unwrap_or_default(),
        body: pr.body.unwrap_or_default(),
        updated_at: pr.updated_at,
        labels: pr
            .labels
            .unwrap_or_default()
            .into_iter()
            .map(|l| l.name)
            .collect(),
        category: Category::Unknown,
    }
}

fn is_base_modified(err: &octocrab::Error) -> bool {
    matches!(err, octocrab::Error::GitHub { source, .. } if source.message.contains(BASE_MODIFIED))
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_open_change_requests(
        &self,
        author: Option<&str>,
    ) -> Result<Vec<ChangeRequest>> {
        debug!(repo = %self.config.slug(), author, "listing open PRs");

        let first_page = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(octocrab::params::State::Open)
            .sort(octocrab::params::pulls::Sort::Created)
            .direction(octocrab::params::Direction::Descending)
            .per_page(100)
            .send()
            .await?;

        let prs = self.client.all_pages(first_page).await?;

        let result: Vec<ChangeRequest> = prs
            .into_iter()
            .filter(|pr| {
                author.is_none_or(|login| pr.user.as_ref().is_some_and(|u| u.login == login))
            })
            .map(change_request_from_octocrab)
            .collect();

        debug!(count = result.len(), "listed open PRs");
        Ok(result)
    }

    async fn add_label(&self, pr_number: u64, label: &str) -> Result<()> {
        debug!(pr_number, label, "adding label");
        self.client
            .issues(&self.config.owner, &self.config.repo)
            .add_labels(pr_number, &[label.to_string()])
            .await?;
        debug!(pr_number, "added label");
        Ok(())
    }

    async fn trigger_workflow(&self, workflow: &str, git_ref: &str) -> Result<()> {
        debug!(workflow, git_ref, "dispatching workflow");
        self.client
            .actions()
            .create_workflow_dispatch(&self.config.owner, &self.config.repo, workflow, git_ref)
            .send()
            .await?;
        debug!(workflow, "dispatched workflow");
        Ok(())
    }

    async fn merge_change_request(&self, pr_number: u64) -> Result<()> {
        debug!(pr_number, "merging PR");

        let result = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .merge(pr_number)
            .method(octocrab::params::pulls::MergeMethod::Merge)
            .send()
            .await
            .map_err(|e| {
                if is_base_modified(&e) {
                    Error::MergeConflict {
                        number: pr_number,
                        message: BASE_MODIFIED.to_string(),
                    }
                } else {
                    Error::GitHubApi(format!("Merge failed: {e}"))
                }
            })?;

        if !result.merged {
            let message = result.message.unwrap_or_else(|| "not merged".to_string());
            if message.contains(BASE_MODIFIED) {
                return Err(Error::MergeConflict {
                    number: pr_number,
                    message,
                });
            }
            return Err(Error::GitHubApi(format!("Merge failed: {message}")));
        }

        debug!(pr_number, sha = ?result.sha, "merge complete");
        Ok(())
    }

    async fn rate_limit(&self) -> Result<RateLimit> {
        let core = self.client.ratelimit().get().await?.resources.core;

        let reset_at = i64::try_from(core.reset)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .ok_or_else(|| Error::GitHubApi("Rate limit reset out of range".to_string()))?;

        debug!(remaining = core.remaining, %reset_at, "rate limit");
        Ok(RateLimit {
            remaining: core.remaining as u64,
            reset_at,
        })
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

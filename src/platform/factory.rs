//! Platform service factory
//!
//! Creates the platform service for the configured repository.

use crate::auth::get_github_auth;
use crate::error::Result;
use crate::platform::{GitHubService, PlatformService};
use crate::types::PlatformConfig;

/// Create a platform service from configuration
///
/// Resolves a GitHub token and builds the API client.
pub async fn create_platform_service(
    config: &PlatformConfig,
) -> Result<Box<dyn PlatformService>> {
    let auth = get_github_auth().await?;
    Ok(Box::new(GitHubService::new(
        &auth.token,
        config.owner.clone(),
        config.repo.clone(),
        config.host.clone(),
    )?))
}

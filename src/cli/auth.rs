//! Auth command - test and explain GitHub authentication

use crate::cli::style::{Stylize, check};
use anstream::println;
use renovate_triage::auth::{get_github_auth, test_github_auth};
use renovate_triage::error::Result;
use renovate_triage::types::PlatformConfig;

/// Resolve a token and check it can see the target repository
pub async fn run_auth_test(repo: &PlatformConfig) -> Result<()> {
    println!("Testing GitHub authentication...");
    let config = get_github_auth().await?;
    let username = test_github_auth(&config, repo).await?;
    println!("{} Authenticated as: {}", check(), username.accent());
    println!("  Token source: {:?}", config.source);
    println!("  Repository: {}", repo.slug().accent());
    Ok(())
}

/// Print setup instructions
pub fn run_auth_setup() {
    println!("{}", "GitHub Authentication Setup".emphasis());
    println!("===========================");
    println!();
    println!("Option 1: GitHub CLI (recommended)");
    println!("  Install: https://cli.github.com/");
    println!("  Run: gh auth login");
    println!();
    println!("Option 2: Environment variable");
    println!("  Set GITHUB_TOKEN or GH_TOKEN");
    println!();
    println!("The token needs repo scope (labels, merges) and workflow scope");
    println!("(dispatching the Renovate workflow).");
}

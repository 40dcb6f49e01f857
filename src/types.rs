//! Core types for renovate-triage

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// An open PR opened by the update bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRequest {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// PR description (may be empty)
    pub body: String,
    /// Last update time, if the platform reported one
    pub updated_at: Option<DateTime<Utc>>,
    /// Label names attached to the PR
    pub labels: Vec<String>,
    /// Assigned by the triage pipeline; `Unknown` until classified
    pub category: Category,
}

impl ChangeRequest {
    /// Whether the PR carries a label with exactly this name
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l == name)
    }
}

/// Risk tier of a dependency bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Breaking version bump
    Major,
    /// Feature version bump
    Minor,
    /// Bugfix version bump
    Patch,
    /// Image digest only
    Digest,
}

impl Tier {
    /// Lower-case name as used in PR bodies and labels
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
            Self::Digest => "digest",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            "digest" => Ok(Self::Digest),
            other => Err(format!("unknown update tier: {other}")),
        }
    }
}

/// One row of a Renovate update table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    /// Package, image or chart name
    pub artifact_name: String,
    /// Tier reported for this row
    pub tier: Tier,
}

/// Display/priority category of a PR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    /// Matched the do-not-touch list
    DontTouch,
    /// Digest-only update
    Digest,
    /// Patch update
    Patch,
    /// Minor update
    Minor,
    /// Major update
    Major,
    /// Could not be classified
    #[default]
    Unknown,
}

impl Category {
    /// Fixed display order; numbering follows it
    pub const DISPLAY_ORDER: [Self; 6] = [
        Self::DontTouch,
        Self::Digest,
        Self::Patch,
        Self::Minor,
        Self::Major,
        Self::Unknown,
    ];

    /// snake_case name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DontTouch => "dont_touch",
            Self::Digest => "digest",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Unknown => "unknown",
        }
    }
}

impl From<Tier> for Category {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Major => Self::Major,
            Tier::Minor => Self::Minor,
            Tier::Patch => Self::Patch,
            Tier::Digest => Self::Digest,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readiness snapshot of a Flux `HelmRelease`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseStatus {
    /// Release name
    pub name: String,
    /// Namespace the release lives in
    pub namespace: String,
    /// `Ready` condition is `True`
    pub ready: bool,
    /// Message of the `Ready` condition
    pub message: String,
    /// Reason of the `Ready` condition
    pub reason: String,
}

/// Pod-owning controller kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkloadKind {
    /// apps/v1 Deployment
    Deployment,
    /// apps/v1 StatefulSet
    StatefulSet,
}

impl WorkloadKind {
    /// Kinds in lookup order
    pub const ALL: [Self; 2] = [Self::Deployment, Self::StatefulSet];

    /// Resource name as understood by kubectl
    pub const fn resource(self) -> &'static str {
        match self {
            Self::Deployment => "deployment",
            Self::StatefulSet => "statefulset",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource())
    }
}

/// Replica readiness of a workload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodGroupStatus {
    /// Workload name
    pub name: String,
    /// Deployment or StatefulSet
    pub kind: WorkloadKind,
    /// `status.replicas`
    pub desired_replicas: u32,
    /// `status.readyReplicas`
    pub ready_replicas: u32,
    /// At least one replica and all of them ready
    pub all_ready: bool,
}

impl PodGroupStatus {
    /// Build a status, deriving `all_ready` from the replica counts
    pub const fn new(name: String, kind: WorkloadKind, desired: u32, ready: u32) -> Self {
        Self {
            name,
            kind,
            desired_replicas: desired,
            ready_replicas: ready,
            all_ready: desired > 0 && desired == ready,
        }
    }
}

/// Core API rate limit snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests left in the current window
    pub remaining: u64,
    /// When the window resets
    pub reset_at: DateTime<Utc>,
}

/// Hosting platform coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

impl PlatformConfig {
    /// `owner/repo`
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Web URL of a PR
    pub fn pr_url(&self, number: u64) -> String {
        let host = self.host.as_deref().unwrap_or("github.com");
        format!("https://{host}/{}/{}/pull/{number}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parse_is_case_insensitive() {
        assert_eq!("MINOR".parse::<Tier>(), Ok(Tier::Minor));
        assert_eq!("Digest".parse::<Tier>(), Ok(Tier::Digest));
        assert!("pin".parse::<Tier>().is_err());
    }

    #[test]
    fn test_pod_group_all_ready_requires_replicas() {
        let none = PodGroupStatus::new("x".into(), WorkloadKind::Deployment, 0, 0);
        assert!(!none.all_ready);
        let partial = PodGroupStatus::new("x".into(), WorkloadKind::Deployment, 2, 1);
        assert!(!partial.all_ready);
        let full = PodGroupStatus::new("x".into(), WorkloadKind::StatefulSet, 2, 2);
        assert!(full.all_ready);
    }

    #[test]
    fn test_pr_url_defaults_to_github() {
        let config = PlatformConfig {
            owner: "o".into(),
            repo: "r".into(),
            host: None,
        };
        assert_eq!(config.pr_url(7), "https://github.com/o/r/pull/7");
        assert_eq!(config.slug(), "o/r");
    }
}

//! Shared test utilities

#![allow(dead_code)]

mod mock_cluster;
mod mock_platform;

pub use mock_cluster::{FakeClock, MockClusterService};
pub use mock_platform::{AddLabelCall, MergeResponse, MockPlatformService, TriggerCall};

use renovate_triage::config::TriageConfig;
use renovate_triage::types::{
    Category, ChangeRequest, PlatformConfig, PodGroupStatus, ReleaseStatus, WorkloadKind,
};

/// Config for a test repository
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "test".to_string(),
        repo: "home-ops".to_string(),
        host: None,
    }
}

/// Default triage config pointed at the test repository
pub fn triage_config() -> TriageConfig {
    TriageConfig {
        platform: github_config(),
        ..TriageConfig::default()
    }
}

/// An uncategorized PR with the given title and body
pub fn make_pr(number: u64, title: &str, body: &str) -> ChangeRequest {
    ChangeRequest {
        number,
        title: title.to_string(),
        body: body.to_string(),
        updated_at: None,
        labels: Vec::new(),
        category: Category::Unknown,
    }
}

/// A PR with labels
pub fn make_labeled_pr(number: u64, title: &str, labels: &[&str]) -> ChangeRequest {
    ChangeRequest {
        labels: labels.iter().map(ToString::to_string).collect(),
        ..make_pr(number, title, "")
    }
}

/// Renovate body with one table row per `(name, tier)`
pub fn renovate_body(rows: &[(&str, &str)]) -> String {
    let mut body = String::from(
        "This PR contains the following updates:\n\n| Package | Update | Change |\n|---|---|---|\n",
    );
    for (name, tier) in rows {
        body.push_str(&format!("| {name} | {tier} | `1.0.0` -> `1.0.1` |\n"));
    }
    body
}

/// Release with a Ready condition
pub fn release(name: &str, namespace: &str, ready: bool) -> ReleaseStatus {
    ReleaseStatus {
        name: name.to_string(),
        namespace: namespace.to_string(),
        ready,
        message: if ready {
            "Helm upgrade succeeded".to_string()
        } else {
            "Running 'upgrade' action".to_string()
        },
        reason: String::new(),
    }
}

/// Workload with `ready` of `desired` replicas
pub fn workload(name: &str, kind: WorkloadKind, desired: u32, ready: u32) -> PodGroupStatus {
    PodGroupStatus::new(name.to_string(), kind, desired, ready)
}

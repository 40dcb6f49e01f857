//! Cluster queries for the deployment watcher
//!
//! The watcher only needs two reads: every Flux `HelmRelease` with its
//! `Ready` condition, and the replica status of workloads in a namespace.

mod kubectl;

pub use kubectl::{KubectlService, parse_release_list, parse_workload_list};

use crate::error::Result;
use crate::types::{PodGroupStatus, ReleaseStatus, WorkloadKind};
use async_trait::async_trait;

/// Read-only view of the cluster
#[async_trait]
pub trait ClusterService: Send + Sync {
    /// All managed releases across every namespace
    async fn list_managed_releases(&self) -> Result<Vec<ReleaseStatus>>;

    /// Workloads of one kind in a namespace
    async fn list_workloads(&self, namespace: &str, kind: WorkloadKind)
    -> Result<Vec<PodGroupStatus>>;
}

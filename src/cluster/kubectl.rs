//! `kubectl`-backed cluster service

use crate::cluster::ClusterService;
use crate::error::{Error, Result};
use crate::types::{PodGroupStatus, ReleaseStatus, WorkloadKind};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Deserialize)]
struct ItemList {
    #[serde(default)]
    items: Vec<Value>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Metadata {
    name: String,
    namespace: String,
}

#[derive(Deserialize)]
struct HelmRelease {
    metadata: Metadata,
    #[serde(default)]
    status: HelmReleaseStatus,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct HelmReleaseStatus {
    conditions: Vec<Condition>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Condition {
    #[serde(rename = "type")]
    kind: String,
    status: String,
    message: String,
    reason: String,
}

#[derive(Deserialize)]
struct Workload {
    metadata: Metadata,
    #[serde(default)]
    status: WorkloadStatus,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct WorkloadStatus {
    replicas: u32,
    ready_replicas: u32,
}

/// Items of a `kubectl get ... -o json` list; unparseable items are dropped
fn typed_items<T: for<'de> Deserialize<'de>>(json: &str) -> Result<Vec<T>> {
    let list: ItemList = serde_json::from_str(json)?;
    Ok(list
        .items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!(error = %e, "skipping malformed item");
                None
            }
        })
        .collect())
}

/// Parse `kubectl get helmrelease -A -o json` output
pub fn parse_release_list(json: &str) -> Result<Vec<ReleaseStatus>> {
    let releases: Vec<HelmRelease> = typed_items(json)?;
    Ok(releases
        .into_iter()
        .map(|hr| {
            let ready = hr.status.conditions.into_iter().find(|c| c.kind == "Ready");
            let (ready, message, reason) = ready.map_or_else(
                || (false, String::new(), String::new()),
                |c| (c.status == "True", c.message, c.reason),
            );
            ReleaseStatus {
                name: hr.metadata.name,
                namespace: hr.metadata.namespace,
                ready,
                message,
                reason,
            }
        })
        .collect())
}

/// Parse `kubectl get deployment|statefulset -o json` output
pub fn parse_workload_list(json: &str, kind: WorkloadKind) -> Result<Vec<PodGroupStatus>> {
    let workloads: Vec<Workload> = typed_items(json)?;
    Ok(workloads
        .into_iter()
        .map(|w| {
            PodGroupStatus::new(
                w.metadata.name,
                kind,
                w.status.replicas,
                w.status.ready_replicas,
            )
        })
        .collect())
}

/// Cluster service that shells out to `kubectl`
#[derive(Debug, Clone)]
pub struct KubectlService {
    binary: String,
}

impl Default for KubectlService {
    fn default() -> Self {
        Self::new()
    }
}

impl KubectlService {
    /// Use `kubectl` from `PATH` with the current context
    pub fn new() -> Self {
        Self {
            binary: "kubectl".to_string(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let mut command = Command::new(&self.binary);
        command.args(args);

        let rendered = format!("{} {}", self.binary, args.join(" "));
        debug!(command = %rendered, "running kubectl");

        let output = command.output().await.map_err(|e| Error::Cluster {
            command: rendered.clone(),
            message: e.to_string(),
        })?;

        if !output.status.success() {
            let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(command = %rendered, %message, "kubectl failed");
            return Err(Error::Cluster {
                command: rendered,
                message,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl ClusterService for KubectlService {
    async fn list_managed_releases(&self) -> Result<Vec<ReleaseStatus>> {
        let out = self.run(&["get", "helmrelease", "-A", "-o", "json"]).await?;
        parse_release_list(&out)
    }

    async fn list_workloads(
        &self,
        namespace: &str,
        kind: WorkloadKind,
    ) -> Result<Vec<PodGroupStatus>> {
        let out = self
            .run(&["get", kind.resource(), "-n", namespace, "-o", "json"])
            .await?;
        parse_workload_list(&out, kind)
    }
}

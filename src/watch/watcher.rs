//! Deployment watcher state machine
//!
//! ```text
//! per release:  discovering -> polling -> healthy | unhealthy-at-timeout
//! session:      running -> all-healthy | timeout
//! ```
//!
//! Time is read and slept through [`Clock`], so a whole session can be
//! driven by a fake clock. The timeout is measured from the first tick and
//! is never reset.

use crate::clock::Clock;
use crate::cluster::ClusterService;
use crate::config::TriageConfig;
use crate::types::{PodGroupStatus, ReleaseStatus, WorkloadKind};
use crate::watch::discovery::{discover_releases, distinct_apps};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Tracking record for one release during a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEntry {
    /// Namespace the release lives in
    pub namespace: String,
    /// Release reported `Ready=True` on the last tick
    pub hr_ready: bool,
    /// Backing workload had all replicas ready on the last tick
    pub pods_ready: bool,
}

impl WatchEntry {
    /// Fresh entry, not yet ready
    pub const fn new(namespace: String) -> Self {
        Self {
            namespace,
            hr_ready: false,
            pods_ready: false,
        }
    }

    /// Release and pods both ready
    pub const fn is_healthy(&self) -> bool {
        self.hr_ready && self.pods_ready
    }
}

/// What one tick saw for one release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseObservation {
    /// The release was absent from the listing
    Missing,
    /// The release was listed
    Present {
        /// Release readiness condition
        release: ReleaseStatus,
        /// Matched workload, if any
        workload: Option<PodGroupStatus>,
    },
}

/// Per-release status line data for one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTick {
    /// Release name
    pub name: String,
    /// Entry after this tick's update
    pub entry: WatchEntry,
    /// Raw observation
    pub observation: ReleaseObservation,
}

/// Receives watch progress; every method defaults to doing nothing
pub trait WatchObserver: Send + Sync {
    /// Discovery is about to run for these apps
    fn on_discovery(&self, _apps: &[String]) {}

    /// Polling starts over the discovered releases
    fn on_watch_start(&self, _releases: &BTreeMap<String, WatchEntry>, _timeout: Duration) {}

    /// A tick begins
    fn on_tick(&self, _tick: u32, _at: DateTime<Utc>) {}

    /// One release was re-checked
    fn on_release(&self, _tick: &ReleaseTick) {}

    /// Not done yet; sleeping before the next tick
    fn on_waiting(&self, _remaining: Duration, _poll_interval: Duration) {}
}

/// Observer that ignores everything
pub struct NoopObserver;

impl WatchObserver for NoopObserver {}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchOutcome {
    /// No usable app name was given
    NoApps,
    /// No release in the cluster matched the app names
    NoReleases,
    /// Every tracked release became healthy
    AllHealthy,
    /// Time ran out; names of releases still not healthy
    TimedOut {
        /// Unhealthy release names, sorted
        unready: Vec<String>,
    },
}

/// Final state of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchReport {
    /// How the session ended
    pub outcome: WatchOutcome,
    /// Tracked releases with their last state
    pub releases: BTreeMap<String, WatchEntry>,
    /// Ticks performed
    pub ticks: u32,
    /// Time from the first tick to the end
    pub elapsed: Duration,
}

impl WatchReport {
    const fn nothing(outcome: WatchOutcome) -> Self {
        Self {
            outcome,
            releases: BTreeMap::new(),
            ticks: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Releases that ended healthy
    pub fn healthy_count(&self) -> usize {
        self.releases.values().filter(|e| e.is_healthy()).count()
    }

    /// Releases tracked
    pub fn total(&self) -> usize {
        self.releases.len()
    }

    /// Releases that ended failed or pending
    pub fn unready(&self) -> Vec<&str> {
        self.releases
            .iter()
            .filter(|(_, e)| !e.is_healthy())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Bounded polling loop over discovered releases
pub struct Watcher<'a> {
    cluster: &'a dyn ClusterService,
    clock: &'a dyn Clock,
    timeout: Duration,
    poll_interval: Duration,
}

impl<'a> Watcher<'a> {
    /// Create a watcher with explicit timing
    pub fn new(
        cluster: &'a dyn ClusterService,
        clock: &'a dyn Clock,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            cluster,
            clock,
            timeout,
            poll_interval,
        }
    }

    /// Create a watcher using the configured timeout and poll interval
    pub fn from_config(
        cluster: &'a dyn ClusterService,
        clock: &'a dyn Clock,
        config: &TriageConfig,
    ) -> Self {
        Self::new(cluster, clock, config.watch_timeout, config.poll_interval)
    }

    /// Discover releases for `apps` and poll until healthy or timed out
    pub async fn run<S: AsRef<str>>(
        &self,
        apps: &[S],
        observer: &dyn WatchObserver,
    ) -> WatchReport {
        let apps = distinct_apps(apps);
        if apps.is_empty() {
            return WatchReport::nothing(WatchOutcome::NoApps);
        }

        observer.on_discovery(&apps);
        let mut releases = discover_releases(self.cluster, &apps).await;
        if releases.is_empty() {
            return WatchReport::nothing(WatchOutcome::NoReleases);
        }

        observer.on_watch_start(&releases, self.timeout);

        let start = self.clock.now();
        let mut ticks = 0;

        let outcome = loop {
            ticks += 1;
            observer.on_tick(ticks, self.clock.wall_time());
            self.tick(&mut releases, observer).await;

            if releases.values().all(WatchEntry::is_healthy) {
                break WatchOutcome::AllHealthy;
            }

            let elapsed = self.clock.now().saturating_duration_since(start);
            if elapsed >= self.timeout {
                let unready = releases
                    .iter()
                    .filter(|(_, e)| !e.is_healthy())
                    .map(|(name, _)| name.clone())
                    .collect();
                break WatchOutcome::TimedOut { unready };
            }

            let remaining = self.timeout - elapsed;
            observer.on_waiting(remaining, self.poll_interval);
            self.clock.sleep(self.poll_interval.min(remaining)).await;
        };

        let elapsed = self.clock.now().saturating_duration_since(start);
        debug!(ticks, ?elapsed, ?outcome, "watch finished");

        WatchReport {
            outcome,
            releases,
            ticks,
            elapsed,
        }
    }

    /// Re-check every tracked release once
    async fn tick(
        &self,
        releases: &mut BTreeMap<String, WatchEntry>,
        observer: &dyn WatchObserver,
    ) {
        let listing = match self.cluster.list_managed_releases().await {
            Ok(listing) => listing,
            Err(e) => {
                warn!(error = %e, "failed to list releases");
                Vec::new()
            }
        };

        for (name, entry) in releases.iter_mut() {
            let found = listing
                .iter()
                .find(|r| r.name == *name && r.namespace == entry.namespace);

            let observation = match found {
                None => {
                    entry.hr_ready = false;
                    entry.pods_ready = false;
                    ReleaseObservation::Missing
                }
                Some(release) => {
                    let workload = self.find_workload(name, &entry.namespace).await;
                    entry.hr_ready = release.ready;
                    // a release without a workload (e.g. a CronJob) follows its own readiness
                    entry.pods_ready = workload.as_ref().map_or(release.ready, |w| w.all_ready);
                    ReleaseObservation::Present {
                        release: release.clone(),
                        workload,
                    }
                }
            };

            observer.on_release(&ReleaseTick {
                name: name.clone(),
                entry: entry.clone(),
                observation,
            });
        }
    }

    /// First deployment, then statefulset, whose name contains the release name
    async fn find_workload(&self, release: &str, namespace: &str) -> Option<PodGroupStatus> {
        let needle = release.to_lowercase();
        for kind in WorkloadKind::ALL {
            match self.cluster.list_workloads(namespace, kind).await {
                Ok(workloads) => {
                    if let Some(w) = workloads
                        .into_iter()
                        .find(|w| w.name.to_lowercase().contains(&needle))
                    {
                        return Some(w);
                    }
                }
                Err(e) => {
                    warn!(%namespace, %kind, error = %e, "failed to list workloads");
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_health() {
        let mut entry = WatchEntry::new("media".to_string());
        assert!(!entry.is_healthy());
        entry.hr_ready = true;
        assert!(!entry.is_healthy());
        entry.pods_ready = true;
        assert!(entry.is_healthy());
    }

    #[test]
    fn test_report_counts() {
        let mut releases = BTreeMap::new();
        releases.insert(
            "radarr".to_string(),
            WatchEntry {
                namespace: "media".to_string(),
                hr_ready: true,
                pods_ready: true,
            },
        );
        releases.insert("radarr-uhd".to_string(), WatchEntry::new("media".to_string()));
        let report = WatchReport {
            outcome: WatchOutcome::TimedOut {
                unready: vec!["radarr-uhd".to_string()],
            },
            releases,
            ticks: 3,
            elapsed: Duration::from_secs(20),
        };
        assert_eq!(report.healthy_count(), 1);
        assert_eq!(report.total(), 2);
        assert_eq!(report.unready(), vec!["radarr-uhd"]);
    }
}

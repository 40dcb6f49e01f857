//! Mock cluster service and fake clock for watcher tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use renovate_triage::clock::Clock;
use renovate_triage::cluster::ClusterService;
use renovate_triage::error::{Error, Result};
use renovate_triage::types::{PodGroupStatus, ReleaseStatus, WorkloadKind};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Mock cluster service
///
/// Release listings are served from a queue, one per call; the last
/// listing keeps being returned once the queue is down to one entry.
pub struct MockClusterService {
    release_listings: Mutex<VecDeque<Vec<ReleaseStatus>>>,
    workloads: Mutex<HashMap<(String, WorkloadKind), Vec<PodGroupStatus>>>,
    // Call tracking
    release_calls: Mutex<usize>,
    workload_calls: Mutex<Vec<(String, WorkloadKind)>>,
    // Error injection
    error_on_releases: Mutex<Option<String>>,
    error_on_workloads: Mutex<Option<String>>,
}

impl Default for MockClusterService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClusterService {
    pub fn new() -> Self {
        Self {
            release_listings: Mutex::new(VecDeque::new()),
            workloads: Mutex::new(HashMap::new()),
            release_calls: Mutex::new(0),
            workload_calls: Mutex::new(Vec::new()),
            error_on_releases: Mutex::new(None),
            error_on_workloads: Mutex::new(None),
        }
    }

    /// Queue the listing returned by the next `list_managed_releases` call
    pub fn push_releases(&self, releases: Vec<ReleaseStatus>) {
        self.release_listings.lock().unwrap().push_back(releases);
    }

    /// Workloads returned for one namespace and kind
    pub fn set_workloads(&self, namespace: &str, kind: WorkloadKind, items: Vec<PodGroupStatus>) {
        self.workloads
            .lock()
            .unwrap()
            .insert((namespace.to_string(), kind), items);
    }

    /// Make `list_managed_releases` return an error
    pub fn fail_releases(&self, msg: &str) {
        *self.error_on_releases.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_workloads` return an error
    pub fn fail_workloads(&self, msg: &str) {
        *self.error_on_workloads.lock().unwrap() = Some(msg.to_string());
    }

    pub fn release_call_count(&self) -> usize {
        *self.release_calls.lock().unwrap()
    }

    pub fn get_workload_calls(&self) -> Vec<(String, WorkloadKind)> {
        self.workload_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClusterService for MockClusterService {
    async fn list_managed_releases(&self) -> Result<Vec<ReleaseStatus>> {
        *self.release_calls.lock().unwrap() += 1;
        if let Some(msg) = self.error_on_releases.lock().unwrap().as_ref() {
            return Err(Error::Cluster {
                command: "kubectl get helmrelease -A -o json".to_string(),
                message: msg.clone(),
            });
        }
        let mut listings = self.release_listings.lock().unwrap();
        if listings.len() > 1 {
            Ok(listings.pop_front().unwrap_or_default())
        } else {
            Ok(listings.front().cloned().unwrap_or_default())
        }
    }

    async fn list_workloads(
        &self,
        namespace: &str,
        kind: WorkloadKind,
    ) -> Result<Vec<PodGroupStatus>> {
        self.workload_calls
            .lock()
            .unwrap()
            .push((namespace.to_string(), kind));
        if let Some(msg) = self.error_on_workloads.lock().unwrap().as_ref() {
            return Err(Error::Cluster {
                command: format!("kubectl get {} -n {namespace} -o json", kind.resource()),
                message: msg.clone(),
            });
        }
        Ok(self
            .workloads
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), kind))
            .cloned()
            .unwrap_or_default())
    }
}

/// Clock that only moves when something sleeps on it
pub struct FakeClock {
    start: Instant,
    start_wall: DateTime<Utc>,
    offset: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            start_wall: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            offset: Mutex::new(Duration::ZERO),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    /// Time slept so far
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock().unwrap()
    }

    /// Every sleep requested, in order
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }

    fn wall_time(&self) -> DateTime<Utc> {
        self.start_wall + chrono::Duration::from_std(self.elapsed()).unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        *self.offset.lock().unwrap() += duration;
    }
}

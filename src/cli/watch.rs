//! Watch command and terminal observer for the deployment watcher

use crate::cli::display::format_timestamp;
use crate::cli::style::{Stylize, check, ready_icon};
use anstream::println;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use renovate_triage::clock::Clock;
use renovate_triage::cluster::ClusterService;
use renovate_triage::config::TriageConfig;
use renovate_triage::watch::{
    ReleaseObservation, ReleaseTick, WatchEntry, WatchObserver, WatchOutcome, WatchReport, Watcher,
};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

const MESSAGE_WIDTH: usize = 55;

/// Prints discovery, one status line per release per tick, and countdowns
pub struct CliWatchObserver {
    timezone: Tz,
}

impl CliWatchObserver {
    /// Observer rendering tick times in `timezone`
    pub const fn new(timezone: Tz) -> Self {
        Self { timezone }
    }
}

impl WatchObserver for CliWatchObserver {
    fn on_discovery(&self, apps: &[String]) {
        println!("\nDiscovering HelmReleases for: {}", apps.join(", ").accent());
    }

    fn on_watch_start(&self, releases: &BTreeMap<String, WatchEntry>, timeout: Duration) {
        let names: Vec<&str> = releases.keys().map(String::as_str).collect();
        println!(
            "\n{}",
            format!("Watching {} HelmRelease(s) for reconciliation...", releases.len()).emphasis()
        );
        println!("   Timeout: {} minutes", timeout.as_secs() / 60);
        println!("   HelmReleases: {}", names.join(", "));
        println!("{}", "-".repeat(70).muted());
    }

    fn on_tick(&self, _tick: u32, at: DateTime<Utc>) {
        println!(
            "\n[{}] Checking status...",
            format_timestamp(Some(at), self.timezone).muted()
        );
    }

    fn on_release(&self, tick: &ReleaseTick) {
        match &tick.observation {
            ReleaseObservation::Missing => {
                println!("  {:<25} {}", tick.name, "HelmRelease not found".warn().for_stdout());
            }
            ReleaseObservation::Present { release, workload } => {
                let pods = workload.as_ref().map_or_else(
                    || "no deployment".to_string(),
                    |w| format!("{}/{} pods", w.ready_replicas, w.desired_replicas),
                );
                println!(
                    "  {:<25} HR: {}  Pods: {} ({})",
                    tick.name,
                    ready_icon(tick.entry.hr_ready),
                    ready_icon(tick.entry.pods_ready),
                    pods.muted()
                );
                if !release.ready && !release.message.is_empty() {
                    let message: String = release.message.chars().take(MESSAGE_WIDTH).collect();
                    println!("{:30}└─ {}", "", message.muted());
                }
            }
        }
    }

    fn on_waiting(&self, remaining: Duration, poll_interval: Duration) {
        println!(
            "\n  {}",
            format!(
                "{}s remaining... (polling every {}s)",
                remaining.as_secs(),
                poll_interval.as_secs()
            )
            .muted()
        );
    }
}

/// Closing summary of a watch session, before styling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSummary {
    /// How the session ended
    pub headline: String,
    /// `healthy/total`; absent when nothing was watched
    pub healthy: Option<String>,
    /// Releases that ended failed or pending
    pub pending: Vec<String>,
}

impl WatchSummary {
    /// Summarize `report`
    pub fn from_report(report: &WatchReport) -> Self {
        let headline = match &report.outcome {
            WatchOutcome::NoApps => "No app names could be extracted from PRs".to_string(),
            WatchOutcome::NoReleases => "No matching HelmReleases found in cluster".to_string(),
            WatchOutcome::AllHealthy => format!("All {} HelmRelease(s) healthy!", report.total()),
            WatchOutcome::TimedOut { .. } => {
                format!("Timeout reached ({}s)", report.elapsed.as_secs())
            }
        };
        let watched = !matches!(report.outcome, WatchOutcome::NoApps | WatchOutcome::NoReleases);

        Self {
            headline,
            healthy: watched.then(|| format!("{}/{}", report.healthy_count(), report.total())),
            pending: report.unready().into_iter().map(str::to_string).collect(),
        }
    }
}

impl fmt::Display for WatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.headline)?;
        if let Some(ref healthy) = self.healthy {
            write!(f, "\nFinal Status:\n  {healthy} HelmReleases healthy")?;
        }
        if !self.pending.is_empty() {
            write!(f, "\n  Failed/Pending: {}", self.pending.join(", "))?;
        }
        Ok(())
    }
}

/// Print the final summary of a watch session
pub fn print_report(report: &WatchReport) {
    let summary = WatchSummary::from_report(report);

    match report.outcome {
        WatchOutcome::NoApps | WatchOutcome::NoReleases => {
            println!("{}", summary.headline.muted());
            return;
        }
        WatchOutcome::AllHealthy => {
            println!("\n{} {}", check(), summary.headline.success());
        }
        WatchOutcome::TimedOut { .. } => {
            println!("\n{}", summary.headline.warn().for_stdout());
        }
    }

    println!("\n{}", "=".repeat(70).muted());
    println!("{}", "Final Status:".emphasis());
    if let Some(ref healthy) = summary.healthy {
        println!("  {} HelmReleases healthy", healthy.accent());
    }
    if !summary.pending.is_empty() {
        println!(
            "  Failed/Pending: {}",
            summary.pending.join(", ").warn().for_stdout()
        );
    }
}

/// Watch `apps` until healthy or timed out, then print the summary
pub async fn run_watch(
    cluster: &dyn ClusterService,
    clock: &dyn Clock,
    config: &TriageConfig,
    apps: &[String],
) -> WatchReport {
    let observer = CliWatchObserver::new(config.timezone);
    let report = Watcher::from_config(cluster, clock, config)
        .run(apps, &observer)
        .await;
    print_report(&report);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcome: WatchOutcome, healthy: &[&str], pending: &[&str]) -> WatchReport {
        let mut releases = BTreeMap::new();
        for name in healthy {
            releases.insert(
                (*name).to_string(),
                WatchEntry {
                    namespace: "media".to_string(),
                    hr_ready: true,
                    pods_ready: true,
                },
            );
        }
        for name in pending {
            releases.insert((*name).to_string(), WatchEntry::new("media".to_string()));
        }
        WatchReport {
            outcome,
            releases,
            ticks: 3,
            elapsed: Duration::from_secs(600),
        }
    }

    #[test]
    fn test_summary_all_healthy() {
        let healthy = report(WatchOutcome::AllHealthy, &["radarr", "sonarr"], &[]);
        let summary = WatchSummary::from_report(&healthy);

        assert_eq!(summary.healthy.as_deref(), Some("2/2"));
        assert!(summary.pending.is_empty());
        assert_eq!(
            summary.to_string(),
            "All 2 HelmRelease(s) healthy!\nFinal Status:\n  2/2 HelmReleases healthy"
        );
    }

    #[test]
    fn test_summary_timeout_lists_pending() {
        let outcome = WatchOutcome::TimedOut {
            unready: vec!["radarr-uhd".to_string()],
        };
        let summary = WatchSummary::from_report(&report(outcome, &["radarr"], &["radarr-uhd"]));

        assert_eq!(summary.pending, vec!["radarr-uhd"]);
        assert_eq!(
            summary.to_string(),
            "Timeout reached (600s)\nFinal Status:\n  1/2 HelmReleases healthy\n  \
             Failed/Pending: radarr-uhd"
        );
    }

    #[test]
    fn test_summary_tells_nothing_to_watch_cases_apart() {
        let no_apps = WatchSummary::from_report(&report(WatchOutcome::NoApps, &[], &[]));
        assert_eq!(no_apps.to_string(), "No app names could be extracted from PRs");
        assert_eq!(no_apps.healthy, None);

        let no_releases = WatchSummary::from_report(&report(WatchOutcome::NoReleases, &[], &[]));
        assert_eq!(no_releases.to_string(), "No matching HelmReleases found in cluster");
    }
}

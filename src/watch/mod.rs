//! Post-merge reconciliation watching
//!
//! Finds the managed releases behind a set of app names and polls them,
//! with their pod-owning workloads, until all are healthy or the timeout
//! elapses. Best-effort: workloads are matched by name substring.

mod discovery;
mod watcher;

pub use discovery::{discover_releases, distinct_apps, match_releases, release_matches_app};
pub use watcher::{
    NoopObserver, ReleaseObservation, ReleaseTick, WatchEntry, WatchObserver, WatchOutcome,
    WatchReport, Watcher,
};

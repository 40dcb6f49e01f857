//! Release discovery for a set of app names

use crate::cluster::ClusterService;
use crate::types::ReleaseStatus;
use crate::watch::WatchEntry;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Whether `release` belongs to `app`: exact name or `<app>-` prefix,
/// ignoring case
pub fn release_matches_app(release: &str, app: &str) -> bool {
    let release = release.to_lowercase();
    let app = app.to_lowercase();
    release == app || release.starts_with(&format!("{app}-"))
}

/// Drop blanks and duplicates, keeping first-seen order
pub fn distinct_apps<S: AsRef<str>>(apps: &[S]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for app in apps {
        let app = app.as_ref().trim().to_lowercase();
        if !app.is_empty() && !seen.contains(&app) {
            seen.push(app);
        }
    }
    seen
}

/// Releases in `listing` matching any of `apps`, keyed by release name
pub fn match_releases(listing: &[ReleaseStatus], apps: &[String]) -> BTreeMap<String, WatchEntry> {
    listing
        .iter()
        .filter(|r| apps.iter().any(|app| release_matches_app(&r.name, app)))
        .map(|r| (r.name.clone(), WatchEntry::new(r.namespace.clone())))
        .collect()
}

/// Query the cluster once and build the watch set for `apps`.
///
/// A failed query yields an empty set.
pub async fn discover_releases(
    cluster: &dyn ClusterService,
    apps: &[String],
) -> BTreeMap<String, WatchEntry> {
    let listing = match cluster.list_managed_releases().await {
        Ok(listing) => listing,
        Err(e) => {
            warn!(error = %e, "release discovery failed");
            return BTreeMap::new();
        }
    };

    let found = match_releases(&listing, apps);
    debug!(apps = ?apps, releases = ?found.keys().collect::<Vec<_>>(), "discovered releases");
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_matches_app() {
        assert!(release_matches_app("radarr", "radarr"));
        assert!(release_matches_app("radarr-uhd", "radarr"));
        assert!(release_matches_app("Radarr-UHD", "radarr"));
        assert!(!release_matches_app("radarrx", "radarr"));
        assert!(!release_matches_app("my-radarr", "radarr"));
        assert!(!release_matches_app("radar", "radarr"));
    }

    #[test]
    fn test_distinct_apps() {
        let apps = distinct_apps(&["radarr", "Sonarr", "radarr", " ", "sonarr"]);
        assert_eq!(apps, vec!["radarr", "sonarr"]);
    }
}

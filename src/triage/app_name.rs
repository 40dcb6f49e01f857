//! App name extraction from conventional-commit PR titles

use regex::Regex;
use std::sync::OnceLock;

/// Scopes that name a manager rather than an app
const GENERIC_SCOPES: &[&str] = &["helm", "container", "github-action"];

fn scope_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\w+\(([^)]+)\):").expect("hardcoded scope regex is valid"))
}

fn chart_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"update chart (\S+)").expect("hardcoded chart regex is valid"))
}

fn image_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"/([^/:@\s]+)(?::|@|\s|$)").expect("hardcoded image regex is valid")
    })
}

/// Derive the app a PR deploys from its title.
///
/// - `fix(radarr): update image ghcr.io/onedr0p/radarr` → `radarr`
/// - `fix(container): update image ghcr.io/onedr0p/sonarr:1.2` → `sonarr`
/// - `fix(helm): update chart plane-ce` → `plane-ce`
///
/// Returns `None` when the title has no `type(scope):` prefix, or when the
/// scope is generic and neither a chart nor an image name can be found.
pub fn extract_app_name(title: &str) -> Option<String> {
    let scope = scope_regex().captures(title)?.get(1)?.as_str();

    if !GENERIC_SCOPES.contains(&scope) {
        return Some(scope.to_lowercase());
    }

    if let Some(chart) = chart_regex().captures(title).and_then(|c| c.get(1)) {
        return Some(chart.as_str().to_lowercase());
    }

    image_regex()
        .captures(title)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_is_app() {
        assert_eq!(
            extract_app_name("fix(radarr): update image ghcr.io/onedr0p/radarr").as_deref(),
            Some("radarr")
        );
        assert_eq!(
            extract_app_name("feat(Home-Assistant): update to 2025.1").as_deref(),
            Some("home-assistant")
        );
    }

    #[test]
    fn test_container_scope_uses_image() {
        assert_eq!(
            extract_app_name("fix(container): update image ghcr.io/onedr0p/sonarr:1.2").as_deref(),
            Some("sonarr")
        );
        assert_eq!(
            extract_app_name("fix(container): update image ghcr.io/org/Bazarr@sha256 to x")
                .as_deref(),
            Some("bazarr")
        );
        assert_eq!(
            extract_app_name("fix(container): update image ghcr.io/org/prowlarr").as_deref(),
            Some("prowlarr")
        );
    }

    #[test]
    fn test_helm_scope_uses_chart() {
        assert_eq!(
            extract_app_name("fix(helm): update chart plane-ce").as_deref(),
            Some("plane-ce")
        );
        assert_eq!(
            extract_app_name("feat(helm): update chart Cilium to 1.17.0").as_deref(),
            Some("cilium")
        );
    }

    #[test]
    fn test_generic_scope_without_target() {
        assert_eq!(extract_app_name("chore(github-action): update things"), None);
    }

    #[test]
    fn test_no_conventional_scope() {
        assert_eq!(extract_app_name("Update dependency foo to v2"), None);
        assert_eq!(extract_app_name("fix: update sonarr"), None);
    }
}

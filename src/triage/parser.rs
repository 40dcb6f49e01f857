//! Renovate PR body parsing

use crate::types::{Tier, Update};
use regex::Regex;
use std::sync::OnceLock;

/// Phrase Renovate puts above its update table
pub const UPDATE_TABLE_MARKER: &str = "This PR contains the following updates";

/// Matches rows like
/// `| [ghcr.io/dragonflydb/dragonfly](https://...) | minor | `v1.26.2` -> `v1.28.0` |`
/// or the same with a bare name in the first cell. Cells never span lines.
fn update_row_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\|[ \t]*(?:\[([^\]\n]*)\]\([^)\n]*\)|([^|\n]*?))[ \t]*\|[ \t]*((?i:major|minor|patch|digest))[ \t]*\|[ \t]*`([^`\n]*)`[ \t]*->[ \t]*`([^`\n]*)`[ \t]*\|",
        )
        .expect("hardcoded update row regex is valid")
    })
}

/// Extract the update rows of a Renovate PR body, in order of appearance.
///
/// Returns an empty list when the body does not carry the update-table
/// marker. Rows whose tier cell cannot be read are skipped.
pub fn parse_update_table(body: &str) -> Vec<Update> {
    if !body.contains(UPDATE_TABLE_MARKER) {
        return Vec::new();
    }

    update_row_regex()
        .captures_iter(body)
        .filter_map(|caps| {
            let name = caps
                .get(1)
                .filter(|m| !m.as_str().is_empty())
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            let tier = caps.get(3)?.as_str().trim().parse::<Tier>().ok()?;
            Some(Update {
                artifact_name: name.trim().to_string(),
                tier,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(rows: &[&str]) -> String {
        let mut out = format!(
            "{UPDATE_TABLE_MARKER}:\n\n| Package | Update | Change |\n|---|---|---|\n"
        );
        for row in rows {
            out.push_str(row);
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_linked_name() {
        let updates = parse_update_table(&body(&[
            "| [ghcr.io/dragonflydb/dragonfly](https://redirect.github.com/dragonflydb/dragonfly) | minor | `v1.26.2` -> `v1.28.0` |",
        ]));
        assert_eq!(
            updates,
            vec![Update {
                artifact_name: "ghcr.io/dragonflydb/dragonfly".to_string(),
                tier: Tier::Minor,
            }]
        );
    }

    #[test]
    fn test_bare_name() {
        let updates = parse_update_table(&body(&[
            "| ghcr.io/dragonflydb/dragonfly | patch | `v1.26.2` -> `v1.26.3` |",
        ]));
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].artifact_name, "ghcr.io/dragonflydb/dragonfly");
        assert_eq!(updates[0].tier, Tier::Patch);
    }

    #[test]
    fn test_tier_is_case_insensitive() {
        let updates = parse_update_table(&body(&["| foo | MAJOR | `1` -> `2` |"]));
        assert_eq!(updates[0].tier, Tier::Major);
    }

    #[test]
    fn test_multiple_rows_keep_order() {
        let updates = parse_update_table(&body(&[
            "| a | digest | `abc1234` -> `def5678` |",
            "| b | major | `1.0` -> `2.0` |",
        ]));
        let tiers: Vec<Tier> = updates.iter().map(|u| u.tier).collect();
        assert_eq!(tiers, vec![Tier::Digest, Tier::Major]);
        assert_eq!(updates[1].artifact_name, "b");
    }

    #[test]
    fn test_missing_marker_yields_nothing() {
        let text = "| foo | minor | `1.0` -> `1.1` |";
        assert!(parse_update_table(text).is_empty());
        assert!(parse_update_table("").is_empty());
    }

    #[test]
    fn test_marker_without_rows() {
        assert!(parse_update_table(&body(&[])).is_empty());
    }
}

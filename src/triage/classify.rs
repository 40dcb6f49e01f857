//! Risk-tier classification and the do-not-touch override

use crate::triage::parser::parse_update_table;
use crate::types::{Category, ChangeRequest, Tier};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Seven or more lower-case hex characters, i.e. a short commit/image SHA
fn digest_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[0-9a-f]{7,}\b").expect("hardcoded digest regex is valid"))
}

fn keyword_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(major|minor|patch)\b").expect("hardcoded keyword regex is valid")
    })
}

/// Classify a PR by update tier.
///
/// First match wins:
/// 1. tier of the first row of the Renovate update table in `body`
/// 2. `digest` if the title contains a short SHA
/// 3. `major`/`minor`/`patch` as a whole word in the title
/// 4. a `type/<tier>` label
/// 5. `unknown`
///
/// Never returns [`Category::DontTouch`]; see [`apply_dont_touch`].
pub fn classify(body: &str, title: &str, labels: &[String]) -> Category {
    if let Some(first) = parse_update_table(body).first() {
        debug!(title, tier = %first.tier, "classified from update table");
        return first.tier.into();
    }

    if digest_regex().is_match(title) {
        debug!(title, "classified as digest from title");
        return Category::Digest;
    }

    if let Some(tier) = keyword_regex()
        .captures(title)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<Tier>().ok())
    {
        debug!(title, %tier, "classified from title keyword");
        return tier.into();
    }

    for label in labels {
        let tier = match label.to_ascii_lowercase().as_str() {
            "type/digest" => Tier::Digest,
            "type/patch" => Tier::Patch,
            "type/minor" => Tier::Minor,
            "type/major" => Tier::Major,
            _ => continue,
        };
        debug!(title, %tier, "classified from label");
        return tier.into();
    }

    debug!(title, "no classification match");
    Category::Unknown
}

/// Case-insensitive substring match of `title` against the denylist
pub fn is_dont_touch<S: AsRef<str>>(title: &str, denylist: &[S]) -> bool {
    let normalized = title.to_lowercase();
    denylist
        .iter()
        .any(|skip| normalized.contains(&skip.as_ref().to_lowercase()))
}

/// Final say on a category: denylisted titles become `dont_touch`
pub fn apply_dont_touch<S: AsRef<str>>(
    category: Category,
    title: &str,
    denylist: &[S],
) -> Category {
    if is_dont_touch(title, denylist) {
        Category::DontTouch
    } else {
        category
    }
}

/// Classify a PR and apply the denylist, storing the result on the PR
pub fn categorize<S: AsRef<str>>(request: &mut ChangeRequest, denylist: &[S]) -> Category {
    let tier = classify(&request.body, &request.title, &request.labels);
    request.category = apply_dont_touch(tier, &request.title, denylist);
    request.category
}

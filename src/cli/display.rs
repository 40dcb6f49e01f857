//! Numbered PR listing

use crate::cli::style::{self, Stream, Stylize, category_header, pipe};
use anstream::println;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use renovate_triage::config::TriageConfig;
use renovate_triage::triage::TriageSnapshot;
use renovate_triage::types::ChangeRequest;

const TITLE_WIDTH: usize = 48;
const TITLE_KEEP: usize = 45;

/// `2025-Jan-07 03:04 PM` in `tz`, or `N/A`
pub fn format_timestamp(at: Option<DateTime<Utc>>, tz: Tz) -> String {
    at.map_or_else(
        || "N/A".to_string(),
        |t| t.with_timezone(&tz).format("%Y-%b-%d %I:%M %p").to_string(),
    )
}

/// Titles over 48 characters keep the first 45 plus `...`
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_WIDTH {
        format!("{}...", title.chars().take(TITLE_KEEP).collect::<String>())
    } else {
        title.to_string()
    }
}

/// One listing line before styling
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListingRow {
    index: usize,
    number: u64,
    url: String,
    title: String,
    timestamp: String,
    rebase_pending: bool,
}

impl ListingRow {
    fn new(index: usize, pr: &ChangeRequest, config: &TriageConfig) -> Self {
        Self {
            index,
            number: pr.number,
            url: config.platform.pr_url(pr.number),
            title: truncate_title(&pr.title),
            timestamp: format_timestamp(pr.updated_at, config.timezone),
            rebase_pending: pr.has_label(&config.rebase_label),
        }
    }

    /// `  1. PR #42: title │ 2025-Jan-07 03:04 PM [R]`
    fn plain(&self) -> String {
        let marker = if self.rebase_pending {
            format!(" {}", style::REBASE_MARKER)
        } else {
            String::new()
        };
        format!(
            "  {:3}. PR #{}: {:<width$} {} {}{marker}",
            self.index,
            self.number,
            self.title,
            style::PIPE,
            self.timestamp,
            width = TITLE_WIDTH,
        )
    }

    fn styled(&self) -> String {
        let number = format!("PR #{}", self.number);
        let link = style::hyperlink(Stream::Stdout, &number, &self.url);
        let marker = if self.rebase_pending {
            format!(" {}", style::REBASE_MARKER.warn().for_stdout())
        } else {
            String::new()
        };
        format!(
            "  {:3}. {}: {:<width$} {} {}{marker}",
            self.index,
            link.accent(),
            self.title,
            pipe(),
            self.timestamp.muted(),
            width = TITLE_WIDTH,
        )
    }
}

/// Print every category with its globally numbered PRs
pub fn print_listing(snapshot: &TriageSnapshot, config: &TriageConfig) {
    let mut entries = snapshot.numbered.entries().iter();

    for (category, prs) in snapshot.groups.iter() {
        println!(
            "\n{}{}",
            category_header(category),
            format!("UPDATES ({})", prs.len()).emphasis()
        );
        println!("{}", "-".repeat(70).muted());

        for entry in entries.by_ref().take(prs.len()) {
            println!("{}", ListingRow::new(entry.index, &entry.request, config).styled());
        }
    }
}

//! Classification and grouping of Renovate PRs
//!
//! Pipeline: parse body → classify → do-not-touch override → group →
//! number. Everything here is pure; a snapshot is rebuilt from scratch on
//! every refresh.

mod app_name;
mod classify;
mod group;
mod parser;

pub use app_name::extract_app_name;
pub use classify::{apply_dont_touch, categorize, classify, is_dont_touch};
pub use group::{CategoryGroups, NumberedEntry, NumberedList};
pub use parser::{UPDATE_TABLE_MARKER, parse_update_table};

use crate::types::ChangeRequest;

/// Grouped and numbered view of one fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriageSnapshot {
    /// PRs by category
    pub groups: CategoryGroups,
    /// Global numbering for operator selection
    pub numbered: NumberedList,
}

impl TriageSnapshot {
    /// Categorize every PR, then group and number them
    pub fn build<S: AsRef<str>>(requests: Vec<ChangeRequest>, denylist: &[S]) -> Self {
        let categorized = requests.into_iter().map(|mut request| {
            categorize(&mut request, denylist);
            request
        });
        let groups = CategoryGroups::from_requests(categorized);
        let numbered = NumberedList::number(&groups);
        Self { groups, numbered }
    }

    /// Whether the fetch returned nothing
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

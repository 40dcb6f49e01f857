//! Grouping and global numbering of classified PRs

use crate::types::{Category, ChangeRequest};
use std::collections::HashMap;

/// Classified PRs partitioned by category.
///
/// Within a category PRs keep the order they were fetched in. Iteration
/// always follows [`Category::DISPLAY_ORDER`] and skips empty categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryGroups {
    groups: HashMap<Category, Vec<ChangeRequest>>,
}

impl CategoryGroups {
    /// Partition already-categorized PRs
    pub fn from_requests(requests: impl IntoIterator<Item = ChangeRequest>) -> Self {
        let mut groups: HashMap<Category, Vec<ChangeRequest>> = HashMap::new();
        for request in requests {
            groups.entry(request.category).or_default().push(request);
        }
        Self { groups }
    }

    /// PRs in one category (empty slice if none)
    pub fn get(&self, category: Category) -> &[ChangeRequest] {
        self.groups.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Non-empty categories in display order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ChangeRequest])> {
        Category::DISPLAY_ORDER
            .into_iter()
            .map(|c| (c, self.get(c)))
            .filter(|(_, prs)| !prs.is_empty())
    }

    /// Categories that have at least one PR, in display order
    pub fn categories(&self) -> Vec<Category> {
        self.iter().map(|(c, _)| c).collect()
    }

    /// PRs across several categories, concatenated in the given order
    pub fn collect(&self, categories: &[Category]) -> Vec<ChangeRequest> {
        categories
            .iter()
            .flat_map(|c| self.get(*c).iter().cloned())
            .collect()
    }

    /// Total number of PRs
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Whether there are no PRs at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A PR with the index the operator selects it by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedEntry {
    /// 1-based index, global across categories
    pub index: usize,
    /// The PR (with its category)
    pub request: ChangeRequest,
}

/// Lookup table from listing index to PR
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberedList {
    entries: Vec<NumberedEntry>,
}

impl NumberedList {
    /// Assign indices `1..=N` walking categories in display order
    pub fn number(groups: &CategoryGroups) -> Self {
        let entries = groups
            .iter()
            .flat_map(|(_, prs)| prs.iter())
            .enumerate()
            .map(|(i, request)| NumberedEntry {
                index: i + 1,
                request: request.clone(),
            })
            .collect();
        Self { entries }
    }

    /// Entry for an index
    pub fn get(&self, index: usize) -> Option<&NumberedEntry> {
        index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .filter(|e| e.index == index)
    }

    /// All entries in index order
    pub fn entries(&self) -> &[NumberedEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Operator selection grammar for the rebase and merge menus
//!
//! ```text
//! selection := <index> | <shorthand> | "a" | "b"
//! index     := [0-9]+            one listed PR, any category
//! shorthand := "d" | "p" | "n"   digest / patch / minor
//!            | "j"               major (rebase menu only)
//! ```

use crate::error::{Error, Result};
use crate::triage::TriageSnapshot;
use crate::types::{Category, ChangeRequest};

/// Top-level menu action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// `r`: open the rebase menu
    Rebase,
    /// `m`: open the merge menu
    Merge,
    /// `s`: refetch and relist PRs
    Refresh,
    /// `q`: leave
    Quit,
}

impl MenuAction {
    /// Every action with its key, in menu order
    pub const ALL: [(char, Self); 4] = [
        ('r', Self::Rebase),
        ('m', Self::Merge),
        ('s', Self::Refresh),
        ('q', Self::Quit),
    ];

    /// Parse a top-level menu key
    pub fn parse(input: &str) -> Result<Self> {
        let choice = input.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|(key, _)| choice.len() == 1 && choice.starts_with(*key))
            .map(|(_, action)| *action)
            .ok_or_else(|| Error::InvalidSelection("Invalid choice".to_string()))
    }

    /// Menu label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rebase => "Rebase PRs",
            Self::Merge => "Merge PRs",
            Self::Refresh => "Check rebase status (refresh)",
            Self::Quit => "Quit",
        }
    }
}

/// Which submenu the input was typed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// Label PRs for rebase
    Rebase,
    /// Merge PRs
    Merge,
}

impl MenuKind {
    /// Per-category shorthand keys accepted by this menu
    pub const fn shorthands(self) -> &'static [(char, Category)] {
        match self {
            Self::Rebase => &[
                ('d', Category::Digest),
                ('p', Category::Patch),
                ('n', Category::Minor),
                ('j', Category::Major),
            ],
            Self::Merge => &[
                ('d', Category::Digest),
                ('p', Category::Patch),
                ('n', Category::Minor),
            ],
        }
    }

    /// Categories covered by the "all" shorthand, in batch order
    pub const fn all_categories(self) -> &'static [Category] {
        match self {
            Self::Rebase => &[
                Category::Digest,
                Category::Patch,
                Category::Minor,
                Category::Major,
                Category::Unknown,
            ],
            Self::Merge => &[Category::Digest, Category::Patch, Category::Minor],
        }
    }
}

/// A parsed submenu choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// One PR by its listing index
    Index(usize),
    /// Every PR in one category
    Category(Category),
    /// Every PR in the menu's "all" categories
    All,
    /// Return to the top-level menu
    Back,
}

impl Selection {
    /// Parse operator input for `menu`
    pub fn parse(input: &str, menu: MenuKind) -> Result<Self> {
        let choice = input.trim().to_lowercase();

        if !choice.is_empty() && choice.chars().all(|c| c.is_ascii_digit()) {
            return choice
                .parse()
                .map(Self::Index)
                .map_err(|_| Error::InvalidSelection(format!("Invalid PR number: {choice}")));
        }

        let mut chars = choice.chars();
        let key = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(Error::InvalidSelection("Invalid choice".to_string())),
        };

        match key {
            'b' => Ok(Self::Back),
            'a' => Ok(Self::All),
            _ => menu
                .shorthands()
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, category)| Self::Category(*category))
                .ok_or_else(|| Error::InvalidSelection("Invalid choice".to_string())),
        }
    }

    /// PRs this selection refers to in `snapshot`.
    ///
    /// `Back` and empty categories resolve to an empty batch; an index
    /// that is not listed is an error.
    pub fn resolve(self, menu: MenuKind, snapshot: &TriageSnapshot) -> Result<Vec<ChangeRequest>> {
        match self {
            Self::Index(index) => snapshot
                .numbered
                .get(index)
                .map(|entry| vec![entry.request.clone()])
                .ok_or_else(|| Error::InvalidSelection(format!("Invalid PR number: {index}"))),
            Self::Category(category) => Ok(snapshot.groups.get(category).to_vec()),
            Self::All => Ok(snapshot.groups.collect(menu.all_categories())),
            Self::Back => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_action_parse() {
        assert_eq!(MenuAction::parse("r").unwrap(), MenuAction::Rebase);
        assert_eq!(MenuAction::parse(" M ").unwrap(), MenuAction::Merge);
        assert_eq!(MenuAction::parse("s").unwrap(), MenuAction::Refresh);
        assert_eq!(MenuAction::parse("q").unwrap(), MenuAction::Quit);
        assert!(MenuAction::parse("quit").is_err());
        assert!(MenuAction::parse("").is_err());
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(
            Selection::parse(" 12 ", MenuKind::Merge).unwrap(),
            Selection::Index(12)
        );
    }

    #[test]
    fn test_parse_shorthands_are_case_insensitive() {
        assert_eq!(
            Selection::parse("D", MenuKind::Rebase).unwrap(),
            Selection::Category(Category::Digest)
        );
        assert_eq!(
            Selection::parse("n", MenuKind::Merge).unwrap(),
            Selection::Category(Category::Minor)
        );
        assert_eq!(Selection::parse("A", MenuKind::Merge).unwrap(), Selection::All);
        assert_eq!(Selection::parse("b", MenuKind::Rebase).unwrap(), Selection::Back);
    }

    #[test]
    fn test_major_shorthand_only_in_rebase_menu() {
        assert_eq!(
            Selection::parse("j", MenuKind::Rebase).unwrap(),
            Selection::Category(Category::Major)
        );
        assert!(matches!(
            Selection::parse("j", MenuKind::Merge),
            Err(Error::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "x", "dd", "1a", "-1"] {
            assert!(
                Selection::parse(input, MenuKind::Rebase).is_err(),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_overflowing_index() {
        let err = Selection::parse("99999999999999999999999", MenuKind::Merge).unwrap_err();
        assert!(err.to_string().starts_with("Invalid PR number"));
    }

    #[test]
    fn test_all_never_includes_dont_touch() {
        for menu in [MenuKind::Rebase, MenuKind::Merge] {
            assert!(!menu.all_categories().contains(&Category::DontTouch));
        }
        assert!(!MenuKind::Merge.all_categories().contains(&Category::Major));
    }
}

use std::fmt;

use serde_yaml::Value;

/// What a merge did to a single top-level key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeAction {
    Added,
    Updated,
    Removed,
    Unchanged,
}

impl ChangeAction {
    /// One-character marker used in change listings.
    pub fn marker(&self) -> char {
        match self {
            Self::Added => '+',
            Self::Updated => '~',
            Self::Removed => '-',
            Self::Unchanged => '=',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Updated => "updated",
            Self::Removed => "removed",
            Self::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single entry of a [`ChangeRecord`].
///
/// `value` is the value the entry is about: the new value for additions and
/// updates, the discarded value for removals, the kept value otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct Change {
    pub action: ChangeAction,
    pub key: String,
    pub value: Value,
}

/// Ordered log of what a merge did. Used only for reporting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangeRecord {
    pub changes: Vec<Change>,
}

impl ChangeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: ChangeAction, key: impl Into<String>, value: Value) {
        self.changes.push(Change {
            action,
            key: key.into(),
            value,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.changes.iter()
    }

    /// Number of entries with the given action.
    pub fn count(&self, action: ChangeAction) -> usize {
        self.changes.iter().filter(|c| c.action == action).count()
    }

    pub fn additions(&self) -> usize {
        self.count(ChangeAction::Added)
    }

    pub fn updates(&self) -> usize {
        self.count(ChangeAction::Updated)
    }

    pub fn removals(&self) -> usize {
        self.count(ChangeAction::Removed)
    }

    /// Returns `true` if any entry reports an actual change.
    pub fn has_changes(&self) -> bool {
        self.changes.iter().any(|c| c.action != ChangeAction::Unchanged)
    }
}

impl<'a> IntoIterator for &'a ChangeRecord {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

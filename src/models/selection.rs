//! Selection sets with tri-state category semantics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Display state of a category checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckState {
    /// No leaf of the group is selected (or the group is empty)
    Unchecked,
    /// Some but not all leaves are selected
    Partial,
    /// Every leaf of a non-empty group is selected
    Checked,
}

/// Selected leaf values for one filter dimension.
///
/// An empty set means "no restriction" to the filter engine, never
/// "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    values: BTreeSet<String>,
}

impl SelectionSet {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `leaf` if absent, removes it otherwise.
    ///
    /// Returns true if the leaf is selected after the call.
    pub fn toggle(&mut self, leaf: &str) -> bool {
        if self.values.remove(leaf) {
            false
        } else {
            self.values.insert(leaf.to_string());
            true
        }
    }

    /// Toggles a whole category.
    ///
    /// A fully selected group is emptied; anything else (including a
    /// partially selected group) becomes fully selected.
    pub fn toggle_category<S: AsRef<str>>(&mut self, leaves: &[S]) -> CheckState {
        if self.is_fully_selected(leaves) {
            for leaf in leaves {
                self.values.remove(leaf.as_ref());
            }
        } else {
            self.values
                .extend(leaves.iter().map(|l| l.as_ref().to_string()));
        }
        self.check_state(leaves)
    }

    /// True iff `leaves` is non-empty and every member is selected.
    #[must_use]
    pub fn is_fully_selected<S: AsRef<str>>(&self, leaves: &[S]) -> bool {
        !leaves.is_empty() && leaves.iter().all(|l| self.values.contains(l.as_ref()))
    }

    /// True iff at least one member is selected but not all of them.
    #[must_use]
    pub fn is_partially_selected<S: AsRef<str>>(&self, leaves: &[S]) -> bool {
        leaves.iter().any(|l| self.values.contains(l.as_ref())) && !self.is_fully_selected(leaves)
    }

    /// Tri-state checkbox value for a group of leaves.
    #[must_use]
    pub fn check_state<S: AsRef<str>>(&self, leaves: &[S]) -> CheckState {
        if self.is_fully_selected(leaves) {
            CheckState::Checked
        } else if self.is_partially_selected(leaves) {
            CheckState::Partial
        } else {
            CheckState::Unchecked
        }
    }

    /// Adds a single leaf.
    pub fn insert(&mut self, leaf: &str) -> bool {
        self.values.insert(leaf.to_string())
    }

    /// Removes a single leaf. Returns true if it was selected.
    pub fn remove(&mut self, leaf: &str) -> bool {
        self.values.remove(leaf)
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Replaces the selection with exactly `all_leaves`.
    pub fn select_all<S: AsRef<str>>(&mut self, all_leaves: &[S]) {
        self.values = all_leaves.iter().map(|l| l.as_ref().to_string()).collect();
    }

    /// Returns true if `leaf` is selected.
    #[must_use]
    pub fn contains(&self, leaf: &str) -> bool {
        self.values.contains(leaf)
    }

    /// Number of selected leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Selected leaves in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Filter predicate: empty selections match every value.
    #[must_use]
    pub fn admits(&self, value: &str) -> bool {
        self.values.is_empty() || self.values.contains(value)
    }
}

impl<S: AsRef<str>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }
}

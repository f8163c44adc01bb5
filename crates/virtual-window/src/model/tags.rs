//! Tag table: named markers on row indices.
//!
//! Tags are the only state a display keeps about rows (selection, focus,
//! anything else an application wants to mark). They are keyed by row index
//! at the moment they are read or written; a sort rewrites them through row
//! identity, so callers must re-read tagged indices after a sort instead of
//! holding on to indices across it.

use std::collections::btree_set;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

/// Tag marking a selected row.
pub const TAG_SELECTED: &str = "selected";

/// Tag marking the focus anchor. At most one row carries it.
pub const TAG_CURRENT: &str = "current";

/// Mapping from tag name to the ascending set of tagged row indices.
#[derive(Debug, Clone, Default)]
pub struct TagTable {
    by_name: BTreeMap<String, BTreeSet<usize>>,
}

impl TagTable {
    /// Creates an empty tag table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags `index` with `name`. Returns `true` if the tag was newly added.
    ///
    /// Setting [`TAG_CURRENT`] moves it: any other index loses it.
    pub fn set(&mut self, index: usize, name: &str) -> bool {
        let indices = self.by_name.entry(name.to_string()).or_default();
        if name == TAG_CURRENT && !indices.contains(&index) {
            indices.clear();
        }
        indices.insert(index)
    }

    /// Removes `name` from `index`. Returns `true` if it was present.
    pub fn remove(&mut self, index: usize, name: &str) -> bool {
        let Some(indices) = self.by_name.get_mut(name) else {
            return false;
        };
        let removed = indices.remove(&index);
        if indices.is_empty() {
            self.by_name.remove(name);
        }
        removed
    }

    /// Returns `true` if `index` carries `name`.
    pub fn has(&self, index: usize, name: &str) -> bool {
        self.by_name
            .get(name)
            .is_some_and(|indices| indices.contains(&index))
    }

    /// Iterates the indices tagged `name` in ascending order.
    ///
    /// The iterator reads the table lazily and never mutates it; calling this
    /// again starts a fresh scan of the current state.
    pub fn tagged(&self, name: &str) -> TaggedItems<'_> {
        TaggedItems {
            inner: self.by_name.get(name).map(|indices| indices.iter()),
        }
    }

    /// Number of indices tagged `name`.
    pub fn count(&self, name: &str) -> usize {
        self.by_name.get(name).map_or(0, BTreeSet::len)
    }

    /// All tag names carried by `index`, in name order.
    pub fn tags_at(&self, index: usize) -> Vec<&str> {
        self.by_name
            .iter()
            .filter(|(_, indices)| indices.contains(&index))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Removes `name` from every index, returning the indices that had it.
    pub fn clear_tag(&mut self, name: &str) -> Vec<usize> {
        self.by_name
            .remove(name)
            .map(|indices| indices.into_iter().collect())
            .unwrap_or_default()
    }

    /// Removes every tag.
    pub fn clear(&mut self) {
        self.by_name.clear();
    }

    /// Returns `true` if no row carries any tag.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Empties the table into a map from row identity to tag names.
    ///
    /// `identify` resolves an index to its row identity; tags on indices it
    /// cannot resolve are dropped.
    pub(crate) fn detach<K, F>(&mut self, identify: F) -> HashMap<K, Vec<String>>
    where
        K: Eq + Hash,
        F: Fn(usize) -> Option<K>,
    {
        let mut carried: HashMap<K, Vec<String>> = HashMap::new();
        for (name, indices) in std::mem::take(&mut self.by_name) {
            for index in indices {
                if let Some(key) = identify(index) {
                    carried.entry(key).or_default().push(name.clone());
                }
            }
        }
        carried
    }

    /// Re-applies detached tag names at a row's new index.
    pub(crate) fn attach(&mut self, index: usize, names: Vec<String>) {
        for name in names {
            self.by_name.entry(name).or_default().insert(index);
        }
    }
}

/// Ascending iterator over the indices carrying one tag.
///
/// Created by [`TagTable::tagged`].
#[derive(Debug, Clone)]
pub struct TaggedItems<'a> {
    inner: Option<btree_set::Iter<'a, usize>>,
}

impl Iterator for TaggedItems<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.inner.as_mut()?.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner
            .as_ref()
            .map_or((0, Some(0)), Iterator::size_hint)
    }
}

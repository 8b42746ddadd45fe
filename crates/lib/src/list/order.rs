//! Insertion-order index for [`PropertyList`](super::PropertyList).

use indexmap::IndexSet;

/// Set of unique names kept in first-insertion order.
///
/// Only the owning list mutates this, in lockstep with its value map.
#[derive(Debug, Clone, Default)]
pub(crate) struct OrderIndex {
    names: IndexSet<String>,
}

impl OrderIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Appends `name` to the tail unless it is already indexed.
    pub(crate) fn push_back(&mut self, name: &str) {
        if !self.names.contains(name) {
            self.names.insert(name.to_string());
        }
    }

    /// Removes `name`, returning whether it was indexed.
    pub(crate) fn remove(&mut self, name: &str) -> bool {
        self.names.shift_remove(name)
    }

    /// Relocates `name` to the tail, returning whether it was indexed.
    pub(crate) fn move_to_end(&mut self, name: &str) -> bool {
        match self.names.get_index_of(name) {
            Some(index) => {
                let last = self.names.len() - 1;
                self.names.move_index(index, last);
                true
            }
            None => false,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Owned copy of the current order.
    pub(crate) fn snapshot(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

// IndexSet equality ignores order; two indexes are equal only in the same order.
impl PartialEq for OrderIndex {
    fn eq(&self, other: &Self) -> bool {
        self.names.iter().eq(other.names.iter())
    }
}

impl Eq for OrderIndex {}

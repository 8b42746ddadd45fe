//! Per-name comments for [`PropertyList`](super::PropertyList).

use std::collections::HashMap;

/// Map from name to comment.
///
/// A missing key means "no comment", which is distinct from an empty comment.
/// The owning list keeps the key set within its order index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CommentTable {
    comments: HashMap<String, String>,
}

impl CommentTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.comments.get(name).map(String::as_str)
    }

    pub(crate) fn set(&mut self, name: &str, comment: String) {
        self.comments.insert(name.to_string(), comment);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<String> {
        self.comments.remove(name)
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.comments.keys().map(String::as_str)
    }
}

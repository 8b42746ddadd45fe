//! Formatter contract.
//!
//! External serializers (FITS card writers, table dumpers, ...) read a
//! [`PropertyList`](super::PropertyList) by walking its entries in order. They
//! either iterate [`PropertyList::iter`](super::PropertyList::iter) directly or
//! implement [`HeaderVisitor`] and hand it to
//! [`PropertyList::accept`](super::PropertyList::accept).

use crate::Value;

/// Borrowed view of one list entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<'a> {
    pub name: &'a str,
    /// All values, in the order they were added. Never empty.
    pub values: &'a [Value],
    pub comment: Option<&'a str>,
}

impl<'a> Entry<'a> {
    /// The value a plain `get` would return
    pub fn last(&self) -> Option<&'a Value> {
        self.values.last()
    }

    /// Returns true if the entry holds more than one value
    pub fn is_array(&self) -> bool {
        self.values.len() > 1
    }
}

/// Receives the entries of a list in order.
///
/// Returning an error stops the walk; the error is passed back to the caller
/// of [`PropertyList::accept`](super::PropertyList::accept).
pub trait HeaderVisitor {
    type Error;

    fn visit_entry(&mut self, entry: Entry<'_>) -> Result<(), Self::Error>;
}

impl<F, E> HeaderVisitor for F
where
    F: FnMut(Entry<'_>) -> Result<(), E>,
{
    type Error = E;

    fn visit_entry(&mut self, entry: Entry<'_>) -> Result<(), E> {
        self(entry)
    }
}

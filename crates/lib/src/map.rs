//! Container contracts.
//!
//! [`PropertySource`] is the read-only view that [`PropertyList::copy`] and
//! [`PropertyList::combine`] consume. [`ValueMap`] extends it with the
//! mutations a backing store for typed value sequences must support.
//!
//! [`PropertyList::copy`]: crate::PropertyList::copy
//! [`PropertyList::combine`]: crate::PropertyList::combine

use std::collections::HashMap;

use crate::{
    Error, Result,
    value::{Value, ValueType, common_type},
};

/// Read access to a container of named value sequences.
pub trait PropertySource {
    /// Returns true if `name` holds at least one value.
    fn exists(&self, name: &str) -> bool;

    /// Returns every value stored under `name`, in insertion order.
    fn values(&self, name: &str) -> Result<&[Value]>;

    /// Returns the top-level names in this container's natural order.
    ///
    /// Order-preserving containers return insertion order; others return a
    /// stable order such as lexical.
    fn source_names(&self) -> Vec<String>;

    /// Returns the comment attached to `name`, for containers that keep comments.
    fn source_comment(&self, _name: &str) -> Option<&str> {
        None
    }
}

/// A mutable, type-erased map from names to homogeneous value sequences.
pub trait ValueMap: PropertySource {
    /// Returns the type tag shared by the values under `name`.
    fn type_of(&self, name: &str) -> Result<ValueType> {
        self.values(name)?
            .first()
            .map(Value::value_type)
            .ok_or_else(|| Error::not_found(name))
    }

    /// Returns how many values are stored under `name`.
    fn value_count(&self, name: &str) -> Result<usize> {
        Ok(self.values(name)?.len())
    }

    /// Replaces the whole sequence under `name`, creating it if needed.
    fn replace_values(&mut self, name: &str, values: Vec<Value>) -> Result<()>;

    /// Appends one value under `name`, creating it if needed.
    ///
    /// Fails with [`Error::TypeMismatch`] if `value` differs in type from the
    /// values already stored.
    fn append_value(&mut self, name: &str, value: Value) -> Result<()>;

    /// Removes `name` and returns its values, if it was present.
    fn remove_values(&mut self, name: &str) -> Option<Vec<Value>>;
}

/// Flat backing map used by [`PropertyList`](crate::PropertyList).
///
/// Names are opaque here: `A.B` is a single key, not a path.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct FlatMap {
    entries: HashMap<String, Vec<Value>>,
}

impl FlatMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

impl PropertySource for FlatMap {
    fn exists(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn values(&self, name: &str) -> Result<&[Value]> {
        self.entries
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::not_found(name))
    }

    fn source_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }
}

impl ValueMap for FlatMap {
    fn replace_values(&mut self, name: &str, values: Vec<Value>) -> Result<()> {
        if values.is_empty() {
            return Err(Error::invalid(format!("no values given for {name}")));
        }
        common_type(&values).map_err(|e| e.for_name(name))?;
        self.entries.insert(name.to_string(), values);
        Ok(())
    }

    fn append_value(&mut self, name: &str, value: Value) -> Result<()> {
        match self.entries.get_mut(name) {
            Some(existing) => {
                if let Some(expected) = existing.first().map(Value::value_type)
                    && expected != value.value_type()
                {
                    return Err(Error::TypeMismatch {
                        name: name.to_string(),
                        expected,
                        actual: value.value_type(),
                    });
                }
                existing.push(value);
            }
            None => {
                self.entries.insert(name.to_string(), vec![value]);
            }
        }
        Ok(())
    }

    fn remove_values(&mut self, name: &str) -> Option<Vec<Value>> {
        self.entries.remove(name)
    }
}

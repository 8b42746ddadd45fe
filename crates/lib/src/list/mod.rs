//! Ordered, annotated property lists.
//!
//! [`PropertyList`] is the header-shaped container: every entry is a flat
//! name, a non-empty sequence of same-typed values and an optional comment,
//! and entries are enumerated in the order their names first appeared.
//!
//! Three structures back a list and change together on every mutation:
//!
//! - a flat value map (name → values),
//! - the order index (names in first-insertion order),
//! - the comment table (name → comment, keys always indexed).
//!
//! Mutations validate everything first and only then touch the three
//! structures, so a failed call leaves the list unchanged.
//!
//! # Examples
//!
//! ```
//! use headerlist::{PropertyList, PropertySet};
//!
//! let mut header = PropertyList::new();
//! header.set("NAXIS", 2)?;
//! header.set_with_comment("EXPTIME", 30.0, "exposure seconds")?;
//!
//! // Re-setting keeps the first position
//! header.set("NAXIS", 3)?;
//! assert_eq!(header.ordered_names(), vec!["NAXIS", "EXPTIME"]);
//!
//! // Nested sets are flattened into dotted names when merged in
//! let mut telescope = PropertySet::new();
//! telescope.set("ALT", 45.5)?;
//! let mut source = PropertySet::new();
//! source.set("TEL", telescope)?;
//! header.combine(&source)?;
//! assert!(header.exists("TEL.ALT"));
//! # Ok::<(), headerlist::Error>(())
//! ```

use std::fmt;

use crate::{
    Error, Result,
    errors::ValueTypeError,
    map::{FlatMap, PropertySource, ValueMap},
    path::validate_name,
    render::{self, RenderOptions},
    value::{Value, ValueType},
};

mod cards;
mod comments;
mod flatten;
mod order;
mod visit;


use comments::CommentTable;
use flatten::FlatEntry;
use order::OrderIndex;

pub use visit::{Entry, HeaderVisitor};

/// How an incoming entry meets an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Replace the whole value sequence
    Replace,
    /// Append to the value sequence; types must agree
    Append,
}

/// An ordered map from flat names to typed value sequences with optional comments.
///
/// Cloning a list (or calling [`deep_copy`](Self::deep_copy)) duplicates all
/// storage; two lists never share mutable state.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(into = "cards::Cards", try_from = "cards::Cards")]
pub struct PropertyList {
    values: FlatMap,
    order: OrderIndex,
    comments: CommentTable,
}

impl PropertyList {
    /// Creates a new empty list
    pub fn new() -> Self {
        Self {
            values: FlatMap::new(),
            order: OrderIndex::new(),
            comments: CommentTable::new(),
        }
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the list has no entries
    pub fn is_empty(&self) -> bool {
        self.order.len() == 0
    }

    /// Returns true if `name` is an entry of this list
    pub fn exists(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    // ===== READS =====

    /// Returns every value of `name` in the order it was added
    pub fn values(&self, name: &str) -> Result<&[Value]> {
        self.values.values(name)
    }

    /// Returns the last value added for `name`, converted to `T`
    ///
    /// # Errors
    /// [`Error::NotFound`] if the name is absent, [`Error::TypeMismatch`] if the
    /// stored type is not `T`.
    pub fn get<'a, T>(&'a self, name: &str) -> Result<T>
    where
        T: TryFrom<&'a Value, Error = ValueTypeError>,
    {
        let last = self
            .values
            .values(name)?
            .last()
            .ok_or_else(|| Error::not_found(name))?;
        T::try_from(last).map_err(|e| e.for_name(name))
    }

    /// Like [`get`](Self::get), but returns `default` when `name` is absent
    ///
    /// A type mismatch is still an error.
    pub fn get_or<'a, T>(&'a self, name: &str, default: T) -> Result<T>
    where
        T: TryFrom<&'a Value, Error = ValueTypeError>,
    {
        match self.get(name) {
            Err(Error::NotFound { .. }) => Ok(default),
            other => other,
        }
    }

    /// Returns all values of `name`, converted to `T`, in the order they were added
    pub fn get_array<'a, T>(&'a self, name: &str) -> Result<Vec<T>>
    where
        T: TryFrom<&'a Value, Error = ValueTypeError>,
    {
        self.values
            .values(name)?
            .iter()
            .map(|value| T::try_from(value).map_err(|e| e.for_name(name)))
            .collect()
    }

    /// Returns the comment attached to `name`
    ///
    /// `Ok(None)` means the entry exists but has no comment, which is not the
    /// same as `Ok(Some(""))`.
    pub fn comment(&self, name: &str) -> Result<Option<&str>> {
        if !self.exists(name) {
            return Err(Error::not_found(name));
        }
        Ok(self.comments.get(name))
    }

    /// Returns a snapshot of all names in order
    pub fn ordered_names(&self) -> Vec<String> {
        self.order.snapshot()
    }

    /// Iterates over the entries in order
    pub fn iter(&self) -> impl Iterator<Item = Entry<'_>> {
        self.order.iter().filter_map(move |name| {
            let values = self.values.values(name).ok()?;
            Some(Entry {
                name,
                values,
                comment: self.comments.get(name),
            })
        })
    }

    /// Walks the entries in order, stopping at the first visitor error
    pub fn accept<V>(&self, visitor: &mut V) -> Result<(), V::Error>
    where
        V: HeaderVisitor + ?Sized,
    {
        for entry in self.iter() {
            visitor.visit_entry(entry)?;
        }
        Ok(())
    }

    /// Returns the type shared by the values of `name`
    pub fn type_of(&self, name: &str) -> Result<ValueType> {
        self.values.type_of(name)
    }

    /// Returns how many values `name` holds
    pub fn value_count(&self, name: &str) -> Result<usize> {
        self.values.value_count(name)
    }

    /// Returns true if `name` holds more than one value
    pub fn is_array(&self, name: &str) -> Result<bool> {
        Ok(self.value_count(name)? > 1)
    }

    /// Reads the last value of `name` as a boolean
    pub fn get_as_bool(&self, name: &str) -> Result<bool> {
        self.coerce(name, Value::as_bool)
    }

    /// Reads the last value of `name` as an `i32`, widening booleans
    pub fn get_as_int(&self, name: &str) -> Result<i32> {
        self.coerce(name, Value::as_int)
    }

    /// Reads the last value of `name` as an `i64`, widening smaller integers
    pub fn get_as_long(&self, name: &str) -> Result<i64> {
        self.coerce(name, Value::as_long)
    }

    /// Reads the last value of `name` as an `f64` from any numeric type
    pub fn get_as_double(&self, name: &str) -> Result<f64> {
        self.coerce(name, Value::as_double)
    }

    /// Reads the last value of `name` as text
    pub fn get_as_string(&self, name: &str) -> Result<String> {
        self.coerce(name, |v| v.as_text().map(str::to_string))
    }

    fn coerce<T>(&self, name: &str, f: impl Fn(&Value) -> Result<T, ValueTypeError>) -> Result<T> {
        let last = self
            .values
            .values(name)?
            .last()
            .ok_or_else(|| Error::not_found(name))?;
        f(last).map_err(|e| e.for_name(name))
    }

    // ===== MUTATIONS =====

    /// Replaces all values of `name` with `value`
    ///
    /// A new name goes to the end of the order; an existing name keeps its
    /// position and its comment.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.install(name, vec![value.into()], None, Mode::Replace)
    }

    /// Replaces all values of `name` with `value` and replaces its comment
    pub fn set_with_comment(
        &mut self,
        name: &str,
        value: impl Into<Value>,
        comment: impl Into<String>,
    ) -> Result<()> {
        self.install(name, vec![value.into()], Some(comment.into()), Mode::Replace)
    }

    /// Replaces all values of `name` with the given sequence
    pub fn set_array<I>(&mut self, name: &str, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.install(name, collect(values), None, Mode::Replace)
    }

    /// Replaces all values of `name` with the given sequence and replaces its comment
    pub fn set_array_with_comment<I>(
        &mut self,
        name: &str,
        values: I,
        comment: impl Into<String>,
    ) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.install(name, collect(values), Some(comment.into()), Mode::Replace)
    }

    /// Appends `value` to `name`, creating the entry at the end if needed
    ///
    /// # Errors
    /// [`Error::TypeMismatch`] if `name` already holds values of another type.
    pub fn add(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.install(name, vec![value.into()], None, Mode::Append)
    }

    /// Appends `value` to `name` and replaces its comment
    pub fn add_with_comment(
        &mut self,
        name: &str,
        value: impl Into<Value>,
        comment: impl Into<String>,
    ) -> Result<()> {
        self.install(name, vec![value.into()], Some(comment.into()), Mode::Append)
    }

    /// Appends every value of the sequence to `name`
    pub fn add_array<I>(&mut self, name: &str, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.install(name, collect(values), None, Mode::Append)
    }

    /// Appends every value of the sequence to `name` and replaces its comment
    pub fn add_array_with_comment<I>(
        &mut self,
        name: &str,
        values: I,
        comment: impl Into<String>,
    ) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.install(name, collect(values), Some(comment.into()), Mode::Append)
    }

    /// Attaches or replaces the comment of an existing entry
    ///
    /// Neither the values nor the position of `name` change.
    pub fn set_comment(&mut self, name: &str, comment: impl Into<String>) -> Result<()> {
        if !self.exists(name) {
            return Err(Error::not_found(name));
        }
        self.comments.set(name, comment.into());
        Ok(())
    }

    /// Moves an existing entry to the end of the order
    pub fn move_to_end(&mut self, name: &str) -> Result<()> {
        if !self.order.move_to_end(name) {
            return Err(Error::not_found(name));
        }
        tracing::trace!(name, "Moved entry to end");
        Ok(())
    }

    /// Removes `name` together with its position and comment
    ///
    /// Returns the removed values.
    ///
    /// # Errors
    /// [`Error::NotFound`] if `name` is not an entry.
    pub fn remove(&mut self, name: &str) -> Result<Vec<Value>> {
        let values = self
            .values
            .remove_values(name)
            .ok_or_else(|| Error::not_found(name))?;
        self.order.remove(name);
        self.comments.remove(name);
        tracing::debug!(name, count = values.len(), "Removed entry");
        debug_assert!(self.is_consistent());
        Ok(values)
    }

    /// Copies `name` from `source` into this list as `dest`, replacing any values
    ///
    /// The source's comment for `name` comes along when the source keeps
    /// comments. A nested set under `name` is flattened into `dest.*` entries.
    ///
    /// # Errors
    /// [`Error::NotFound`] if `source` has no `name`.
    pub fn copy<S>(&mut self, dest: &str, source: &S, name: &str) -> Result<()>
    where
        S: PropertySource + ?Sized,
    {
        validate_name(dest)?;
        let values = source.values(name)?.to_vec();
        let comment = source.source_comment(name).map(str::to_string);
        tracing::debug!(dest, name, "Copying entry");
        self.install(dest, values, comment, Mode::Replace)
    }

    /// Merges every entry of `source` into this list
    ///
    /// Entries are taken in the source's natural order and appended: existing
    /// names gain values and keep their position, new names go to the end.
    /// Nested sets are flattened into dotted names. Source comments replace
    /// local ones; entries without a source comment keep theirs.
    ///
    /// All entries are checked before any is applied, so a type conflict
    /// leaves the list untouched.
    pub fn combine<S>(&mut self, source: &S) -> Result<()>
    where
        S: PropertySource + ?Sized,
    {
        let entries = flatten::flatten_source(source)?;
        self.check(&entries, Mode::Append)?;

        let mut created = 0usize;
        for entry in entries.iter().cloned() {
            if !self.exists(&entry.name) {
                created += 1;
            }
            self.apply(entry, Mode::Append)?;
        }
        tracing::debug!(
            entries = entries.len(),
            created,
            "Combined property source"
        );
        debug_assert!(self.is_consistent());
        Ok(())
    }

    /// Returns an independent copy of this list
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Produces a human-readable, non-canonical rendering of the list
    pub fn render(&self, options: &RenderOptions) -> String {
        render::render_list(self, options)
    }

    // ===== INTERNALS =====

    fn install(
        &mut self,
        name: &str,
        values: Vec<Value>,
        comment: Option<String>,
        mode: Mode,
    ) -> Result<()> {
        validate_name(name)?;
        let entries = flatten::flatten_values(name, values, comment)?;
        if entries.is_empty() {
            tracing::trace!(name, "Nested set has no values, nothing to install");
            return Ok(());
        }
        self.check(&entries, mode)?;
        for entry in entries {
            self.apply(entry, mode)?;
        }
        debug_assert!(self.is_consistent());
        Ok(())
    }

    /// Verifies that `entries` can be applied without failing halfway.
    fn check(&self, entries: &[FlatEntry], mode: Mode) -> Result<()> {
        for entry in entries {
            validate_name(&entry.name)?;
            if mode == Mode::Replace {
                continue;
            }
            let (Ok(expected), Some(actual)) = (self.type_of(&entry.name), entry.value_type())
            else {
                continue;
            };
            if expected != actual {
                return Err(Error::TypeMismatch {
                    name: entry.name.clone(),
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    fn apply(&mut self, entry: FlatEntry, mode: Mode) -> Result<()> {
        let FlatEntry {
            name,
            values,
            comment,
        } = entry;
        match mode {
            Mode::Replace => self.values.replace_values(&name, values)?,
            Mode::Append => {
                for value in values {
                    self.values.append_value(&name, value)?;
                }
            }
        }
        self.order.push_back(&name);
        if let Some(comment) = comment {
            self.comments.set(&name, comment);
        }
        Ok(())
    }

    /// Order index and value map hold the same names, comments only indexed names.
    fn is_consistent(&self) -> bool {
        self.order.len() == self.values.len()
            && self.order.iter().all(|name| self.values.contains_key(name))
            && self.comments.names().all(|name| self.order.contains(name))
    }
}

fn collect<I>(values: I) -> Vec<Value>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    values.into_iter().map(Into::into).collect()
}

impl fmt::Display for PropertyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&RenderOptions::default()))
    }
}

impl PropertySource for PropertyList {
    fn exists(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    fn values(&self, name: &str) -> Result<&[Value]> {
        self.values.values(name)
    }

    fn source_names(&self) -> Vec<String> {
        self.order.snapshot()
    }

    fn source_comment(&self, name: &str) -> Option<&str> {
        self.comments.get(name)
    }
}

/// Value-map view of a list: names are flat, order and comments are maintained.
impl ValueMap for PropertyList {
    fn replace_values(&mut self, name: &str, values: Vec<Value>) -> Result<()> {
        self.install(name, values, None, Mode::Replace)
    }

    fn append_value(&mut self, name: &str, value: Value) -> Result<()> {
        self.install(name, vec![value], None, Mode::Append)
    }

    fn remove_values(&mut self, name: &str) -> Option<Vec<Value>> {
        self.remove(name).ok()
    }
}

impl<'a> IntoIterator for &'a PropertyList {
    type Item = Entry<'a>;
    type IntoIter = Box<dyn Iterator<Item = Entry<'a>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

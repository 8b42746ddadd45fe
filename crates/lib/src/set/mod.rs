//! Hierarchical property sets.
//!
//! [`PropertySet`] maps names to homogeneous value sequences. A dotted name
//! such as `ps1.pre` is a path: every component but the last names a nested
//! set, created on demand when writing and never created when reading.
//!
//! ```
//! # use headerlist::PropertySet;
//! let mut ps = PropertySet::new();
//! ps.set("ps1.pre", 1)?;
//! ps.add("ps1.pre", 2)?;
//! ps.set("int", 42)?;
//!
//! assert!(ps.is_set("ps1")?);
//! assert_eq!(ps.get_array::<i32>("ps1.pre")?, vec![1, 2]);
//! assert_eq!(ps.names(true), vec!["int", "ps1"]);
//! # Ok::<(), headerlist::Error>(())
//! ```
//!
//! Nested sets are owned values, so a set can never contain itself and
//! cloning a set is always a deep copy.

use std::{collections::BTreeMap, fmt};

use crate::{
    Error, Result,
    constants::PATH_SEPARATOR,
    errors::ValueTypeError,
    map::{PropertySource, ValueMap},
    path::{self, components, join},
    render::{self, RenderOptions},
    value::{Value, ValueType, common_type},
};

/// A hierarchical, type-erased map from names to value sequences.
///
/// Names are kept in lexical order, which is the order [`names`] and the
/// [`PropertySource`] implementation report.
///
/// [`names`]: PropertySet::names
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(
    into = "BTreeMap<String, Vec<Value>>",
    try_from = "BTreeMap<String, Vec<Value>>"
)]
pub struct PropertySet {
    entries: BTreeMap<String, Vec<Value>>,
}

impl PropertySet {
    /// Creates a new empty set
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns true if the set has no names
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of top-level names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over the top-level names and their values, in lexical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Finds the values at a dotted path without creating anything.
    fn lookup(&self, name: &str) -> Option<&Vec<Value>> {
        let mut parts = components(name).peekable();
        let mut current = self;
        while let Some(part) = parts.next() {
            let values = current.entries.get(part)?;
            if parts.peek().is_none() {
                return Some(values);
            }
            current = values.last()?.as_set()?;
        }
        None
    }

    /// Walks to the set that owns the last component of `path`, creating
    /// intermediate sets as needed.
    ///
    /// Fails if an intermediate component already holds a non-set value.
    /// Intermediate sets are only created below the first missing component,
    /// so a failure never leaves new sets behind.
    fn parent_mut<'p>(&mut self, path: &'p str) -> Result<(&mut PropertySet, &'p str)> {
        let parts: Vec<&str> = components(path).collect();
        let Some((leaf, parents)) = parts.split_last() else {
            return Err(Error::invalid("property path has no components"));
        };

        let mut current = self;
        for (depth, part) in parents.iter().enumerate() {
            let slot = current
                .entries
                .entry(part.to_string())
                .or_insert_with(|| vec![Value::Set(PropertySet::new())]);
            current = match slot.last_mut() {
                Some(Value::Set(set)) => set,
                _ => {
                    return Err(Error::invalid(format!(
                        "'{}' does not hold a property set",
                        parts[..=depth].join(".")
                    )));
                }
            };
        }
        Ok((current, *leaf))
    }

    /// Replaces all values at `name` with a single value
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.replace_values(name, vec![value.into()])
    }

    /// Replaces all values at `name` with the given sequence
    pub fn set_array<I>(&mut self, name: &str, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.replace_values(name, values.into_iter().map(Into::into).collect())
    }

    /// Appends a value at `name`, creating the name if needed
    ///
    /// Fails with [`Error::TypeMismatch`] if `name` already holds values of
    /// another type.
    pub fn add(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.append_value(name, value.into())
    }

    /// Appends every value of the sequence at `name`
    ///
    /// The whole sequence is type-checked before anything is appended.
    pub fn add_array<I>(&mut self, name: &str, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let normalized = path::validate_path(name)?;
        let Some(incoming) = common_type(&values).map_err(|e| e.for_name(name))? else {
            return Err(Error::invalid(format!("no values given for {name}")));
        };
        if let Ok(stored) = self.type_of(&normalized)
            && stored != incoming
        {
            return Err(Error::TypeMismatch {
                name: normalized,
                expected: stored,
                actual: incoming,
            });
        }

        let (parent, leaf) = self.parent_mut(&normalized)?;
        parent
            .entries
            .entry(leaf.to_string())
            .or_default()
            .extend(values);
        Ok(())
    }

    /// Returns the last value at `name`, converted to `T`
    pub fn get<'a, T>(&'a self, name: &str) -> Result<T>
    where
        T: TryFrom<&'a Value, Error = ValueTypeError>,
    {
        let value = self
            .lookup(name)
            .and_then(|values| values.last())
            .ok_or_else(|| Error::not_found(name))?;
        T::try_from(value).map_err(|e| e.for_name(name))
    }

    /// Like [`get`](Self::get), but returns `default` when `name` is missing
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

    /// Returns every value at `name`, converted to `T`
    pub fn get_array<'a, T>(&'a self, name: &str) -> Result<Vec<T>>
    where
        T: TryFrom<&'a Value, Error = ValueTypeError>,
    {
        self.lookup(name)
            .ok_or_else(|| Error::not_found(name))?
            .iter()
            .map(|value| T::try_from(value).map_err(|e| e.for_name(name)))
            .collect()
    }

    /// Returns true if `name` exists; never creates intermediate sets
    pub fn exists(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Returns true if `name` holds more than one value
    pub fn is_array(&self, name: &str) -> Result<bool> {
        Ok(self.value_count(name)? > 1)
    }

    /// Returns true if `name` holds a nested set
    pub fn is_set(&self, name: &str) -> Result<bool> {
        Ok(self.type_of(name)? == ValueType::Set)
    }

    /// Removes `name` and returns its values
    ///
    /// Removing a missing name (or a path through a non-set) is a no-op.
    pub fn remove(&mut self, name: &str) -> Option<Vec<Value>> {
        self.remove_values(name)
    }

    /// Reads the last value at `name` as a boolean
    pub fn get_as_bool(&self, name: &str) -> Result<bool> {
        self.coerce(name, Value::as_bool)
    }

    /// Reads the last value at `name` as an `i32`, widening booleans
    pub fn get_as_int(&self, name: &str) -> Result<i32> {
        self.coerce(name, Value::as_int)
    }

    /// Reads the last value at `name` as an `i64`, widening smaller integers
    pub fn get_as_long(&self, name: &str) -> Result<i64> {
        self.coerce(name, Value::as_long)
    }

    /// Reads the last value at `name` as an `f64` from any numeric type
    pub fn get_as_double(&self, name: &str) -> Result<f64> {
        self.coerce(name, Value::as_double)
    }

    /// Reads the last value at `name` as text
    pub fn get_as_string(&self, name: &str) -> Result<String> {
        self.coerce(name, |v| v.as_text().map(str::to_string))
    }

    fn coerce<T>(&self, name: &str, f: impl Fn(&Value) -> Result<T, ValueTypeError>) -> Result<T> {
        let value = self
            .lookup(name)
            .and_then(|values| values.last())
            .ok_or_else(|| Error::not_found(name))?;
        f(value).map_err(|e| e.for_name(name))
    }

    /// Returns all names, including nested ones unless `top_level_only`
    pub fn names(&self, top_level_only: bool) -> Vec<String> {
        self.collect_names(top_level_only, |_| true)
    }

    /// Returns the names that hold scalar values
    pub fn param_names(&self, top_level_only: bool) -> Vec<String> {
        self.collect_names(top_level_only, |values| {
            !values.first().is_some_and(Value::is_set)
        })
    }

    /// Returns the names that hold nested sets
    pub fn set_names(&self, top_level_only: bool) -> Vec<String> {
        self.collect_names(top_level_only, |values| {
            values.first().is_some_and(Value::is_set)
        })
    }

    /// Returns how many names [`names`](Self::names) would report
    pub fn name_count(&self, top_level_only: bool) -> usize {
        self.names(top_level_only).len()
    }

    fn collect_names(&self, top_level_only: bool, keep: impl Fn(&[Value]) -> bool) -> Vec<String> {
        let mut out = Vec::new();
        self.walk_names("", top_level_only, &keep, &mut out);
        out
    }

    fn walk_names(
        &self,
        prefix: &str,
        top_level_only: bool,
        keep: &impl Fn(&[Value]) -> bool,
        out: &mut Vec<String>,
    ) {
        for (name, values) in &self.entries {
            let full = join(prefix, name);
            if keep(values.as_slice()) {
                out.push(full.clone());
            }
            if top_level_only {
                continue;
            }
            if let Some(nested) = values.last().and_then(Value::as_set) {
                nested.walk_names(&full, false, keep, out);
            }
        }
    }

    /// Produces a human-readable, non-canonical rendering of the set
    pub fn render(&self, options: &RenderOptions) -> String {
        render::render_set(self, options)
    }
}

impl fmt::Display for PropertySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&RenderOptions::default()))
    }
}

impl PropertySource for PropertySet {
    fn exists(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    fn values(&self, name: &str) -> Result<&[Value]> {
        self.lookup(name)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::not_found(name))
    }

    fn source_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

impl ValueMap for PropertySet {
    fn replace_values(&mut self, name: &str, values: Vec<Value>) -> Result<()> {
        let normalized = path::validate_path(name)?;
        if common_type(&values).map_err(|e| e.for_name(name))?.is_none() {
            return Err(Error::invalid(format!("no values given for {name}")));
        }
        let (parent, leaf) = self.parent_mut(&normalized)?;
        parent.entries.insert(leaf.to_string(), values);
        Ok(())
    }

    fn append_value(&mut self, name: &str, value: Value) -> Result<()> {
        self.add_array(name, [value])
    }

    fn remove_values(&mut self, name: &str) -> Option<Vec<Value>> {
        let normalized = path::normalize_path(name);
        let (parent_path, leaf) = match normalized.rsplit_once(PATH_SEPARATOR) {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, normalized.as_str()),
        };
        let parent = match parent_path {
            None => self,
            Some(parent_path) => self.lookup_set_mut(parent_path)?,
        };
        parent.entries.remove(leaf)
    }
}

impl PropertySet {
    fn lookup_set_mut(&mut self, name: &str) -> Option<&mut PropertySet> {
        let mut current = self;
        for part in components(name) {
            current = current.entries.get_mut(part)?.last_mut()?.as_set_mut()?;
        }
        Some(current)
    }
}

impl TryFrom<BTreeMap<String, Vec<Value>>> for PropertySet {
    type Error = Error;

    fn try_from(entries: BTreeMap<String, Vec<Value>>) -> Result<Self> {
        for (name, values) in &entries {
            if name.is_empty() || name.contains(PATH_SEPARATOR) {
                return Err(Error::invalid(format!(
                    "'{name}' is not a single path component"
                )));
            }
            if common_type(values).map_err(|e| e.for_name(name))?.is_none() {
                return Err(Error::invalid(format!("no values given for {name}")));
            }
        }
        Ok(Self { entries })
    }
}

impl From<PropertySet> for BTreeMap<String, Vec<Value>> {
    fn from(set: PropertySet) -> Self {
        set.entries
    }
}

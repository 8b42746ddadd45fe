//! Flattening of nested sets into dotted entries.
//!
//! A list never stores [`Value::Set`]. Whenever a set arrives (through
//! `set`/`add` or from a `copy`/`combine` source) its leaves are turned into
//! flat entries named `outer.inner`, recursively.

use std::collections::HashMap;

use crate::{
    Error, PropertySource, Result,
    path::join,
    value::{Value, ValueType, common_type},
};

/// One flat entry ready to be installed into a list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FlatEntry {
    pub(crate) name: String,
    pub(crate) values: Vec<Value>,
    pub(crate) comment: Option<String>,
}

impl FlatEntry {
    pub(crate) fn value_type(&self) -> Option<ValueType> {
        self.values.first().map(Value::value_type)
    }
}

/// Flat entries in first-appearance order, with repeated names merged.
#[derive(Debug, Default)]
struct Flattened {
    entries: Vec<FlatEntry>,
    index: HashMap<String, usize>,
}

impl Flattened {
    fn push(&mut self, name: String, values: Vec<Value>, comment: Option<&str>) -> Result<()> {
        let existing = self.index.get(&name).copied();
        let Some(slot) = existing else {
            tracing::trace!(name = %name, count = values.len(), "Flattened entry");
            self.index.insert(name.clone(), self.entries.len());
            self.entries.push(FlatEntry {
                name,
                values,
                comment: comment.map(str::to_string),
            });
            return Ok(());
        };

        let entry = &mut self.entries[slot];
        if let (Some(expected), Some(actual)) =
            (entry.value_type(), values.first().map(Value::value_type))
            && expected != actual
        {
            return Err(Error::TypeMismatch {
                name,
                expected,
                actual,
            });
        }
        entry.values.extend(values);
        if let Some(comment) = comment {
            entry.comment = Some(comment.to_string());
        }
        Ok(())
    }

    /// Pushes `values` under `name`, descending into nested sets.
    fn push_values(&mut self, name: &str, values: &[Value], comment: Option<&str>) -> Result<()> {
        match common_type(values).map_err(|e| e.for_name(name))? {
            None => Ok(()),
            Some(ValueType::Set) => {
                for nested in values.iter().filter_map(Value::as_set) {
                    for (inner, inner_values) in nested.iter() {
                        self.push_values(&join(name, inner), inner_values, comment)?;
                    }
                }
                Ok(())
            }
            Some(_) => self.push(name.to_string(), values.to_vec(), comment),
        }
    }
}

/// Flattens the values given to a single `set`/`add` call.
///
/// Scalar sequences pass through untouched. Sequences of sets become one
/// entry per leaf; the comment, if any, is attached to every leaf.
pub(crate) fn flatten_values(
    name: &str,
    values: Vec<Value>,
    comment: Option<String>,
) -> Result<Vec<FlatEntry>> {
    match common_type(&values).map_err(|e| e.for_name(name))? {
        None => Err(Error::invalid(format!("no values given for {name}"))),
        Some(ValueType::Set) => {
            let mut out = Flattened::default();
            out.push_values(name, &values, comment.as_deref())?;
            Ok(out.entries)
        }
        Some(_) => Ok(vec![FlatEntry {
            name: name.to_string(),
            values,
            comment,
        }]),
    }
}

/// Snapshots every entry of `source` as flat entries, in the source's natural order.
///
/// Comments are carried only for names the source itself comments.
pub(crate) fn flatten_source<S>(source: &S) -> Result<Vec<FlatEntry>>
where
    S: PropertySource + ?Sized,
{
    let mut out = Flattened::default();
    for name in source.source_names() {
        let values = source.values(&name)?;
        out.push_values(&name, values, source.source_comment(&name))?;
    }
    Ok(out.entries)
}

//! Dotted property names.
//!
//! A [`PropertySet`](crate::PropertySet) reads `a.b.c` as a path through nested
//! sets. A [`PropertyList`](crate::PropertyList) treats the same string as an
//! opaque flat name, and only builds dotted names itself when it flattens a
//! nested set.

use crate::{Error, Result, constants::PATH_SEPARATOR};

/// Normalizes a dotted name by dropping empty components.
///
/// - Leading dots `.user` → `user`
/// - Trailing dots `user.` → `user`
/// - Consecutive dots `user..profile` → `user.profile`
/// - Pure dots `...` → empty string
///
/// ```rust
/// # use headerlist::path::normalize_path;
/// assert_eq!(normalize_path(""), "");
/// assert_eq!(normalize_path(".user"), "user");
/// assert_eq!(normalize_path("user..profile."), "user.profile");
/// assert_eq!(normalize_path("..."), "");
/// ```
pub fn normalize_path(input: &str) -> String {
    components(input).collect::<Vec<_>>().join(".")
}

/// Iterates over the non-empty components of a dotted name.
pub fn components(input: &str) -> impl Iterator<Item = &str> {
    input.split(PATH_SEPARATOR).filter(|c| !c.is_empty())
}

/// Joins an outer name and an inner name with the path separator.
///
/// An empty prefix yields the inner name unchanged.
pub fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        return name.to_string();
    }
    let mut joined = String::with_capacity(prefix.len() + 1 + name.len());
    joined.push_str(prefix);
    joined.push(PATH_SEPARATOR);
    joined.push_str(name);
    joined
}

/// Rejects names that cannot identify an entry.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid("property names cannot be empty"));
    }
    Ok(())
}

/// Normalizes a dotted path and rejects it if nothing is left.
pub(crate) fn validate_path(name: &str) -> Result<String> {
    let normalized = normalize_path(name);
    if normalized.is_empty() {
        return Err(Error::invalid(format!(
            "property path '{name}' has no components"
        )));
    }
    Ok(normalized)
}

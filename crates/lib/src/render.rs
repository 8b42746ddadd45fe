//! Debug rendering of property containers.
//!
//! The output is meant for logs and diagnostics. It is not stable across
//! versions and cannot be parsed back.

use crate::{
    PropertyList, PropertySet, Value,
    constants::{COMMENT_MARKER, PATH_SEPARATOR, RENDER_NEST_INDENT},
};

/// Options controlling [`PropertySet::render`] and [`PropertyList::render`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Collapse nested sets to `{ ... }`; lists skip flattened dotted names.
    pub top_level_only: bool,
    /// Prefix written before every line.
    pub indent: String,
}

impl RenderOptions {
    /// Builder method to render only the top level
    pub fn top_level_only(mut self) -> Self {
        self.top_level_only = true;
        self
    }

    /// Builder method to set the line prefix
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

/// Renders a value sequence: a single value bare, several as `[ a, b ]`.
pub(crate) fn render_values(values: &[Value]) -> String {
    match values {
        [single] => single.render(),
        _ => {
            let items: Vec<String> = values.iter().map(Value::render).collect();
            format!("[ {} ]", items.join(", "))
        }
    }
}

pub(crate) fn render_set(set: &PropertySet, options: &RenderOptions) -> String {
    let mut out = String::new();
    write_set(&mut out, set, &options.indent, options.top_level_only);
    out
}

fn write_set(out: &mut String, set: &PropertySet, indent: &str, top_level_only: bool) {
    for (name, values) in set.iter() {
        match values {
            [Value::Set(nested)] if !top_level_only => {
                out.push_str(&format!("{indent}{name} = {{\n"));
                write_set(out, nested, &format!("{indent}{RENDER_NEST_INDENT}"), false);
                out.push_str(&format!("{indent}}}\n"));
            }
            _ => out.push_str(&format!("{indent}{name} = {}\n", render_values(values))),
        }
    }
}

pub(crate) fn render_list(list: &PropertyList, options: &RenderOptions) -> String {
    let mut out = String::new();
    for entry in list.iter() {
        if options.top_level_only && entry.name.contains(PATH_SEPARATOR) {
            continue;
        }
        out.push_str(&options.indent);
        out.push_str(entry.name);
        out.push_str(" = ");
        out.push_str(&render_values(entry.values));
        if let Some(comment) = entry.comment {
            out.push_str(COMMENT_MARKER);
            out.push_str(comment);
        }
        out.push('\n');
    }
    out
}

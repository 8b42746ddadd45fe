//! Constants used throughout the headerlist library.
//!
//! Central definitions for separators and markers shared by the containers
//! and the debug renderers.

/// Separator between the components of a dotted property name.
pub const PATH_SEPARATOR: char = '.';

/// Indent added per nesting level when rendering a nested [`PropertySet`](crate::PropertySet).
pub const RENDER_NEST_INDENT: &str = "..";

/// Marker placed between a rendered value and its comment.
pub const COMMENT_MARKER: &str = " // ";

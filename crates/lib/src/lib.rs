//!
//! headerlist: ordered, commented key/value metadata for instrument headers.
//!
//! ## Core Concepts
//!
//! * **Values (`value::Value`)**: A closed set of typed values (booleans, integers,
//!   floating point, text, UTC datetimes and nested sets). Every typed read checks
//!   the run-time tag.
//! * **PropertySet (`set::PropertySet`)**: A hierarchical map from names to value
//!   sequences, where `a.b.c` is a path through nested sets.
//! * **PropertyList (`list::PropertyList`)**: The ordered, annotated store. Names
//!   are flat strings kept in first-insertion order, each with an optional comment.
//!   Nested sets merged into a list are flattened into dotted names.
//! * **Contracts (`map`)**: `PropertySource` is what `copy` and `combine` read from;
//!   `ValueMap` is the mutable backing-map contract. `HeaderVisitor` is how an
//!   external formatter walks a list.
//!
//! ```
//! use headerlist::PropertyList;
//!
//! let mut header = PropertyList::new();
//! header.set_with_comment("EXPTIME", 30.0, "exposure seconds")?;
//! header.add("HISTORY", "frame1")?;
//! header.add("HISTORY", "frame2")?;
//!
//! assert_eq!(header.ordered_names(), vec!["EXPTIME", "HISTORY"]);
//! assert_eq!(header.get_array::<String>("HISTORY")?, vec!["frame1", "frame2"]);
//! assert_eq!(header.comment("EXPTIME")?, Some("exposure seconds"));
//! # Ok::<(), headerlist::Error>(())
//! ```

pub mod constants;
pub mod errors;
pub mod list;
pub mod map;
pub mod path;
pub mod render;
pub mod set;
pub mod value;

pub use errors::{Error, ValueTypeError};
pub use list::{Entry, HeaderVisitor, PropertyList};
pub use map::{PropertySource, ValueMap};
pub use render::RenderOptions;
pub use set::PropertySet;
pub use value::{Value, ValueType};

/// Result type used throughout the headerlist library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Error types for property containers.
//!
//! Every failure is reported synchronously to the caller. Mutating operations
//! validate before they touch any state, so an `Err` always means nothing
//! changed.

use thiserror::Error;

use crate::value::ValueType;

/// Structured errors returned by [`PropertySet`](crate::PropertySet) and
/// [`PropertyList`](crate::PropertyList) operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The name is not present in the container
    #[error("property not found: {name}")]
    NotFound { name: String },

    /// The stored value has a different type than the one requested or appended
    #[error("type mismatch for {name}: expected {expected}, found {actual}")]
    TypeMismatch {
        name: String,
        expected: ValueType,
        actual: ValueType,
    },

    /// The request itself is malformed (empty name, empty array, path through a scalar)
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl Error {
    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        Error::NotFound { name: name.into() }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Check if this error indicates a missing name
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this error is a type mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }

    /// Check if this error rejects the arguments of the call
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }

    /// Get the property name if this error is about a specific name
    pub fn name(&self) -> Option<&str> {
        match self {
            Error::NotFound { name } | Error::TypeMismatch { name, .. } => Some(name),
            Error::InvalidArgument { .. } => None,
        }
    }
}

/// A typed conversion from [`Value`](crate::Value) failed.
///
/// This is the error of the `TryFrom<&Value>` conversions, which do not know
/// which property the value came from. Containers attach the name with
/// [`ValueTypeError::for_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected}, found {actual}")]
pub struct ValueTypeError {
    pub expected: ValueType,
    pub actual: ValueType,
}

impl ValueTypeError {
    /// Turns this conversion failure into a [`Error::TypeMismatch`] for `name`.
    pub fn for_name(self, name: impl Into<String>) -> Error {
        Error::TypeMismatch {
            name: name.into(),
            expected: self.expected,
            actual: self.actual,
        }
    }
}

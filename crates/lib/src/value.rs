//! Value types stored under property names.
//!
//! A property holds an ordered sequence of [`Value`]s that all share the same
//! [`ValueType`]. The set of supported kinds is closed: every typed read checks
//! the run-time tag and reports a [`ValueTypeError`] instead of reinterpreting
//! the payload.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{errors::ValueTypeError, set::PropertySet};

/// Run-time type tag of a [`Value`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Bool,
    Int,
    Long,
    Float,
    Double,
    Text,
    DateTime,
    Set,
}

impl ValueType {
    /// Returns the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Long => "long",
            ValueType::Float => "float",
            ValueType::Double => "double",
            ValueType::Text => "text",
            ValueType::DateTime => "datetime",
            ValueType::Set => "set",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single typed value.
///
/// # Value Types
///
/// ## Scalars
/// - [`Value::Bool`], [`Value::Int`] (32-bit), [`Value::Long`] (64-bit)
/// - [`Value::Float`] (32-bit), [`Value::Double`] (64-bit)
/// - [`Value::Text`], [`Value::DateTime`] (UTC)
///
/// ## Containers
/// - [`Value::Set`] - a nested [`PropertySet`]. Ordered lists flatten these
///   into dotted names when they are merged in.
///
/// Typed reads are exact: an `i32` read of a [`Value::Long`] fails, as does an
/// `f64` read of a [`Value::Float`]. Use the `as_*` coercions for widening reads.
///
/// ```
/// # use headerlist::{Value, ValueType};
/// let v = Value::from(30.0);
/// assert_eq!(v.value_type(), ValueType::Double);
/// assert_eq!(f64::try_from(&v), Ok(30.0));
/// assert!(f32::try_from(&v).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(String),
    DateTime(DateTime<Utc>),
    Set(PropertySet),
}

impl Value {
    /// Returns the run-time type tag of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Long(_) => ValueType::Long,
            Value::Float(_) => ValueType::Float,
            Value::Double(_) => ValueType::Double,
            Value::Text(_) => ValueType::Text,
            Value::DateTime(_) => ValueType::DateTime,
            Value::Set(_) => ValueType::Set,
        }
    }

    /// Returns true if this value is a nested container
    pub fn is_set(&self) -> bool {
        matches!(self, Value::Set(_))
    }

    /// Returns the nested container, if this is one
    pub fn as_set(&self) -> Option<&PropertySet> {
        match self {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Returns the nested container mutably, if this is one
    pub fn as_set_mut(&mut self) -> Option<&mut PropertySet> {
        match self {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }

    fn mismatch(&self, expected: ValueType) -> ValueTypeError {
        ValueTypeError {
            expected,
            actual: self.value_type(),
        }
    }

    /// Reads a boolean. Only [`Value::Bool`] qualifies.
    pub fn as_bool(&self) -> Result<bool, ValueTypeError> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.mismatch(ValueType::Bool)),
        }
    }

    /// Reads a 32-bit integer, widening booleans to 0/1.
    pub fn as_int(&self) -> Result<i32, ValueTypeError> {
        match self {
            Value::Bool(b) => Ok(i32::from(*b)),
            Value::Int(n) => Ok(*n),
            _ => Err(self.mismatch(ValueType::Int)),
        }
    }

    /// Reads a 64-bit integer, widening booleans and 32-bit integers.
    pub fn as_long(&self) -> Result<i64, ValueTypeError> {
        match self {
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Int(n) => Ok(i64::from(*n)),
            Value::Long(n) => Ok(*n),
            _ => Err(self.mismatch(ValueType::Long)),
        }
    }

    /// Reads a double from any numeric value (and booleans).
    pub fn as_double(&self) -> Result<f64, ValueTypeError> {
        match self {
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Int(n) => Ok(f64::from(*n)),
            // Rounds above 2^53
            Value::Long(n) => Ok(*n as f64),
            Value::Float(x) => Ok(f64::from(*x)),
            Value::Double(x) => Ok(*x),
            _ => Err(self.mismatch(ValueType::Double)),
        }
    }

    /// Reads text. Only [`Value::Text`] qualifies.
    pub fn as_text(&self) -> Result<&str, ValueTypeError> {
        match self {
            Value::Text(s) => Ok(s),
            _ => Err(self.mismatch(ValueType::Text)),
        }
    }

    /// Human-readable rendering used by the debug renderers.
    ///
    /// Text is quoted, datetimes use RFC 3339, nested sets collapse to `{ ... }`.
    pub(crate) fn render(&self) -> String {
        match self {
            Value::Text(s) => format!("\"{}\"", s.replace('"', "\\\"")),
            Value::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Value::Set(_) => "{ ... }".to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Long(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Double(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::Set(set) => write!(f, "{set}"),
        }
    }
}

/// `From<T>` and exact `TryFrom<&Value>` for the `Copy` scalar kinds.
macro_rules! scalar_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }

            impl TryFrom<&Value> for $ty {
                type Error = ValueTypeError;

                fn try_from(value: &Value) -> Result<Self, Self::Error> {
                    match value {
                        Value::$variant(v) => Ok(*v),
                        other => Err(other.mismatch(ValueType::$variant)),
                    }
                }
            }
        )*
    };
}

scalar_conversions! {
    bool => Bool,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    DateTime<Utc> => DateTime,
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<PropertySet> for Value {
    fn from(value: PropertySet) -> Self {
        Value::Set(value)
    }
}

impl TryFrom<&Value> for String {
    type Error = ValueTypeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_text().map(str::to_string)
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = ValueTypeError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_text()
    }
}

impl TryFrom<&Value> for PropertySet {
    type Error = ValueTypeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Set(set) => Ok(set.clone()),
            other => Err(other.mismatch(ValueType::Set)),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a PropertySet {
    type Error = ValueTypeError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_set().ok_or_else(|| value.mismatch(ValueType::Set))
    }
}

// Direct comparisons with primitives, handy in assertions
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::Text(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        matches!(self, Value::Int(n) if n == other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Long(n) if n == other)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Double(x) if x == other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

/// Checks that every value in `values` has the same type tag.
///
/// Returns the shared tag, or `None` for an empty slice.
pub(crate) fn common_type(values: &[Value]) -> Result<Option<ValueType>, ValueTypeError> {
    let Some(first) = values.first() else {
        return Ok(None);
    };
    let expected = first.value_type();
    match values.iter().find(|v| v.value_type() != expected) {
        Some(odd) => Err(odd.mismatch(expected)),
        None => Ok(Some(expected)),
    }
}

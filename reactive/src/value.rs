//! The dynamic value type stored in reactive state.

use core::fmt;
use std::collections::BTreeMap;

/// A dynamically typed state value.
///
/// Equality is strict: two values are equal only when they carry the same
/// variant and equal payloads. A key that is absent from a container is
/// distinct from a present [`Value::Null`]; change detection accounts for
/// presence separately (see [`Change`](crate::Change)).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// The absent-but-present value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. Integers are widened to `f64` on conversion.
    Num(f64),
    /// A string.
    Str(String),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A string-keyed map of values.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` unless the value is `Null`, `false`, `0`, `NaN` or an
    /// empty string. Lists and maps are always truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(value) => *value,
            Self::Num(value) => *value != 0.0 && !value.is_nan(),
            Self::Str(value) => !value.is_empty(),
            Self::List(_) | Self::Map(_) => true,
        }
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the numeric payload, if any.
    #[must_use]
    pub const fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Num(value) => {
                // Render whole numbers without a trailing `.0`.
                if value.fract() == 0.0 && value.is_finite() && value.abs() < 1e15 {
                    #[allow(clippy::cast_possible_truncation)]
                    let whole = *value as i64;
                    write!(f, "{whole}")
                } else {
                    write!(f, "{value}")
                }
            }
            Self::Str(value) => f.write_str(value),
            Self::List(values) => {
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
            Self::Map(values) => write!(f, "{values:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Num(f64::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Num(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Num(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        Self::Num(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Self::Map(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Self>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

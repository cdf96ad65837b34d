//! Conditions deciding whether an effect runs for a given change record.

use core::fmt;
use std::rc::Rc;

use crate::{ChangeRecord, Value};

/// A predicate over a [`ChangeRecord`].
///
/// The shorthand forms accepted by effect registration resolve into one of
/// these variants once, at registration time, so no shorthand is re-parsed
/// during notification:
///
/// - a key name means "the record contains this key",
/// - a list of key names means "the record contains any of these keys",
/// - a `(key, value)` pair means "the record contains this key and its
///   current value equals `value`".
///
/// A `KeyValue` condition built against a value the key never takes is
/// silently always false; that is a documented footgun, not an error.
#[derive(Clone, Default)]
pub enum Condition {
    /// Matches every change record.
    #[default]
    Always,
    /// Matches when the named key changed.
    Key(String),
    /// Matches when any of the named keys changed.
    AnyKey(Vec<String>),
    /// Matches when the named key changed to exactly this value.
    KeyValue(String, Value),
    /// An arbitrary predicate over the change record.
    Predicate(Rc<dyn Fn(&ChangeRecord) -> bool>),
}

impl Condition {
    /// Wraps a closure as a [`Condition::Predicate`].
    pub fn predicate(f: impl Fn(&ChangeRecord) -> bool + 'static) -> Self {
        Self::Predicate(Rc::new(f))
    }

    /// Builds a [`Condition::KeyValue`] from a key and the required current
    /// value.
    pub fn key_value(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::KeyValue(key.into(), value.into())
    }

    /// Evaluates the condition against a change record.
    #[must_use]
    pub fn matches(&self, changes: &ChangeRecord) -> bool {
        match self {
            Self::Always => true,
            Self::Key(key) => changes.contains(key),
            Self::AnyKey(keys) => keys.iter().any(|key| changes.contains(key)),
            Self::KeyValue(key, value) => changes.current(key) == Some(value),
            Self::Predicate(predicate) => predicate(changes),
        }
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Self::AnyKey(keys) => f.debug_tuple("AnyKey").field(keys).finish(),
            Self::KeyValue(key, value) => {
                f.debug_tuple("KeyValue").field(key).field(value).finish()
            }
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<()> for Condition {
    fn from((): ()) -> Self {
        Self::Always
    }
}

impl From<&str> for Condition {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for Condition {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<Vec<String>> for Condition {
    fn from(keys: Vec<String>) -> Self {
        Self::AnyKey(keys)
    }
}

impl From<Vec<&str>> for Condition {
    fn from(keys: Vec<&str>) -> Self {
        Self::AnyKey(keys.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Condition {
    fn from(keys: [&str; N]) -> Self {
        Self::AnyKey(keys.iter().map(|key| (*key).to_owned()).collect())
    }
}

impl<K, V> From<(K, V)> for Condition
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from((key, value): (K, V)) -> Self {
        Self::KeyValue(key.into(), value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Change;

    fn record(entries: &[(&str, Value)]) -> ChangeRecord {
        ChangeRecord::from_entries(entries.iter().map(|(key, value)| {
            (
                (*key).to_owned(),
                Change {
                    current: value.clone(),
                    previous: None,
                },
            )
        }))
    }

    #[test]
    fn key_shorthand_matches_presence() {
        let condition = Condition::from("x");
        assert!(condition.matches(&record(&[("x", Value::from(1))])));
        assert!(!condition.matches(&record(&[("y", Value::from(1))])));
    }

    #[test]
    fn any_key_shorthand_matches_any() {
        let condition = Condition::from(["x", "y"]);
        assert!(condition.matches(&record(&[("x", Value::from(1))])));
        assert!(condition.matches(&record(&[("y", Value::from(1))])));
        assert!(!condition.matches(&record(&[("z", Value::from(1))])));
    }

    #[test]
    fn key_value_shorthand_requires_exact_current() {
        let condition = Condition::from(("x", 5));
        assert!(condition.matches(&record(&[("x", Value::from(5))])));
        assert!(!condition.matches(&record(&[("x", Value::from(6))])));
        assert!(!condition.matches(&record(&[("y", Value::from(5))])));
    }
}

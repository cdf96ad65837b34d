//! The reactive state container.

use core::fmt;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::trace;

use crate::effects::{EffectFn, EffectRegistry};
use crate::{Change, ChangeRecord, Condition, EffectId, Effects, Value};

/// A value handed to [`Reactive::update`].
///
/// Most callers pass plain values; [`StateValue::lazy`] defers computing the
/// value until the update is applied.
pub enum StateValue {
    /// An eager value.
    Value(Value),
    /// A thunk forced when the update is applied.
    Lazy(Box<dyn FnOnce() -> Value>),
}

impl StateValue {
    /// Wraps a thunk that produces the value on demand.
    pub fn lazy(f: impl FnOnce() -> Value + 'static) -> Self {
        Self::Lazy(Box::new(f))
    }

    /// Resolves the value, invoking the thunk if necessary.
    #[must_use]
    pub fn force(self) -> Value {
        match self {
            Self::Value(value) => value,
            Self::Lazy(f) => f(),
        }
    }
}

impl fmt::Debug for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

macro_rules! state_value_from {
    ($($ty:ty),* $(,)?) => {
        $(impl From<$ty> for StateValue {
            fn from(value: $ty) -> Self {
                Self::Value(Value::from(value))
            }
        })*
    };
}

state_value_from!(Value, bool, f64, f32, i32, u32, i64, &str, String, Vec<Value>);

impl<T> From<Option<T>> for StateValue
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        Self::Value(Value::from(value.map(Into::into)))
    }
}

struct ReactiveInner {
    name: Option<String>,
    owner: RefCell<Option<Weak<dyn Any>>>,
    data: RefCell<HashMap<String, Value>>,
    previous: RefCell<HashMap<String, Value>>,
    effects: RefCell<EffectRegistry>,
}

/// A reactive state container for one owner.
///
/// Holds a flat key/value map, the snapshot of that map as it was before the
/// most recently applied update, and an ordered registry of conditional
/// effects. Handles are cheap to clone; all clones address the same state.
///
/// Everything runs synchronously on the calling thread. An effect may itself
/// call [`update`](Self::update) on this or another container; such chains
/// recurse without a guard and terminate either at a natural fixed point
/// (the no-change short circuit) or by exhausting the call stack. Keeping
/// effect chains acyclic is the caller's responsibility.
#[derive(Clone)]
pub struct Reactive(Rc<ReactiveInner>);

impl Default for Reactive {
    fn default() -> Self {
        Self::new()
    }
}

impl Reactive {
    /// Creates an empty, unnamed container.
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(ReactiveInner {
            name: None,
            owner: RefCell::new(None),
            data: RefCell::new(HashMap::new()),
            previous: RefCell::new(HashMap::new()),
            effects: RefCell::new(EffectRegistry::default()),
        }))
    }

    /// Creates an empty container carrying a label for soft identification.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self(Rc::new(ReactiveInner {
            name: Some(name.into()),
            owner: RefCell::new(None),
            data: RefCell::new(HashMap::new()),
            previous: RefCell::new(HashMap::new()),
            effects: RefCell::new(EffectRegistry::default()),
        }))
    }

    /// Creates a container seeded with initial state. Seeding does not
    /// notify: no effects can exist yet and `previous()` stays empty.
    #[must_use]
    pub fn with_state<I, K, V>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<StateValue>,
    {
        let reactive = Self::new();
        {
            let mut data = reactive.0.data.borrow_mut();
            for (key, value) in initial {
                data.insert(key.into(), value.into().force());
            }
        }
        reactive
    }

    /// Returns the container's label, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Returns the owning entity, if one was attached and is still alive.
    ///
    /// Ownership here is a relation only; the container never keeps its
    /// owner alive.
    #[must_use]
    pub fn owner(&self) -> Option<Rc<dyn Any>> {
        self.0.owner.borrow().as_ref()?.upgrade()
    }

    /// Attaches a weak back-reference to the owning entity.
    pub fn set_owner(&self, owner: Weak<dyn Any>) {
        *self.0.owner.borrow_mut() = Some(owner);
    }

    /// Returns the controller for managing effects.
    #[must_use]
    pub fn effects(&self) -> Effects {
        Effects::new(self.clone())
    }

    /// Reads a single state item.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.data.borrow().get(key).cloned()
    }

    /// Writes a single state item through the diff/notify pipeline.
    /// Equivalent to `update([(key, value)])`.
    pub fn set(&self, key: impl Into<String>, value: impl Into<StateValue>) -> bool {
        self.update([(key.into(), value.into())])
    }

    /// Returns `true` when the key is present in current state.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.data.borrow().contains_key(key)
    }

    /// Returns an owned snapshot of current state.
    #[must_use]
    pub fn state(&self) -> HashMap<String, Value> {
        self.0.data.borrow().clone()
    }

    /// Returns an owned snapshot of state as it was before the most recently
    /// applied update (empty before the first one).
    #[must_use]
    pub fn previous(&self) -> HashMap<String, Value> {
        self.0.previous.borrow().clone()
    }

    /// Applies a batch of state entries.
    ///
    /// Entries whose value strictly equals the current value for that key are
    /// discarded; a key absent from state always counts as changed, whatever
    /// the incoming value. [`StateValue::Lazy`] thunks are forced before
    /// diffing. If nothing remains the call is a no-op: no snapshot rotation,
    /// no notification, and `false` is returned.
    ///
    /// Otherwise the previous-state snapshot is rotated, the changes are
    /// merged, and every registered effect whose condition accepts the change
    /// record runs synchronously, in registration order. Returns `true`.
    pub fn update<I, K, V>(&self, entries: I) -> bool
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<StateValue>,
    {
        let mut changes: IndexMap<String, Value> = IndexMap::new();
        for (key, value) in entries {
            let key = key.into();
            let value = value.into().force();
            let unchanged = self.0.data.borrow().get(&key) == Some(&value);
            if !unchanged {
                changes.insert(key, value);
            }
        }
        if changes.is_empty() {
            return false;
        }

        {
            let mut data = self.0.data.borrow_mut();
            *self.0.previous.borrow_mut() = data.clone();
            for (key, value) in &changes {
                data.insert(key.clone(), value.clone());
            }
        }
        trace!(
            name = self.name().unwrap_or_default(),
            keys = ?changes.keys().collect::<Vec<_>>(),
            "state updated",
        );

        let record = self.record_for(changes.into_keys());
        self.notify(&record);
        true
    }

    /// Discards all live state without producing a change record or running
    /// effects; callers must not rely on effects firing. The discarded state
    /// remains visible through [`previous`](Self::previous).
    pub fn clear(&self) {
        let mut data = self.0.data.borrow_mut();
        *self.0.previous.borrow_mut() = std::mem::take(&mut *data);
    }

    /// Builds a change record for the given keys from current and previous
    /// state. Values are cloned into the record, so notification never holds
    /// a borrow of live state.
    fn record_for(&self, keys: impl IntoIterator<Item = String>) -> ChangeRecord {
        let data = self.0.data.borrow();
        let previous = self.0.previous.borrow();
        ChangeRecord::from_entries(keys.into_iter().filter_map(|key| {
            let current = data.get(&key)?.clone();
            let change = Change {
                current,
                previous: previous.get(&key).cloned(),
            };
            Some((key, change))
        }))
    }

    fn notify(&self, record: &ChangeRecord) {
        // Iterate over a snapshot so effects may mutate the registry. The
        // registry borrow must end before the first effect runs.
        let entries = self.0.effects.borrow().snapshot();
        for (effect, condition) in entries {
            if condition.matches(record) {
                effect(record, self);
            }
        }
    }

    pub(crate) fn register(&self, effect: EffectFn, condition: Condition) -> EffectId {
        let id = self
            .0
            .effects
            .borrow_mut()
            .insert(effect.clone(), condition.clone());
        // Initial evaluation: the full current state, every key treated as
        // changed, same record shape as a reactive call.
        let keys: Vec<String> = self.0.data.borrow().keys().cloned().collect();
        let record = self.record_for(keys);
        if condition.matches(&record) {
            effect(&record, self);
        }
        id
    }

    pub(crate) fn deregister(&self, id: EffectId) -> bool {
        self.0.effects.borrow_mut().remove(id)
    }

    pub(crate) fn effect_registered(&self, id: EffectId) -> bool {
        self.0.effects.borrow().has(id)
    }

    pub(crate) fn clear_effects(&self) {
        self.0.effects.borrow_mut().clear();
    }

    pub(crate) fn effect_count(&self) -> usize {
        self.0.effects.borrow().len()
    }
}

impl fmt::Debug for Reactive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reactive")
            .field("name", &self.0.name)
            .field("keys", &self.0.data.borrow().len())
            .field("effects", &self.effect_count())
            .finish()
    }
}

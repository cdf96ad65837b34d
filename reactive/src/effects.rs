//! Effect registration and the per-update change record.

use core::fmt;
use std::collections::BTreeMap;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::{Condition, Reactive, Value};

/// A single key's transition within one update.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    /// The value after the update.
    pub current: Value,
    /// The value before the update, or `None` if the key was absent.
    pub previous: Option<Value>,
}

/// The set of keys one update changed, mapped to their transitions.
///
/// A record is built fresh for every notification pass (and for the initial
/// evaluation of a newly registered effect, where every present key counts as
/// changed). Records are immutable; effects receive them by shared reference.
#[derive(Debug, Clone, Default)]
pub struct ChangeRecord(BTreeMap<String, Change>);

impl ChangeRecord {
    pub(crate) fn from_entries(entries: impl IntoIterator<Item = (String, Change)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Returns `true` when the key changed in this update.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the transition for a changed key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Change> {
        self.0.get(key)
    }

    /// Returns the post-update value of a changed key.
    #[must_use]
    pub fn current(&self, key: &str) -> Option<&Value> {
        self.0.get(key).map(|change| &change.current)
    }

    /// Returns the pre-update value of a changed key, if it was present.
    #[must_use]
    pub fn previous(&self, key: &str) -> Option<&Value> {
        self.0.get(key).and_then(|change| change.previous.as_ref())
    }

    /// Iterates over the changed keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over changed keys and their transitions.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Change)> {
        self.0.iter().map(|(key, change)| (key.as_str(), change))
    }

    /// Returns the number of changed keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no keys changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub(crate) type EffectFn = Rc<dyn Fn(&ChangeRecord, &Reactive)>;

/// Handle identifying a registered effect.
///
/// Returned by [`Effects::add`]; the only way to address an effect once its
/// closure has been handed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(u64);

pub(crate) struct EffectEntry {
    pub effect: EffectFn,
    pub condition: Condition,
}

#[derive(Default)]
pub(crate) struct EffectRegistry {
    entries: IndexMap<EffectId, EffectEntry>,
    next: u64,
}

impl EffectRegistry {
    pub fn insert(&mut self, effect: EffectFn, condition: Condition) -> EffectId {
        let id = EffectId(self.next);
        self.next += 1;
        self.entries.insert(id, EffectEntry { effect, condition });
        id
    }

    pub fn remove(&mut self, id: EffectId) -> bool {
        // shift_remove keeps the remaining effects in registration order.
        self.entries.shift_remove(&id).is_some()
    }

    pub fn has(&self, id: EffectId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Snapshot of the registry, in registration order. Notification iterates
    /// over this copy so effects may add or remove effects mid-pass.
    pub fn snapshot(&self) -> Vec<(EffectFn, Condition)> {
        self.entries
            .values()
            .map(|entry| (entry.effect.clone(), entry.condition.clone()))
            .collect()
    }
}

/// Controller for one container's effect subscriptions.
///
/// Cheap to clone; all clones address the same registry.
#[derive(Clone)]
pub struct Effects {
    reactive: Reactive,
}

impl Effects {
    pub(crate) const fn new(reactive: Reactive) -> Self {
        Self { reactive }
    }

    /// Registers an effect, then immediately evaluates it once against the
    /// full current state (every present key treated as changed) if its
    /// condition allows. Pass `()` as the condition to always run.
    pub fn add(
        &self,
        effect: impl Fn(&ChangeRecord, &Reactive) + 'static,
        condition: impl Into<Condition>,
    ) -> EffectId {
        self.reactive.register(Rc::new(effect), condition.into())
    }

    /// Removes an effect. Returns `false` if the id was not registered.
    pub fn remove(&self, id: EffectId) -> bool {
        self.reactive.deregister(id)
    }

    /// Returns `true` while the effect is registered.
    #[must_use]
    pub fn has(&self, id: EffectId) -> bool {
        self.reactive.effect_registered(id)
    }

    /// Removes all effects. No notifications are produced.
    pub fn clear(&self) {
        self.reactive.clear_effects();
    }

    /// Returns the number of registered effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reactive.effect_count()
    }

    /// Returns `true` when no effects are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Effects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effects").field("len", &self.len()).finish()
    }
}

//! Reactive state containers with change detection and conditional effects.
//!
//! A [`Reactive`] container owns a flat key/value state map. Calling
//! [`Reactive::update`] diffs the incoming entries against current state,
//! rotates the previous-state snapshot, and synchronously notifies every
//! registered effect whose [`Condition`] accepts the resulting
//! [`ChangeRecord`]. An update that changes nothing notifies nobody.
//!
//! Effects are managed through the [`Effects`] handle returned by
//! [`Reactive::effects`]; registering an effect immediately evaluates it once
//! against the full current state so subscribers initialize consistently.

mod condition;
mod effects;
mod reactive;
mod value;

pub use condition::Condition;
pub use effects::{Change, ChangeRecord, EffectId, Effects};
pub use reactive::{Reactive, StateValue};
pub use value::Value;

#![doc = include_str!("../README.md")]

mod capability;
pub mod compose;
pub mod create;
pub mod element;
mod error;
pub mod event;
pub mod tag;

pub use compose::{Components, ElementType, Factories, Property, Transform, TypeBuilder};
pub use create::{Child, Fragment, Hook, Options};
pub use element::{Attrs, Css, Element, Node, StyleVars};
pub use error::Error;
pub use event::{Detail, Event};

/// The reactive state layer.
pub use rollo_reactive as reactive;

#[doc(inline)]
pub use rollo_reactive::{ChangeRecord, Condition, EffectId, Reactive, StateValue, Value};

thread_local! {
    static COMPONENTS: Components = Components::default();
}

/// Runs a closure against this thread's composition engine.
///
/// The engine is thread-local: each thread synthesizes and caches its own
/// element types, with the built-in capabilities registered.
pub fn with_components<R>(f: impl FnOnce(&Components) -> R) -> R {
    COMPONENTS.with(f)
}

/// Builds a configured element on this thread's engine.
///
/// See [`Components::create`] for selector, option, and child semantics.
///
/// # Errors
///
/// Returns [`Error::InvalidSelector`], [`Error::UnknownTag`], or the update
/// router's error for an invalid property key.
///
/// # Examples
///
/// ```
/// use rollo::{children, create, Options};
///
/// let card = create(
///     "div.card",
///     Options::new().prop("title", "greeting"),
///     children![create("span", Options::new(), [])?, "hello"],
/// )?;
/// assert_eq!(card.text(), "hello");
/// # Ok::<(), rollo::Error>(())
/// ```
pub fn create(
    selector: &str,
    options: Options,
    children: impl IntoIterator<Item = Child>,
) -> Result<Element, Error> {
    with_components(|components| components.create(selector, options, children))
}

/// Registers a capability factory on this thread's engine.
///
/// Registration must happen before the first `create`/`get` for an affected
/// tag: already defined types are never re-synthesized.
///
/// # Errors
///
/// Returns [`Error::UnnamedCapability`] for an empty name.
pub fn register_capability(
    name: impl Into<String>,
    condition: impl Fn(&tag::TagInfo) -> bool + 'static,
    transform: impl Fn(TypeBuilder) -> TypeBuilder + 'static,
) -> Result<(), Error> {
    with_components(|components| components.factories().add(name, condition, transform))
}

/// Builds a `Vec<Child>` from a mixed child list: elements, text, `Option`s,
/// and hooks all coerce through [`Child::from`].
#[macro_export]
macro_rules! children {
    () => { ::std::vec::Vec::<$crate::Child>::new() };
    ($($child:expr),+ $(,)?) => {
        ::std::vec![$($crate::Child::from($child)),+]
    };
}

/// Builds a `Vec<(String, StateValue)>` from `key: value` pairs, ready for
/// [`Reactive::update`](crate::Reactive::update).
#[macro_export]
macro_rules! state {
    ($($key:ident : $value:expr),* $(,)?) => {
        ::std::vec![$((
            ::std::string::String::from(::core::stringify!($key)),
            $crate::StateValue::from($value),
        )),*]
    };
}

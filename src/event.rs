//! Named signals dispatched on elements.
//!
//! Elements communicate through named signals carrying an optional payload:
//! the lifecycle pair (`connected`/`disconnected`), the structural signals
//! (`child`, `slotchange`), and anything user code sends. A signal is
//! delivered to the target's own listeners first and then bubbles through
//! its ancestors, so a component can react to activity anywhere in its
//! subtree without polling.

use core::fmt;
use std::rc::Rc;

use rollo_reactive::Value;

use crate::Element;

/// Payload attached to a signal.
#[derive(Debug, Clone, Default)]
pub enum Detail {
    /// No payload.
    #[default]
    None,
    /// A plain value.
    Value(Value),
    /// An element, e.g. the newly inserted child of a `child` signal.
    Element(Element),
}

impl Detail {
    /// Returns the value payload, if any.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the element payload, if any.
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<Value> for Detail {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Element> for Detail {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<()> for Detail {
    fn from((): ()) -> Self {
        Self::None
    }
}

/// A dispatched signal.
#[derive(Clone)]
pub struct Event {
    ty: Rc<str>,
    detail: Detail,
    target: Element,
}

impl Event {
    pub(crate) fn new(ty: &str, detail: Detail, target: Element) -> Self {
        Self {
            ty: Rc::from(ty),
            detail,
            target,
        }
    }

    /// The signal name.
    #[must_use]
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// The payload.
    #[must_use]
    pub const fn detail(&self) -> &Detail {
        &self.detail
    }

    /// The element the signal was sent on (not the listener's element when
    /// observed while bubbling).
    #[must_use]
    pub const fn target(&self) -> &Element {
        &self.target
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("ty", &self.ty)
            .field("target", &self.target.tag())
            .finish()
    }
}

pub(crate) type Listener = Rc<dyn Fn(&Event)>;

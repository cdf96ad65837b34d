//! The construction façade.
//!
//! [`Components::create`] turns a `tag.class.class` selector, an [`Options`]
//! bag, and a child list into a fully configured element in one call:
//! resolve (or synthesize) the type, instantiate, apply classes, route the
//! property updates, seed reactive state, stage the children in a
//! [`Fragment`], and move them in as a single batch. An optional parent
//! receives the finished element and a `child` signal.

use rollo_reactive::StateValue;

use crate::compose::Components;
use crate::element::{Element, Node};
use crate::error::Error;
use crate::event::Detail;

/// A staging buffer for children before they are moved into the new element.
///
/// Hooks receive the fragment and may push extra nodes; everything lands in
/// the element in one batch, so child-mutation hooks run once.
#[derive(Debug, Default)]
pub struct Fragment {
    nodes: Vec<Node>,
}

impl Fragment {
    /// Stages a node.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    /// The number of staged nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when nothing has been staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

/// A deferred child: runs against the partially built element and the
/// staging fragment, and may return one more node to stage.
pub type Hook = Box<dyn FnOnce(&Element, &mut Fragment) -> Option<Node>>;

/// One entry in a `create` child list.
pub enum Child {
    /// Skipped. Lets optional children flow through without branching.
    None,
    /// A node staged as-is.
    Node(Node),
    /// A hook run during construction.
    Hook(Hook),
}

impl Child {
    /// Wraps a construction hook.
    pub fn hook(f: impl FnOnce(&Element, &mut Fragment) -> Option<Node> + 'static) -> Self {
        Self::Hook(Box::new(f))
    }
}

impl core::fmt::Debug for Child {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Self::Hook(_) => f.write_str("Hook(..)"),
        }
    }
}

impl From<Element> for Child {
    fn from(element: Element) -> Self {
        Self::Node(Node::Element(element))
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Self::Node(Node::from(text))
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Self::Node(Node::from(text))
    }
}

impl From<Option<Element>> for Child {
    fn from(element: Option<Element>) -> Self {
        element.map_or(Self::None, Child::from)
    }
}

/// Configuration bag for [`Components::create`].
///
/// `prop` entries go through the element's update router (`$`-prefixed keys
/// reach reactive state); `state` entries go straight into the reactive
/// container, unprefixed.
#[derive(Default)]
pub struct Options {
    parent: Option<Element>,
    props: Vec<(String, StateValue)>,
    state: Vec<(String, StateValue)>,
}

impl Options {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the finished element to `parent` and sends it a `child`
    /// signal carrying the new element.
    #[must_use]
    pub fn parent(mut self, parent: &Element) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Adds an entry for the update router.
    #[must_use]
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.props.push((key.into(), value.into()));
        self
    }

    /// Adds a reactive state entry.
    #[must_use]
    pub fn state(mut self, key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.state.push((key.into(), value.into()));
        self
    }
}

impl core::fmt::Debug for Options {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Options")
            .field("parent", &self.parent.as_ref().map(Element::tag))
            .field("props", &self.props.len())
            .field("state", &self.state.len())
            .finish()
    }
}

impl Components {
    /// Builds a configured element from a `tag.class.class` selector.
    ///
    /// Children are staged in a [`Fragment`] and moved in as one batch;
    /// hooks run in list order against the partially built element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`] for an empty tag portion,
    /// [`Error::UnknownTag`] when synthesis fails, or the update router's
    /// error for an invalid property key.
    pub fn create(
        &self,
        selector: &str,
        options: Options,
        children: impl IntoIterator<Item = Child>,
    ) -> Result<Element, Error> {
        let mut parts = selector.split('.');
        let tag = parts.next().unwrap_or_default();
        if tag.is_empty() {
            return Err(Error::InvalidSelector(selector.to_owned()));
        }

        let element = Element::instantiate(self.get(tag)?);
        for class in parts.filter(|class| !class.is_empty()) {
            element.css().add(class);
        }

        element.update(options.props)?;
        element.reactive().update(options.state);

        let mut fragment = Fragment::default();
        for child in children {
            match child {
                Child::None => {}
                Child::Node(node) => fragment.push(node),
                Child::Hook(hook) => {
                    if let Some(node) = hook(&element, &mut fragment) {
                        fragment.push(node);
                    }
                }
            }
        }
        element.append_all(fragment.into_nodes());

        if let Some(parent) = options.parent {
            parent.append(element.clone());
            parent.send("child", Detail::Element(element.clone()));
        }
        Ok(element)
    }
}

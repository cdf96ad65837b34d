//! The retained element model.
//!
//! An [`Element`] is an instance of a composed type: it owns a private
//! [`Reactive`] container (with an owner back-reference), attributes, CSS
//! classes, inline styles and custom properties, ordered children, and its
//! signal listeners. Interaction with those surfaces goes through typed
//! accessor bridges ([`Attrs`], [`Css`], [`StyleVars`]) and the generic
//! [`Element::update`] router.
//!
//! Elements start detached and disconnected. [`Element::mount`] marks a
//! subtree connected — the headless analog of inserting it into a live
//! document — and appending to a connected parent connects the child
//! subtree, firing the `connected` lifecycle signal and flipping the
//! `connected` state key on each newly connected element.

use core::fmt;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use indexmap::{IndexMap, IndexSet};
use rollo_reactive::{Effects, Reactive, StateValue, Value};
use tracing::warn;

use crate::compose::ElementType;
use crate::error::Error;
use crate::event::{Detail, Event, Listener};

/// A node in the retained tree: an element or a run of text.
#[derive(Debug, Clone)]
pub enum Node {
    /// A composed element.
    Element(Element),
    /// A text node.
    Text(String),
}

impl Node {
    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in element.0.children.borrow().iter() {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

pub(crate) struct ElementInner {
    ty: Rc<ElementType>,
    reactive: Reactive,
    attributes: RefCell<IndexMap<String, String>>,
    classes: RefCell<IndexSet<String>>,
    styles: RefCell<IndexMap<String, String>>,
    children: RefCell<Vec<Node>>,
    parent: RefCell<Option<Weak<ElementInner>>>,
    listeners: RefCell<IndexMap<String, Vec<Listener>>>,
    connected: Cell<bool>,
}

/// An instantiated element of a composed type.
///
/// Handles are cheap to clone and compare by identity; all clones address
/// the same element.
#[derive(Clone)]
pub struct Element(pub(crate) Rc<ElementInner>);

impl Element {
    /// Instantiates an element of the given composed type: wires up the
    /// reactive container with an owner back-reference, then runs the
    /// type's initializers in chain order.
    #[must_use]
    pub fn instantiate(ty: Rc<ElementType>) -> Self {
        let element = Self(Rc::new(ElementInner {
            reactive: Reactive::named(ty.tag()),
            ty,
            attributes: RefCell::new(IndexMap::new()),
            classes: RefCell::new(IndexSet::new()),
            styles: RefCell::new(IndexMap::new()),
            children: RefCell::new(Vec::new()),
            parent: RefCell::new(None),
            listeners: RefCell::new(IndexMap::new()),
            connected: Cell::new(false),
        }));
        let owner = Rc::downgrade(&element.0);
        let owner: Weak<dyn Any> = owner;
        element.0.reactive.set_owner(owner);
        for initializer in element.0.ty.initializers() {
            initializer(&element);
        }
        element
    }

    /// The element's tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.0.ty.tag()
    }

    /// The composed type this element was instantiated from.
    #[must_use]
    pub fn ty(&self) -> &Rc<ElementType> {
        &self.0.ty
    }

    /// Identity comparison: `true` when both handles address one element.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Recovers the element owning a reactive container, if the container
    /// belongs to one. Lets effects reach the element whose state changed.
    #[must_use]
    pub fn of(reactive: &Reactive) -> Option<Self> {
        reactive
            .owner()?
            .downcast::<ElementInner>()
            .ok()
            .map(Self)
    }

    /// The element's reactive state container.
    #[must_use]
    pub fn reactive(&self) -> &Reactive {
        &self.0.reactive
    }

    /// The controller for the element's effect subscriptions.
    #[must_use]
    pub fn effects(&self) -> Effects {
        self.0.reactive.effects()
    }

    /// Reads one state item.
    #[must_use]
    pub fn state(&self, key: &str) -> Option<Value> {
        self.0.reactive.get(key)
    }

    /// Writes one state item through the diff/notify pipeline.
    pub fn set_state(&self, key: impl Into<String>, value: impl Into<StateValue>) -> bool {
        self.0.reactive.set(key, value)
    }

    // --- tree -----------------------------------------------------------

    /// The parent element, if attached.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().as_ref()?.upgrade().map(Self)
    }

    /// Snapshot of the child nodes.
    #[must_use]
    pub fn children(&self) -> Vec<Node> {
        self.0.children.borrow().clone()
    }

    /// Snapshot of the element children, skipping text nodes.
    #[must_use]
    pub fn child_elements(&self) -> Vec<Self> {
        self.0
            .children
            .borrow()
            .iter()
            .filter_map(|node| match node {
                Node::Element(element) => Some(element.clone()),
                Node::Text(_) => None,
            })
            .collect()
    }

    /// Appends one node and runs the type's child-mutation hooks.
    ///
    /// An element append that would cycle the tree (the element itself or
    /// one of its ancestors) is refused and logged.
    pub fn append(&self, node: impl Into<Node>) {
        if self.attach(node.into()) {
            self.run_mutation_hooks();
        }
    }

    /// Appends a batch of nodes, running the child-mutation hooks once for
    /// the whole batch. This is how the construction façade moves a staged
    /// fragment in: children observe a fully formed parent exactly once.
    pub fn append_all(&self, nodes: impl IntoIterator<Item = Node>) {
        let mut appended = false;
        for node in nodes {
            appended |= self.attach(node);
        }
        if appended {
            self.run_mutation_hooks();
        }
    }

    /// Detaches a child element. Returns `false` when it was not a child.
    pub fn remove(&self, child: &Self) -> bool {
        if !child.parent().is_some_and(|parent| parent.is_same(self)) {
            return false;
        }
        child.detach();
        true
    }

    /// Removes this element from its parent, if any.
    pub fn detach(&self) {
        let Some(parent) = self.parent() else {
            return;
        };
        parent.0.children.borrow_mut().retain(|node| match node {
            Node::Element(element) => !element.is_same(self),
            Node::Text(_) => true,
        });
        *self.0.parent.borrow_mut() = None;
        self.propagate_connected(false);
        parent.run_mutation_hooks();
    }

    fn attach(&self, node: Node) -> bool {
        if let Node::Element(child) = &node {
            if self.is_or_descends_from(child) {
                warn!(
                    tag = self.tag(),
                    child = child.tag(),
                    "refusing append that would cycle the tree"
                );
                return false;
            }
            child.detach();
            *child.0.parent.borrow_mut() = Some(Rc::downgrade(&self.0));
        }
        self.0.children.borrow_mut().push(node.clone());
        if let Node::Element(child) = &node {
            if self.is_connected() {
                child.propagate_connected(true);
            }
        }
        true
    }

    /// Returns `true` when `candidate` is this element or one of its
    /// ancestors.
    fn is_or_descends_from(&self, candidate: &Self) -> bool {
        let mut current = Some(self.clone());
        while let Some(element) = current {
            if element.is_same(candidate) {
                return true;
            }
            current = element.parent();
        }
        false
    }

    fn run_mutation_hooks(&self) {
        for hook in self.0.ty.mutation_hooks() {
            hook(self);
        }
    }

    /// Deep concatenated text content of the subtree.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in self.0.children.borrow().iter() {
            child.collect_text(&mut out);
        }
        out
    }

    /// Replaces all children with a single text node (empty text clears).
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        let removed = {
            let mut children = self.0.children.borrow_mut();
            let removed = std::mem::take(&mut *children);
            if !text.is_empty() {
                children.push(Node::Text(text));
            }
            removed
        };
        for node in removed {
            if let Node::Element(child) = node {
                *child.0.parent.borrow_mut() = None;
                child.propagate_connected(false);
            }
        }
        self.run_mutation_hooks();
    }

    // --- connectivity ---------------------------------------------------

    /// Returns `true` while the element is part of a mounted tree.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.0.connected.get()
    }

    /// Marks this subtree connected, as if inserted into a live document.
    /// Fires `connected` and sets the `connected` state key on each newly
    /// connected element, parents before children.
    pub fn mount(&self) {
        self.propagate_connected(true);
    }

    /// Marks this subtree disconnected.
    pub fn unmount(&self) {
        self.propagate_connected(false);
    }

    fn propagate_connected(&self, connected: bool) {
        if self.0.connected.get() == connected {
            return;
        }
        self.0.connected.set(connected);
        self.0.reactive.update([("connected", connected)]);
        self.send(if connected { "connected" } else { "disconnected" }, ());
        for child in self.child_elements() {
            child.propagate_connected(connected);
        }
    }

    // --- bridges --------------------------------------------------------

    /// The attribute bridge.
    #[must_use]
    pub const fn attrs(&self) -> Attrs<'_> {
        Attrs { element: self }
    }

    /// The CSS class bridge.
    #[must_use]
    pub const fn css(&self) -> Css<'_> {
        Css { element: self }
    }

    /// The scoped style-variable bridge (CSS custom properties).
    #[must_use]
    pub const fn vars(&self) -> StyleVars<'_> {
        StyleVars { element: self }
    }

    /// Reads an inline style property (kebab-cased lookup).
    #[must_use]
    pub fn style(&self, property: &str) -> Option<String> {
        self.0
            .styles
            .borrow()
            .get(&camel_to_kebab(property))
            .cloned()
    }

    /// Writes an inline style property. Falsy values clear it.
    pub fn set_style(&self, property: &str, value: impl Into<Value>) {
        let key = camel_to_kebab(property);
        let value = value.into();
        let mut styles = self.0.styles.borrow_mut();
        if value.is_truthy() {
            styles.insert(key, value.to_string());
        } else {
            styles.shift_remove(&key);
        }
    }

    /// Registers a signal listener. Write-only: listeners cannot be
    /// enumerated or removed individually.
    pub fn on(&self, ty: impl Into<String>, listener: impl Fn(&Event) + 'static) {
        self.0
            .listeners
            .borrow_mut()
            .entry(ty.into())
            .or_default()
            .push(Rc::new(listener));
    }

    /// Dispatches a named signal with an optional payload: the element's own
    /// listeners run first, then the signal bubbles through its ancestors.
    pub fn send(&self, ty: &str, detail: impl Into<Detail>) {
        let event = Event::new(ty, detail.into(), self.clone());
        let mut current = Some(self.clone());
        while let Some(element) = current {
            let listeners: Vec<Listener> = element
                .0
                .listeners
                .borrow()
                .get(ty)
                .cloned()
                .unwrap_or_default();
            for listener in &listeners {
                listener(&event);
            }
            current = element.parent();
        }
    }

    // --- the update router ----------------------------------------------

    /// Reads a property of the composed type.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<Value> {
        self.0
            .ty
            .property(key)
            .map(|property| property.read(self))
    }

    /// Writes a property of the composed type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] when the type has no such property, or
    /// the property setter's own error.
    pub fn set_property(&self, key: &str, value: impl Into<Value>) -> Result<(), Error> {
        let property = self
            .0
            .ty
            .property(key)
            .ok_or_else(|| Error::InvalidKey(key.to_owned()))?;
        property.write(self, value.into())
    }

    /// Applies a batch of mixed updates.
    ///
    /// Keys starting with `$` are stripped and routed into the reactive
    /// container (in one batch, after all plain keys). A plain key goes to
    /// the composed type's property of that name if one exists, otherwise to
    /// the style table if it names a style property.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for a key with no valid target, or a
    /// property setter's error. Keys before the failing one have already
    /// been applied.
    pub fn update<I, K, V>(&self, props: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<StateValue>,
    {
        let mut state: Vec<(String, StateValue)> = Vec::new();
        for (key, value) in props {
            let key = key.into();
            let value = value.into();
            if let Some(stripped) = key.strip_prefix('$') {
                state.push((stripped.to_owned(), value));
                continue;
            }
            let value = value.force();
            if let Some(property) = self.0.ty.property(&key) {
                property.write(self, value)?;
            } else if is_style_property(&key) {
                self.set_style(&key, value);
            } else {
                return Err(Error::InvalidKey(key));
            }
        }
        self.0.reactive.update(state);
        Ok(())
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag())
            .field("classes", &self.0.classes.borrow())
            .field("connected", &self.is_connected())
            .field("children", &self.0.children.borrow().len())
            .finish()
    }
}

/// Typed accessor over an element's attributes.
///
/// Names are kebab-cased on the way in (`readOnly` ↔ `read-only`). Values
/// follow the presence/absence convention: `true` or an empty string store a
/// value-less attribute read back as `true`; `false` or `Null` remove the
/// attribute; numeric strings read back as numbers.
#[derive(Debug, Clone, Copy)]
pub struct Attrs<'a> {
    element: &'a Element,
}

impl Attrs<'_> {
    /// Reads an attribute. `None` means absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        let key = camel_to_kebab(name);
        let attributes = self.element.0.attributes.borrow();
        let raw = attributes.get(&key)?;
        if raw.is_empty() {
            return Some(Value::Bool(true));
        }
        if let Ok(number) = raw.parse::<f64>() {
            return Some(Value::Num(number));
        }
        Some(Value::Str(raw.clone()))
    }

    /// Returns `true` when the attribute is present.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.element
            .0
            .attributes
            .borrow()
            .contains_key(&camel_to_kebab(name))
    }

    /// Writes an attribute following the coercion rules above.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAttr`] for list or map values.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<(), Error> {
        let key = camel_to_kebab(name);
        let mut attributes = self.element.0.attributes.borrow_mut();
        match value.into() {
            Value::Null | Value::Bool(false) => {
                attributes.shift_remove(&key);
            }
            Value::Bool(true) => {
                attributes.insert(key, String::new());
            }
            Value::Str(text) => {
                attributes.insert(key, text);
            }
            value @ Value::Num(_) => {
                attributes.insert(key, value.to_string());
            }
            value @ (Value::List(_) | Value::Map(_)) => {
                return Err(Error::InvalidAttr { name: key, value });
            }
        }
        Ok(())
    }

    /// Removes an attribute.
    pub fn remove(&self, name: &str) {
        self.element
            .0
            .attributes
            .borrow_mut()
            .shift_remove(&camel_to_kebab(name));
    }

    /// The present attribute names, in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.element.0.attributes.borrow().keys().cloned().collect()
    }
}

/// Typed accessor over an element's CSS class membership.
#[derive(Debug, Clone, Copy)]
pub struct Css<'a> {
    element: &'a Element,
}

impl Css<'_> {
    /// Returns `true` when the class is present.
    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.element.0.classes.borrow().contains(class)
    }

    /// Adds or removes a class.
    pub fn set(&self, class: &str, present: bool) {
        if present {
            self.add(class);
        } else {
            self.remove(class);
        }
    }

    /// Adds a class.
    pub fn add(&self, class: &str) {
        self.element.0.classes.borrow_mut().insert(class.to_owned());
    }

    /// Removes a class.
    pub fn remove(&self, class: &str) {
        self.element.0.classes.borrow_mut().shift_remove(class);
    }

    /// The present classes, in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.element.0.classes.borrow().iter().cloned().collect()
    }
}

/// Typed accessor over an element's scoped style variables (CSS custom
/// properties). Reads see only inline values; there is no computed cascade.
#[derive(Debug, Clone, Copy)]
pub struct StyleVars<'a> {
    element: &'a Element,
}

impl StyleVars<'_> {
    /// Reads a custom property (without the `--` prefix).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.element.0.styles.borrow().get(&var_key(name)).cloned()
    }

    /// Writes a custom property; falsy values remove it.
    pub fn set(&self, name: &str, value: impl Into<Value>) {
        let key = var_key(name);
        let value = value.into();
        let mut styles = self.element.0.styles.borrow_mut();
        if value.is_truthy() {
            styles.insert(key, value.to_string());
        } else {
            styles.shift_remove(&key);
        }
    }
}

fn var_key(name: &str) -> String {
    format!("--{name}")
}

/// Converts a camelCase property name to its kebab-case attribute form.
fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Inline style properties the update router accepts, camelCased the way
/// update keys arrive. Stored and read back kebab-cased.
const STYLE_PROPERTIES: &[&str] = &[
    "alignItems",
    "alignSelf",
    "background",
    "backgroundColor",
    "border",
    "borderRadius",
    "bottom",
    "boxShadow",
    "color",
    "cursor",
    "display",
    "flex",
    "flexDirection",
    "flexGrow",
    "flexWrap",
    "fontFamily",
    "fontSize",
    "fontStyle",
    "fontWeight",
    "gap",
    "height",
    "justifyContent",
    "left",
    "lineHeight",
    "margin",
    "maxHeight",
    "maxWidth",
    "minHeight",
    "minWidth",
    "opacity",
    "outline",
    "overflow",
    "padding",
    "position",
    "right",
    "textAlign",
    "textDecoration",
    "top",
    "transform",
    "transition",
    "visibility",
    "whiteSpace",
    "width",
    "zIndex",
];

fn is_style_property(key: &str) -> bool {
    STYLE_PROPERTIES.binary_search(&key).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::Components;

    fn element(tag: &str) -> Element {
        Element::instantiate(Components::default().get(tag).expect("known tag"))
    }

    #[test]
    fn instantiation_marks_and_wires_ownership() {
        let div = element("div");
        assert_eq!(div.attrs().get("webComponent"), Some(Value::Bool(true)));
        assert!(div.attrs().has("web-component"));

        let recovered = Element::of(div.reactive()).expect("owner is alive");
        assert!(recovered.is_same(&div));
    }

    #[test]
    fn attribute_bridge_coerces_names_and_values() {
        let div = element("div");
        let attrs = div.attrs();

        attrs.set("dataCount", 3).expect("number attr");
        assert_eq!(attrs.get("dataCount"), Some(Value::Num(3.0)));
        assert!(attrs.has("data-count"));

        attrs.set("label", "hello").expect("string attr");
        assert_eq!(attrs.get("label"), Some(Value::from("hello")));

        attrs.set("dataCount", false).expect("removal");
        assert_eq!(attrs.get("dataCount"), None);

        attrs.set("flagged", "").expect("presence attr");
        assert_eq!(attrs.get("flagged"), Some(Value::Bool(true)));

        assert!(matches!(
            attrs.set("bad", Value::List(Vec::new())),
            Err(Error::InvalidAttr { .. })
        ));
    }

    #[test]
    fn css_bridge_tracks_membership() {
        let div = element("div");
        let css = div.css();
        css.add("active");
        assert!(css.contains("active"));
        css.set("active", false);
        assert!(!css.contains("active"));
    }

    #[test]
    fn style_vars_set_and_clear() {
        let div = element("div");
        div.vars().set("accent", "blue");
        assert_eq!(div.vars().get("accent").as_deref(), Some("blue"));
        div.vars().set("accent", Value::Null);
        assert_eq!(div.vars().get("accent"), None);
    }

    #[test]
    fn update_routes_state_properties_and_styles() {
        let div = element("div");
        div.update([
            ("$count", Value::from(1)),
            ("title", Value::from("greeting")),
            ("color", Value::from("red")),
        ])
        .expect("all keys valid");

        assert_eq!(div.state("count"), Some(Value::from(1)));
        assert_eq!(div.attrs().get("title"), Some(Value::from("greeting")));
        assert_eq!(div.style("color").as_deref(), Some("red"));

        assert!(matches!(
            div.update([("noSuchKey", 1)]),
            Err(Error::InvalidKey(key)) if key == "noSuchKey"
        ));
    }

    #[test]
    fn text_property_reads_and_writes_content() {
        let div = element("div");
        div.set_text("hello");
        assert_eq!(div.text(), "hello");
        assert_eq!(div.property("text"), Some(Value::from("hello")));

        div.update([("text", "rewritten")]).expect("text property");
        assert_eq!(div.text(), "rewritten");
    }

    #[test]
    fn text_is_collected_across_the_subtree() {
        let outer = element("div");
        let inner = element("span");
        inner.set_text("world");
        outer.append("hello ");
        outer.append(inner);
        assert_eq!(outer.text(), "hello world");
    }

    #[test]
    fn mount_connects_subtree_and_updates_state() {
        let parent = element("div");
        let child = element("span");
        parent.append(child.clone());

        assert!(!child.is_connected());
        parent.mount();
        assert!(parent.is_connected());
        assert!(child.is_connected());
        assert_eq!(child.state("connected"), Some(Value::Bool(true)));

        parent.unmount();
        assert_eq!(child.state("connected"), Some(Value::Bool(false)));
    }

    #[test]
    fn appending_to_connected_parent_fires_lifecycle() {
        let parent = element("div");
        parent.mount();

        let child = element("span");
        let connected = Rc::new(Cell::new(0));
        let seen = connected.clone();
        child.on("connected", move |_| seen.set(seen.get() + 1));

        parent.append(child.clone());
        assert_eq!(connected.get(), 1);
        assert_eq!(child.state("connected"), Some(Value::Bool(true)));

        child.detach();
        assert!(!child.is_connected());
        assert!(parent.child_elements().is_empty());
    }

    #[test]
    fn cyclic_appends_are_refused() {
        let parent = element("div");
        let child = element("span");
        parent.append(child.clone());

        child.append(parent.clone());
        assert!(parent.parent().is_none());
        assert!(child.child_elements().is_empty());

        parent.append(parent.clone());
        assert_eq!(parent.child_elements().len(), 1);

        let grandchild = element("span");
        child.append(grandchild.clone());
        grandchild.append(parent.clone());
        assert!(parent.parent().is_none());

        // The tree still walks cleanly afterwards.
        grandchild.set_text("leaf");
        assert_eq!(parent.text(), "leaf");
    }

    #[test]
    fn signals_bubble_to_ancestors() {
        let parent = element("div");
        let child = element("span");
        parent.append(child.clone());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        parent.on("ping", move |event| {
            log.borrow_mut().push(event.target().tag().to_owned());
        });

        child.send("ping", ());
        assert_eq!(seen.borrow().as_slice(), ["span"]);
    }

    #[test]
    fn container_capability_tracks_child_population() {
        let div = element("div");
        assert_eq!(div.state("has_children"), Some(Value::Bool(false)));
        assert_eq!(div.state("has_content"), Some(Value::Bool(false)));

        div.append("just text");
        assert_eq!(div.state("has_children"), Some(Value::Bool(false)));
        assert_eq!(div.state("has_content"), Some(Value::Bool(true)));

        let child = element("span");
        div.append(child.clone());
        assert_eq!(div.state("has_children"), Some(Value::Bool(true)));

        div.set_text("");
        assert_eq!(div.state("has_children"), Some(Value::Bool(false)));
        assert_eq!(div.state("has_content"), Some(Value::Bool(false)));
    }

    #[test]
    fn batch_append_runs_mutation_hooks_once() {
        let div = element("div");
        let changes = Rc::new(Cell::new(0));
        let seen = changes.clone();
        div.on("slotchange", move |_| seen.set(seen.get() + 1));

        div.append_all([
            Node::from("a"),
            Node::from(element("span")),
            Node::from("b"),
        ]);
        assert_eq!(changes.get(), 1);
        assert_eq!(div.children().len(), 3);
    }

    #[test]
    fn reflected_property_roundtrips_through_attributes() {
        let input = element("input");
        input
            .update([("name", Value::from("x")), ("required", Value::Bool(true))])
            .expect("form props");

        assert_eq!(input.attrs().get("required"), Some(Value::Bool(true)));
        assert_eq!(input.property("required"), Some(Value::Bool(true)));

        input.update([("required", false)]).expect("removal");
        assert!(!input.attrs().has("required"));
        assert_eq!(input.property("required"), Some(Value::Null));
    }
}

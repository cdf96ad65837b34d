//! Capability-based composition of element types.
//!
//! An element "class" is synthesized per tag by applying a fixed reactive
//! base and then folding an ordered list of conditionally applicable
//! capability transforms onto it. A transform is a pure function from
//! [`TypeBuilder`] to [`TypeBuilder`]; there is no priority or dependency
//! reordering between capabilities, only registration order, so authors are
//! responsible for compatible ordering.
//!
//! Synthesis for a tag happens at most once: the finished [`ElementType`] is
//! registered against the tag (the element-definition step) and cached, and
//! every later request returns the same `Rc`.

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use rollo_reactive::Value;
use tracing::{debug, warn};

use crate::element::Element;
use crate::error::Error;
use crate::tag::{self, GLOBAL_PROPS, TagInfo};

/// A typed accessor pair for one named property of a composed type.
///
/// Properties are the router targets of [`Element::update`]: an update key
/// that names a property goes through its setter instead of the style table.
#[derive(Clone)]
pub struct Property {
    get: Rc<dyn Fn(&Element) -> Value>,
    set: Rc<dyn Fn(&Element, Value) -> Result<(), Error>>,
}

impl Property {
    /// Builds a property from explicit getter and setter closures.
    pub fn new(
        get: impl Fn(&Element) -> Value + 'static,
        set: impl Fn(&Element, Value) -> Result<(), Error> + 'static,
    ) -> Self {
        Self {
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    /// Builds a property reflected through the attribute bridge: reads and
    /// writes go to the attribute of the same (kebab-cased) name.
    #[must_use]
    pub fn reflected(name: &'static str) -> Self {
        Self::new(
            move |element| element.attrs().get(name).unwrap_or_default(),
            move |element, value| element.attrs().set(name, value),
        )
    }

    pub(crate) fn read(&self, element: &Element) -> Value {
        (self.get)(element)
    }

    pub(crate) fn write(&self, element: &Element, value: Value) -> Result<(), Error> {
        (self.set)(element, value)
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Property")
    }
}

type Initializer = Rc<dyn Fn(&Element)>;
type MutationHook = Rc<dyn Fn(&Element)>;

/// A synthesized element type for one tag.
///
/// Carries the capability chain that produced it, the property table, the
/// initializers run when an element is instantiated, and the hooks run after
/// each batch of child mutations.
pub struct ElementType {
    tag: &'static TagInfo,
    chain: Vec<String>,
    properties: IndexMap<String, Property>,
    initializers: Vec<Initializer>,
    mutation_hooks: Vec<MutationHook>,
}

impl ElementType {
    /// The tag this type was synthesized for.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.tag.name
    }

    /// The tag's static description.
    #[must_use]
    pub const fn tag_info(&self) -> &'static TagInfo {
        self.tag
    }

    /// The names of the applied transforms, base first.
    #[must_use]
    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    /// Returns `true` when the composed type exposes the named property.
    #[must_use]
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub(crate) fn property(&self, key: &str) -> Option<&Property> {
        self.properties.get(key)
    }

    pub(crate) fn initializers(&self) -> &[Initializer] {
        &self.initializers
    }

    pub(crate) fn mutation_hooks(&self) -> &[MutationHook] {
        &self.mutation_hooks
    }
}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementType")
            .field("tag", &self.tag.name)
            .field("chain", &self.chain)
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// The mutable shape of an element type while transforms fold over it.
///
/// Each capability receives the builder, adds its slice of behavior, and
/// returns it; the engine seals the result into an [`ElementType`].
pub struct TypeBuilder {
    tag: &'static TagInfo,
    chain: Vec<String>,
    properties: IndexMap<String, Property>,
    initializers: Vec<Initializer>,
    mutation_hooks: Vec<MutationHook>,
}

impl TypeBuilder {
    fn new(tag: &'static TagInfo) -> Self {
        Self {
            tag,
            chain: Vec::new(),
            properties: IndexMap::new(),
            initializers: Vec::new(),
            mutation_hooks: Vec::new(),
        }
    }

    /// The tag being composed; transforms may branch on its flags.
    #[must_use]
    pub const fn tag(&self) -> &'static TagInfo {
        self.tag
    }

    /// Adds (or overrides) a named property.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, property: Property) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    /// Adds a property reflected through the attribute bridge.
    #[must_use]
    pub fn reflect(self, name: &'static str) -> Self {
        self.property(name, Property::reflected(name))
    }

    /// Adds a closure run when an element of this type is instantiated.
    #[must_use]
    pub fn initializer(mut self, f: impl Fn(&Element) + 'static) -> Self {
        self.initializers.push(Rc::new(f));
        self
    }

    /// Adds a hook run after each batch of child mutations.
    #[must_use]
    pub fn on_children_changed(mut self, f: impl Fn(&Element) + 'static) -> Self {
        self.mutation_hooks.push(Rc::new(f));
        self
    }

    fn push_chain(&mut self, name: &str) {
        if self.chain.iter().any(|existing| existing == name) {
            // Non-fatal: composition proceeds, traceability suffers.
            warn!(
                name,
                tag = self.tag.name,
                "duplicate capability name in composition chain"
            );
        }
        self.chain.push(name.to_owned());
    }

    fn finish(self) -> ElementType {
        ElementType {
            tag: self.tag,
            chain: self.chain,
            properties: self.properties,
            initializers: self.initializers,
            mutation_hooks: self.mutation_hooks,
        }
    }
}

impl fmt::Debug for TypeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeBuilder")
            .field("tag", &self.tag.name)
            .field("chain", &self.chain)
            .finish()
    }
}

/// A pure element-type transform contributed by a capability.
pub type Transform = Rc<dyn Fn(TypeBuilder) -> TypeBuilder>;

type TagCondition = Rc<dyn Fn(&TagInfo) -> bool>;

struct Capability {
    name: String,
    condition: TagCondition,
    transform: Transform,
}

/// Ordered registry of conditional capability factories.
///
/// Registration order is composition order; duplicates are allowed and all
/// matching entries are applied.
#[derive(Default)]
pub struct Factories {
    entries: RefCell<Vec<Capability>>,
}

impl Factories {
    /// Appends a capability factory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnnamedCapability`] for an empty name; names identify
    /// a capability's slice in the composition chain.
    pub fn add(
        &self,
        name: impl Into<String>,
        condition: impl Fn(&TagInfo) -> bool + 'static,
        transform: impl Fn(TypeBuilder) -> TypeBuilder + 'static,
    ) -> Result<(), Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::UnnamedCapability);
        }
        self.entries.borrow_mut().push(Capability {
            name,
            condition: Rc::new(condition),
            transform: Rc::new(transform),
        });
        Ok(())
    }

    /// Returns the transforms applicable to `tag`, in registration order.
    /// Pure in the registry contents and the tag; composition caching relies
    /// on this.
    #[must_use]
    pub fn get(&self, tag: &TagInfo) -> Vec<(String, Transform)> {
        self.entries
            .borrow()
            .iter()
            .filter(|capability| (capability.condition)(tag))
            .map(|capability| (capability.name.clone(), capability.transform.clone()))
            .collect()
    }

    /// Returns the number of registered factories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` when no factories are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl fmt::Debug for Factories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .entries
            .borrow()
            .iter()
            .map(|capability| capability.name.clone())
            .collect();
        f.debug_tuple("Factories").field(&names).finish()
    }
}

/// The composition engine: synthesizes, caches, and defines element types.
///
/// [`Components::default`] ships the built-in capability set (`component`,
/// `container`, `text`); [`Components::bare`] starts with an empty factory
/// registry, which is mostly useful in tests. Registration is expected to
/// happen during an initialization phase, before the first `get`/`create`
/// for an affected tag — a type synthesized earlier never picks up
/// later-registered capabilities.
#[derive(Debug)]
pub struct Components {
    definitions: RefCell<IndexMap<&'static str, Rc<ElementType>>>,
    factories: Factories,
}

impl Default for Components {
    fn default() -> Self {
        let components = Self::bare();
        crate::capability::register_builtins(&components.factories);
        components
    }
}

impl Components {
    /// Creates an engine with no capability factories registered.
    #[must_use]
    pub fn bare() -> Self {
        Self {
            definitions: RefCell::new(IndexMap::new()),
            factories: Factories::default(),
        }
    }

    /// The capability factory registry.
    #[must_use]
    pub const fn factories(&self) -> &Factories {
        &self.factories
    }

    /// Returns `true` once a type has been defined for the tag.
    #[must_use]
    pub fn is_defined(&self, tag: &str) -> bool {
        self.definitions.borrow().contains_key(tag)
    }

    /// Returns the element type for a tag, synthesizing and defining it on
    /// first request and serving the cached type afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTag`] when the tag has no native base.
    pub fn get(&self, tag: &str) -> Result<Rc<ElementType>, Error> {
        if let Some(ty) = self.definitions.borrow().get(tag) {
            return Ok(ty.clone());
        }
        let info = tag::lookup(tag).ok_or_else(|| Error::UnknownTag(tag.to_owned()))?;
        let ty = Rc::new(self.author(info));
        debug!(tag, chain = ?ty.chain(), "defined element type");
        self.definitions.borrow_mut().insert(info.name, ty.clone());
        Ok(ty)
    }

    /// Folds the reactive base and the applicable capability transforms over
    /// the native base, in registration order.
    fn author(&self, tag: &'static TagInfo) -> ElementType {
        let mut builder = base(TypeBuilder::new(tag));
        builder.push_chain("base");
        for (name, transform) in self.factories.get(tag) {
            builder = transform(builder);
            builder.push_chain(&name);
        }
        builder.finish()
    }
}

/// The fixed reactive-base transform applied to every native base before any
/// capability runs.
///
/// The structural wiring it stands for — the per-element reactive container,
/// the `connected` lifecycle state and signals, the attribute/css/style/
/// event bridges and the `update` router — lives on [`Element`] itself; the
/// transform contributes the instantiation marker and the chain's first
/// entry.
fn base(builder: TypeBuilder) -> TypeBuilder {
    builder.initializer(|element| {
        // Every composed element identifies itself in its attributes.
        let _ = element.attrs().set("webComponent", true);
    })
}

/// Reflects the global property set plus the tag's own reflected properties.
/// Registered as the always-applicable `component` capability.
pub(crate) fn reflect_tag_properties(builder: TypeBuilder) -> TypeBuilder {
    let mut builder = builder;
    for name in GLOBAL_PROPS.iter().copied() {
        builder = builder.reflect(name);
    }
    for name in builder.tag().props.iter().copied() {
        builder = builder.reflect(name);
    }
    builder
}

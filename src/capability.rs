//! The built-in capability factories.
//!
//! [`Components::default`](crate::Components::default) registers these three
//! in order, so every composed chain starts `base, component, ...`:
//!
//! - `component` (every tag): reflects the global property set plus the
//!   tag's own reflected properties through the attribute bridge.
//! - `container` (container tags): tracks the child population in reactive
//!   state (`has_children` for element children, `has_content` for any
//!   children at all) and sends `slotchange` after each mutation batch.
//! - `text` (non-void tags): a `text` property over the subtree's deep text
//!   content; writing replaces all children with one text node.

use rollo_reactive::Value;

use crate::compose::{self, Factories, Property};
use crate::element::Node;

pub(crate) fn register_builtins(factories: &Factories) {
    let registered = factories
        .add("component", |_| true, compose::reflect_tag_properties)
        .and_then(|()| {
            factories.add(
                "container",
                |tag| tag.container,
                |builder| {
                    builder
                        .initializer(|element| {
                            element.reactive().update([
                                ("has_children", false),
                                ("has_content", false),
                            ]);
                        })
                        .on_children_changed(|element| {
                            let children = element.children();
                            let has_children = children
                                .iter()
                                .any(|node| matches!(node, Node::Element(_)));
                            element.reactive().update([
                                ("has_children", has_children),
                                ("has_content", !children.is_empty()),
                            ]);
                            element.send("slotchange", ());
                        })
                },
            )
        })
        .and_then(|()| {
            factories.add(
                "text",
                |tag| tag.supports_text(),
                |builder| {
                    builder.property(
                        "text",
                        Property::new(
                            |element| Value::Str(element.text()),
                            |element, value| {
                                element.set_text(value.to_string());
                                Ok(())
                            },
                        ),
                    )
                },
            )
        });
    debug_assert!(registered.is_ok(), "builtin capability names are non-empty");
}

//! End-to-end behavior of the construction façade on a fresh engine: type
//! synthesis, selector handling, the update router, effects reacting to
//! lifecycle state, and signal flow through the tree.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rollo::{Child, Components, Condition, Element, Error, Options, Value, children, state};

fn engine() -> Components {
    Components::default()
}

#[test]
fn create_configures_classes_children_and_text() {
    let components = engine();
    let inner = components
        .create("span", Options::new(), children!["hi"])
        .expect("span");
    let card = components
        .create("div.foo.bar", Options::new(), children![inner.clone()])
        .expect("div");

    assert_eq!(card.tag(), "div");
    assert_eq!(card.css().list(), ["foo", "bar"]);
    assert_eq!(card.child_elements().len(), 1);
    assert!(card.child_elements()[0].is_same(&inner));
    assert_eq!(card.text(), "hi");
}

#[test]
fn child_signal_carries_the_appended_element() {
    let components = engine();
    let host = components.create("div", Options::new(), []).expect("host");

    let seen: Rc<RefCell<Vec<Element>>> = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    host.on("child", move |event| {
        log.borrow_mut()
            .push(event.detail().as_element().expect("element payload").clone());
    });

    // The signal names the outer element handed to the parent, never the
    // grandchildren assembled inside it.
    let inner = components.create("span", Options::new(), []).expect("span");
    let outer = components
        .create("div", Options::new().parent(&host), children![inner])
        .expect("outer");

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].is_same(&outer));
}

#[test]
fn attribute_bridge_handles_presence_and_removal() {
    let components = engine();
    let input = components
        .create(
            "input",
            Options::new().prop("name", "email").prop("required", true),
            [],
        )
        .expect("input");

    assert_eq!(input.attrs().get("name"), Some(Value::from("email")));
    assert_eq!(input.attrs().get("required"), Some(Value::Bool(true)));

    input.update([("required", false)]).expect("removal");
    assert!(!input.attrs().has("required"));

    input.update([("required", Value::Null)]).expect("null removal");
    assert!(!input.attrs().has("required"));
}

#[test]
fn update_rejects_keys_without_a_target() {
    let components = engine();
    let div = components.create("div", Options::new(), []).expect("div");
    assert!(matches!(
        div.update([("definitelyNotAProperty", 1)]),
        Err(Error::InvalidKey(key)) if key == "definitelyNotAProperty"
    ));
}

#[test]
fn repeated_create_reuses_the_defined_type() {
    let components = engine();
    let first = components.create("div", Options::new(), []).expect("div");
    let second = components.create("div", Options::new(), []).expect("div");
    assert!(Rc::ptr_eq(first.ty(), second.ty()));
}

#[test]
fn container_state_reacts_to_population() {
    let components = engine();
    let div = components
        .create("div", Options::new(), children!["text only"])
        .expect("div");

    assert_eq!(div.state("has_content"), Some(Value::Bool(true)));
    assert_eq!(div.state("has_children"), Some(Value::Bool(false)));

    let span = components.create("span", Options::new(), []).expect("span");
    div.append(span);
    assert_eq!(div.state("has_children"), Some(Value::Bool(true)));
}

#[test]
fn staged_children_fire_mutation_hooks_once() {
    let components = engine();
    let host = components.create("div", Options::new(), []).expect("host");

    let batches = Rc::new(Cell::new(0));
    let seen = batches.clone();
    host.on("slotchange", move |_| seen.set(seen.get() + 1));

    host.append_all([
        rollo::Node::from("a"),
        rollo::Node::from("b"),
        rollo::Node::from("c"),
    ]);
    assert_eq!(batches.get(), 1);
}

#[test]
fn mount_drives_the_connected_lifecycle() {
    let components = engine();
    let child = components.create("span", Options::new(), []).expect("span");
    let root = components
        .create("div", Options::new(), children![child.clone()])
        .expect("div");

    let transitions = Rc::new(RefCell::new(Vec::new()));
    let log = transitions.clone();
    child.effects().add(
        move |changes, _| {
            if let Some(value) = changes.current("connected") {
                log.borrow_mut().push(value.clone());
            }
        },
        "connected",
    );

    root.mount();
    root.unmount();
    assert_eq!(
        transitions.borrow().as_slice(),
        [Value::Bool(true), Value::Bool(false)]
    );
}

#[test]
fn effects_observe_state_seeded_through_options() {
    let components = engine();
    let element = components
        .create("div", Options::new().state("count", 0), [])
        .expect("div");

    let observed = Rc::new(RefCell::new(Vec::new()));
    let log = observed.clone();
    element.effects().add(
        move |changes, _| {
            if let Some(value) = changes.current("count") {
                log.borrow_mut().push(value.clone());
            }
        },
        "count",
    );

    element.set_state("count", 1);
    element.set_state("count", 1); // no-op, no notification
    element.reactive().update(state![count: 2, label: "two"]);

    assert_eq!(
        observed.borrow().as_slice(),
        [Value::from(0), Value::from(1), Value::from(2)]
    );
}

#[test]
fn effect_reaches_its_element_through_the_owner() {
    let components = engine();
    let element = components
        .create("p", Options::new().state("message", "start"), [])
        .expect("p");

    element.effects().add(
        |changes, reactive| {
            if let Some(Value::Str(message)) = changes.current("message") {
                if let Some(owner) = Element::of(reactive) {
                    owner.set_text(message.clone());
                }
            }
        },
        "message",
    );
    assert_eq!(element.text(), "start");

    element.set_state("message", "updated");
    assert_eq!(element.text(), "updated");
}

#[test]
fn predicate_conditions_gate_on_the_record() {
    let components = engine();
    let element = components.create("div", Options::new(), []).expect("div");

    let fired = Rc::new(Cell::new(0));
    let seen = fired.clone();
    element.effects().add(
        move |_, _| seen.set(seen.get() + 1),
        Condition::predicate(|changes| {
            changes.current("count").and_then(Value::as_num) > Some(10.0)
        }),
    );

    element.set_state("count", 5);
    assert_eq!(fired.get(), 0);
    element.set_state("count", 11);
    assert_eq!(fired.get(), 1);
}

#[test]
fn custom_capability_extends_composition() {
    let components = engine();
    components
        .factories()
        .add(
            "tooltip",
            |tag| tag.container,
            |builder| {
                builder.initializer(|element| {
                    element.reactive().update([("tooltip_visible", false)]);
                })
            },
        )
        .expect("named capability");

    let div = components.create("div", Options::new(), []).expect("div");
    assert_eq!(
        div.ty().chain(),
        ["base", "component", "container", "text", "tooltip"]
    );
    assert_eq!(div.state("tooltip_visible"), Some(Value::Bool(false)));

    let input = components.create("input", Options::new(), []).expect("input");
    assert_eq!(input.ty().chain(), ["base", "component"]);
}

#[test]
fn hooks_run_in_child_list_order() {
    let components = engine();
    let element = components
        .create(
            "div",
            Options::new(),
            [
                Child::from("first "),
                Child::hook(|_, fragment| {
                    fragment.push("second ");
                    None
                }),
                Child::from("third"),
            ],
        )
        .expect("div");
    assert_eq!(element.text(), "first second third");
}

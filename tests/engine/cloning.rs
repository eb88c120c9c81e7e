//! Integration tests for the cloner
//!
//! Tests partition preservation, shallow sharing and identifiers.

use std::collections::HashSet;

use wraptrace_engine::{Cloned, Cloner, clone::ID_PROPERTY};
use wraptrace_foundation::{Object, Origin, Value};

fn shape() -> Object {
    let proto = Object::with_class("Shape")
        .with("sides", 0)
        .with_method("area", |_, _| Ok(Value::from(0)));
    Object::with_prototype(proto)
        .with("sides", 4)
        .with("origin", Object::with_class("Point").with("x", 0))
        .with("points", Value::array([1, 2, 3]))
}

#[test]
fn visible_properties_match_target() {
    let target = shape();
    let Cloned { wrapped, .. } = Cloner::default().clone_object(&target);
    for (name, origin) in target.keys() {
        assert_eq!(wrapped.resolve(&name).map(|(_, o)| o), Some(origin), "{name}");
        assert_eq!(wrapped.get(&name), target.get(&name), "{name}");
    }
}

#[test]
fn shadowed_prototype_values_stay_shadowed() {
    let target = shape();
    let Cloned { wrapped, .. } = Cloner::default().clone_object(&target);
    assert_eq!(wrapped.resolve("sides"), Some((Value::from(4), Origin::Own)));
}

#[test]
fn nested_objects_are_shared() {
    let target = shape();
    let Cloned { wrapped, .. } = Cloner::default().clone_object(&target);
    let origin = wrapped.get("origin").unwrap();
    origin.as_object().unwrap().set("x", 9);
    let seen = target.get("origin").unwrap();
    assert_eq!(seen.as_object().unwrap().get("x"), Some(Value::from(9)));
}

#[test]
fn writes_to_the_clone_do_not_reach_the_target() {
    let target = shape();
    let Cloned { wrapped, .. } = Cloner::default().clone_object(&target);
    wrapped.set("sides", 5);
    wrapped.set("extra", true);
    assert_eq!(target.get("sides"), Some(Value::from(4)));
    assert!(!target.has("extra"));
}

#[test]
fn hidden_target_properties_are_left_behind() {
    let target = shape();
    target.define_hidden("internal", 1);
    let Cloned { wrapped, .. } = Cloner::default().clone_object(&target);
    assert!(!wrapped.has("internal"));
}

#[test]
fn identifiers_are_unique_and_stored_on_the_clone() {
    let cloner = Cloner::default();
    let target = shape();
    let ids: HashSet<_> = (0..100).map(|_| cloner.clone_object(&target).id).collect();
    assert_eq!(ids.len(), 100);

    let Cloned { id, wrapped } = cloner.clone_object(&target);
    assert_eq!(wrapped.get(ID_PROPERTY), Some(Value::from(id.as_str())));
}

//! Integration tests for property classification
//!
//! Tests codes, precedence, sentinels and the property index.

use proptest::prelude::*;
use wraptrace_engine::{Classification, OwnFilter, PropertyIndex, classify};
use wraptrace_foundation::{Object, Opaque, Value, ValueKind};

fn fixture() -> Object {
    let proto = Object::with_class("Fixture")
        .with_method("inherited_fn", |_, _| Ok(Value::Undefined))
        .with("inherited_obj", Object::new())
        .with("inherited_arr", Value::array([1]))
        .with("inherited_str", "s")
        .with("inherited_num", 1)
        .with("inherited_bool", true)
        .with("inherited_undef", Value::Undefined)
        .with("inherited_null", Value::Null)
        .with("inherited_host", Opaque::new(1u64));
    Object::with_prototype(proto)
        .with_method("own_fn", |_, _| Ok(Value::Undefined))
        .with("own_obj", Object::new())
        .with("own_arr", Value::array([1]))
        .with("own_str", "s")
        .with("own_num", 1)
        .with("own_bool", true)
        .with("own_undef", Value::Undefined)
        .with("own_null", Value::Null)
        .with("own_host", Opaque::new(1u64))
}

// =============================================================================
// Codes
// =============================================================================

#[test]
fn all_eighteen_codes() {
    let obj = fixture();
    let suffixes = ["fn", "obj", "arr", "str", "num", "bool", "undef", "null", "host"];
    for (i, suffix) in suffixes.iter().enumerate() {
        let own = classify(Some(&obj), &format!("own_{suffix}")).code();
        let inherited = classify(Some(&obj), &format!("inherited_{suffix}")).code();
        assert_eq!(usize::from(own), i * 2, "own_{suffix}");
        assert_eq!(usize::from(inherited), i * 2 + 1, "inherited_{suffix}");
    }
}

#[test]
fn arrays_and_null_take_precedence_over_object() {
    let obj = fixture();
    assert_eq!(classify(Some(&obj), "own_arr").kind(), Some(ValueKind::Array));
    assert_eq!(classify(Some(&obj), "own_null").kind(), Some(ValueKind::Null));
    assert_eq!(classify(Some(&obj), "own_obj").kind(), Some(ValueKind::Object));
}

#[test]
fn sentinel_codes() {
    assert_eq!(classify(None, "x").code(), Classification::NO_SUBJECT_CODE);
    assert_eq!(
        classify(Some(&fixture()), "nope").code(),
        Classification::UNCLASSIFIABLE_CODE
    );
}

#[test]
fn hidden_properties_still_classify() {
    let obj = Object::new();
    obj.define_hidden("secret", 1);
    assert_eq!(classify(Some(&obj), "secret").code(), 8);
}

// =============================================================================
// Property Index
// =============================================================================

#[test]
fn index_groups_by_kind_and_origin() {
    let index = PropertyIndex::from_object(&fixture());
    assert_eq!(index.len(), 18);

    let own = index.grouped(OwnFilter::Own);
    let inherited = index.grouped(OwnFilter::Inherited);
    assert_eq!(own.len(), 9);
    assert_eq!(inherited.len(), 9);
    assert_eq!(own[&ValueKind::Function][0].as_ref(), "own_fn");
    assert_eq!(inherited[&ValueKind::Null][0].as_ref(), "inherited_null");
}

#[test]
fn index_agrees_with_classify() {
    let obj = fixture();
    let index = PropertyIndex::from_object(&obj);
    for descriptor in index.descriptors() {
        assert_eq!(
            index.classification(&descriptor.name),
            classify(Some(&obj), &descriptor.name)
        );
    }
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #[test]
    fn classify_is_total(name in "[a-z_]{1,12}") {
        let code = classify(Some(&fixture()), &name).code();
        prop_assert!(code <= 17 || code == Classification::UNCLASSIFIABLE_CODE);
    }

    #[test]
    fn codes_round_trip(code in 0u8..=17) {
        prop_assert_eq!(Classification::from_code(code).code(), code);
    }
}

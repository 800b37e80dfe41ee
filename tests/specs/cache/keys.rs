//! Cache key specs
//!
//! Keys depend only on what a unit of work is and what it was given, never on
//! how the inputs were assembled.

use crate::prelude::*;

#[test]
fn member_insertion_order_does_not_change_encoding() {
    let a = KeyValue::object();
    a.insert("model", "small");
    a.insert("options", json!({ "temperature": 0, "top_k": 5 }));
    a.insert("prompt", "hello");

    let options = KeyValue::object();
    options.insert("top_k", 5);
    options.insert("temperature", 0);
    let b = KeyValue::object();
    b.insert("prompt", "hello");
    b.insert("options", options);
    b.insert("model", "small");

    assert_eq!(canonicalize(&a), canonicalize(&b));
    assert_eq!(
        canonicalize(&a),
        r#"{"model":"small","options":{"temperature":0,"top_k":5},"prompt":"hello"}"#
    );
}

#[test]
fn self_reference_terminates_with_sentinel() {
    let node = KeyValue::object();
    node.insert("id", 1);
    let children = KeyValue::array();
    children.push(node.clone());
    node.insert("children", children);

    let text = canonicalize(&node);

    assert_eq!(text, format!(r#"{{"children":[{CIRCULAR}],"id":1}}"#));
}

#[test]
fn cyclic_params_still_produce_a_stable_key() {
    let params = KeyValue::object();
    params.insert("me", params.clone());

    assert_eq!(cache_key("walk", "1", params.clone()), cache_key("walk", "1", params));
}

#[test]
fn identity_and_version_are_part_of_the_key() {
    let params = json!({ "q": "rust" });
    let base = CacheKeyInput::new("search", "1", params.clone()).key();

    assert_ne!(base, CacheKeyInput::new("search", "2", params.clone()).key());
    assert_ne!(base, CacheKeyInput::new("lookup", "1", params.clone()).key());
    assert_eq!(base, CacheKeyInput::new("search", "1", params).key());
}

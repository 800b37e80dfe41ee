// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for step inputs and cached payloads.
pub mod strategies {
    use proptest::prelude::*;
    use serde_json::{Map, Value};

    /// Scalar JSON values.
    pub fn arb_json_leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            "[a-z0-9 ]{0,8}".prop_map(Value::String),
        ]
    }

    /// Nested JSON values up to a few levels deep.
    pub fn arb_json() -> impl Strategy<Value = Value> {
        arb_json_leaf().prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
            ]
        })
    }
}

/// Collects every value passed to it; handy as an observer sink in tests.
#[derive(Debug)]
pub struct Recorder<T> {
    items: std::sync::Arc<parking_lot::Mutex<Vec<T>>>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self { items: std::sync::Arc::clone(&self.items) }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self { items: Default::default() }
    }
}

impl<T: Clone> Recorder<T> {
    pub fn push(&self, item: T) {
        self.items.lock().push(item);
    }

    pub fn items(&self) -> Vec<T> {
        self.items.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

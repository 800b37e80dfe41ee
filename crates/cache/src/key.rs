// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical serialization and cache key derivation.
//!
//! Objects are encoded with their member names sorted, arrays keep element
//! order, and scalars use their JSON literal form. Containers are shared
//! handles, so a value can refer back to one of its own ancestors; the
//! recurrence is written as [`CIRCULAR`] instead of being followed.

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt::{self, Write as _};
use std::sync::Arc;

/// Token written in place of a container that is already being encoded
/// further up the current path.
pub const CIRCULAR: &str = "\"[Circular]\"";

/// Shared, mutable container handle. Identity is the allocation address.
pub type Shared<T> = Arc<RwLock<T>>;

/// Input value for canonical serialization.
///
/// Unlike `serde_json::Value`, containers are reference counted and can be
/// mutated after being shared, which makes self-referential inputs
/// expressible. Object members keep insertion order; the encoder sorts them.
#[derive(Clone)]
pub enum KeyValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Shared<Vec<KeyValue>>),
    Object(Shared<IndexMap<String, KeyValue>>),
}

impl KeyValue {
    pub fn array() -> Self {
        KeyValue::Array(Arc::new(RwLock::new(Vec::new())))
    }

    pub fn object() -> Self {
        KeyValue::Object(Arc::new(RwLock::new(IndexMap::new())))
    }

    /// Insert a member into an object value. Returns `false` for non-objects.
    pub fn insert(&self, name: impl Into<String>, value: impl Into<KeyValue>) -> bool {
        match self {
            KeyValue::Object(map) => {
                map.write().insert(name.into(), value.into());
                true
            }
            _ => false,
        }
    }

    /// Append an element to an array value. Returns `false` for non-arrays.
    pub fn push(&self, value: impl Into<KeyValue>) -> bool {
        match self {
            KeyValue::Array(items) => {
                items.write().push(value.into());
                true
            }
            _ => false,
        }
    }

    /// Canonical text of this value.
    pub fn canonical(&self) -> String {
        canonicalize(self)
    }

    fn container_id(&self) -> Option<usize> {
        match self {
            KeyValue::Array(items) => Some(Arc::as_ptr(items) as *const () as usize),
            KeyValue::Object(map) => Some(Arc::as_ptr(map) as *const () as usize),
            _ => None,
        }
    }
}

impl fmt::Debug for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&canonicalize(self))
    }
}

impl From<serde_json::Value> for KeyValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => KeyValue::Null,
            Value::Bool(b) => KeyValue::Bool(b),
            Value::Number(n) => KeyValue::Number(n),
            Value::String(s) => KeyValue::String(s),
            Value::Array(items) => KeyValue::Array(Arc::new(RwLock::new(
                items.into_iter().map(KeyValue::from).collect(),
            ))),
            Value::Object(map) => KeyValue::Object(Arc::new(RwLock::new(
                map.into_iter().map(|(k, v)| (k, KeyValue::from(v))).collect(),
            ))),
        }
    }
}

impl From<&serde_json::Value> for KeyValue {
    fn from(value: &serde_json::Value) -> Self {
        KeyValue::from(value.clone())
    }
}

impl From<&str> for KeyValue {
    fn from(s: &str) -> Self {
        KeyValue::String(s.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(s: String) -> Self {
        KeyValue::String(s)
    }
}

impl From<bool> for KeyValue {
    fn from(b: bool) -> Self {
        KeyValue::Bool(b)
    }
}

impl From<i64> for KeyValue {
    fn from(n: i64) -> Self {
        KeyValue::Number(n.into())
    }
}

impl From<u64> for KeyValue {
    fn from(n: u64) -> Self {
        KeyValue::Number(n.into())
    }
}

impl From<i32> for KeyValue {
    fn from(n: i32) -> Self {
        KeyValue::Number(n.into())
    }
}

impl From<f64> for KeyValue {
    /// Non-finite floats have no JSON form and become `null`.
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or(KeyValue::Null, KeyValue::Number)
    }
}

impl<T: Into<KeyValue>> From<Option<T>> for KeyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(KeyValue::Null, Into::into)
    }
}

impl<T: Into<KeyValue>> From<Vec<T>> for KeyValue {
    fn from(items: Vec<T>) -> Self {
        KeyValue::Array(Arc::new(RwLock::new(items.into_iter().map(Into::into).collect())))
    }
}

/// Deterministic text encoding of `value`.
///
/// The set of containers on the current path is scoped to this call, so
/// separate calls never influence each other. A container reached twice
/// through different branches (shared but not cyclic) is encoded both times.
pub fn canonicalize(value: &KeyValue) -> String {
    let mut out = String::new();
    let mut path = HashSet::new();
    encode(value, &mut path, &mut out);
    out
}

fn encode(value: &KeyValue, path: &mut HashSet<usize>, out: &mut String) {
    if let Some(id) = value.container_id() {
        if !path.insert(id) {
            out.push_str(CIRCULAR);
            return;
        }
    }

    match value {
        KeyValue::Null => out.push_str("null"),
        KeyValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        KeyValue::Number(n) => {
            let _ = write!(out, "{n}");
        }
        KeyValue::String(s) => push_json_string(s, out),
        KeyValue::Array(items) => {
            let items = items.read();
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode(item, path, out);
            }
            out.push(']');
        }
        KeyValue::Object(map) => {
            let map = map.read();
            let mut members: Vec<(&String, &KeyValue)> = map.iter().collect();
            members.sort_unstable_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (name, member)) in members.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                push_json_string(name, out);
                out.push(':');
                encode(member, path, out);
            }
            out.push('}');
        }
    }

    if let Some(id) = value.container_id() {
        path.remove(&id);
    }
}

fn push_json_string(s: &str, out: &mut String) {
    // Display on a JSON string value cannot fail and yields the escaped literal.
    let _ = write!(out, "{}", serde_json::Value::String(s.to_string()));
}

/// Content-addressed key for a cached result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a unit of work from its identity, version and inputs.
    pub fn derive(input: &CacheKeyInput) -> Self {
        let composed = KeyValue::object();
        composed.insert("id", input.identity.as_str());
        composed.insert("version", input.version.as_str());
        composed.insert("params", input.params.clone());
        CacheKey(canonicalize(&composed))
    }

    /// Wrap an already-derived key, e.g. one read back from a store.
    pub fn from_canonical(text: impl Into<String>) -> Self {
        CacheKey(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SHA-256 of the canonical text, hex encoded. Used for compact logging.
    pub fn digest(&self) -> String {
        format!("{:x}", Sha256::digest(self.0.as_bytes()))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything a cache key is derived from.
#[derive(Debug, Clone)]
pub struct CacheKeyInput {
    pub identity: String,
    pub version: String,
    pub params: KeyValue,
}

impl CacheKeyInput {
    pub fn new(
        identity: impl Into<String>,
        version: impl Into<String>,
        params: impl Into<KeyValue>,
    ) -> Self {
        Self { identity: identity.into(), version: version.into(), params: params.into() }
    }

    pub fn key(&self) -> CacheKey {
        CacheKey::derive(self)
    }
}

/// Shorthand for `CacheKeyInput::new(identity, version, params).key()`.
pub fn cache_key(identity: &str, version: &str, params: impl Into<KeyValue>) -> CacheKey {
    CacheKeyInput::new(identity, version, params).key()
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;

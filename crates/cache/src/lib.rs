// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sw-cache: Content-addressed result cache
//!
//! Canonical key derivation over possibly self-referential values, and a
//! TTL- and capacity-bounded cache layered on a pluggable record store.

pub mod cache;
pub mod key;
pub mod memory;
pub mod record;
pub mod store;

pub use cache::{CacheConfig, CacheStats, ResultCache, DEFAULT_MAX_ENTRIES, DEFAULT_TTL};
pub use key::{cache_key, canonicalize, CacheKey, CacheKeyInput, KeyValue, CIRCULAR};
pub use memory::MemoryStore;
pub use record::{CachedResult, RecordId};
pub use store::{CacheStore, StoreError};

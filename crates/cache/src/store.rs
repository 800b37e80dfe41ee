// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backing store contract for the result cache.
//!
//! The cache issues no operations beyond the ones on [`CacheStore`]. Each
//! individual insert or delete must be atomic; nothing else is assumed, so
//! concurrent writers can briefly push the record count above capacity.

use crate::key::CacheKey;
use crate::record::{CachedResult, RecordId};
use async_trait::async_trait;
use sw_core::OwnerId;
use thiserror::Error;

/// Errors raised by a backing store. The cache passes them through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record already exists: {0}")]
    Duplicate(RecordId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store error: {0}")]
    Backend(String),
}

/// Persistent key-value store holding cached records.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Insert a new record.
    async fn insert(&self, record: CachedResult) -> Result<(), StoreError>;

    /// Point lookup by primary key.
    async fn get(&self, id: &RecordId) -> Result<Option<CachedResult>, StoreError>;

    /// Indexed lookup by cache key.
    async fn find_by_key(&self, key: &CacheKey) -> Result<Vec<CachedResult>, StoreError>;

    /// Indexed lookup by owner.
    async fn find_by_owner(&self, owner: &OwnerId) -> Result<Vec<CachedResult>, StoreError>;

    /// Delete one record; returns whether it existed.
    async fn delete(&self, id: &RecordId) -> Result<bool, StoreError>;

    /// Delete many records; returns how many existed.
    async fn delete_many(&self, ids: &[RecordId]) -> Result<usize, StoreError>;

    /// Every record currently held.
    async fn scan(&self) -> Result<Vec<CachedResult>, StoreError>;

    /// Remove every record.
    async fn clear(&self) -> Result<(), StoreError>;
}

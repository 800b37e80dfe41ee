// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process [`CacheStore`] backed by an insertion-ordered map.

use crate::key::CacheKey;
use crate::record::{CachedResult, RecordId};
use crate::store::{CacheStore, StoreError};
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::Mutex;
use sw_core::OwnerId;

/// Store that keeps records in memory. Scans return insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<IndexMap<RecordId, CachedResult>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn insert(&self, record: CachedResult) -> Result<(), StoreError> {
        let mut records = self.records.lock();
        if records.contains_key(&record.id) {
            return Err(StoreError::Duplicate(record.id));
        }
        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &RecordId) -> Result<Option<CachedResult>, StoreError> {
        Ok(self.records.lock().get(id).cloned())
    }

    async fn find_by_key(&self, key: &CacheKey) -> Result<Vec<CachedResult>, StoreError> {
        Ok(self.records.lock().values().filter(|r| &r.key == key).cloned().collect())
    }

    async fn find_by_owner(&self, owner: &OwnerId) -> Result<Vec<CachedResult>, StoreError> {
        Ok(self.records.lock().values().filter(|r| &r.owner == owner).cloned().collect())
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, StoreError> {
        Ok(self.records.lock().shift_remove(id).is_some())
    }

    async fn delete_many(&self, ids: &[RecordId]) -> Result<usize, StoreError> {
        let mut records = self.records.lock();
        Ok(ids.iter().filter(|id| records.shift_remove(*id).is_some()).count())
    }

    async fn scan(&self) -> Result<Vec<CachedResult>, StoreError> {
        Ok(self.records.lock().values().cloned().collect())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.records.lock().clear();
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;

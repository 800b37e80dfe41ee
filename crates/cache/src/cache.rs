// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TTL- and capacity-bounded result cache.
//!
//! Expiry is lazy: an expired record is deleted when `get` runs into it, and
//! never by a background sweep. Eviction runs after each `set`, trimming the
//! oldest records until the store is back at capacity. The bound is global
//! across owners and, with concurrent writers, only holds once every racing
//! `set` has finished its own trim.

use crate::key::CacheKey;
use crate::record::{CachedResult, RecordId};
use crate::store::{CacheStore, StoreError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use sw_core::{Clock, OwnerId, SystemClock};

/// Default time-to-live for `put`.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Default capacity for `put`.
pub const DEFAULT_MAX_ENTRIES: usize = 1_000;

/// TTL and capacity applied by [`ResultCache::put`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    #[serde(rename = "ttl_ms", with = "sw_core::serde_ms::duration")]
    pub ttl: Duration,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl: DEFAULT_TTL, max_entries: DEFAULT_MAX_ENTRIES }
    }
}

/// Diagnostic counts; reading them never purges anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub total: usize,
    /// Records past expiry that no `get` has purged yet.
    pub expired: usize,
}

/// Result cache over an injected store.
pub struct ResultCache<S: CacheStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    config: CacheConfig,
}

impl<S: CacheStore> ResultCache<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: CacheStore, C: Clock> ResultCache<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock, config: CacheConfig::default() }
    }

    pub fn with_config(mut self, config: CacheConfig) -> Self {
        self.config = config;
        self
    }

    pub fn settings(&self) -> &CacheConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Payload cached under `key`, if a live record exists.
    ///
    /// Expired records found for the key are deleted as a side effect. When
    /// several live records share the key the most recently created wins.
    pub async fn get(&self, key: &CacheKey) -> Result<Option<serde_json::Value>, StoreError> {
        let now = self.clock.epoch_ms();
        let (expired, live): (Vec<_>, Vec<_>) = self
            .store
            .find_by_key(key)
            .await?
            .into_iter()
            .partition(|record| record.is_expired(now));

        if !expired.is_empty() {
            let ids: Vec<RecordId> = expired.into_iter().map(|r| r.id).collect();
            let removed = self.store.delete_many(&ids).await?;
            tracing::debug!(key = %short_key(key), removed, "purged expired cache records");
        }

        let hit = live.into_iter().max_by_key(|record| record.created_at_ms);
        match &hit {
            Some(record) => tracing::debug!(key = %short_key(key), record = %record.id, "cache hit"),
            None => tracing::debug!(key = %short_key(key), "cache miss"),
        }
        Ok(hit.map(|record| record.payload))
    }

    /// Store `payload` under `key` for `ttl`, then trim the store to `max_entries`.
    ///
    /// Returns the new record's ID.
    pub async fn set(
        &self,
        owner: &OwnerId,
        key: &CacheKey,
        payload: serde_json::Value,
        ttl: Duration,
        max_entries: usize,
    ) -> Result<RecordId, StoreError> {
        let now = self.clock.epoch_ms();
        let record = CachedResult {
            id: RecordId::new(),
            owner: owner.clone(),
            key: key.clone(),
            payload,
            created_at_ms: now,
            expires_at_ms: now.saturating_add(sw_core::as_millis(ttl)),
        };
        let id = record.id.clone();
        self.store.insert(record).await?;
        tracing::debug!(key = %short_key(key), record = %id, owner = %owner, "cached result");

        self.evict_to(max_entries).await?;
        Ok(id)
    }

    /// [`set`](Self::set) with the configured TTL and capacity.
    pub async fn put(
        &self,
        owner: &OwnerId,
        key: &CacheKey,
        payload: serde_json::Value,
    ) -> Result<RecordId, StoreError> {
        self.set(owner, key, payload, self.config.ttl, self.config.max_entries).await
    }

    /// Delete every record belonging to `owner`; returns how many were removed.
    pub async fn clear_cache(&self, owner: &OwnerId) -> Result<usize, StoreError> {
        let ids: Vec<RecordId> =
            self.store.find_by_owner(owner).await?.into_iter().map(|r| r.id).collect();
        if ids.is_empty() {
            return Ok(0);
        }
        let removed = self.store.delete_many(&ids).await?;
        tracing::info!(owner = %owner, removed, "cleared owner cache");
        Ok(removed)
    }

    /// Delete every record in the store.
    pub async fn clear_all_cache(&self) -> Result<(), StoreError> {
        self.store.clear().await?;
        tracing::info!("cleared all cache records");
        Ok(())
    }

    pub async fn get_cache_stats(&self) -> Result<CacheStats, StoreError> {
        let now = self.clock.epoch_ms();
        let records = self.store.scan().await?;
        let expired = records.iter().filter(|r| r.is_expired(now)).count();
        Ok(CacheStats { total: records.len(), expired })
    }

    async fn evict_to(&self, max_entries: usize) -> Result<(), StoreError> {
        let mut records = self.store.scan().await?;
        if records.len() <= max_entries {
            return Ok(());
        }

        // Stable: records created in the same millisecond keep scan order.
        records.sort_by_key(|record| record.created_at_ms);
        let excess = records.len() - max_entries;
        let ids: Vec<RecordId> = records.into_iter().take(excess).map(|r| r.id).collect();
        let removed = self.store.delete_many(&ids).await?;
        tracing::debug!(removed, max_entries, "evicted oldest cache records");
        Ok(())
    }
}

fn short_key(key: &CacheKey) -> String {
    let digest = key.digest();
    sw_core::short(&digest, 12).to_string()
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted cache record.

use crate::key::CacheKey;
use serde::{Deserialize, Serialize};
use sw_core::OwnerId;

sw_core::define_id! {
    /// Primary key of a cached record. Every `set` mints a fresh one.
    pub struct RecordId("rec-");
}

/// One cached payload as held by the backing store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResult {
    pub id: RecordId,
    pub owner: OwnerId,
    pub key: CacheKey,
    pub payload: serde_json::Value,
    pub created_at_ms: u64,
    pub expires_at_ms: u64,
}

impl CachedResult {
    /// A record is expired once the current instant reaches its expiry instant.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cache-backed step action.
//!
//! Wraps another action so a run with the same identity, version and inputs
//! reuses a live cached result instead of executing again.

use crate::context::ExecutionContext;
use crate::step::StepAction;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use sw_cache::{CacheKey, CacheKeyInput, CacheStore, ResultCache};
use sw_core::{Clock, OwnerId, StepError, SystemClock};

/// Action that consults a [`ResultCache`] before running its inner action.
///
/// The key is derived from the [`CacheKeyInput`] on every execution, so
/// inputs built from shared handles are read as they are at that moment.
/// Store failures fail the step like any other error.
pub struct CachedAction<S: CacheStore, C: Clock = SystemClock> {
    inner: Arc<dyn StepAction>,
    cache: Arc<ResultCache<S, C>>,
    owner: OwnerId,
    input: CacheKeyInput,
    ttl: Option<Duration>,
    max_entries: Option<usize>,
}

impl<S: CacheStore, C: Clock> CachedAction<S, C> {
    pub fn new(
        cache: Arc<ResultCache<S, C>>,
        owner: OwnerId,
        input: CacheKeyInput,
        inner: impl StepAction + 'static,
    ) -> Self {
        Self { inner: Arc::new(inner), cache, owner, input, ttl: None, max_entries: None }
    }

    sw_core::setters! {
        option {
            ttl: Duration,
            max_entries: usize,
        }
    }

    pub fn key(&self) -> CacheKey {
        self.input.key()
    }
}

#[async_trait]
impl<S, C> StepAction for CachedAction<S, C>
where
    S: CacheStore + 'static,
    C: Clock + 'static,
{
    async fn execute(&self, ctx: &ExecutionContext) -> Result<Value, StepError> {
        let key = self.key();
        if let Some(hit) = self.cache.get(&key).await.map_err(StepError::msg)? {
            tracing::debug!(identity = %self.input.identity, "using cached result");
            return Ok(hit);
        }

        let value = self.inner.execute(ctx).await?;
        let settings = self.cache.settings();
        let ttl = self.ttl.unwrap_or(settings.ttl);
        let max_entries = self.max_entries.unwrap_or(settings.max_entries);
        self.cache
            .set(&self.owner, &key, value.clone(), ttl, max_entries)
            .await
            .map_err(StepError::msg)?;
        Ok(value)
    }
}

#[cfg(test)]
#[path = "cached_tests.rs"]
mod tests;

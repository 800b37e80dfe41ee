// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration.
//!
//! Loaded from TOML; every section and field is optional. Durations are
//! written in milliseconds:
//!
//! ```toml
//! [retry]
//! max_retries = 2
//! delays_ms = [250, 500]
//!
//! [cache]
//! ttl_ms = 60000
//! max_entries = 500
//! ```

use crate::env;
use crate::executor::StepExecutor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use sw_cache::{CacheConfig, CacheStore, ResultCache};
use sw_core::{Clock, RetryConfig};
use thiserror::Error;

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Policy for steps that carry none of their own.
    pub retry: RetryConfig,
    /// TTL and capacity for cache writes that do not override them.
    pub cache: CacheConfig,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Apply `SW_*` environment overrides on top of this config.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(n) = env::max_retries() {
            self.retry.max_retries = n;
        }
        if let Some(delays) = env::retry_delays() {
            self.retry.delays = delays;
        }
        if let Some(ttl) = env::cache_ttl() {
            self.cache.ttl = ttl;
        }
        if let Some(max) = env::cache_max_entries() {
            self.cache.max_entries = max;
        }
        self
    }

    /// Executor using this config's retry policy as its default.
    pub fn executor<C: Clock>(&self, clock: C) -> StepExecutor<C> {
        StepExecutor::with_clock(clock).default_retry(self.retry.clone())
    }

    /// Result cache over `store` using this config's TTL and capacity.
    pub fn cache<S: CacheStore, C: Clock>(&self, store: S, clock: C) -> ResultCache<S, C> {
        ResultCache::with_clock(store, clock).with_config(self.cache.clone())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

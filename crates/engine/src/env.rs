// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.
//!
//! Every reader returns `None` when the variable is unset or does not parse.

use std::time::Duration;

/// Retry budget override (`SW_MAX_RETRIES`)
pub fn max_retries() -> Option<u32> {
    std::env::var("SW_MAX_RETRIES").ok().and_then(|s| s.trim().parse::<u32>().ok())
}

/// Backoff schedule override as a comma separated millisecond list
/// (`SW_RETRY_DELAYS_MS=100,200,400`). One bad entry rejects the whole list.
pub fn retry_delays() -> Option<Vec<Duration>> {
    let raw = std::env::var("SW_RETRY_DELAYS_MS").ok()?;
    raw.split(',')
        .map(|part| part.trim().parse::<u64>().ok().map(Duration::from_millis))
        .collect()
}

/// Cache TTL override (`SW_CACHE_TTL_MS`)
pub fn cache_ttl() -> Option<Duration> {
    std::env::var("SW_CACHE_TTL_MS")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Cache capacity override (`SW_CACHE_MAX_ENTRIES`)
pub fn cache_max_entries() -> Option<usize> {
    std::env::var("SW_CACHE_MAX_ENTRIES").ok().and_then(|s| s.trim().parse::<usize>().ok())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;

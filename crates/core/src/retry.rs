// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded retry around an async operation.
//!
//! Every failure is treated as retryable. Wrapping a non-idempotent operation
//! is the caller's responsibility.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default backoff schedule, indexed by attempt number.
pub const DEFAULT_DELAYS_MS: [u64; 3] = [1_000, 2_000, 4_000];

/// Retry budget and backoff schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries allowed after the first attempt; total attempts is `max_retries + 1`.
    pub max_retries: u32,
    /// Backoff before each retry. Once the attempt index passes the end of
    /// the list the last entry is reused; an empty list means no delay.
    #[serde(rename = "delays_ms", with = "crate::serde_ms::durations")]
    pub delays: Vec<Duration>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delays: DEFAULT_DELAYS_MS.iter().copied().map(Duration::from_millis).collect(),
        }
    }
}

impl RetryConfig {
    pub fn new(max_retries: u32, delays: impl IntoIterator<Item = Duration>) -> Self {
        Self { max_retries, delays: delays.into_iter().collect() }
    }

    /// A single attempt, no retries.
    pub fn none() -> Self {
        Self { max_retries: 0, delays: Vec::new() }
    }

    /// Retries with no backoff between attempts.
    pub fn immediate(max_retries: u32) -> Self {
        Self { max_retries, delays: vec![Duration::ZERO] }
    }

    /// Backoff to apply after the given (zero-based) failed attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let Some(last) = self.delays.len().checked_sub(1) else {
            return Duration::ZERO;
        };
        self.delays[(attempt as usize).min(last)]
    }
}

/// Run `operation` until it succeeds or the retry budget is spent.
///
/// Attempt 0 always runs. After each failure, while fewer than
/// `config.max_retries` retries have been made, `on_retry(retry, &error)`
/// is called with the 1-based number of the retry about to run, the task
/// sleeps for [`RetryConfig::delay_for_attempt`] (skipped when zero), and the
/// operation runs again. When the budget is exhausted the most recent error
/// is returned unchanged.
pub async fn with_retries<T, E, F, Fut, R>(
    mut operation: F,
    config: &RetryConfig,
    mut on_retry: R,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    R: FnMut(u32, &E),
{
    let mut attempt: u32 = 0;
    loop {
        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if attempt >= config.max_retries {
            if config.max_retries > 0 {
                tracing::warn!(attempts = attempt + 1, error = %error, "retries exhausted");
            }
            return Err(error);
        }

        on_retry(attempt + 1, &error);
        let delay = config.delay_for_attempt(attempt);
        tracing::warn!(
            attempt = attempt + 1,
            max_retries = config.max_retries,
            delay_ms = crate::clock::as_millis(delay),
            error = %error,
            "attempt failed, retrying"
        );
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        attempt += 1;
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot cooperative cancellation signal.
//!
//! A signal moves from active to cancelled exactly once. Callbacks registered
//! before cancellation run synchronously, in registration order, on whichever
//! task calls [`CancelSignal::cancel`]. A callback that panics is logged and
//! skipped; the remaining callbacks still run and the caller never sees the
//! panic.
//!
//! Cancellation is cooperative: the executor checks the flag between steps,
//! and long-running steps may poll [`CancelSignal::is_cancelled`] or await
//! [`CancelSignal::cancelled`] themselves.

use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::Notify;

type Callback = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct SignalState {
    cancelled: bool,
    callbacks: Vec<Callback>,
}

#[derive(Default)]
struct Inner {
    state: Mutex<SignalState>,
    notify: Notify,
}

/// Shared cancellation flag with subscriber callbacks.
///
/// Cloning yields another handle to the same signal.
#[derive(Clone, Default)]
pub struct CancelSignal {
    inner: Arc<Inner>,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.state.lock().cancelled
    }

    /// Cancel the signal. Only the first call has any effect.
    pub fn cancel(&self) {
        let callbacks = {
            let mut state = self.inner.state.lock();
            if state.cancelled {
                return;
            }
            state.cancelled = true;
            std::mem::take(&mut state.callbacks)
        };

        tracing::debug!(callbacks = callbacks.len(), "signal cancelled");
        for (index, callback) in callbacks.into_iter().enumerate() {
            run_callback(index, callback);
        }
        self.inner.notify.notify_waiters();
    }

    /// Register a callback for cancellation.
    ///
    /// If the signal is already cancelled the callback runs immediately on the
    /// calling task instead of being stored.
    pub fn on_cancelled(&self, callback: impl FnOnce() + Send + 'static) {
        {
            let mut state = self.inner.state.lock();
            if !state.cancelled {
                state.callbacks.push(Box::new(callback));
                return;
            }
        }
        run_callback(0, Box::new(callback));
    }

    /// Return to the active state and drop every registered callback.
    ///
    /// Only call this between runs, never while a run holding this signal is
    /// in flight.
    pub fn reset(&self) {
        let mut state = self.inner.state.lock();
        state.cancelled = false;
        state.callbacks.clear();
    }

    /// Number of callbacks waiting for cancellation.
    pub fn pending_callbacks(&self) -> usize {
        self.inner.state.lock().callbacks.len()
    }

    /// Resolves once the signal is cancelled.
    pub async fn cancelled(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

impl std::fmt::Debug for CancelSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("CancelSignal")
            .field("cancelled", &state.cancelled)
            .field("callbacks", &state.callbacks.len())
            .finish()
    }
}

fn run_callback(index: usize, callback: Callback) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(callback)) {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        tracing::error!(index, reason = %reason, "cancel callback panicked");
    }
}

#[cfg(test)]
#[path = "cancel_tests.rs"]
mod tests;

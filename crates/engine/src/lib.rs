// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sw-engine: Sequential step execution
//!
//! Runs an ordered pipeline of steps against a run-scoped context, with
//! per-step retry, cooperative cancellation between steps, caller-supplied
//! observers, and optional result caching for individual steps.

pub mod cached;
pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod executor;
pub mod observer;
pub mod step;

pub use cached::CachedAction;
pub use config::{Config, ConfigError};
pub use context::{AttemptRecord, ExecutionContext, ExecutionState, StepFailure};
pub use error::ExecuteError;
pub use executor::{execute_steps, StepExecutor};
pub use observer::Observers;
pub use step::{FnAction, Step, StepAction, Validator};

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caller-supplied run observers.
//!
//! Every callback is optional and runs synchronously on the executor's task.
//! The executor never awaits them, so a callback that needs async work has
//! to hand it off (e.g. over a channel) itself.

use crate::context::ExecutionState;
use serde_json::Value;
use sw_core::StepError;

type StateFn = Box<dyn Fn(ExecutionState) + Send + Sync>;
type ProgressFn = Box<dyn Fn(u8, Option<&str>) + Send + Sync>;
type CompleteFn = Box<dyn Fn(&str, &Value) + Send + Sync>;
type ErrorFn = Box<dyn Fn(&str, &StepError) + Send + Sync>;

/// Explicit observer list for one run.
#[derive(Default)]
pub struct Observers {
    state_change: Option<StateFn>,
    progress: Option<ProgressFn>,
    step_complete: Option<CompleteFn>,
    error: Option<ErrorFn>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_state_change(mut self, f: impl Fn(ExecutionState) + Send + Sync + 'static) -> Self {
        self.state_change = Some(Box::new(f));
        self
    }

    /// Called with the new percentage and the name of the step that moved it.
    pub fn on_progress(mut self, f: impl Fn(u8, Option<&str>) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    pub fn on_step_complete(mut self, f: impl Fn(&str, &Value) + Send + Sync + 'static) -> Self {
        self.step_complete = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&str, &StepError) + Send + Sync + 'static) -> Self {
        self.error = Some(Box::new(f));
        self
    }

    pub(crate) fn state_changed(&self, state: ExecutionState) {
        if let Some(f) = &self.state_change {
            f(state);
        }
    }

    pub(crate) fn progressed(&self, percent: u8, step_name: Option<&str>) {
        if let Some(f) = &self.progress {
            f(percent, step_name);
        }
    }

    pub(crate) fn step_completed(&self, step_name: &str, result: &Value) {
        if let Some(f) = &self.step_complete {
            f(step_name, result);
        }
    }

    pub(crate) fn step_failed(&self, step_name: &str, error: &StepError) {
        if let Some(f) = &self.error {
            f(step_name, error);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("state_change", &self.state_change.is_some())
            .field("progress", &self.progress.is_some())
            .field("step_complete", &self.step_complete.is_some())
            .field("error", &self.error.is_some())
            .finish()
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step executor
//!
//! Drives an ordered list of steps against one [`ExecutionContext`]. Steps run
//! strictly one after another; the only suspension points are a step's own
//! execution and retry backoff. Cancellation is checked before each step
//! starts, never during one.

use crate::context::{AttemptRecord, ExecutionContext, ExecutionState, StepFailure};
use crate::error::ExecuteError;
use crate::observer::Observers;
use crate::step::{Step, StepAction};
use serde_json::Value;
use sw_core::{with_retries, Clock, RetryConfig, StepError, SystemClock};

/// Runs step pipelines.
#[derive(Debug, Clone)]
pub struct StepExecutor<C: Clock = SystemClock> {
    clock: C,
    default_retry: RetryConfig,
}

impl StepExecutor<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for StepExecutor<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> StepExecutor<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock, default_retry: RetryConfig::default() }
    }

    sw_core::setters! {
        set { default_retry: RetryConfig }
    }

    /// Get a reference to the clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Execute `steps` in order against `ctx`.
    ///
    /// Returns the state the run ended in. A run stopped by cancellation ends
    /// in `Ok(Cancelled)`; a required step failure ends in `Err(StepFailed)`
    /// with the context in `Error`. An empty step list leaves the context
    /// untouched.
    pub async fn execute_steps(
        &self,
        steps: &[Step],
        ctx: &mut ExecutionContext,
        observers: &Observers,
    ) -> Result<ExecutionState, ExecuteError> {
        if steps.is_empty() {
            return Ok(ctx.state());
        }
        if ctx.state() != ExecutionState::Idle {
            return Err(ExecuteError::InvalidState(ctx.state()));
        }

        let total = steps.len();
        tracing::info!(steps = total, "run started");
        self.enter(ctx, observers, ExecutionState::Executing);

        for (index, step) in steps.iter().enumerate() {
            let Some(action) = step.callable() else {
                tracing::error!(step = %step.id, index, "step has no action");
                self.enter(ctx, observers, ExecutionState::Error);
                return Err(ExecuteError::Structural {
                    index,
                    step: step.id.clone(),
                    reason: "no executable action".to_string(),
                });
            };

            if ctx.is_cancelled() {
                tracing::info!(step = %step.id, index, "run cancelled before step");
                self.enter(ctx, observers, ExecutionState::Cancelled);
                return Ok(ExecutionState::Cancelled);
            }

            let started_at_ms = self.clock.epoch_ms();
            let outcome = self.run_step(step, action, ctx).await;
            let finished_at_ms = self.clock.epoch_ms();
            let elapsed_ms = finished_at_ms.saturating_sub(started_at_ms);

            match outcome {
                Ok(value) => {
                    tracing::debug!(step = %step.id, elapsed_ms, "step completed");
                    ctx.record_result(&step.id, value.clone());
                    ctx.record_attempt(AttemptRecord {
                        step_id: step.id.clone(),
                        started_at_ms,
                        finished_at_ms,
                        success: true,
                    });
                    let percent = ctx.advance_progress(percent_complete(index + 1, total));
                    observers.progressed(percent, Some(&step.name));
                    observers.step_completed(&step.name, &value);
                }
                Err(error) => {
                    tracing::warn!(
                        step = %step.id,
                        required = step.required,
                        elapsed_ms,
                        error = %error,
                        "step failed"
                    );
                    ctx.record_error(StepFailure {
                        step_id: step.id.clone(),
                        step_name: step.name.clone(),
                        error: error.clone(),
                    });
                    ctx.record_attempt(AttemptRecord {
                        step_id: step.id.clone(),
                        started_at_ms,
                        finished_at_ms,
                        success: false,
                    });
                    observers.step_failed(&step.name, &error);

                    if step.required {
                        self.enter(ctx, observers, ExecutionState::Error);
                        return Err(ExecuteError::StepFailed { step: step.id.clone(), source: error });
                    }
                }
            }
        }

        self.enter(ctx, observers, ExecutionState::Completed);
        Ok(ExecutionState::Completed)
    }

    /// One step through its retry policy, then its validator.
    ///
    /// The validator sees only the final successful result; a rejection is
    /// not retried.
    async fn run_step(
        &self,
        step: &Step,
        action: &dyn StepAction,
        ctx: &ExecutionContext,
    ) -> Result<Value, StepError> {
        let retry = step.retry.as_ref().unwrap_or(&self.default_retry);
        tracing::debug!(step = %step.id, max_retries = retry.max_retries, "running step");

        let value = with_retries(move || action.execute(ctx), retry, |_, _| {}).await?;
        if !step.validate(&value) {
            return Err(StepError::validation(step.id.as_str()));
        }
        Ok(value)
    }

    fn enter(&self, ctx: &mut ExecutionContext, observers: &Observers, next: ExecutionState) {
        let from = ctx.state();
        if ctx.transition(next) {
            tracing::info!(from = %from, to = %next, "run state changed");
            observers.state_changed(next);
        }
    }
}

/// Execute `steps` with the default executor (system clock, default retry policy).
pub async fn execute_steps(
    steps: &[Step],
    ctx: &mut ExecutionContext,
    observers: &Observers,
) -> Result<ExecutionState, ExecuteError> {
    StepExecutor::new().execute_steps(steps, ctx, observers).await
}

/// Rounded percentage of `done` out of `total`.
fn percent_complete(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let rounded = (done.min(total) * 200 + total) / (2 * total);
    rounded as u8
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;

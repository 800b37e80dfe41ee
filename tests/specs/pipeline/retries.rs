//! Retry specs

use crate::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};

#[tokio::test(start_paused = true)]
async fn always_failing_operation_runs_four_times_under_three_retries() {
    let calls = &AtomicU32::new(0);
    let config = RetryConfig { max_retries: 3, ..RetryConfig::default() };
    let start = tokio::time::Instant::now();

    let result: Result<(), StepError> = with_retries(
        move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            Err(StepError::msg(format!("attempt {n}")))
        },
        &config,
        |_, _| {},
    )
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(result.unwrap_err(), StepError::msg("attempt 4"));
    assert_eq!(start.elapsed(), Duration::from_millis(1_000 + 2_000 + 4_000));
}

#[tokio::test(start_paused = true)]
async fn executor_retries_with_configured_policy() {
    let config = Config::from_toml_str("[retry]\nmax_retries = 2\ndelays_ms = [10]\n").unwrap();
    let probe = Probe::failing("unreachable host");
    let mut ctx = ExecutionContext::new();
    let start = tokio::time::Instant::now();

    let err = config
        .executor(FakeClock::new())
        .execute_steps(&[probe.step("fetch")], &mut ctx, &Observers::new())
        .await
        .unwrap_err();

    assert_eq!(probe.calls(), 3);
    assert_eq!(start.elapsed(), Duration::from_millis(20));
    assert_eq!(err.step_error(), Some(&StepError::msg("unreachable host")));
    assert_eq!(ctx.history().len(), 1);
}

//! Failure handling specs
//!
//! Required failures abort the run; optional failures are recorded and skipped.

use crate::prelude::*;

#[tokio::test]
async fn required_failure_ends_in_error_before_later_steps() {
    let (a, b) = (Probe::failing("a broke"), Probe::ok(json!("b")));
    let steps = [a.step("a"), b.step("b").optional()];
    let mut ctx = ExecutionContext::new();

    let err = executor().execute_steps(&steps, &mut ctx, &Observers::new()).await.unwrap_err();

    assert_eq!(ctx.state(), ExecutionState::Error);
    assert_eq!(err.step_error(), Some(&StepError::msg("a broke")));
    assert_eq!(b.calls(), 0);
}

#[tokio::test]
async fn optional_failure_is_recorded_and_run_completes() {
    let (a, b) = (Probe::failing("a broke"), Probe::ok(json!("b")));
    let steps = [a.step("a").optional(), b.step("b")];
    let mut ctx = ExecutionContext::new();
    let errors = Recorder::default();
    let observers = Observers::new().on_error({
        let errors = errors.clone();
        move |name, error| errors.push((name.to_string(), error.to_string()))
    });

    let end = executor().execute_steps(&steps, &mut ctx, &observers).await.unwrap();

    assert_eq!(end, ExecutionState::Completed);
    assert_eq!(ctx.errors().len(), 1);
    assert_eq!(ctx.errors()[0].step_id, "a");
    assert_eq!(ctx.result("b"), Some(&json!("b")));
    similar_asserts::assert_eq!(errors.items(), vec![("a".to_string(), "a broke".to_string())]);
}

#[tokio::test]
async fn malformed_step_aborts_with_structural_error() {
    let a = Probe::ok(json!(1));
    let steps = [a.step("a"), Step::new("empty", "empty")];
    let mut ctx = ExecutionContext::new();

    let err = executor().execute_steps(&steps, &mut ctx, &Observers::new()).await.unwrap_err();

    assert!(matches!(err, ExecuteError::Structural { index: 1, .. }));
    assert_eq!(ctx.state(), ExecutionState::Error);
}

#[tokio::test]
async fn progress_reaches_one_hundred_on_completion() {
    let probes: Vec<Probe> = (0..4).map(|n| Probe::ok(json!(n))).collect();
    let steps: Vec<Step> =
        probes.iter().enumerate().map(|(n, p)| p.step(&format!("s{n}"))).collect();
    let mut ctx = ExecutionContext::new();
    let progress = Recorder::default();
    let observers = Observers::new().on_progress({
        let progress = progress.clone();
        move |percent, _| progress.push(percent)
    });

    executor().execute_steps(&steps, &mut ctx, &observers).await.unwrap();

    assert_eq!(progress.items(), vec![25, 50, 75, 100]);
    assert_eq!(ctx.progress(), 100);
}

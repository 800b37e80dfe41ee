//! Cancellation specs
//!
//! Cancellation is cooperative: it takes effect before the next step starts.

use crate::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};

#[tokio::test]
async fn cancel_from_first_completion_stops_the_run() {
    let probes = [Probe::ok(json!("one")), Probe::ok(json!("two")), Probe::ok(json!("three"))];
    let steps: Vec<Step> = probes
        .iter()
        .zip(["one", "two", "three"])
        .map(|(probe, id)| probe.step(id))
        .collect();
    let signal = CancelSignal::new();
    let mut ctx = ExecutionContext::with_signal(signal.clone());
    let states = Recorder::default();
    let observers = Observers::new()
        .on_state_change({
            let states = states.clone();
            move |state| states.push(state)
        })
        .on_step_complete(move |name, _| {
            if name == "one" {
                signal.cancel();
            }
        });

    let end = executor().execute_steps(&steps, &mut ctx, &observers).await.unwrap();

    assert_eq!(end, ExecutionState::Cancelled);
    assert_eq!(ctx.state(), ExecutionState::Cancelled);
    assert_eq!(probes[1].calls() + probes[2].calls(), 0);
    assert_eq!(ctx.result("one"), Some(&json!("one")));
    assert_eq!(states.items(), vec![ExecutionState::Executing, ExecutionState::Cancelled]);
}

#[test]
fn cancelling_twice_runs_each_callback_once() {
    let signal = CancelSignal::new();
    let runs = Arc::new(AtomicU32::new(0));
    for _ in 0..3 {
        let runs = runs.clone();
        signal.on_cancelled(move || {
            runs.fetch_add(1, Ordering::SeqCst);
        });
    }

    signal.cancel();
    signal.cancel();

    assert_eq!(runs.load(Ordering::SeqCst), 3);
    assert!(signal.is_cancelled());
}

#[test]
fn callbacks_run_in_registration_order_despite_a_panic() {
    let signal = CancelSignal::new();
    let order = Recorder::default();
    let first = order.clone();
    signal.on_cancelled(move || first.push(1));
    signal.on_cancelled(|| panic!("callback failure"));
    let third = order.clone();
    signal.on_cancelled(move || third.push(3));

    signal.cancel();

    assert_eq!(order.items(), vec![1, 3]);
}

#[tokio::test]
async fn step_can_wait_on_the_signal_itself() {
    let signal = CancelSignal::new();
    let mut ctx = ExecutionContext::with_signal(signal.clone());
    let steps = [Step::new("watch", "watch").execute_fn(|ctx| {
        Box::pin(async move {
            ctx.signal().cancelled().await;
            Ok::<_, StepError>(json!("stopped early"))
        })
    }), Probe::ok(json!(0)).step("after")];

    let canceller = tokio::spawn(async move {
        tokio::task::yield_now().await;
        signal.cancel();
    });
    let end = executor().execute_steps(&steps, &mut ctx, &Observers::new()).await.unwrap();
    canceller.await.unwrap();

    assert_eq!(end, ExecutionState::Cancelled);
    assert_eq!(ctx.result("watch"), Some(&json!("stopped early")));
    assert!(ctx.result("after").is_none());
}

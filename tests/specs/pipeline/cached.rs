//! Cached step specs
//!
//! A step wrapped in a cache skips its work when an equivalent run already
//! produced a live result.

use crate::prelude::*;

#[tokio::test]
async fn equivalent_runs_share_one_execution() {
    let clock = FakeClock::new();
    let cache = Arc::new(ResultCache::with_clock(MemoryStore::new(), clock.clone()));
    let probe = Probe::ok(json!({ "tokens": 42 }));
    let owner = OwnerId::from("own-session");

    let run = |lang: &'static str| {
        let action = CachedAction::new(
            cache.clone(),
            owner.clone(),
            CacheKeyInput::new("tokenize", "3", json!({ "lang": lang, "text": "hi" })),
            probe.clone(),
        )
        .ttl(Duration::from_secs(30));
        [Step::new("tokenize", "Tokenize").action(action)]
    };

    for steps in [run("en"), run("en"), run("de")] {
        let mut ctx = ExecutionContext::new();
        executor().execute_steps(&steps, &mut ctx, &Observers::new()).await.unwrap();
        assert_eq!(ctx.result("tokenize"), Some(&json!({ "tokens": 42 })));
    }
    assert_eq!(probe.calls(), 2);

    clock.advance(Duration::from_secs(30));
    let mut ctx = ExecutionContext::new();
    executor().execute_steps(&run("en"), &mut ctx, &Observers::new()).await.unwrap();
    assert_eq!(probe.calls(), 3);
    assert_eq!(cache.clear_cache(&owner).await.unwrap(), 2);
}

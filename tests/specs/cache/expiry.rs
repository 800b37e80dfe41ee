//! Cache expiry specs
//!
//! Expiry is lazy: a stale record is removed by the read that finds it.

use crate::prelude::*;

fn setup() -> (ResultCache<MemoryStore, FakeClock>, FakeClock) {
    let clock = FakeClock::new();
    (ResultCache::with_clock(MemoryStore::new(), clock.clone()), clock)
}

#[tokio::test]
async fn record_expires_after_ttl_and_is_purged_on_read() {
    let (cache, clock) = setup();
    let owner = OwnerId::from("own-reader");
    let key = cache_key("summarize", "1", json!({ "doc": 7 }));

    cache.set(&owner, &key, json!("summary"), Duration::from_millis(1000), 100).await.unwrap();
    assert_eq!(cache.get(&key).await.unwrap(), Some(json!("summary")));
    let before = cache.get_cache_stats().await.unwrap().total;

    clock.advance(Duration::from_millis(1000));
    assert_eq!(cache.get(&key).await.unwrap(), None);
    assert_eq!(cache.get_cache_stats().await.unwrap().total, before - 1);
}

#[tokio::test]
async fn stats_count_stale_records_until_read() {
    let (cache, clock) = setup();
    let owner = OwnerId::from("own-reader");
    let stale = cache_key("a", "1", json!(null));
    let fresh = cache_key("b", "1", json!(null));

    cache.set(&owner, &stale, json!(1), Duration::from_millis(10), 100).await.unwrap();
    cache.set(&owner, &fresh, json!(2), Duration::from_secs(10), 100).await.unwrap();
    clock.advance(Duration::from_millis(10));

    let stats = cache.get_cache_stats().await.unwrap();
    assert_eq!((stats.total, stats.expired), (2, 1));

    cache.get(&stale).await.unwrap();
    let stats = cache.get_cache_stats().await.unwrap();
    assert_eq!((stats.total, stats.expired), (1, 0));
}

#[tokio::test]
async fn clearing_one_owner_keeps_others() {
    let (cache, _clock) = setup();
    let (alice, bob) = (OwnerId::from("own-alice"), OwnerId::from("own-bob"));
    let ttl = Duration::from_secs(60);
    cache.set(&alice, &cache_key("x", "1", 1), json!(1), ttl, 100).await.unwrap();
    cache.set(&alice, &cache_key("x", "1", 2), json!(2), ttl, 100).await.unwrap();
    cache.set(&bob, &cache_key("x", "1", 3), json!(3), ttl, 100).await.unwrap();

    assert_eq!(cache.clear_cache(&alice).await.unwrap(), 2);
    assert_eq!(cache.get(&cache_key("x", "1", 3)).await.unwrap(), Some(json!(3)));

    cache.clear_all_cache().await.unwrap();
    assert_eq!(cache.get_cache_stats().await.unwrap().total, 0);
}

//! Cache capacity specs
//!
//! Capacity is enforced after each write by evicting the oldest records.

use crate::prelude::*;

#[tokio::test]
async fn overflow_keeps_the_newest_records() {
    let clock = FakeClock::new();
    let cache = ResultCache::with_clock(MemoryStore::new(), clock.clone());
    let owner = OwnerId::from("own-writer");
    let max_entries = 5;

    for n in 0..=max_entries as u64 {
        let key = cache_key("unit", "1", json!({ "n": n }));
        cache.set(&owner, &key, json!(n), Duration::from_secs(60), max_entries).await.unwrap();
        clock.advance(Duration::from_millis(5));
    }

    assert_eq!(cache.get_cache_stats().await.unwrap().total, max_entries);
    assert_eq!(cache.get(&cache_key("unit", "1", json!({ "n": 0 }))).await.unwrap(), None);
    for n in 1..=max_entries as u64 {
        let key = cache_key("unit", "1", json!({ "n": n }));
        assert_eq!(cache.get(&key).await.unwrap(), Some(json!(n)));
    }
}

#[tokio::test]
async fn capacity_is_shared_by_all_owners() {
    let clock = FakeClock::new();
    let cache = ResultCache::with_clock(MemoryStore::new(), clock.clone())
        .with_config(CacheConfig { ttl: Duration::from_secs(60), max_entries: 2 });
    let quiet = OwnerId::from("own-quiet");
    let busy = OwnerId::from("own-busy");

    cache.put(&quiet, &cache_key("q", "1", 0), json!("quiet")).await.unwrap();
    for n in 0..2 {
        clock.advance(Duration::from_millis(1));
        cache.put(&busy, &cache_key("b", "1", n), json!(n)).await.unwrap();
    }

    assert_eq!(cache.get(&cache_key("q", "1", 0)).await.unwrap(), None);
    assert_eq!(cache.get_cache_stats().await.unwrap().total, 2);
}

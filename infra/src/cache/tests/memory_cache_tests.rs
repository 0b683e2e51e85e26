//! Tests for the in-process cache

use std::time::Duration;

use pms_core::services::KeyValueCache;

use crate::cache::MemoryCache;

#[tokio::test]
async fn test_set_get_delete() {
    let cache = MemoryCache::new();

    cache.set_with_expiry("otp:code:a", "hash", 60).await.unwrap();
    assert_eq!(cache.get("otp:code:a").await.unwrap(), Some("hash".to_string()));
    assert!(cache.exists("otp:code:a").await.unwrap());

    cache.delete("otp:code:a").await.unwrap();
    assert_eq!(cache.get("otp:code:a").await.unwrap(), None);
    assert!(cache.is_empty().await);

    // deleting a missing key is fine
    cache.delete("otp:code:a").await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_entries_expire() {
    let cache = MemoryCache::new();
    cache.set_with_expiry("k", "v", 30).await.unwrap();

    tokio::time::advance(Duration::from_secs(29)).await;
    assert!(cache.exists("k").await.unwrap());
    assert_eq!(cache.ttl("k").await.unwrap(), Some(1));

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(!cache.exists("k").await.unwrap());
    assert_eq!(cache.ttl("k").await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_increment_keeps_expiry() {
    let cache = MemoryCache::new();
    cache.set_with_expiry("attempts", "0", 300).await.unwrap();

    tokio::time::advance(Duration::from_secs(100)).await;
    assert_eq!(cache.increment("attempts").await.unwrap(), 1);
    assert_eq!(cache.increment("attempts").await.unwrap(), 2);
    assert_eq!(cache.ttl("attempts").await.unwrap(), Some(200));

    tokio::time::advance(Duration::from_secs(201)).await;
    assert_eq!(cache.get("attempts").await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_increment_missing_key_has_no_expiry() {
    let cache = MemoryCache::new();

    assert_eq!(cache.increment("counter").await.unwrap(), 1);
    assert_eq!(cache.ttl("counter").await.unwrap(), None);
    assert!(cache.exists("counter").await.unwrap());

    assert!(cache.expire("counter", 10).await.unwrap());
    assert_eq!(cache.ttl("counter").await.unwrap(), Some(10));
    assert!(!cache.expire("missing", 10).await.unwrap());
}

#[tokio::test]
async fn test_increment_rejects_non_integer() {
    let cache = MemoryCache::new();
    cache.set_with_expiry("k", "abc", 60).await.unwrap();

    assert!(cache.increment("k").await.is_err());
}

#[tokio::test]
async fn test_clones_share_state() {
    let cache = MemoryCache::new();
    let other = cache.clone();

    cache.set_with_expiry("shared", "1", 60).await.unwrap();
    assert_eq!(other.get("shared").await.unwrap(), Some("1".to_string()));
    assert_eq!(other.len().await, 1);
}

//! Redis-backed `KeyValueCache`
//!
//! Shared by every server instance pointing at the same Redis, so OTP state
//! (codes, attempt counters, resend cooldowns) is consistent across workers.

use async_trait::async_trait;
use pms_core::services::KeyValueCache;

use crate::cache::RedisClient;

/// Adapter exposing [`RedisClient`] through the core cache seam
#[derive(Clone)]
pub struct RedisCache {
    redis_client: RedisClient,
}

impl RedisCache {
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }

    /// Underlying client, used by health checks
    pub fn client(&self) -> &RedisClient {
        &self.redis_client
    }
}

#[async_trait]
impl KeyValueCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.redis_client.get(key).await.map_err(|e| e.to_string())
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        self.redis_client
            .set_with_expiry(key, value, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        self.redis_client
            .delete(key)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn exists(&self, key: &str) -> Result<bool, String> {
        self.redis_client.exists(key).await.map_err(|e| e.to_string())
    }

    async fn ttl(&self, key: &str) -> Result<Option<i64>, String> {
        self.redis_client.ttl(key).await.map_err(|e| e.to_string())
    }

    async fn increment(&self, key: &str) -> Result<i64, String> {
        self.redis_client.increment(key).await.map_err(|e| e.to_string())
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<bool, String> {
        self.redis_client
            .expire(key, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }
}

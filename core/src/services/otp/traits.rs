//! Cache seam used by the OTP store

use async_trait::async_trait;

/// Key-value cache with per-key expiry
///
/// Both Redis and the in-process cache implement this; every OTP mutation
/// goes through it so state is shared by all server instances using the
/// same backend.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Get a value, `None` when missing or expired
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
    /// Set a value that expires after `ttl_seconds`
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String>;
    /// Delete a key; missing keys are not an error
    async fn delete(&self, key: &str) -> Result<(), String>;
    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool, String>;
    /// Remaining lifetime in seconds, `None` when missing or without expiry
    async fn ttl(&self, key: &str) -> Result<Option<i64>, String>;
    /// Atomically increment an integer value, keeping the key's expiry.
    /// A missing key starts at 0 and is created without expiry.
    async fn increment(&self, key: &str) -> Result<i64, String>;
    /// Set the expiry of an existing key, `false` when the key is missing
    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<bool, String>;
}

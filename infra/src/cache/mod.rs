//! Cache module
//!
//! Redis client with retry logic and the two `KeyValueCache` backends used
//! for OTP state: Redis for deployments, an in-process map for single-node
//! development and tests.

pub mod memory_cache;
pub mod redis_cache;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use memory_cache::MemoryCache;
pub use redis_cache::RedisCache;
pub use redis_client::RedisClient;

pub use pms_shared::config::CacheConfig;

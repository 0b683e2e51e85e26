//! Shared utilities and common types for the clinic backend
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response structures
//! - Identifier validation helpers

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheBackend, CacheConfig, DatabaseConfig, DeliveryConfig, Environment,
    LogFormat, LoggingConfig, OtpConfig, ProviderCredentials, ServerConfig, SmtpConfig,
    StorageConfig,
};
pub use types::{ErrorResponse, HealthResponse};
pub use utils::validation;

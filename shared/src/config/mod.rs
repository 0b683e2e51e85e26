//! Configuration module with business-specific sub-modules
//!
//! - `cache` - Redis / in-memory cache selection and key prefixing
//! - `database` - Database connection and pool configuration
//! - `delivery` - Sender address, SMTP relay and SMS/WhatsApp provider credentials
//! - `environment` - Environment detection and logging configuration
//! - `otp` - One-time code lifetime, attempts and cooldown
//! - `server` - HTTP server bind address
//! - `storage` - Object storage bucket and signed URL settings

pub mod cache;
pub mod database;
pub mod delivery;
pub mod environment;
pub mod otp;
pub mod server;
pub mod storage;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

pub use cache::{CacheBackend, CacheConfig};
pub use database::DatabaseConfig;
pub use delivery::{DeliveryConfig, ProviderCredentials, SmtpConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub otp: OtpConfig,
    pub delivery: DeliveryConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            otp: OtpConfig::default(),
            delivery: DeliveryConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            otp: OtpConfig::from_env(),
            delivery: DeliveryConfig::from_env(),
            storage: StorageConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Startup checks for settings that would otherwise fail per request
    pub fn validate(&self) -> Result<(), String> {
        self.otp
            .validate()
            .map_err(|e| format!("Invalid OTP configuration: {}", e))?;
        self.storage
            .validate()
            .map_err(|e| format!("Invalid storage configuration: {}", e))
    }
}

/// Read a variable, treating unset and blank the same way.
pub(crate) fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env_opt(key)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Accepts `1`, `true`, `yes` and `on` in any case.
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    match env_opt(key) {
        Some(value) => matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_validate_covers_otp_and_storage() {
        assert!(AppConfig::default().validate().is_ok());

        let mut config = AppConfig::default();
        config.otp.resend_cooldown_seconds = 0;
        assert!(config.validate().unwrap_err().starts_with("Invalid OTP"));

        let mut config = AppConfig::default();
        config.storage.put_expires_seconds = 8 * 24 * 3600;
        assert!(config.validate().unwrap_err().starts_with("Invalid storage"));
    }
}

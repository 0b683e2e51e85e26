//! Configuration for the OTP store

use pms_shared::config::OtpConfig;

/// Settings passed to `OtpStore` at construction
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Digits per code
    pub code_length: usize,
    /// Lifetime of a code (and its attempt counter) in seconds
    pub ttl_seconds: u64,
    /// Failed verifications before the code is purged
    pub max_attempts: u32,
    /// Seconds before the same identifier can be issued a new code
    pub resend_cooldown_seconds: u64,
    /// Optional namespace prepended to cache keys
    pub key_prefix: Option<String>,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self::from(&OtpConfig::default())
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_length: config.code_length,
            ttl_seconds: config.ttl_seconds,
            max_attempts: config.max_attempts,
            resend_cooldown_seconds: config.resend_cooldown_seconds,
            key_prefix: None,
        }
    }
}

impl OtpServiceConfig {
    pub fn with_key_prefix(mut self, prefix: Option<String>) -> Self {
        self.key_prefix = prefix;
        self
    }
}

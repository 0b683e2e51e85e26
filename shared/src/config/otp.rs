//! One-time code configuration

use serde::{Deserialize, Serialize};

use super::{env_or, env_parse};

/// Shortest code the verify endpoint accepts
pub const MIN_CODE_LENGTH: usize = 4;
/// Longest code the verify endpoint accepts
pub const MAX_CODE_LENGTH: usize = 8;
/// Upper bound for code lifetime and resend cooldown
pub const MAX_OTP_SECONDS: u64 = 86_400;

/// OTP lifecycle settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digits in a generated code
    pub code_length: usize,

    /// Lifetime of an issued code in seconds
    pub ttl_seconds: u64,

    /// Failed verifications tolerated before the code is purged
    pub max_attempts: u32,

    /// Minimum gap between two issues for one identifier
    pub resend_cooldown_seconds: u64,

    /// Subject line of the email carrying the code
    pub email_subject: String,

    /// Email body; `{code}` is replaced with the generated code
    pub email_template: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            ttl_seconds: 300,
            max_attempts: 5,
            resend_cooldown_seconds: 30,
            email_subject: String::from("Your verification code"),
            email_template: String::from("Your OTP code is: {code}"),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_length: env_parse("OTP_CODE_LENGTH", defaults.code_length),
            ttl_seconds: env_parse("OTP_TTL_SECONDS", defaults.ttl_seconds),
            max_attempts: env_parse("OTP_MAX_ATTEMPTS", defaults.max_attempts),
            resend_cooldown_seconds: env_parse(
                "OTP_RESEND_COOLDOWN_SECONDS",
                defaults.resend_cooldown_seconds,
            ),
            email_subject: env_or("OTP_EMAIL_SUBJECT", &defaults.email_subject),
            email_template: env_or("OTP_EMAIL_TEMPLATE", &defaults.email_template),
        }
    }

    /// Reject settings the rest of the system cannot honour
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.code_length) {
            return Err(format!(
                "OTP code length must be between {} and {}, got {}",
                MIN_CODE_LENGTH, MAX_CODE_LENGTH, self.code_length
            ));
        }
        if !(1..=MAX_OTP_SECONDS).contains(&self.ttl_seconds) {
            return Err(format!(
                "OTP lifetime must be between 1 and {} seconds, got {}",
                MAX_OTP_SECONDS, self.ttl_seconds
            ));
        }
        // Cache backends reject a zero expiry on the cooldown marker
        if !(1..=MAX_OTP_SECONDS).contains(&self.resend_cooldown_seconds) {
            return Err(format!(
                "OTP resend cooldown must be between 1 and {} seconds, got {}",
                MAX_OTP_SECONDS, self.resend_cooldown_seconds
            ));
        }
        if self.max_attempts == 0 {
            return Err("OTP max attempts must be positive".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_config_defaults() {
        let config = OtpConfig::default();
        assert_eq!(config.code_length, 6);
        assert_eq!(config.ttl_seconds, 300);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.resend_cooldown_seconds, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_length() {
        let short = OtpConfig { code_length: 3, ..Default::default() };
        assert!(short.validate().is_err());

        let long = OtpConfig { code_length: 9, ..Default::default() };
        assert!(long.validate().is_err());

        let no_attempts = OtpConfig { max_attempts: 0, ..Default::default() };
        assert!(no_attempts.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_and_huge_durations() {
        let no_cooldown = OtpConfig { resend_cooldown_seconds: 0, ..Default::default() };
        assert!(no_cooldown.validate().unwrap_err().contains("cooldown"));

        let no_ttl = OtpConfig { ttl_seconds: 0, ..Default::default() };
        assert!(no_ttl.validate().is_err());

        let forever = OtpConfig { ttl_seconds: u64::MAX, ..Default::default() };
        assert!(forever.validate().is_err());

        let one_day = OtpConfig { ttl_seconds: MAX_OTP_SECONDS, ..Default::default() };
        assert!(one_day.validate().is_ok());
    }
}

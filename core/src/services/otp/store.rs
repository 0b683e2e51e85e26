//! OTP state in the shared cache
//!
//! Three keys per identifier, each with its own expiry:
//! - `otp:code:{identifier}` - SHA-256 hex digest of the live code
//! - `otp:attempts:{identifier}` - failed verification counter
//! - `otp:send_cooldown:{identifier}` - present while a resend is refused

use chrono::{Duration, Utc};
use constant_time_eq::constant_time_eq;
use pms_shared::validation::mask_identifier;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::domain::entities::otp::IssuedOtp;
use crate::errors::{DomainError, DomainResult, OtpError};

use super::code_generator::generate_numeric_code;
use super::config::OtpServiceConfig;
use super::traits::KeyValueCache;
use super::types::VerifyOutcome;

fn prefixed(prefix: Option<&str>, key: String) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, key),
        None => key,
    }
}

/// Key holding the hashed code
pub fn format_code_key(prefix: Option<&str>, identifier: &str) -> String {
    prefixed(prefix, format!("otp:code:{}", identifier))
}

/// Key holding the failed attempt counter
pub fn format_attempts_key(prefix: Option<&str>, identifier: &str) -> String {
    prefixed(prefix, format!("otp:attempts:{}", identifier))
}

/// Key marking the resend cooldown
pub fn format_cooldown_key(prefix: Option<&str>, identifier: &str) -> String {
    prefixed(prefix, format!("otp:send_cooldown:{}", identifier))
}

/// Hex SHA-256 of a code; only digests are written to the cache
pub fn hash_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}

/// Issues and verifies one-time codes keyed by identifier
pub struct OtpStore<C: KeyValueCache> {
    cache: Arc<C>,
    config: OtpServiceConfig,
}

impl<C: KeyValueCache> OtpStore<C> {
    pub fn new(cache: Arc<C>, config: OtpServiceConfig) -> Self {
        Self { cache, config }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    fn code_key(&self, identifier: &str) -> String {
        format_code_key(self.config.key_prefix.as_deref(), identifier)
    }

    fn attempts_key(&self, identifier: &str) -> String {
        format_attempts_key(self.config.key_prefix.as_deref(), identifier)
    }

    fn cooldown_key(&self, identifier: &str) -> String {
        format_cooldown_key(self.config.key_prefix.as_deref(), identifier)
    }

    /// Issue a new code, replacing any live one for the identifier.
    ///
    /// Fails with `Throttled` while the resend cooldown of a previous issue
    /// is still running.
    pub async fn issue(&self, identifier: &str) -> DomainResult<IssuedOtp> {
        let cooldown_key = self.cooldown_key(identifier);

        let cooling_down = self
            .cache
            .exists(&cooldown_key)
            .await
            .map_err(|e| DomainError::internal("Failed to read OTP cooldown", e))?;

        if cooling_down {
            let remaining = self
                .cache
                .ttl(&cooldown_key)
                .await
                .map_err(|e| DomainError::internal("Failed to read OTP cooldown", e))?
                .filter(|ttl| *ttl > 0)
                .map(|ttl| ttl as u64)
                .unwrap_or(self.config.resend_cooldown_seconds)
                .max(1);

            tracing::warn!(
                identifier = %mask_identifier(identifier),
                retry_after_seconds = remaining,
                event = "otp_throttled",
                "OTP requested during resend cooldown"
            );
            return Err(OtpError::Throttled {
                retry_after_seconds: remaining,
            }
            .into());
        }

        let code = generate_numeric_code(self.config.code_length);
        let ttl = self.config.ttl_seconds;
        let expires_at = Utc::now() + Duration::seconds(ttl as i64);

        self.cache
            .set_with_expiry(&self.code_key(identifier), &hash_code(&code), ttl)
            .await
            .map_err(|e| {
                tracing::error!(
                    identifier = %mask_identifier(identifier),
                    error = %e,
                    event = "otp_storage_failed",
                    "Failed to store OTP"
                );
                DomainError::internal("Failed to store OTP", e)
            })?;

        // A code must never outlive a failed issue
        if let Err(error) = self.arm(identifier, &cooldown_key, ttl).await {
            if let Err(purge_error) = self.purge(identifier).await {
                tracing::warn!(
                    identifier = %mask_identifier(identifier),
                    error = %purge_error,
                    event = "otp_cleanup_failed",
                    "Failed to discard OTP after an incomplete issue"
                );
            }
            return Err(error);
        }

        tracing::info!(
            identifier = %mask_identifier(identifier),
            ttl_seconds = ttl,
            event = "otp_generated",
            "Issued new OTP"
        );

        Ok(IssuedOtp {
            identifier: identifier.to_string(),
            code,
            expires_at,
        })
    }

    /// Reset the attempt counter and start the resend cooldown
    async fn arm(&self, identifier: &str, cooldown_key: &str, ttl: u64) -> DomainResult<()> {
        self.cache
            .set_with_expiry(&self.attempts_key(identifier), "0", ttl)
            .await
            .map_err(|e| DomainError::internal("Failed to reset OTP attempts", e))?;

        self.cache
            .set_with_expiry(cooldown_key, "1", self.config.resend_cooldown_seconds)
            .await
            .map_err(|e| DomainError::internal("Failed to set OTP cooldown", e))
    }

    /// Check a submitted code.
    ///
    /// A match consumes the code. A mismatch counts against the attempt
    /// budget; the code is purged as soon as the budget is spent.
    pub async fn verify(&self, identifier: &str, submitted_code: &str) -> DomainResult<VerifyOutcome> {
        let code_key = self.code_key(identifier);
        let attempts_key = self.attempts_key(identifier);

        let stored_hash = match self
            .cache
            .get(&code_key)
            .await
            .map_err(|e| DomainError::internal("Failed to read OTP", e))?
        {
            Some(hash) => hash,
            None => {
                tracing::debug!(
                    identifier = %mask_identifier(identifier),
                    event = "otp_missing",
                    "No live OTP for identifier"
                );
                return Ok(VerifyOutcome::Missing);
            }
        };

        let attempts = self
            .cache
            .get(&attempts_key)
            .await
            .map_err(|e| DomainError::internal("Failed to read OTP attempts", e))?
            .and_then(|value| value.parse::<i64>().ok())
            .unwrap_or(0);

        let max_attempts = i64::from(self.config.max_attempts);
        if attempts >= max_attempts {
            self.purge(identifier).await?;
            tracing::warn!(
                identifier = %mask_identifier(identifier),
                event = "otp_attempts_exhausted",
                "OTP purged after exhausting attempts"
            );
            return Ok(VerifyOutcome::Exhausted);
        }

        let submitted_hash = hash_code(submitted_code.trim());
        if constant_time_eq(submitted_hash.as_bytes(), stored_hash.as_bytes()) {
            self.purge(identifier).await?;
            tracing::info!(
                identifier = %mask_identifier(identifier),
                event = "otp_verified_success",
                "OTP verified"
            );
            return Ok(VerifyOutcome::Verified);
        }

        let attempts = self
            .cache
            .increment(&attempts_key)
            .await
            .map_err(|e| DomainError::internal("Failed to count OTP attempt", e))?;

        if attempts >= max_attempts {
            self.purge(identifier).await?;
            tracing::warn!(
                identifier = %mask_identifier(identifier),
                attempts = attempts,
                event = "otp_attempts_exhausted",
                "OTP purged after exhausting attempts"
            );
            return Ok(VerifyOutcome::Exhausted);
        }

        // A counter that lost its expiry must not outlive the code
        if self
            .cache
            .ttl(&attempts_key)
            .await
            .map_err(|e| DomainError::internal("Failed to read OTP attempts", e))?
            .is_none()
        {
            let remaining = self
                .cache
                .ttl(&code_key)
                .await
                .map_err(|e| DomainError::internal("Failed to read OTP", e))?
                .filter(|ttl| *ttl > 0)
                .map(|ttl| ttl as u64)
                .unwrap_or(self.config.ttl_seconds);
            self.cache
                .expire(&attempts_key, remaining)
                .await
                .map_err(|e| DomainError::internal("Failed to expire OTP attempts", e))?;
        }

        let remaining_attempts = (max_attempts - attempts).max(0) as u32;
        tracing::warn!(
            identifier = %mask_identifier(identifier),
            remaining_attempts = remaining_attempts,
            event = "otp_verification_failed",
            "OTP mismatch"
        );
        Ok(VerifyOutcome::Mismatch { remaining_attempts })
    }

    /// Remove the code and its counter; the cooldown is left to expire
    pub async fn purge(&self, identifier: &str) -> DomainResult<()> {
        self.cache
            .delete(&self.code_key(identifier))
            .await
            .map_err(|e| DomainError::internal("Failed to delete OTP", e))?;
        self.cache
            .delete(&self.attempts_key(identifier))
            .await
            .map_err(|e| DomainError::internal("Failed to delete OTP attempts", e))?;
        Ok(())
    }
}

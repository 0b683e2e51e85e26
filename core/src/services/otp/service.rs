//! OTP request / verify use cases

use pms_shared::validation::{is_valid_email, is_valid_phone, mask_identifier};
use std::sync::Arc;

use crate::domain::entities::otp::{Channel, IssuedOtp};
use crate::errors::{DomainResult, OtpError};
use crate::services::delivery::DeliveryDispatcher;

use super::store::OtpStore;
use super::traits::KeyValueCache;
use super::types::VerifyOutcome;

/// Validates identifiers, drives the store and hands codes to the dispatcher
pub struct OtpService<C: KeyValueCache> {
    store: OtpStore<C>,
    dispatcher: Arc<DeliveryDispatcher>,
}

impl<C: KeyValueCache> OtpService<C> {
    pub fn new(store: OtpStore<C>, dispatcher: Arc<DeliveryDispatcher>) -> Self {
        Self { store, dispatcher }
    }

    pub fn store(&self) -> &OtpStore<C> {
        &self.store
    }

    /// Trim the identifier and check it has the shape the channel needs
    pub fn normalize_identifier(channel: Channel, identifier: &str) -> Result<String, OtpError> {
        let identifier = identifier.trim();
        let valid = if channel.uses_phone() {
            is_valid_phone(identifier)
        } else {
            is_valid_email(identifier)
        };

        if valid {
            Ok(identifier.to_string())
        } else {
            Err(OtpError::InvalidIdentifier {
                channel: channel.to_string(),
            })
        }
    }

    /// Issue a code and deliver it over `channel`.
    ///
    /// When delivery fails the issued code and cooldown stay in place; the
    /// caller can retry once the cooldown has passed.
    pub async fn request_code(&self, channel: Channel, identifier: &str) -> DomainResult<IssuedOtp> {
        let identifier = Self::normalize_identifier(channel, identifier)?;
        let issued = self.store.issue(&identifier).await?;

        if let Err(error) = self
            .dispatcher
            .dispatch(channel, &identifier, &issued.code)
            .await
        {
            tracing::error!(
                identifier = %mask_identifier(&identifier),
                channel = %channel,
                error = %error,
                event = "otp_delivery_failed",
                "OTP issued but not delivered"
            );
            return Err(error.into());
        }

        Ok(issued)
    }

    /// Verify a submitted code; every non-match is `InvalidOrExpiredCode`
    pub async fn verify_code(
        &self,
        channel: Channel,
        identifier: &str,
        code: &str,
    ) -> DomainResult<()> {
        let identifier = Self::normalize_identifier(channel, identifier)?;

        match self.store.verify(&identifier, code).await? {
            VerifyOutcome::Verified => Ok(()),
            VerifyOutcome::Mismatch { .. } | VerifyOutcome::Exhausted | VerifyOutcome::Missing => {
                Err(OtpError::InvalidOrExpiredCode.into())
            }
        }
    }
}

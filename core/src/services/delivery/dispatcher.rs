//! Delivery dispatcher

use pms_shared::validation::mask_identifier;
use std::sync::Arc;

use crate::domain::entities::otp::Channel;
use crate::errors::OtpError;

use super::config::DispatcherConfig;
use super::traits::{MailSender, MessageSender};

/// One sender per channel, checked against the channel's preconditions
pub struct DeliveryDispatcher {
    config: DispatcherConfig,
    mailer: Arc<dyn MailSender>,
    sms: Arc<dyn MessageSender>,
    whatsapp: Arc<dyn MessageSender>,
}

impl DeliveryDispatcher {
    pub fn new(
        config: DispatcherConfig,
        mailer: Arc<dyn MailSender>,
        sms: Arc<dyn MessageSender>,
        whatsapp: Arc<dyn MessageSender>,
    ) -> Self {
        Self {
            config,
            mailer,
            sms,
            whatsapp,
        }
    }

    /// Deliver `code` to `identifier` over `channel`
    pub async fn dispatch(&self, channel: Channel, identifier: &str, code: &str) -> Result<(), OtpError> {
        match channel {
            Channel::Email => self.send_email(identifier, code).await,
            Channel::Sms => {
                self.send_message(channel, &self.sms, self.config.sms_configured, identifier, code)
                    .await
            }
            Channel::Whatsapp => {
                self.send_message(
                    channel,
                    &self.whatsapp,
                    self.config.whatsapp_configured,
                    identifier,
                    code,
                )
                .await
            }
        }
    }

    async fn send_email(&self, identifier: &str, code: &str) -> Result<(), OtpError> {
        let from = self
            .config
            .from_email
            .as_deref()
            .ok_or_else(|| OtpError::Delivery {
                message: "DEFAULT_FROM_EMAIL is not configured".to_string(),
            })?;

        self.mailer
            .send_mail(from, identifier, &self.config.email_subject, &self.config.render(code))
            .await
            .map_err(|e| OtpError::Delivery {
                message: format!("Failed to send email: {}", e),
            })?;

        tracing::info!(
            identifier = %mask_identifier(identifier),
            channel = "email",
            event = "otp_dispatched",
            "OTP email sent"
        );
        Ok(())
    }

    async fn send_message(
        &self,
        channel: Channel,
        sender: &Arc<dyn MessageSender>,
        configured: bool,
        identifier: &str,
        code: &str,
    ) -> Result<(), OtpError> {
        let provider = match channel {
            Channel::Whatsapp => "WhatsApp",
            _ => "SMS",
        };

        if self.config.require_provider_config && !configured {
            return Err(OtpError::Delivery {
                message: format!("{} provider not configured", provider),
            });
        }

        let message_id = sender
            .send_message(identifier, &self.config.render(code))
            .await
            .map_err(|e| OtpError::Delivery {
                message: format!("Failed to send {}: {}", provider, e),
            })?;

        tracing::info!(
            identifier = %mask_identifier(identifier),
            channel = %channel,
            message_id = %message_id,
            event = "otp_dispatched",
            "OTP message sent"
        );
        Ok(())
    }
}

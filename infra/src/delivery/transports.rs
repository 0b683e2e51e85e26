//! Transport selection from configuration

use std::sync::Arc;

use pms_core::services::{MailSender, MessageSender};
use pms_shared::config::{Environment, ProviderCredentials, SmtpConfig};
use tracing::warn;

use crate::delivery::{
    ConsoleMailSender, ConsoleMessageSender, SmtpMailer, TwilioChannel, TwilioMessageSender,
};
use crate::InfrastructureError;

/// SMTP when a relay is configured, the console mailer in development.
///
/// Outside development a missing relay is a startup error, since the
/// console mailer would answer every OTP request with success.
pub fn mail_transport(
    environment: Environment,
    smtp: Option<&SmtpConfig>,
) -> Result<Arc<dyn MailSender>, InfrastructureError> {
    match smtp {
        Some(smtp) => Ok(Arc::new(SmtpMailer::new(smtp)?)),
        None if environment.is_development() => {
            warn!("SMTP_HOST not set; emails are written to the log instead of sent");
            Ok(Arc::new(ConsoleMailSender::new()))
        }
        None => Err(InfrastructureError::Config(format!(
            "SMTP_HOST must be set in {}",
            environment
        ))),
    }
}

/// Twilio when credentials are complete, otherwise a logging sender
pub fn message_transport(
    environment: Environment,
    channel: TwilioChannel,
    credentials: &ProviderCredentials,
) -> Result<Arc<dyn MessageSender>, InfrastructureError> {
    if credentials.is_complete() {
        return Ok(Arc::new(TwilioMessageSender::new(channel, credentials)?));
    }
    warn!(
        channel = channel.name(),
        "Provider credentials incomplete; messages are logged instead of sent"
    );
    Ok(Arc::new(
        ConsoleMessageSender::new(channel.name())
            .with_body_logging(environment.is_development()),
    ))
}

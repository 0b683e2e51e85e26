//! Configuration for the delivery dispatcher

use pms_shared::config::{DeliveryConfig, OtpConfig};

/// Everything the dispatcher checks before sending
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Sender address; email delivery fails without one
    pub from_email: Option<String>,
    /// Require complete provider credentials for SMS and WhatsApp
    pub require_provider_config: bool,
    /// SMS credentials present
    pub sms_configured: bool,
    /// WhatsApp credentials present
    pub whatsapp_configured: bool,
    pub email_subject: String,
    /// Message body with a `{code}` placeholder
    pub message_template: String,
}

impl DispatcherConfig {
    pub fn new(delivery: &DeliveryConfig, otp: &OtpConfig) -> Self {
        Self {
            from_email: delivery.from_email.clone().filter(|from| !from.is_empty()),
            require_provider_config: delivery.require_provider_config,
            sms_configured: delivery.sms.is_complete(),
            whatsapp_configured: delivery.whatsapp.is_complete(),
            email_subject: otp.email_subject.clone(),
            message_template: otp.email_template.clone(),
        }
    }

    pub fn render(&self, code: &str) -> String {
        self.message_template.replace("{code}", code)
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self::new(&DeliveryConfig::default(), &OtpConfig::default())
    }
}

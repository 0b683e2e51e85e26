//! Delivery channel configuration (email relay, SMS and WhatsApp providers)

use serde::{Deserialize, Serialize};

use super::{env_flag, env_opt, env_parse};

/// Account credentials for a messaging provider
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderCredentials {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    /// Sending number (E.164)
    pub sender: Option<String>,
}

impl ProviderCredentials {
    /// Read `{prefix}_ACCOUNT_SID`, `{prefix}_AUTH_TOKEN` and `{prefix}_SENDER`
    pub fn from_env(prefix: &str) -> Self {
        Self {
            account_sid: env_opt(&format!("{}_ACCOUNT_SID", prefix)),
            auth_token: env_opt(&format!("{}_AUTH_TOKEN", prefix)),
            sender: env_opt(&format!("{}_SENDER", prefix)),
        }
    }

    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: Some(account_sid.into()),
            auth_token: Some(auth_token.into()),
            sender: Some(sender.into()),
        }
    }

    /// All three values present
    pub fn is_complete(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some() && self.sender.is_some()
    }
}

/// SMTP relay settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl SmtpConfig {
    /// `None` unless `SMTP_HOST` is set
    pub fn from_env() -> Option<Self> {
        let host = env_opt("SMTP_HOST")?;
        Some(Self {
            host,
            port: env_parse("SMTP_PORT", 587),
            username: env_opt("SMTP_USERNAME"),
            password: env_opt("SMTP_PASSWORD"),
        })
    }
}

/// Delivery dispatcher settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeliveryConfig {
    /// Sender address for OTP emails; email delivery fails without it
    pub from_email: Option<String>,

    /// Refuse SMS/WhatsApp delivery unless provider credentials are complete
    #[serde(default)]
    pub require_provider_config: bool,

    /// SMTP relay; a logging mailer is used when absent
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,

    #[serde(default)]
    pub sms: ProviderCredentials,

    #[serde(default)]
    pub whatsapp: ProviderCredentials,
}

impl DeliveryConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            from_email: env_opt("DEFAULT_FROM_EMAIL"),
            require_provider_config: env_flag("OTP_REQUIRE_PROVIDER_CONFIG", false),
            smtp: SmtpConfig::from_env(),
            sms: ProviderCredentials::from_env("SMS_TWILIO"),
            whatsapp: ProviderCredentials::from_env("WA_TWILIO"),
        }
    }

    pub fn with_from_email(mut self, from_email: impl Into<String>) -> Self {
        self.from_email = Some(from_email.into());
        self
    }

    pub fn with_required_providers(mut self, required: bool) -> Self {
        self.require_provider_config = required;
        self
    }
}

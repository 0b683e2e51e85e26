//! Twilio Messages API sender
//!
//! One instance per channel: SMS sends to plain E.164 numbers, WhatsApp
//! addresses both ends as `whatsapp:+...`.
//!
//! Only failures where Twilio cannot have accepted the message are retried,
//! with capped exponential backoff: refused connections, 429 and 503. A
//! timeout or any other 5xx may already have queued the message.

use std::time::Duration;

use async_trait::async_trait;
use pms_core::services::MessageSender;
use pms_shared::config::ProviderCredentials;
use pms_shared::validation::mask_identifier;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::InfrastructureError;

const DEFAULT_API_BASE: &str = "https://api.twilio.com";
const WHATSAPP_PREFIX: &str = "whatsapp:";

/// Upper bound for the backoff between retries
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwilioChannel {
    Sms,
    Whatsapp,
}

impl TwilioChannel {
    /// Twilio address for a phone number on this channel
    pub fn address(&self, number: &str) -> String {
        let number = number.trim();
        match self {
            TwilioChannel::Sms => number.to_string(),
            TwilioChannel::Whatsapp if number.starts_with(WHATSAPP_PREFIX) => number.to_string(),
            TwilioChannel::Whatsapp => format!("{}{}", WHATSAPP_PREFIX, number),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TwilioChannel::Sms => "sms",
            TwilioChannel::Whatsapp => "whatsapp",
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct TwilioMessageSender {
    client: Client,
    channel: TwilioChannel,
    account_sid: String,
    auth_token: String,
    sender: String,
    api_base: String,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl TwilioMessageSender {
    /// Build from complete provider credentials
    pub fn new(
        channel: TwilioChannel,
        credentials: &ProviderCredentials,
    ) -> Result<Self, InfrastructureError> {
        let missing = |field: &str| {
            InfrastructureError::Config(format!(
                "Twilio {} credentials incomplete: {} not set",
                channel.name(),
                field
            ))
        };

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()?,
            channel,
            account_sid: credentials.account_sid.clone().ok_or_else(|| missing("account SID"))?,
            auth_token: credentials.auth_token.clone().ok_or_else(|| missing("auth token"))?,
            sender: credentials.sender.clone().ok_or_else(|| missing("sender"))?,
            api_base: DEFAULT_API_BASE.to_string(),
            max_retries: 3,
            retry_delay_ms: 1000,
        })
    }

    /// Point at another API host (e.g. a local stub)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_retry_config(mut self, max_retries: u32, retry_delay_ms: u64) -> Self {
        self.max_retries = max_retries.max(1);
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    pub(crate) fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base, self.account_sid
        )
    }

    async fn send_once(&self, to: &str, body: &str) -> Result<String, (bool, String)> {
        let form = [
            ("To", self.channel.address(to)),
            ("From", self.channel.address(&self.sender)),
            ("Body", body.to_string()),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|e| (e.is_connect() && !e.is_timeout(), e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let message: MessageResponse = response
                .json()
                .await
                .map_err(|e| (false, format!("Invalid Twilio response: {}", e)))?;
            return Ok(message.sid);
        }

        let retriable = is_retriable_status(status);
        let detail = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .map(|e| {
                format!(
                    "{} (code {})",
                    e.message.unwrap_or_default(),
                    e.code.unwrap_or_default()
                )
            })
            .unwrap_or_default();
        Err((retriable, format!("Twilio returned {} {}", status, detail).trim().to_string()))
    }
}

#[async_trait]
impl MessageSender for TwilioMessageSender {
    async fn send_message(&self, to: &str, body: &str) -> Result<String, String> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.retry_delay_ms).min(MAX_RETRY_DELAY);

        loop {
            attempts += 1;

            match self.send_once(to, body).await {
                Ok(sid) => {
                    info!(
                        channel = self.channel.name(),
                        to = %mask_identifier(to),
                        sid = %sid,
                        event = "message_sent",
                        "Message sent via Twilio"
                    );
                    return Ok(sid);
                }
                Err((true, message)) if attempts < self.max_retries => {
                    warn!(
                        "Twilio {} send failed (attempt {}/{}): {}. Retrying in {:?}",
                        self.channel.name(),
                        attempts,
                        self.max_retries,
                        message,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    delay = next_delay(delay);
                }
                Err((_, message)) => {
                    error!(
                        channel = self.channel.name(),
                        to = %mask_identifier(to),
                        "Twilio send failed: {}",
                        message
                    );
                    return Err(message);
                }
            }
        }
    }
}

/// Responses that guarantee the message was not accepted
pub(crate) fn is_retriable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE
    )
}

pub(crate) fn next_delay(delay: Duration) -> Duration {
    delay.saturating_mul(2).min(MAX_RETRY_DELAY)
}

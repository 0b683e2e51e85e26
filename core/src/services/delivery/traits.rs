//! Transport seams for outbound messages

use async_trait::async_trait;

/// Sends a plain-text email
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send_mail(&self, from: &str, to: &str, subject: &str, body: &str) -> Result<(), String>;
}

/// Sends a short text message (SMS or WhatsApp)
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send `body` to `to`, returning the provider message id
    async fn send_message(&self, to: &str, body: &str) -> Result<String, String>;
}

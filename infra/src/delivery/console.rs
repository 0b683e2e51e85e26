//! Logging transports for development and unconfigured providers
//!
//! Nothing leaves the process. The console mailer prints the whole message
//! so a developer can read the code from the log; the message sender only
//! prints bodies when asked to.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pms_core::services::{MailSender, MessageSender};
use pms_shared::validation::mask_identifier;
use tracing::info;

#[derive(Clone, Default)]
pub struct ConsoleMailSender {
    sent: Arc<AtomicU64>,
}

impl ConsoleMailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of emails "sent" so far
    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::SeqCst)
    }

    /// Plain-text rendering written to the log
    pub(crate) fn render(from: &str, to: &str, subject: &str, body: &str) -> String {
        format!(
            "From: {}\nTo: {}\nSubject: {}\n\n{}",
            from,
            mask_identifier(to),
            subject,
            body
        )
    }
}

#[async_trait]
impl MailSender for ConsoleMailSender {
    async fn send_mail(&self, from: &str, to: &str, subject: &str, body: &str) -> Result<(), String> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        info!(
            to = %mask_identifier(to),
            event = "console_mail",
            "Email written to log instead of sent:\n{}",
            Self::render(from, to, subject, body)
        );
        Ok(())
    }
}

/// Logging `MessageSender` tagged with the channel it stands in for
#[derive(Clone)]
pub struct ConsoleMessageSender {
    channel: &'static str,
    log_body: bool,
    sent: Arc<AtomicU64>,
}

impl ConsoleMessageSender {
    pub fn new(channel: &'static str) -> Self {
        Self {
            channel,
            log_body: false,
            sent: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Include message bodies in the log line
    pub fn with_body_logging(mut self, log_body: bool) -> Self {
        self.log_body = log_body;
        self
    }

    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::SeqCst)
    }

    pub(crate) fn logged_body<'a>(&self, body: &'a str) -> Option<&'a str> {
        self.log_body.then_some(body)
    }
}

#[async_trait]
impl MessageSender for ConsoleMessageSender {
    async fn send_message(&self, to: &str, body: &str) -> Result<String, String> {
        let count = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            channel = self.channel,
            to = %mask_identifier(to),
            body_length = body.len(),
            body = self.logged_body(body),
            event = "console_message",
            "Message not sent: console sender in use"
        );
        Ok(format!("console-{}-{}", self.channel, count))
    }
}

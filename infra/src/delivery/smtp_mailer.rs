//! SMTP mailer built on lettre's async transport

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use pms_core::services::MailSender;
use pms_shared::config::SmtpConfig;
use pms_shared::validation::mask_identifier;
use tracing::{error, info};

use crate::InfrastructureError;

/// Port on which the relay expects implicit TLS instead of STARTTLS
const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, InfrastructureError> {
        let builder = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };
        let mut builder = builder.port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        info!(host = %config.host, port = config.port, "SMTP mailer initialized");

        Ok(Self {
            transport: builder.build(),
        })
    }

    pub(crate) fn build_message(
        from: &str,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<Message, InfrastructureError> {
        let from: Mailbox = from
            .parse()
            .map_err(|e| InfrastructureError::Mail(format!("Invalid sender address: {}", e)))?;
        let to: Mailbox = to
            .parse()
            .map_err(|e| InfrastructureError::Mail(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| InfrastructureError::Mail(e.to_string()))
    }
}

#[async_trait]
impl MailSender for SmtpMailer {
    async fn send_mail(&self, from: &str, to: &str, subject: &str, body: &str) -> Result<(), String> {
        let message = Self::build_message(from, to, subject, body).map_err(|e| e.to_string())?;

        match self.transport.send(message).await {
            Ok(_) => {
                info!(to = %mask_identifier(to), event = "email_sent", "Email sent");
                Ok(())
            }
            Err(e) => {
                error!(to = %mask_identifier(to), "SMTP delivery failed: {}", e);
                Err(e.to_string())
            }
        }
    }
}

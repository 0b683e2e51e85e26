//! Delivery module - outbound transports behind the core `MailSender` /
//! `MessageSender` seams
//!
//! - [`SmtpMailer`]: lettre SMTP relay
//! - [`TwilioMessageSender`]: Twilio REST API for SMS and WhatsApp
//! - [`ConsoleMailSender`], [`ConsoleMessageSender`]: log instead of sending
//! - [`mail_transport`], [`message_transport`]: pick one of the above from config

pub mod console;
pub mod smtp_mailer;
pub mod transports;
pub mod twilio;

#[cfg(test)]
mod tests;

pub use console::{ConsoleMailSender, ConsoleMessageSender};
pub use smtp_mailer::SmtpMailer;
pub use transports::{mail_transport, message_transport};
pub use twilio::{TwilioChannel, TwilioMessageSender};

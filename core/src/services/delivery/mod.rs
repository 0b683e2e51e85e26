//! Routes one-time codes to email, SMS or WhatsApp

mod config;
mod dispatcher;
mod traits;

#[cfg(test)]
mod tests;

pub use config::DispatcherConfig;
pub use dispatcher::DeliveryDispatcher;
pub use traits::{MailSender, MessageSender};

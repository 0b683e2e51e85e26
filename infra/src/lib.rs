//! # Infrastructure Layer
//!
//! Concrete implementations of the seams `pms_core` depends on:
//! - **Cache**: Redis client with retry logic, plus an in-process cache
//! - **Database**: MySQL document and patient repositories using SQLx
//! - **Storage**: Google Cloud Storage V4 signed URLs (HMAC keys)
//! - **Delivery**: SMTP mailer, Twilio message sender and a logging fallback

use pms_core::errors::DomainError;

/// Cache module - Redis client and key-value cache adapters
pub mod cache;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Delivery module - outbound email and text message transports
pub mod delivery;

/// Storage module - signed URL generation for object storage
pub mod storage;

pub use cache::{MemoryCache, RedisCache, RedisClient};
pub use database::{DatabasePool, MySqlDocumentRepository, MySqlPatientRepository};
pub use delivery::{ConsoleMailSender, ConsoleMessageSender, SmtpMailer, TwilioMessageSender};
pub use storage::GcsSigner;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Mail transport error
    #[error("Mail error: {0}")]
    Mail(String),

    /// Object storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<lettre::transport::smtp::Error> for InfrastructureError {
    fn from(error: lettre::transport::smtp::Error) -> Self {
        InfrastructureError::Mail(error.to_string())
    }
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::Internal {
            message: error.to_string(),
        }
    }
}

//! Domain-specific error types and error handling.

mod types;


pub use types::{DocumentError, OtpError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl DomainError {
    /// Wrap a collaborator failure (cache, database, signer transport)
    pub fn internal(context: &str, error: impl std::fmt::Display) -> Self {
        DomainError::Internal {
            message: format!("{}: {}", context, error),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

//! # Clinic Core
//!
//! Core business logic for the clinic backend: the OTP lifecycle over a
//! key-value cache, delivery of codes over email / SMS / WhatsApp, and the
//! pre-signed upload handshake for patient documents.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Channel, Document, DocumentStats, IssuedOtp, NewDocument, Patient};
pub use errors::{DocumentError, DomainError, DomainResult, OtpError};
pub use repositories::{DocumentRepository, PatientRepository};
pub use services::{
    DeliveryDispatcher, DispatcherConfig, DocumentService, KeyValueCache, MailSender,
    MessageSender, OtpService, OtpServiceConfig, OtpStore, StorageSigner, UploadConfig,
    UploadRequest, VerifyOutcome,
};

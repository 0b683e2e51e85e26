//! Business services containing domain logic and use cases.

pub mod delivery;
pub mod document;
pub mod otp;

// Re-export commonly used types
pub use delivery::{DeliveryDispatcher, DispatcherConfig, MailSender, MessageSender};
pub use document::{DocumentService, StorageSigner, UploadConfig, UploadRequest};
pub use otp::{KeyValueCache, OtpService, OtpServiceConfig, OtpStore, VerifyOutcome};

#[cfg(test)]
pub(crate) mod mocks;

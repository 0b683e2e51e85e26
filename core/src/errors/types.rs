//! Error types for the OTP and document upload workflows

use thiserror::Error;

/// One-time code errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("OTP recently sent. Please wait {retry_after_seconds} seconds before requesting another.")]
    Throttled { retry_after_seconds: u64 },

    #[error("Invalid identifier for channel {channel}")]
    InvalidIdentifier { channel: String },

    #[error("Unsupported channel: {channel}")]
    UnsupportedChannel { channel: String },

    #[error("{message}")]
    Delivery { message: String },

    /// Wrong, expired, unknown and exhausted codes all surface as this
    #[error("Invalid or expired code")]
    InvalidOrExpiredCode,
}

/// Document upload and retrieval errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("filename and content_type are required")]
    MissingFileInfo,

    #[error("patient_id is required")]
    MissingPatient,

    #[error("GCS bucket is not configured")]
    BucketNotConfigured,

    #[error("Patient not found")]
    PatientNotFound,

    #[error("Document is not uploaded yet")]
    NotUploaded,

    #[error("Object {object_key} was not found in storage")]
    ObjectNotUploaded { object_key: String },

    #[error("Storage signer failed: {message}")]
    Storage { message: String },
}

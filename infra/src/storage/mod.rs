//! Object storage module
//!
//! Google Cloud Storage V4 signed URLs built from an HMAC key pair, so no
//! service-account JSON or SDK is needed at runtime.

pub mod gcs_signer;


pub use gcs_signer::GcsSigner;

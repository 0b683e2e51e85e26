//! Document upload handshake and queries
//!
//! Uploads go straight from the client to object storage: `sign-upload`
//! hands out a signed PUT URL and records a pending document, `confirm`
//! marks it uploaded once the client reports success.

pub mod confirm;
pub mod detail;
pub mod download_url;
pub mod list;
pub mod sign_upload;
pub mod stats;

//! Pre-signed upload / confirm handshake and document queries

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::UploadConfig;
pub use service::{build_object_key, DocumentService};
pub use traits::{SignMethod, SignRequest, StorageSigner};
pub use types::{
    ConfirmedUpload, DocumentView, DownloadGrant, DownloadLink, PatientDocuments, UploadRequest,
    UploadTicket,
};

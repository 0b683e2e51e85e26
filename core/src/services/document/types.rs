//! Inputs and results of the document workflows

use serde::Serialize;

use crate::domain::entities::document::Document;

/// Request for an upload slot. Required fields are optional here so the
/// service can report which one is missing.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub patient_id: Option<i64>,
    pub document_type: Option<String>,
    pub size_bytes: Option<i64>,
    pub description: Option<String>,
    pub owner_id: Option<i64>,
}

/// Signed PUT URL plus the pending record it belongs to
#[derive(Debug, Clone)]
pub struct UploadTicket {
    pub upload_url: String,
    pub method: &'static str,
    pub object_key: String,
    pub content_type: String,
    pub document_id: i64,
    pub expires_in: u64,
}

/// A signed GET URL and its lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadGrant {
    pub url: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone)]
pub struct ConfirmedUpload {
    pub document: Document,
    pub download: DownloadGrant,
}

/// A document with a download grant when it has been uploaded
#[derive(Debug, Clone)]
pub struct DocumentView {
    pub document: Document,
    pub download: Option<DownloadGrant>,
}

#[derive(Debug, Clone)]
pub struct PatientDocuments {
    pub patient_id: i64,
    pub documents: Vec<DocumentView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub download_url: String,
    pub expires_in: u64,
    pub filename: String,
}

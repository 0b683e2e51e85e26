use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use pms_core::services::document::{DocumentView, DownloadLink, UploadTicket};
use pms_core::{Document, DocumentStats};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /documents/sign-upload`
///
/// Required fields are optional here so a missing one is reported with the
/// dedicated error code instead of a generic deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SignUploadRequest {
    #[validate(length(max = 255))]
    pub filename: Option<String>,

    #[validate(length(max = 150))]
    pub content_type: Option<String>,

    #[validate(range(min = 0))]
    pub size_bytes: Option<i64>,

    pub patient_id: Option<i64>,

    #[validate(length(max = 100))]
    pub document_type: Option<String>,

    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUploadResponse {
    pub upload_url: String,
    pub method: String,
    /// Headers the client must send with the upload
    pub headers: HashMap<String, String>,
    pub key: String,
    pub document_id: i64,
    pub expires_in: u64,
}

impl From<UploadTicket> for SignUploadResponse {
    fn from(ticket: UploadTicket) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), ticket.content_type);

        Self {
            upload_url: ticket.upload_url,
            method: ticket.method.to_string(),
            headers,
            key: ticket.object_key,
            document_id: ticket.document_id,
            expires_in: ticket.expires_in,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfirmUploadRequest {
    pub document_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: i64,
    pub filename: String,
    pub content_type: String,
    pub key: String,
}

impl From<&Document> for DocumentSummary {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id,
            filename: document.filename.clone(),
            content_type: document.content_type.clone(),
            key: document.object_key.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmUploadResponse {
    pub status: bool,
    pub document: DocumentSummary,
    pub download_url: String,
    pub download_expires_in: u64,
}

/// One document with its download link when uploaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub id: i64,
    pub patient_id: i64,
    pub filename: String,
    pub content_type: String,
    pub key: String,
    pub document_type: Option<String>,
    pub size_bytes: Option<i64>,
    pub description: Option<String>,
    pub is_uploaded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub download_url: Option<String>,
    pub download_expires_in: Option<u64>,
}

impl From<DocumentView> for DocumentResponse {
    fn from(view: DocumentView) -> Self {
        let DocumentView { document, download } = view;
        let (download_url, download_expires_in) = match download {
            Some(grant) => (Some(grant.url), Some(grant.expires_in)),
            None => (None, None),
        };

        Self {
            id: document.id,
            patient_id: document.patient_id,
            filename: document.filename,
            content_type: document.content_type,
            key: document.object_key,
            document_type: document.document_type,
            size_bytes: document.size_bytes,
            description: document.description,
            is_uploaded: document.is_uploaded,
            created_at: document.created_at,
            updated_at: document.updated_at,
            download_url,
            download_expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientDocumentsResponse {
    pub patient_id: i64,
    pub documents: Vec<DocumentResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadUrlResponse {
    pub download_url: String,
    pub expires_in: u64,
    pub filename: String,
}

impl From<DownloadLink> for DownloadUrlResponse {
    fn from(link: DownloadLink) -> Self {
        Self {
            download_url: link.download_url,
            expires_in: link.expires_in,
            filename: link.filename,
        }
    }
}

/// Body of `GET /documents/stats`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStatsResponse {
    pub total_documents: i64,
    pub uploaded_documents: i64,
    pub pending_documents: i64,
    pub total_size_bytes: i64,
    pub documents_by_type: BTreeMap<String, i64>,
}

impl From<DocumentStats> for DocumentStatsResponse {
    fn from(stats: DocumentStats) -> Self {
        Self {
            total_documents: stats.total_documents,
            uploaded_documents: stats.uploaded_documents,
            pending_documents: stats.pending_documents,
            total_size_bytes: stats.total_size_bytes,
            documents_by_type: stats.documents_by_type,
        }
    }
}

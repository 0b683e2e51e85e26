//! Document entity: an object in storage attached to a patient

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted document record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,

    /// Uploading user, if known
    pub owner_id: Option<i64>,

    pub patient_id: i64,

    /// Client-supplied file name
    pub filename: String,

    pub content_type: String,

    /// Object key in the bucket; unique and never changed
    pub object_key: String,

    pub document_type: Option<String>,

    pub size_bytes: Option<i64>,

    pub description: Option<String>,

    /// Flipped once the client confirms the direct upload
    pub is_uploaded: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values for a pending upload slot; the store assigns id and timestamps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub owner_id: Option<i64>,
    pub patient_id: i64,
    pub filename: String,
    pub content_type: String,
    pub object_key: String,
    pub document_type: Option<String>,
    pub size_bytes: Option<i64>,
    pub description: Option<String>,
}

impl NewDocument {
    /// Materialize the record with a store-assigned id
    pub fn into_document(self, id: i64, now: DateTime<Utc>) -> Document {
        Document {
            id,
            owner_id: self.owner_id,
            patient_id: self.patient_id,
            filename: self.filename,
            content_type: self.content_type,
            object_key: self.object_key,
            document_type: self.document_type,
            size_bytes: self.size_bytes,
            description: self.description,
            is_uploaded: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Aggregate counts over all stored documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub total_documents: i64,
    pub uploaded_documents: i64,
    pub pending_documents: i64,

    /// Sum of the declared sizes of uploaded documents
    pub total_size_bytes: i64,

    /// Count per document type; untyped documents are left out
    pub documents_by_type: BTreeMap<String, i64>,
}

impl DocumentStats {
    /// Fold a set of records into stats
    pub fn from_documents<'a>(documents: impl IntoIterator<Item = &'a Document>) -> Self {
        let mut stats = Self::default();
        for document in documents {
            stats.total_documents += 1;
            if document.is_uploaded {
                stats.uploaded_documents += 1;
                stats.total_size_bytes += document.size_bytes.unwrap_or(0);
            } else {
                stats.pending_documents += 1;
            }
            let document_type = document.document_type.as_deref().filter(|t| !t.is_empty());
            if let Some(document_type) = document_type {
                *stats
                    .documents_by_type
                    .entry(document_type.to_string())
                    .or_insert(0) += 1;
            }
        }
        stats
    }
}

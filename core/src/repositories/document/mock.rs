//! Mock implementation of DocumentRepository for testing

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::document::{Document, DocumentStats, NewDocument};
use crate::errors::DomainError;

use super::trait_::DocumentRepository;

/// In-memory document repository for testing
pub struct MockDocumentRepository {
    documents: Arc<RwLock<HashMap<i64, Document>>>,
    next_id: AtomicI64,
}

impl MockDocumentRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored documents
    pub async fn count(&self) -> usize {
        self.documents.read().await.len()
    }
}

impl Default for MockDocumentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentRepository for MockDocumentRepository {
    async fn create(&self, document: NewDocument) -> Result<Document, DomainError> {
        let mut documents = self.documents.write().await;

        if documents
            .values()
            .any(|d| d.object_key == document.object_key)
        {
            return Err(DomainError::Validation {
                message: "Object key already exists".to_string(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        // Later ids sort as newer even when created within the same tick
        let created_at = Utc::now() + Duration::microseconds(id);
        let document = document.into_document(id, created_at);
        documents.insert(id, document.clone());
        Ok(document)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Document>, DomainError> {
        let documents = self.documents.read().await;
        Ok(documents.get(&id).cloned())
    }

    async fn mark_uploaded(&self, id: i64) -> Result<Option<Document>, DomainError> {
        let mut documents = self.documents.write().await;
        Ok(documents.get_mut(&id).map(|document| {
            document.is_uploaded = true;
            document.updated_at = Utc::now();
            document.clone()
        }))
    }

    async fn list_by_patient(&self, patient_id: i64) -> Result<Vec<Document>, DomainError> {
        let documents = self.documents.read().await;
        let mut result: Vec<Document> = documents
            .values()
            .filter(|d| d.patient_id == patient_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(result)
    }

    async fn stats(&self) -> Result<DocumentStats, DomainError> {
        let documents = self.documents.read().await;
        Ok(DocumentStats::from_documents(documents.values()))
    }
}

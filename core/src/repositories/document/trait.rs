//! Document repository trait defining the interface for document persistence.

use async_trait::async_trait;

use crate::domain::entities::document::{Document, DocumentStats, NewDocument};
use crate::errors::DomainError;

/// Repository trait for Document persistence operations
///
/// Implementations own id assignment and the `created_at` / `updated_at`
/// timestamps. `object_key` is unique across all documents.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a pending (`is_uploaded = false`) document
    ///
    /// # Returns
    /// * `Ok(Document)` - The stored record with its assigned id
    /// * `Err(DomainError)` - Database error or duplicate object key
    async fn create(&self, document: NewDocument) -> Result<Document, DomainError>;

    /// Find a document by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Document>, DomainError>;

    /// Set `is_uploaded = true` and touch `updated_at`
    ///
    /// Calling it on an already uploaded document is not an error.
    ///
    /// # Returns
    /// * `Ok(Some(Document))` - The updated record
    /// * `Ok(None)` - No document with this id
    async fn mark_uploaded(&self, id: i64) -> Result<Option<Document>, DomainError>;

    /// All documents of a patient, newest first
    async fn list_by_patient(&self, patient_id: i64) -> Result<Vec<Document>, DomainError>;

    /// Totals and per-type counts across every document
    async fn stats(&self) -> Result<DocumentStats, DomainError>;
}

//! MySQL implementation of the DocumentRepository trait.
//!
//! Expected table:
//!
//! ```sql
//! CREATE TABLE document_document (
//!     id BIGINT AUTO_INCREMENT PRIMARY KEY,
//!     owner_id BIGINT NULL,
//!     patient_id BIGINT NOT NULL,
//!     filename VARCHAR(255) NOT NULL,
//!     content_type VARCHAR(150) NOT NULL,
//!     gcs_key VARCHAR(512) NOT NULL UNIQUE,
//!     document_type VARCHAR(100) NULL,
//!     size_bytes BIGINT NULL,
//!     description TEXT NULL,
//!     is_uploaded BOOLEAN NOT NULL DEFAULT FALSE,
//!     created_at DATETIME(6) NOT NULL,
//!     updated_at DATETIME(6) NOT NULL
//! );
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};

use pms_core::domain::entities::document::{Document, DocumentStats, NewDocument};
use pms_core::errors::DomainError;
use pms_core::repositories::DocumentRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, owner_id, patient_id, filename, content_type, gcs_key,
           document_type, size_bytes, description, is_uploaded, created_at, updated_at
    FROM document_document
"#;

/// MySQL implementation of DocumentRepository
pub struct MySqlDocumentRepository {
    pool: MySqlPool,
}

impl MySqlDocumentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_document(row: &MySqlRow) -> Result<Document, DomainError> {
        Ok(Document {
            id: get(row, "id")?,
            owner_id: get(row, "owner_id")?,
            patient_id: get(row, "patient_id")?,
            filename: get(row, "filename")?,
            content_type: get(row, "content_type")?,
            object_key: get(row, "gcs_key")?,
            document_type: get(row, "document_type")?,
            size_bytes: get(row, "size_bytes")?,
            description: get(row, "description")?,
            is_uploaded: get(row, "is_uploaded")?,
            created_at: get::<DateTime<Utc>>(row, "created_at")?,
            updated_at: get::<DateTime<Utc>>(row, "updated_at")?,
        })
    }
}

fn get<'r, T>(row: &'r MySqlRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(column)
        .map_err(|e| DomainError::internal(&format!("Failed to get {}", column), e))
}

#[async_trait]
impl DocumentRepository for MySqlDocumentRepository {
    async fn create(&self, document: NewDocument) -> Result<Document, DomainError> {
        let query = r#"
            INSERT INTO document_document (
                owner_id, patient_id, filename, content_type, gcs_key,
                document_type, size_bytes, description, is_uploaded, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, FALSE, ?, ?)
        "#;

        let now = Utc::now();
        let result = sqlx::query(query)
            .bind(document.owner_id)
            .bind(document.patient_id)
            .bind(&document.filename)
            .bind(&document.content_type)
            .bind(&document.object_key)
            .bind(&document.document_type)
            .bind(document.size_bytes)
            .bind(&document.description)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db) if db.is_unique_violation() => DomainError::Validation {
                    message: format!("Object key already exists: {}", document.object_key),
                },
                _ => DomainError::internal("Failed to create document", &e),
            })?;

        let id = result.last_insert_id() as i64;
        tracing::debug!(document_id = id, "Document record created");

        Ok(document.into_document(id, now))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Document>, DomainError> {
        let query = format!("{} WHERE id = ?", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal("Failed to find document", e))?;

        row.as_ref().map(Self::row_to_document).transpose()
    }

    async fn mark_uploaded(&self, id: i64) -> Result<Option<Document>, DomainError> {
        let query = r#"
            UPDATE document_document
            SET is_uploaded = TRUE, updated_at = ?
            WHERE id = ?
        "#;

        sqlx::query(query)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal("Failed to mark document uploaded", e))?;

        self.find_by_id(id).await
    }

    async fn list_by_patient(&self, patient_id: i64) -> Result<Vec<Document>, DomainError> {
        let query = format!(
            "{} WHERE patient_id = ? ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(patient_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal("Failed to list documents", e))?;

        rows.iter().map(Self::row_to_document).collect()
    }

    async fn stats(&self) -> Result<DocumentStats, DomainError> {
        // SUM yields DECIMAL in MySQL
        let totals_query = r#"
            SELECT COUNT(*) AS total_documents,
                   CAST(COALESCE(SUM(is_uploaded), 0) AS SIGNED) AS uploaded_documents,
                   CAST(COALESCE(SUM(CASE WHEN is_uploaded THEN size_bytes END), 0) AS SIGNED)
                       AS total_size_bytes
            FROM document_document
        "#;

        let totals = sqlx::query(totals_query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::internal("Failed to count documents", e))?;

        let by_type_query = r#"
            SELECT document_type, COUNT(*) AS document_count
            FROM document_document
            WHERE document_type IS NOT NULL AND document_type <> ''
            GROUP BY document_type
        "#;

        let rows = sqlx::query(by_type_query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal("Failed to count documents by type", e))?;

        let mut documents_by_type = BTreeMap::new();
        for row in &rows {
            documents_by_type.insert(
                get::<String>(row, "document_type")?,
                get::<i64>(row, "document_count")?,
            );
        }

        let total_documents: i64 = get(&totals, "total_documents")?;
        let uploaded_documents: i64 = get(&totals, "uploaded_documents")?;

        Ok(DocumentStats {
            total_documents,
            uploaded_documents,
            pending_documents: total_documents - uploaded_documents,
            total_size_bytes: get(&totals, "total_size_bytes")?,
            documents_by_type,
        })
    }
}

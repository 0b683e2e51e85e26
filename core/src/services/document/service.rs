//! Document service implementation

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::document::{Document, DocumentStats, NewDocument};
use crate::errors::{DocumentError, DomainError, DomainResult};
use crate::repositories::{DocumentRepository, PatientRepository};

use super::config::UploadConfig;
use super::traits::{SignMethod, SignRequest, StorageSigner};
use super::types::{
    ConfirmedUpload, DocumentView, DownloadGrant, DownloadLink, PatientDocuments, UploadRequest,
    UploadTicket,
};

/// `{prefix}{uuid-v4}-{filename}`
pub fn build_object_key(upload_prefix: &str, filename: &str) -> String {
    format!("{}{}-{}", upload_prefix, Uuid::new_v4(), filename)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Upload slots, confirmation and signed downloads for patient documents
pub struct DocumentService<D: DocumentRepository, P: PatientRepository> {
    documents: Arc<D>,
    patients: Arc<P>,
    signer: Arc<dyn StorageSigner>,
    config: UploadConfig,
}

impl<D: DocumentRepository, P: PatientRepository> DocumentService<D, P> {
    pub fn new(
        documents: Arc<D>,
        patients: Arc<P>,
        signer: Arc<dyn StorageSigner>,
        config: UploadConfig,
    ) -> Self {
        Self {
            documents,
            patients,
            signer,
            config,
        }
    }

    fn bucket(&self) -> Result<&str, DocumentError> {
        self.config
            .bucket
            .as_deref()
            .filter(|bucket| !bucket.is_empty())
            .ok_or(DocumentError::BucketNotConfigured)
    }

    async fn sign(
        &self,
        bucket: &str,
        object_key: &str,
        method: SignMethod,
        content_type: Option<&str>,
        expires_in: u64,
    ) -> DomainResult<String> {
        self.signer
            .sign_url(SignRequest {
                bucket: bucket.to_string(),
                object_key: object_key.to_string(),
                method,
                content_type: content_type.map(String::from),
                expires_in,
            })
            .await
            .map_err(|e| {
                tracing::error!(
                    object_key = object_key,
                    method = method.as_str(),
                    error = %e,
                    event = "url_signing_failed",
                    "Failed to sign storage URL"
                );
                DocumentError::Storage { message: e }.into()
            })
    }

    async fn grant_download(&self, document: &Document) -> DomainResult<DownloadGrant> {
        let bucket = self.bucket()?;
        let expires_in = self.config.get_expires_seconds;
        let url = self
            .sign(bucket, &document.object_key, SignMethod::Get, None, expires_in)
            .await?;
        Ok(DownloadGrant { url, expires_in })
    }

    async fn find_document(&self, document_id: i64) -> DomainResult<Document> {
        self.documents
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Document"))
    }

    /// Reserve an object key, sign a PUT URL for it and record a pending document.
    ///
    /// Checks run in order: file info, patient id, bucket, patient lookup.
    /// Nothing is written when any of them, or signing, fails.
    pub async fn begin_upload(&self, request: UploadRequest) -> DomainResult<UploadTicket> {
        let (filename, content_type) =
            match (non_blank(request.filename), non_blank(request.content_type)) {
                (Some(filename), Some(content_type)) => (filename, content_type),
                _ => return Err(DocumentError::MissingFileInfo.into()),
            };
        let patient_id = request.patient_id.ok_or(DocumentError::MissingPatient)?;
        let bucket = self.bucket()?;

        if self.patients.find_by_id(patient_id).await?.is_none() {
            return Err(DocumentError::PatientNotFound.into());
        }

        let object_key = build_object_key(&self.config.upload_prefix, &filename);
        let expires_in = self.config.put_expires_seconds;
        let upload_url = self
            .sign(
                bucket,
                &object_key,
                SignMethod::Put,
                Some(&content_type),
                expires_in,
            )
            .await?;

        let document = self
            .documents
            .create(NewDocument {
                owner_id: request.owner_id,
                patient_id,
                filename,
                content_type: content_type.clone(),
                object_key: object_key.clone(),
                document_type: non_blank(request.document_type),
                size_bytes: request.size_bytes,
                description: non_blank(request.description),
            })
            .await?;

        tracing::info!(
            document_id = document.id,
            patient_id = patient_id,
            object_key = %object_key,
            event = "upload_slot_created",
            "Issued signed upload URL"
        );

        Ok(UploadTicket {
            upload_url,
            method: SignMethod::Put.as_str(),
            object_key,
            content_type,
            document_id: document.id,
            expires_in,
        })
    }

    /// Mark a document uploaded and return a fresh signed GET URL.
    ///
    /// Repeated confirmation is harmless. With `verify_uploads` set the
    /// object must exist in storage first.
    pub async fn confirm(&self, document_id: i64) -> DomainResult<ConfirmedUpload> {
        let document = self.find_document(document_id).await?;
        let bucket = self.bucket()?;

        if self.config.verify_uploads {
            let exists = self
                .signer
                .object_exists(bucket, &document.object_key)
                .await
                .map_err(|e| DocumentError::Storage { message: e })?;
            if !exists {
                tracing::warn!(
                    document_id = document_id,
                    object_key = %document.object_key,
                    event = "upload_missing",
                    "Confirm requested for an object that is not in storage"
                );
                return Err(DocumentError::ObjectNotUploaded {
                    object_key: document.object_key,
                }
                .into());
            }
        }

        let document = self
            .documents
            .mark_uploaded(document_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Document"))?;

        let download = self.grant_download(&document).await?;

        tracing::info!(
            document_id = document_id,
            event = "upload_confirmed",
            "Document upload confirmed"
        );

        Ok(ConfirmedUpload { document, download })
    }

    async fn view(&self, document: Document) -> DomainResult<DocumentView> {
        let download = if document.is_uploaded {
            Some(self.grant_download(&document).await?)
        } else {
            None
        };
        Ok(DocumentView { document, download })
    }

    /// Documents of a patient, newest first
    pub async fn list_patient_documents(&self, patient_id: i64) -> DomainResult<PatientDocuments> {
        if self.patients.find_by_id(patient_id).await?.is_none() {
            return Err(DocumentError::PatientNotFound.into());
        }

        let mut documents = Vec::new();
        for document in self.documents.list_by_patient(patient_id).await? {
            documents.push(self.view(document).await?);
        }

        Ok(PatientDocuments {
            patient_id,
            documents,
        })
    }

    pub async fn document_detail(&self, document_id: i64) -> DomainResult<DocumentView> {
        let document = self.find_document(document_id).await?;
        self.view(document).await
    }

    /// Signed GET URL for an uploaded document
    pub async fn download_url(&self, document_id: i64) -> DomainResult<DownloadLink> {
        let document = self.find_document(document_id).await?;
        if !document.is_uploaded {
            return Err(DocumentError::NotUploaded.into());
        }

        let grant = self.grant_download(&document).await?;
        Ok(DownloadLink {
            download_url: grant.url,
            expires_in: grant.expires_in,
            filename: document.filename,
        })
    }

    pub async fn document_stats(&self) -> DomainResult<DocumentStats> {
        let stats = self.documents.stats().await?;
        tracing::debug!(
            total_documents = stats.total_documents,
            uploaded_documents = stats.uploaded_documents,
            "Computed document stats"
        );
        Ok(stats)
    }
}

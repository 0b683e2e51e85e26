//! Unit tests for the document upload handshake

use std::collections::HashSet;
use std::sync::Arc;

use crate::errors::{DocumentError, DomainError};
use crate::repositories::{DocumentRepository, MockDocumentRepository, MockPatientRepository};
use crate::services::document::{DocumentService, SignMethod, UploadConfig, UploadRequest};
use crate::services::mocks::MockStorageSigner;

type Service = DocumentService<MockDocumentRepository, MockPatientRepository>;

struct Fixture {
    service: Service,
    documents: Arc<MockDocumentRepository>,
    signer: Arc<MockStorageSigner>,
}

async fn fixture(config: UploadConfig) -> Fixture {
    let documents = Arc::new(MockDocumentRepository::new());
    let patients = Arc::new(MockPatientRepository::new());
    patients.insert(7).await;
    let signer = Arc::new(MockStorageSigner::new(false));

    Fixture {
        service: DocumentService::new(documents.clone(), patients, signer.clone(), config),
        documents,
        signer,
    }
}

fn bucket_config() -> UploadConfig {
    UploadConfig::default().with_bucket("clinic-docs")
}

fn upload_request() -> UploadRequest {
    UploadRequest {
        filename: Some("blood-test.pdf".to_string()),
        content_type: Some("application/pdf".to_string()),
        patient_id: Some(7),
        document_type: Some("lab_report".to_string()),
        size_bytes: Some(48_213),
        description: None,
        owner_id: Some(1),
    }
}

#[tokio::test]
async fn test_begin_upload_creates_pending_document() {
    let f = fixture(bucket_config()).await;

    let ticket = f.service.begin_upload(upload_request()).await.unwrap();

    assert_eq!(ticket.method, "PUT");
    assert_eq!(ticket.expires_in, 900);
    assert!(ticket.object_key.starts_with("uploads/"));
    assert!(ticket.object_key.ends_with("-blood-test.pdf"));
    assert!(!ticket.upload_url.is_empty());

    let document = f.documents.find_by_id(ticket.document_id).await.unwrap().unwrap();
    assert!(!document.is_uploaded);
    assert_eq!(document.object_key, ticket.object_key);
    assert_eq!(document.size_bytes, Some(48_213));
    assert_eq!(document.owner_id, Some(1));

    let requests = f.signer.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, SignMethod::Put);
    assert_eq!(requests[0].content_type.as_deref(), Some("application/pdf"));
    assert_eq!(requests[0].bucket, "clinic-docs");
}

#[tokio::test]
async fn test_identical_filenames_get_distinct_keys() {
    let f = fixture(bucket_config()).await;

    let mut keys = HashSet::new();
    for _ in 0..5 {
        let ticket = f.service.begin_upload(upload_request()).await.unwrap();
        keys.insert(ticket.object_key);
    }
    assert_eq!(keys.len(), 5);
}

#[tokio::test]
async fn test_begin_upload_error_order() {
    let f = fixture(UploadConfig::default()).await;

    let missing_file = UploadRequest {
        filename: Some("  ".to_string()),
        patient_id: None,
        ..upload_request()
    };
    assert!(matches!(
        f.service.begin_upload(missing_file).await,
        Err(DomainError::Document(DocumentError::MissingFileInfo))
    ));

    let missing_patient = UploadRequest {
        patient_id: None,
        ..upload_request()
    };
    assert!(matches!(
        f.service.begin_upload(missing_patient).await,
        Err(DomainError::Document(DocumentError::MissingPatient))
    ));

    let unknown_patient = UploadRequest {
        patient_id: Some(999),
        ..upload_request()
    };
    assert!(matches!(
        f.service.begin_upload(unknown_patient).await,
        Err(DomainError::Document(DocumentError::BucketNotConfigured))
    ));
    assert_eq!(f.documents.count().await, 0);
}

#[tokio::test]
async fn test_unknown_patient_creates_nothing() {
    let f = fixture(bucket_config()).await;

    let request = UploadRequest {
        patient_id: Some(999),
        ..upload_request()
    };
    assert!(matches!(
        f.service.begin_upload(request).await,
        Err(DomainError::Document(DocumentError::PatientNotFound))
    ));
    assert_eq!(f.documents.count().await, 0);
    assert!(f.signer.requests().is_empty());
}

#[tokio::test]
async fn test_signer_failure_creates_nothing() {
    let documents = Arc::new(MockDocumentRepository::new());
    let patients = Arc::new(MockPatientRepository::new());
    patients.insert(7).await;
    let service = DocumentService::new(
        documents.clone(),
        patients,
        Arc::new(MockStorageSigner::new(true)),
        bucket_config(),
    );

    assert!(matches!(
        service.begin_upload(upload_request()).await,
        Err(DomainError::Document(DocumentError::Storage { .. }))
    ));
    assert_eq!(documents.count().await, 0);
}

#[tokio::test]
async fn test_confirm_marks_uploaded_and_signs_get() {
    let f = fixture(bucket_config()).await;
    let ticket = f.service.begin_upload(upload_request()).await.unwrap();

    let confirmed = f.service.confirm(ticket.document_id).await.unwrap();
    assert!(confirmed.document.is_uploaded);
    assert!(!confirmed.download.url.is_empty());
    assert_eq!(confirmed.download.expires_in, 3600);

    let last = f.signer.requests().pop().unwrap();
    assert_eq!(last.method, SignMethod::Get);
    assert_eq!(last.content_type, None);

    // Idempotent, with a fresh URL each time
    let again = f.service.confirm(ticket.document_id).await.unwrap();
    assert!(again.document.is_uploaded);
    assert_eq!(f.signer.requests().len(), 3);
}

#[tokio::test]
async fn test_confirm_unknown_document_is_not_found() {
    let f = fixture(bucket_config()).await;
    assert!(matches!(
        f.service.confirm(404).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_confirm_checks_storage_when_enabled() {
    let f = fixture(bucket_config().with_verify_uploads(true)).await;
    let ticket = f.service.begin_upload(upload_request()).await.unwrap();

    assert!(matches!(
        f.service.confirm(ticket.document_id).await,
        Err(DomainError::Document(DocumentError::ObjectNotUploaded { .. }))
    ));
    let document = f.documents.find_by_id(ticket.document_id).await.unwrap().unwrap();
    assert!(!document.is_uploaded);

    f.signer.mark_existing(&ticket.object_key);
    assert!(f.service.confirm(ticket.document_id).await.is_ok());
}

#[tokio::test]
async fn test_list_patient_documents() {
    let f = fixture(bucket_config()).await;
    let first = f.service.begin_upload(upload_request()).await.unwrap();
    let second = f.service.begin_upload(upload_request()).await.unwrap();
    f.service.confirm(first.document_id).await.unwrap();

    let listing = f.service.list_patient_documents(7).await.unwrap();
    assert_eq!(listing.patient_id, 7);
    assert_eq!(listing.documents.len(), 2);

    assert_eq!(listing.documents[0].document.id, second.document_id);
    assert!(listing.documents[0].download.is_none());
    assert_eq!(listing.documents[1].document.id, first.document_id);
    assert!(listing.documents[1].download.is_some());

    assert!(matches!(
        f.service.list_patient_documents(999).await,
        Err(DomainError::Document(DocumentError::PatientNotFound))
    ));
}

#[tokio::test]
async fn test_document_detail_and_download_url() {
    let f = fixture(bucket_config()).await;
    let ticket = f.service.begin_upload(upload_request()).await.unwrap();

    let detail = f.service.document_detail(ticket.document_id).await.unwrap();
    assert!(detail.download.is_none());

    assert!(matches!(
        f.service.download_url(ticket.document_id).await,
        Err(DomainError::Document(DocumentError::NotUploaded))
    ));

    f.service.confirm(ticket.document_id).await.unwrap();
    let link = f.service.download_url(ticket.document_id).await.unwrap();
    assert_eq!(link.filename, "blood-test.pdf");
    assert_eq!(link.expires_in, 3600);

    assert!(matches!(
        f.service.document_detail(999).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_document_stats_follow_confirmations() {
    let f = fixture(bucket_config()).await;
    let first = f.service.begin_upload(upload_request()).await.unwrap();
    f.service.begin_upload(upload_request()).await.unwrap();

    let stats = f.service.document_stats().await.unwrap();
    assert_eq!(stats.total_documents, 2);
    assert_eq!(stats.pending_documents, 2);
    assert_eq!(stats.total_size_bytes, 0);

    f.service.confirm(first.document_id).await.unwrap();

    let stats = f.service.document_stats().await.unwrap();
    assert_eq!(stats.uploaded_documents, 1);
    assert_eq!(stats.pending_documents, 1);
    assert_eq!(stats.total_size_bytes, 48_213);
    assert_eq!(stats.documents_by_type.get("lab_report"), Some(&2));
}

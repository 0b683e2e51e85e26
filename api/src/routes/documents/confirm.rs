use actix_web::{web, HttpResponse};

use pms_core::errors::DomainError;
use pms_core::repositories::{DocumentRepository, PatientRepository};
use pms_core::services::KeyValueCache;

use crate::dto::document::{ConfirmUploadRequest, ConfirmUploadResponse, DocumentSummary};
use crate::handlers::handle_domain_error;
use crate::routes::AppState;

/// Handler for POST /api/v1/documents/confirm
pub async fn confirm_upload<C, D, P>(
    state: web::Data<AppState<C, D, P>>,
    request: web::Json<ConfirmUploadRequest>,
) -> HttpResponse
where
    C: KeyValueCache + 'static,
    D: DocumentRepository + 'static,
    P: PatientRepository + 'static,
{
    let Some(document_id) = request.document_id else {
        return handle_domain_error(DomainError::Validation {
            message: "document_id is required".to_string(),
        });
    };

    match state.document_service.confirm(document_id).await {
        Ok(confirmed) => HttpResponse::Ok().json(ConfirmUploadResponse {
            status: true,
            document: DocumentSummary::from(&confirmed.document),
            download_url: confirmed.download.url,
            download_expires_in: confirmed.download.expires_in,
        }),
        Err(error) => handle_domain_error(error),
    }
}

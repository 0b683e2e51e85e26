use actix_web::{web, HttpResponse};
use validator::Validate;

use pms_core::repositories::{DocumentRepository, PatientRepository};
use pms_core::services::{KeyValueCache, UploadRequest};

use crate::dto::document::{SignUploadRequest, SignUploadResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::routes::AppState;

/// Handler for POST /api/v1/documents/sign-upload
///
/// ```json
/// {
///     "filename": "scan.pdf",
///     "content_type": "application/pdf",
///     "patient_id": 42
/// }
/// ```
///
/// The client must PUT the file to `upload_url` with the returned headers
/// before `expires_in` seconds elapse, then call `confirm`.
pub async fn sign_upload<C, D, P>(
    state: web::Data<AppState<C, D, P>>,
    request: web::Json<SignUploadRequest>,
) -> HttpResponse
where
    C: KeyValueCache + 'static,
    D: DocumentRepository + 'static,
    P: PatientRepository + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    // Authentication is handled in front of this service; no owner is known here
    let upload = UploadRequest {
        filename: request.filename,
        content_type: request.content_type,
        patient_id: request.patient_id,
        document_type: request.document_type,
        size_bytes: request.size_bytes,
        description: request.description,
        owner_id: None,
    };

    match state.document_service.begin_upload(upload).await {
        Ok(ticket) => HttpResponse::Ok().json(SignUploadResponse::from(ticket)),
        Err(error) => handle_domain_error(error),
    }
}

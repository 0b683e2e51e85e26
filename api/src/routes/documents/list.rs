use actix_web::{web, HttpResponse};

use pms_core::repositories::{DocumentRepository, PatientRepository};
use pms_core::services::KeyValueCache;

use crate::dto::document::{DocumentResponse, PatientDocumentsResponse};
use crate::handlers::handle_domain_error;
use crate::routes::AppState;

/// Handler for GET /api/v1/documents/patient/{patient_id}
///
/// Newest first; pending documents carry no download URL.
pub async fn patient_documents<C, D, P>(
    state: web::Data<AppState<C, D, P>>,
    path: web::Path<i64>,
) -> HttpResponse
where
    C: KeyValueCache + 'static,
    D: DocumentRepository + 'static,
    P: PatientRepository + 'static,
{
    match state
        .document_service
        .list_patient_documents(path.into_inner())
        .await
    {
        Ok(listing) => HttpResponse::Ok().json(PatientDocumentsResponse {
            patient_id: listing.patient_id,
            documents: listing
                .documents
                .into_iter()
                .map(DocumentResponse::from)
                .collect(),
        }),
        Err(error) => handle_domain_error(error),
    }
}

use actix_web::{web, HttpResponse};

use pms_core::repositories::{DocumentRepository, PatientRepository};
use pms_core::services::KeyValueCache;

use crate::dto::document::DocumentResponse;
use crate::handlers::handle_domain_error;
use crate::routes::AppState;

/// Handler for GET /api/v1/documents/{document_id}
pub async fn document_detail<C, D, P>(
    state: web::Data<AppState<C, D, P>>,
    path: web::Path<i64>,
) -> HttpResponse
where
    C: KeyValueCache + 'static,
    D: DocumentRepository + 'static,
    P: PatientRepository + 'static,
{
    match state.document_service.document_detail(path.into_inner()).await {
        Ok(view) => HttpResponse::Ok().json(DocumentResponse::from(view)),
        Err(error) => handle_domain_error(error),
    }
}

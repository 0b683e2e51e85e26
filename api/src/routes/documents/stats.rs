use actix_web::{web, HttpResponse};

use pms_core::repositories::{DocumentRepository, PatientRepository};
use pms_core::services::KeyValueCache;

use crate::dto::document::DocumentStatsResponse;
use crate::handlers::handle_domain_error;
use crate::routes::AppState;

/// Handler for GET /api/v1/documents/stats
pub async fn document_stats<C, D, P>(state: web::Data<AppState<C, D, P>>) -> HttpResponse
where
    C: KeyValueCache + 'static,
    D: DocumentRepository + 'static,
    P: PatientRepository + 'static,
{
    match state.document_service.document_stats().await {
        Ok(stats) => HttpResponse::Ok().json(DocumentStatsResponse::from(stats)),
        Err(error) => handle_domain_error(error),
    }
}

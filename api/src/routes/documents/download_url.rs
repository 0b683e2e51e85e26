use actix_web::{web, HttpResponse};

use pms_core::repositories::{DocumentRepository, PatientRepository};
use pms_core::services::KeyValueCache;

use crate::dto::document::DownloadUrlResponse;
use crate::handlers::handle_domain_error;
use crate::routes::AppState;

/// Handler for GET /api/v1/documents/{document_id}/download-url
///
/// 400 `not_uploaded` while the document is still pending.
pub async fn download_url<C, D, P>(
    state: web::Data<AppState<C, D, P>>,
    path: web::Path<i64>,
) -> HttpResponse
where
    C: KeyValueCache + 'static,
    D: DocumentRepository + 'static,
    P: PatientRepository + 'static,
{
    match state.document_service.download_url(path.into_inner()).await {
        Ok(link) => HttpResponse::Ok().json(DownloadUrlResponse::from(link)),
        Err(error) => handle_domain_error(error),
    }
}

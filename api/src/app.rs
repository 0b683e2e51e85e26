//! Application factory
//!
//! Routes are registered through [`configure_routes`] so `main` and the
//! handler tests build exactly the same surface.

use actix_cors::Cors;
use actix_web::{error::InternalError, web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use pms_core::repositories::{DocumentRepository, PatientRepository};
use pms_core::services::KeyValueCache;
use pms_shared::ErrorResponse;

use crate::routes::documents::{
    confirm::confirm_upload, detail::document_detail, download_url::download_url,
    list::patient_documents, sign_upload::sign_upload, stats::document_stats,
};
use crate::routes::health::health_check;
use crate::routes::otp::{generate::generate_otp, verify::verify_otp};
use crate::routes::AppState;

/// Register `/health` and the `/api/v1` routes
pub fn configure_routes<C, D, P>(cfg: &mut web::ServiceConfig)
where
    C: KeyValueCache + 'static,
    D: DocumentRepository + 'static,
    P: PatientRepository + 'static,
{
    cfg.app_data(json_config())
        .app_data(path_config())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/otp")
                        .route("/generate", web::post().to(generate_otp::<C, D, P>))
                        .route("/verify", web::post().to(verify_otp::<C, D, P>)),
                )
                .service(
                    web::scope("/documents")
                        .route("/sign-upload", web::post().to(sign_upload::<C, D, P>))
                        .route("/confirm", web::post().to(confirm_upload::<C, D, P>))
                        .route(
                            "/patient/{patient_id}",
                            web::get().to(patient_documents::<C, D, P>),
                        )
                        .route("/stats", web::get().to(document_stats::<C, D, P>))
                        .route("/{document_id}", web::get().to(document_detail::<C, D, P>))
                        .route(
                            "/{document_id}/download-url",
                            web::get().to(download_url::<C, D, P>),
                        ),
                ),
        );
}

/// Create the application with state, middleware and routes
pub fn create_app<C, D, P>(
    app_state: web::Data<AppState<C, D, P>>,
    cors: Cors,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    C: KeyValueCache + 'static,
    D: DocumentRepository + 'static,
    P: PatientRepository + 'static,
{
    App::new()
        .app_data(app_state)
        .wrap(cors)
        .wrap(TracingLogger::default())
        .configure(configure_routes::<C, D, P>)
        .default_service(web::route().to(not_found))
}

/// Malformed JSON bodies get the same error shape as domain errors
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest()
            .json(ErrorResponse::new("invalid_request", err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::NotFound()
            .json(ErrorResponse::new("not_found", "The requested resource was not found"));
        InternalError::from_response(err, response).into()
    })
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}

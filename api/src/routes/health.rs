use actix_web::HttpResponse;
use pms_shared::HealthResponse;

/// GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "clinic-pms-api",
        env!("CARGO_PKG_VERSION"),
    ))
}

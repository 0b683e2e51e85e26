//! CORS middleware configuration for cross-origin requests.
//!
//! Development allows any origin so local web clients and tools work out of
//! the box. Other environments only allow the configured origins.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use pms_shared::{Environment, ServerConfig};

/// Max age for the preflight cache, in seconds
const PREFLIGHT_MAX_AGE: usize = 3600;

pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![
            header::RETRY_AFTER,
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(PREFLIGHT_MAX_AGE);

    if environment.is_development() {
        tracing::info!("Configuring CORS for development environment");
        return cors.allow_any_origin();
    }

    server
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| {
            tracing::info!(origin = %origin, "Adding allowed origin");
            cors.allowed_origin(origin)
        })
}

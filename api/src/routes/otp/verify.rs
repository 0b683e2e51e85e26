use actix_web::{web, HttpResponse};
use validator::Validate;

use pms_core::errors::DomainError;
use pms_core::repositories::{DocumentRepository, PatientRepository};
use pms_core::services::KeyValueCache;
use pms_core::Channel;
use pms_shared::validation::is_valid_otp_code;

use crate::dto::otp::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::routes::AppState;

/// Handler for POST /api/v1/otp/verify
///
/// A wrong, expired, already used or exhausted code all answer
/// 400 "Invalid or expired code".
pub async fn verify_otp<C, D, P>(
    state: web::Data<AppState<C, D, P>>,
    request: web::Json<VerifyOtpRequest>,
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
    if !is_valid_otp_code(&request.code) {
        return handle_domain_error(DomainError::Validation {
            message: "code must be 4 to 8 digits".to_string(),
        });
    }

    let channel = match request.channel.parse::<Channel>() {
        Ok(channel) => channel,
        Err(error) => return handle_domain_error(error.into()),
    };

    match state
        .otp_service
        .verify_code(channel, &request.identifier, request.code.trim())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(VerifyOtpResponse {
            detail: "Verified".to_string(),
        }),
        Err(error) => handle_domain_error(error),
    }
}

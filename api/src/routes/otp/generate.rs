use actix_web::{web, HttpResponse};
use validator::Validate;

use pms_core::repositories::{DocumentRepository, PatientRepository};
use pms_core::services::KeyValueCache;
use pms_core::Channel;
use pms_shared::validation::mask_identifier;

use crate::dto::otp::{GenerateOtpRequest, GenerateOtpResponse, OtpTarget};
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::routes::AppState;

/// Handler for POST /api/v1/otp/generate
///
/// Issues a code for the identifier and sends it over the requested channel.
///
/// ```json
/// { "channel": "email", "identifier": "doctor@clinic.com" }
/// ```
///
/// Responds 429 while the resend cooldown is active and 500 when the
/// channel cannot deliver (missing sender or provider configuration).
pub async fn generate_otp<C, D, P>(
    state: web::Data<AppState<C, D, P>>,
    request: web::Json<GenerateOtpRequest>,
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

    let channel = match request.channel.parse::<Channel>() {
        Ok(channel) => channel,
        Err(error) => return handle_domain_error(error.into()),
    };

    tracing::info!(
        identifier = %mask_identifier(&request.identifier),
        channel = %channel,
        "Processing OTP generate request"
    );

    match state.otp_service.request_code(channel, &request.identifier).await {
        Ok(issued) => HttpResponse::Ok().json(GenerateOtpResponse {
            success: true,
            message: "OTP sent successfully".to_string(),
            expires_at: issued.expires_at_epoch(),
            data: OtpTarget {
                identifier: issued.identifier,
                channel: channel.as_str().to_string(),
            },
        }),
        Err(error) => handle_domain_error(error),
    }
}

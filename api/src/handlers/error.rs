//! Domain error to HTTP response mapping

use actix_web::{http::StatusCode, HttpResponse};
use pms_core::errors::{DocumentError, DomainError, OtpError};
use pms_shared::ErrorResponse;
use validator::ValidationErrors;

/// Status code and machine-readable error code for a domain error
pub fn classify(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
        DomainError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        DomainError::Otp(otp_error) => match otp_error {
            OtpError::Throttled { .. } => (StatusCode::TOO_MANY_REQUESTS, "throttled"),
            OtpError::InvalidIdentifier { .. } => (StatusCode::BAD_REQUEST, "invalid_identifier"),
            OtpError::UnsupportedChannel { .. } => (StatusCode::BAD_REQUEST, "unsupported_channel"),
            OtpError::Delivery { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "delivery_failed"),
            OtpError::InvalidOrExpiredCode => (StatusCode::BAD_REQUEST, "invalid_code"),
        },
        DomainError::Document(document_error) => match document_error {
            DocumentError::MissingFileInfo => (StatusCode::BAD_REQUEST, "missing_file_info"),
            DocumentError::MissingPatient => (StatusCode::BAD_REQUEST, "missing_patient"),
            DocumentError::BucketNotConfigured => {
                (StatusCode::INTERNAL_SERVER_ERROR, "bucket_not_configured")
            }
            DocumentError::PatientNotFound => (StatusCode::NOT_FOUND, "patient_not_found"),
            DocumentError::NotUploaded => (StatusCode::BAD_REQUEST, "not_uploaded"),
            DocumentError::ObjectNotUploaded { .. } => {
                (StatusCode::BAD_REQUEST, "object_not_uploaded")
            }
            DocumentError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
        },
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let (status, code) = classify(&error);

    if status.is_server_error() {
        tracing::error!(error_code = code, "Request failed: {}", error);
    } else {
        tracing::warn!(error_code = code, "Request rejected: {}", error);
    }

    // Internal details stay in the logs
    let message = match &error {
        DomainError::Internal { .. } => "An internal error occurred".to_string(),
        other => other.to_string(),
    };
    let mut body = ErrorResponse::new(code, message);
    let mut response = HttpResponse::build(status);

    if let DomainError::Otp(OtpError::Throttled { retry_after_seconds }) = &error {
        body = body.with_detail("retry_after_seconds", serde_json::json!(retry_after_seconds));
        response.insert_header(("Retry-After", retry_after_seconds.to_string()));
    }

    response.json(body)
}

/// 400 response listing the fields that failed validation
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    let mut body = ErrorResponse::new("validation_error", "Invalid request data");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        body = body.with_detail(field.to_string(), serde_json::json!(messages));
    }

    tracing::warn!("Request validation failed");
    HttpResponse::BadRequest().json(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        let cases: Vec<(DomainError, StatusCode)> = vec![
            (OtpError::Throttled { retry_after_seconds: 5 }.into(), StatusCode::TOO_MANY_REQUESTS),
            (
                OtpError::InvalidIdentifier { channel: "sms".into() }.into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                OtpError::UnsupportedChannel { channel: "fax".into() }.into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                OtpError::Delivery { message: "x".into() }.into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (OtpError::InvalidOrExpiredCode.into(), StatusCode::BAD_REQUEST),
            (DocumentError::MissingFileInfo.into(), StatusCode::BAD_REQUEST),
            (DocumentError::MissingPatient.into(), StatusCode::BAD_REQUEST),
            (DocumentError::BucketNotConfigured.into(), StatusCode::INTERNAL_SERVER_ERROR),
            (DocumentError::PatientNotFound.into(), StatusCode::NOT_FOUND),
            (DocumentError::NotUploaded.into(), StatusCode::BAD_REQUEST),
            (
                DocumentError::ObjectNotUploaded { object_key: "k".into() }.into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                DocumentError::Storage { message: "x".into() }.into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (DomainError::not_found("Document"), StatusCode::NOT_FOUND),
            (
                DomainError::Validation { message: "x".into() },
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::internal("cache", "down"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(classify(&error).0, expected, "{:?}", error);
        }
    }

    #[test]
    fn test_throttled_sets_retry_after() {
        let response = handle_domain_error(OtpError::Throttled { retry_after_seconds: 17 }.into());

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get("Retry-After").unwrap(), "17");
    }
}

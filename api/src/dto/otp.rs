use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateOtpRequest {
    /// "email", "sms" or "whatsapp" (case-insensitive)
    #[validate(length(min = 1, max = 20))]
    pub channel: String,

    /// Email address or phone number, depending on the channel
    #[validate(length(min = 1, max = 254))]
    pub identifier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpTarget {
    pub identifier: String,
    pub channel: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOtpResponse {
    pub success: bool,
    pub message: String,
    /// Unix timestamp (seconds) after which the code is no longer accepted
    pub expires_at: i64,
    pub data: OtpTarget,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(length(min = 1, max = 20))]
    pub channel: String,

    #[validate(length(min = 1, max = 254))]
    pub identifier: String,

    /// 4 to 8 digits
    #[validate(length(min = 4, max = 8))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub detail: String,
}

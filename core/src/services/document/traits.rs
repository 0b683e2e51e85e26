//! Object storage seam

use async_trait::async_trait;

/// HTTP method a signed URL is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignMethod {
    Get,
    Put,
}

impl SignMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignMethod::Get => "GET",
            SignMethod::Put => "PUT",
        }
    }
}

/// Parameters of one signed URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignRequest {
    pub bucket: String,
    pub object_key: String,
    pub method: SignMethod,
    /// Bound into PUT signatures; the upload must send the same header
    pub content_type: Option<String>,
    pub expires_in: u64,
}

/// Signs time-limited URLs and answers existence checks for stored objects
#[async_trait]
pub trait StorageSigner: Send + Sync {
    async fn sign_url(&self, request: SignRequest) -> Result<String, String>;
    async fn object_exists(&self, bucket: &str, object_key: &str) -> Result<bool, String>;
}

//! Object storage configuration

use serde::{Deserialize, Serialize};

use super::{env_flag, env_opt, env_or, env_parse};

/// Longest validity a V4 signed URL may carry (seven days)
pub const MAX_SIGNED_URL_SECONDS: u64 = 604_800;

/// Bucket and signed URL settings for document uploads
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Target bucket; uploads are refused while unset
    pub bucket: Option<String>,

    /// Prefix for generated object keys
    pub upload_prefix: String,

    /// Validity of signed PUT URLs in seconds
    pub put_expires_seconds: u64,

    /// Validity of signed GET URLs in seconds
    pub get_expires_seconds: u64,

    /// Storage endpoint used for signing and existence checks
    pub endpoint: String,

    /// HMAC key id used for V4 signing
    #[serde(default)]
    pub hmac_access_id: Option<String>,

    /// HMAC secret used for V4 signing
    #[serde(default, skip_serializing)]
    pub hmac_secret: Option<String>,

    /// Check the object exists in the bucket before confirming an upload
    #[serde(default)]
    pub verify_uploads: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            upload_prefix: String::from("uploads/"),
            put_expires_seconds: 900,
            get_expires_seconds: 3600,
            endpoint: String::from("https://storage.googleapis.com"),
            hmac_access_id: None,
            hmac_secret: None,
            verify_uploads: false,
        }
    }
}

impl StorageConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bucket: env_opt("GCS_BUCKET_NAME"),
            upload_prefix: env_or("GCS_UPLOAD_PREFIX", &defaults.upload_prefix),
            put_expires_seconds: env_parse(
                "GCS_SIGNED_URL_EXPIRE_SECONDS",
                defaults.put_expires_seconds,
            ),
            get_expires_seconds: env_parse(
                "GCS_SIGNED_GET_EXPIRE_SECONDS",
                defaults.get_expires_seconds,
            ),
            endpoint: env_or("GCS_ENDPOINT", &defaults.endpoint),
            hmac_access_id: env_opt("GCS_HMAC_ACCESS_ID"),
            hmac_secret: env_opt("GCS_HMAC_SECRET"),
            verify_uploads: env_flag("GCS_VERIFY_UPLOADS", false),
        }
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Bucket name, treating an empty string as unset
    pub fn bucket_name(&self) -> Option<&str> {
        self.bucket.as_deref().filter(|bucket| !bucket.is_empty())
    }

    /// Reject URL lifetimes the signer would refuse at request time
    pub fn validate(&self) -> Result<(), String> {
        let expiries = [
            ("GCS_SIGNED_URL_EXPIRE_SECONDS", self.put_expires_seconds),
            ("GCS_SIGNED_GET_EXPIRE_SECONDS", self.get_expires_seconds),
        ];
        for (name, seconds) in expiries {
            if !(1..=MAX_SIGNED_URL_SECONDS).contains(&seconds) {
                return Err(format!(
                    "{} must be between 1 and {}, got {}",
                    name, MAX_SIGNED_URL_SECONDS, seconds
                ));
            }
        }
        Ok(())
    }
}

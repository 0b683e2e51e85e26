//! Configuration for the document service

use pms_shared::config::StorageConfig;

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub bucket: Option<String>,
    pub upload_prefix: String,
    pub put_expires_seconds: u64,
    pub get_expires_seconds: u64,
    /// Ask storage whether the object exists before confirming
    pub verify_uploads: bool,
}

impl From<&StorageConfig> for UploadConfig {
    fn from(config: &StorageConfig) -> Self {
        Self {
            bucket: config.bucket_name().map(String::from),
            upload_prefix: config.upload_prefix.clone(),
            put_expires_seconds: config.put_expires_seconds,
            get_expires_seconds: config.get_expires_seconds,
            verify_uploads: config.verify_uploads,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self::from(&StorageConfig::default())
    }
}

impl UploadConfig {
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    pub fn with_verify_uploads(mut self, verify: bool) -> Self {
        self.verify_uploads = verify;
        self
    }
}

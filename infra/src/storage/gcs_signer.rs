//! GCS V4 query-string signing (`GOOG4-HMAC-SHA256`)
//!
//! Signed URLs are path-style: `{endpoint}/{bucket}/{object}?X-Goog-...`.
//! PUT URLs bind the `content-type` header, so the client must upload with
//! exactly the content type it asked for.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use pms_core::services::document::{SignMethod, SignRequest, StorageSigner};
use pms_shared::config::storage::MAX_SIGNED_URL_SECONDS;
use pms_shared::config::StorageConfig;
use reqwest::{Client, StatusCode, Url};
use sha2::{Digest, Sha256};
use tracing::{debug, error};

use crate::InfrastructureError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "GOOG4-HMAC-SHA256";
const LOCATION: &str = "auto";
const SERVICE: &str = "storage";
const REQUEST_TYPE: &str = "goog4_request";

/// Longest validity GCS accepts for a V4 signature
pub const MAX_EXPIRES_SECONDS: u64 = MAX_SIGNED_URL_SECONDS;

/// Lifetime of the URL used for existence checks
const HEAD_EXPIRES_SECONDS: u64 = 60;

#[derive(Clone)]
struct HmacCredentials {
    access_id: String,
    secret: String,
}

/// V4 URL signer backed by an HMAC key
#[derive(Clone)]
pub struct GcsSigner {
    endpoint: Url,
    host: String,
    credentials: Option<HmacCredentials>,
    http: Client,
}

impl GcsSigner {
    pub fn new(
        endpoint: &str,
        access_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, InfrastructureError> {
        let mut signer = Self::without_credentials(endpoint)?;
        signer.credentials = Some(HmacCredentials {
            access_id: access_id.into(),
            secret: secret.into(),
        });
        Ok(signer)
    }

    /// A signer that refuses to sign; used when no HMAC key is configured
    pub fn without_credentials(endpoint: &str) -> Result<Self, InfrastructureError> {
        let endpoint = Url::parse(endpoint.trim_end_matches('/')).map_err(|e| {
            InfrastructureError::Config(format!("Invalid storage endpoint: {}", e))
        })?;
        let host = match (endpoint.host_str(), endpoint.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(InfrastructureError::Config(
                    "Storage endpoint has no host".to_string(),
                ))
            }
        };

        Ok(Self {
            endpoint,
            host,
            credentials: None,
            http: Client::new(),
        })
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self, InfrastructureError> {
        match (&config.hmac_access_id, &config.hmac_secret) {
            (Some(access_id), Some(secret)) => {
                Self::new(&config.endpoint, access_id.clone(), secret.clone())
            }
            _ => {
                tracing::warn!("GCS HMAC credentials are not configured; URL signing is disabled");
                Self::without_credentials(&config.endpoint)
            }
        }
    }

    /// Build a signed URL valid from `now` for `expires_in` seconds
    pub fn sign_at(
        &self,
        method: &str,
        bucket: &str,
        object_key: &str,
        content_type: Option<&str>,
        expires_in: u64,
        now: DateTime<Utc>,
    ) -> Result<String, InfrastructureError> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            InfrastructureError::Config("GCS HMAC credentials are not configured".to_string())
        })?;
        if expires_in == 0 || expires_in > MAX_EXPIRES_SECONDS {
            return Err(InfrastructureError::Storage(format!(
                "expiration must be between 1 and {} seconds, got {}",
                MAX_EXPIRES_SECONDS, expires_in
            )));
        }

        let datestamp = now.format("%Y%m%d").to_string();
        let timestamp = now.format("%Y%m%dT%H%M%SZ").to_string();
        let scope = format!("{}/{}/{}/{}", datestamp, LOCATION, SERVICE, REQUEST_TYPE);
        let credential = format!("{}/{}", credentials.access_id, scope);

        let (canonical_headers, signed_headers) = match content_type {
            Some(content_type) => (
                format!("content-type:{}\nhost:{}\n", content_type.trim(), self.host),
                "content-type;host",
            ),
            None => (format!("host:{}\n", self.host), "host"),
        };

        // Parameter names are already in sorted order
        let query = [
            ("X-Goog-Algorithm", ALGORITHM.to_string()),
            ("X-Goog-Credential", credential),
            ("X-Goog-Date", timestamp.clone()),
            ("X-Goog-Expires", expires_in.to_string()),
            ("X-Goog-SignedHeaders", signed_headers.to_string()),
        ]
        .iter()
        .map(|(name, value)| format!("{}={}", name, uri_encode(value, true)))
        .collect::<Vec<_>>()
        .join("&");

        let base_path = self.endpoint.path().trim_end_matches('/');
        let path = format!("{}/{}/{}", base_path, bucket, uri_encode(object_key, false));

        let canonical_request = format!(
            "{}\n{}\n{}\n{}\n{}\nUNSIGNED-PAYLOAD",
            method, path, query, canonical_headers, signed_headers
        );
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            timestamp,
            scope,
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let signing_key = [datestamp.as_str(), LOCATION, SERVICE, REQUEST_TYPE].iter().try_fold(
            format!("GOOG4{}", credentials.secret).into_bytes(),
            |key, part| hmac_sha256(&key, part.as_bytes()),
        )?;
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?);

        debug!(method, bucket, object_key, expires_in, "Signed storage URL");

        Ok(format!(
            "{}://{}{}?{}&X-Goog-Signature={}",
            self.endpoint.scheme(),
            self.host,
            path,
            query,
            signature
        ))
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, InfrastructureError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| InfrastructureError::Storage(format!("Invalid signing key: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// RFC 3986 percent-encoding; `/` is kept in object paths
pub(crate) fn uri_encode(value: &str, encode_slash: bool) -> String {
    if encode_slash {
        return urlencoding::encode(value).into_owned();
    }
    value
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait]
impl StorageSigner for GcsSigner {
    async fn sign_url(&self, request: SignRequest) -> Result<String, String> {
        let content_type = match request.method {
            SignMethod::Put => request.content_type.as_deref(),
            SignMethod::Get => None,
        };
        self.sign_at(
            request.method.as_str(),
            &request.bucket,
            &request.object_key,
            content_type,
            request.expires_in,
            Utc::now(),
        )
        .map_err(|e| e.to_string())
    }

    async fn object_exists(&self, bucket: &str, object_key: &str) -> Result<bool, String> {
        let url = self
            .sign_at("HEAD", bucket, object_key, None, HEAD_EXPIRES_SECONDS, Utc::now())
            .map_err(|e| e.to_string())?;

        let response = self.http.head(url).send().await.map_err(|e| {
            error!(bucket, object_key, "Storage existence check failed: {}", e);
            e.to_string()
        })?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(format!("Unexpected storage response: {}", status)),
        }
    }
}

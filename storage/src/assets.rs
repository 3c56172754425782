//! Asset upload store.
//!
//! Accepts one binary asset, stores it at the bucket root under a generated
//! unique key with public-read intent, and returns its public retrieval URL.

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use bytes::Bytes;
use chrono::Utc;
use config::BucketSettings;
use rand::Rng;

use crate::s3::build_client;
use errors::UploadError;

/// A stored asset: its public URL and the generated upload id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    pub url: String,
    pub id: String,
}

pub struct AssetStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    endpoint: Option<String>,
    public_base_url: Option<String>,
}

impl AssetStore {
    /// Construction requires fully-resolved bucket settings
    /// ([`config::StorageSettings::require_bucket`]), so a half-configured
    /// store cannot exist: missing credentials fail loudly before any upload.
    pub async fn new(settings: &BucketSettings) -> Self {
        Self {
            client: build_client(settings).await,
            bucket: settings.bucket.clone(),
            endpoint: settings.endpoint.clone(),
            public_base_url: settings.public_base_url.clone(),
        }
    }

    /// Wraps an existing client (integration tests).
    pub fn from_client(
        client: aws_sdk_s3::Client,
        bucket: impl Into<String>,
        endpoint: Option<String>,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            endpoint,
            public_base_url,
        }
    }

    /// Stores one asset and returns its URL and upload id.
    ///
    /// The key is `{timestamp}-{random}` plus the sanitized original name;
    /// unique with overwhelming probability under concurrent uploads, and
    /// deliberately not content-addressed: identical bytes uploaded twice
    /// produce two distinct objects.
    pub async fn upload(
        &self,
        bytes: Bytes,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadedAsset, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::EmptyPayload);
        }

        let id = unique_prefix();
        let key = format!("{id}-{}", sanitize_file_name(file_name));

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes.to_vec()))
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| UploadError::Backend {
                reason: e.to_string(),
            })?;

        let url = asset_url(
            self.public_base_url.as_deref(),
            self.endpoint.as_deref(),
            &self.bucket,
            &key,
        );
        tracing::info!(%key, %url, "Stored uploaded asset");

        Ok(UploadedAsset { url, id })
    }
}

/// Strips every character outside `[A-Za-z0-9.\-_]` from an uploaded file
/// name.
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect()
}

/// Collision-resistant key prefix: unix-millis timestamp plus a random
/// integer below one billion.
fn unique_prefix() -> String {
    let random: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{}-{}", Utc::now().timestamp_millis(), random)
}

/// Public URL for a stored key.
///
/// Prefers the configured public base; the `{endpoint}/{bucket}/{key}`
/// fallback is provider-dependent and only guaranteed to be some string.
fn asset_url(
    public_base_url: Option<&str>,
    endpoint: Option<&str>,
    bucket: &str,
    key: &str,
) -> String {
    if let Some(base) = public_base_url {
        format!("{}/{key}", base.trim_end_matches('/'))
    } else {
        format!("{}/{bucket}/{key}", endpoint.unwrap_or_default())
    }
}

//! S3-compatible document store.

use async_trait::async_trait;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use config::BucketSettings;
use site_core::{DocumentStore, ProfileId, SiteDocument};

use crate::keys::{PROFILE_PREFIX, document_key, profile_id_from_key};
use errors::StorageError;

/// Builds an S3 client from resolved bucket settings.
///
/// Path-style addressing is forced because most S3-compatible providers
/// (MinIO, R2, Railway) require it.
pub(crate) async fn build_client(settings: &BucketSettings) -> aws_sdk_s3::Client {
    let credentials = aws_sdk_s3::config::Credentials::new(
        settings.access_key_id.clone(),
        settings.secret_access_key.clone(),
        None,
        None,
        "vitrine-settings",
    );

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(settings.region.clone()))
        .credentials_provider(credentials);
    if let Some(endpoint) = &settings.endpoint {
        loader = loader.endpoint_url(endpoint.as_str());
    }
    let shared = loader.load().await;

    let s3_config = aws_sdk_s3::config::Builder::from(&shared)
        .force_path_style(true)
        .build();
    aws_sdk_s3::Client::from_conf(s3_config)
}

/// Document store backed by an S3-compatible bucket.
pub struct S3DocumentStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3DocumentStore {
    pub async fn new(settings: &BucketSettings) -> Self {
        Self {
            client: build_client(settings).await,
            bucket: settings.bucket.clone(),
        }
    }

    /// Wraps an existing client (integration tests).
    pub fn from_client(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    async fn fetch(&self, profile_id: &ProfileId) -> Result<Option<SiteDocument>, StorageError> {
        let key = document_key(profile_id);
        let response = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                // A missing key means "profile not created yet"; anything
                // else is a real backend failure and must surface.
                if err
                    .as_service_error()
                    .is_some_and(GetObjectError::is_no_such_key)
                {
                    return Ok(None);
                }
                return Err(StorageError::backend("get", err));
            }
        };

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::backend("get", e))?;

        match serde_json::from_slice::<SiteDocument>(&data.into_bytes()) {
            Ok(document) => Ok(Some(document)),
            Err(e) => {
                tracing::warn!(%key, error = %e, "Stored document failed to parse, using default");
                Ok(None)
            }
        }
    }

    async fn put(
        &self,
        profile_id: &ProfileId,
        document: &SiteDocument,
    ) -> Result<(), StorageError> {
        let key = document_key(profile_id);
        let body = serde_json::to_vec_pretty(document).map_err(|e| {
            StorageError::Serialization {
                reason: e.to_string(),
            }
        })?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(body))
            .content_type("application/json")
            .send()
            .await
            .map_err(|e| StorageError::backend("put", e))?;

        tracing::debug!(%key, "Persisted document");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ProfileId>, StorageError> {
        let response = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(PROFILE_PREFIX)
            .send()
            .await
            .map_err(|e| StorageError::backend("list", e))?;

        Ok(response
            .contents()
            .iter()
            .filter_map(|object| object.key())
            .filter_map(profile_id_from_key)
            .collect())
    }
}

//! # Storage Settings
//!
//! Resolves the object-storage configuration from environment variables,
//! once, at startup. Call sites receive a plain struct and never re-read the
//! environment.
//!
//! # Environment Variables
//!
//! Several names have accumulated for the same setting across hosting
//! providers; each is resolved with a fixed precedence (first set wins):
//! - `STORAGE_BACKEND`: `s3` or `local`; defaults to `s3` when a bucket is
//!   configured, `local` otherwise
//! - `DATA_DIR`: directory for the local backend (default: `./data`)
//! - `AWS_REGION`: bucket region (default: `"auto"`)
//! - `AWS_ENDPOINT_URL_S3` > `S3_ENDPOINT`: S3-compatible endpoint URL
//! - `AWS_ACCESS_KEY_ID` > `ACCESS_KEY` > `S3_ACCESS_KEY`: access key id
//! - `AWS_SECRET_ACCESS_KEY` > `SECRET_KEY` > `S3_SECRET_KEY`: secret key
//! - `AWS_BUCKET_NAME` > `BUCKET_NAME` > `S3_BUCKET`: bucket name
//! - `PUBLIC_BUCKET_URL`: explicit public base URL for uploaded assets;
//!   when unset and a bucket is configured, the default AWS hostname
//!   pattern `https://{bucket}.s3.{region}.amazonaws.com` is derived
//!   (`"auto"` regions derive with `us-east-1`)

use std::env;
use std::path::PathBuf;

use errors::StorageError;

/// Which backend holds the documents and uploaded assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Local,
}

/// Names of the environment variables consulted for storage settings, in
/// precedence order. Shared with the debug endpoint so the two never drift.
pub const ENDPOINT_VARS: [&str; 2] = ["AWS_ENDPOINT_URL_S3", "S3_ENDPOINT"];
pub const ACCESS_KEY_VARS: [&str; 3] = ["AWS_ACCESS_KEY_ID", "ACCESS_KEY", "S3_ACCESS_KEY"];
pub const SECRET_KEY_VARS: [&str; 3] = ["AWS_SECRET_ACCESS_KEY", "SECRET_KEY", "S3_SECRET_KEY"];
pub const BUCKET_VARS: [&str; 3] = ["AWS_BUCKET_NAME", "BUCKET_NAME", "S3_BUCKET"];

/// Canonical object-storage configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Root directory for the local backend.
    pub data_dir: PathBuf,
    pub region: String,
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub bucket: Option<String>,
    /// Public base URL for uploaded assets, explicit or derived.
    pub public_base_url: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            data_dir: PathBuf::from("./data"),
            region: "auto".to_string(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            bucket: None,
            public_base_url: None,
        }
    }
}

impl StorageSettings {
    /// Resolves settings from the environment with the documented alias
    /// precedence. Infallible: a missing bucket simply selects the local
    /// backend; operations that need credentials fail loudly later via
    /// [`StorageSettings::require_bucket`].
    pub fn from_env() -> Self {
        let region = env::var("AWS_REGION").unwrap_or_else(|_| "auto".to_string());
        let endpoint = first_of(&ENDPOINT_VARS);
        let access_key_id = first_of(&ACCESS_KEY_VARS);
        let secret_access_key = first_of(&SECRET_KEY_VARS);
        let bucket = first_of(&BUCKET_VARS);

        let public_base_url = env::var("PUBLIC_BUCKET_URL").ok().or_else(|| {
            bucket.as_ref().map(|bucket| {
                let region = if region == "auto" {
                    "us-east-1"
                } else {
                    region.as_str()
                };
                format!("https://{bucket}.s3.{region}.amazonaws.com")
            })
        });

        let backend = match env::var("STORAGE_BACKEND").ok().as_deref() {
            Some("local") => StorageBackend::Local,
            Some("s3") => StorageBackend::S3,
            Some(other) => {
                tracing::warn!(backend = %other, "Unknown STORAGE_BACKEND, falling back");
                if bucket.is_some() {
                    StorageBackend::S3
                } else {
                    StorageBackend::Local
                }
            }
            None if bucket.is_some() => StorageBackend::S3,
            None => StorageBackend::Local,
        };

        Self {
            backend,
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            region,
            endpoint,
            access_key_id,
            secret_access_key,
            bucket,
            public_base_url,
        }
    }

    /// Returns the fully-resolved bucket settings, or a configuration error
    /// naming the first missing piece. The loud-failure gate for uploads and
    /// S3-backed saves: a half-configured bucket never degrades silently.
    pub fn require_bucket(&self) -> Result<BucketSettings, StorageError> {
        let missing = |what: &str| StorageError::Configuration {
            message: format!("{what} not set"),
        };

        Ok(BucketSettings {
            region: self.region.clone(),
            endpoint: self.endpoint.clone(),
            access_key_id: self
                .access_key_id
                .clone()
                .ok_or_else(|| missing("access key id"))?,
            secret_access_key: self
                .secret_access_key
                .clone()
                .ok_or_else(|| missing("secret access key"))?,
            bucket: self.bucket.clone().ok_or_else(|| missing("bucket name"))?,
            public_base_url: self.public_base_url.clone(),
        })
    }
}

/// Bucket settings with credentials guaranteed present.
#[derive(Debug, Clone)]
pub struct BucketSettings {
    pub region: String,
    pub endpoint: Option<String>,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub public_base_url: Option<String>,
}

fn first_of(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| env::var(name).ok().filter(|value| !value.is_empty()))
}

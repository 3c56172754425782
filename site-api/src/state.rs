//! Application state for the Vitrine API.

use std::sync::Arc;

use config::{StorageBackend, StorageSettings};
use site_core::DocumentStore;
use storage::{AssetStore, LocalDocumentStore, ProfileRegistry, S3DocumentStore};

use crate::error::Result;

/// Configuration for the API server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind the server to.
    pub host: String,
    /// Port to bind the server to.
    pub port: u16,
    /// Resolved object-storage settings.
    pub storage: StorageSettings,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            storage: StorageSettings::default(),
        }
    }
}

impl ApiConfig {
    /// Creates a configuration from environment variables (`HOST`, `PORT`,
    /// plus the storage variables documented in the `config` crate).
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            storage: StorageSettings::from_env(),
        }
    }

    /// Creates a builder for configuration.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }
}

/// Builder for `ApiConfig`.
#[derive(Default)]
pub struct ApiConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
    storage: Option<StorageSettings>,
}

impl ApiConfigBuilder {
    /// Sets the host to bind to.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the port to bind to.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the storage settings.
    #[must_use]
    pub fn storage(mut self, storage: StorageSettings) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> ApiConfig {
        ApiConfig {
            host: self.host.unwrap_or_else(|| "0.0.0.0".to_string()),
            port: self.port.unwrap_or(8080),
            storage: self.storage.unwrap_or_default(),
        }
    }
}

/// Shared application state for Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Document persistence backend.
    pub store: Arc<dyn DocumentStore>,
    /// Profile enumeration and creation over the same backend.
    pub registry: ProfileRegistry,
    /// Asset uploads; `None` until the bucket is fully configured, in which
    /// case the upload endpoint fails loudly instead of degrading.
    pub assets: Option<Arc<AssetStore>>,
}

impl AppState {
    /// Creates application state from resolved storage settings.
    pub async fn new(settings: &StorageSettings) -> Result<Self> {
        let store: Arc<dyn DocumentStore> = match settings.backend {
            StorageBackend::S3 => {
                let bucket = settings.require_bucket()?;
                Arc::new(S3DocumentStore::new(&bucket).await)
            }
            StorageBackend::Local => {
                tracing::info!(data_dir = %settings.data_dir.display(), "Using local document store");
                Arc::new(LocalDocumentStore::new(settings.data_dir.clone()))
            }
        };

        let assets = match settings.require_bucket() {
            Ok(bucket) => Some(Arc::new(AssetStore::new(&bucket).await)),
            Err(err) => {
                tracing::warn!(error = %err, "Uploads disabled: bucket not configured");
                None
            }
        };

        Ok(Self {
            registry: ProfileRegistry::new(Arc::clone(&store)),
            store,
            assets,
        })
    }

    /// Creates application state from an existing store (useful for testing).
    #[must_use]
    pub fn with_store(store: Arc<dyn DocumentStore>, assets: Option<Arc<AssetStore>>) -> Self {
        Self {
            registry: ProfileRegistry::new(Arc::clone(&store)),
            store,
            assets,
        }
    }
}

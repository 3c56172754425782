//! Core traits for document persistence.

use async_trait::async_trait;

use crate::types::{ProfileId, SiteDocument};
use errors::StorageError;

/// Durable key-value persistence of one JSON document per profile id.
///
/// Documents live under `profiles/{id}.json` regardless of backend. Writes
/// are unconditional whole-document overwrites; the last writer wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads the document stored for `profile_id`.
    ///
    /// An absent key returns `Ok(None)`. Stored bytes that fail to parse as
    /// a valid document are treated the same way (logged, never surfaced),
    /// so a corrupt object cannot block the UI. Transport and credential
    /// failures are real errors and propagate.
    async fn fetch(&self, profile_id: &ProfileId) -> Result<Option<SiteDocument>, StorageError>;

    /// Serializes and overwrites the document at `profile_id`.
    ///
    /// No version check, no conflict detection.
    async fn put(&self, profile_id: &ProfileId, document: &SiteDocument)
    -> Result<(), StorageError>;

    /// Enumerates every stored profile id, in whatever order the backend
    /// returns them.
    async fn list(&self) -> Result<Vec<ProfileId>, StorageError>;

    /// Reads the document for `profile_id`, falling back to the well-known
    /// default when the key is absent.
    ///
    /// The fallback is a never-block-the-UI policy, not a correctness
    /// guarantee: the returned document may never have been persisted.
    async fn load_or_default(&self, profile_id: &ProfileId) -> Result<SiteDocument, StorageError> {
        Ok(self
            .fetch(profile_id)
            .await?
            .unwrap_or_else(|| SiteDocument::default_for(profile_id)))
    }
}

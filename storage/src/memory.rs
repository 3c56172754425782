//! In-process document store.
//!
//! Test double for the session and API layers; also handy for ephemeral
//! demo deployments. Cloning shares the underlying map.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use site_core::{DocumentStore, ProfileId, SiteDocument};

use errors::StorageError;

#[derive(Default, Clone)]
pub struct MemoryDocumentStore {
    documents: Arc<DashMap<ProfileId, SiteDocument>>,
    fail_puts: Arc<AtomicBool>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `put` fail, for exercising write-error paths.
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn fetch(&self, profile_id: &ProfileId) -> Result<Option<SiteDocument>, StorageError> {
        Ok(self.documents.get(profile_id).map(|doc| doc.value().clone()))
    }

    async fn put(
        &self,
        profile_id: &ProfileId,
        document: &SiteDocument,
    ) -> Result<(), StorageError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StorageError::backend("put", "simulated backend failure"));
        }
        self.documents.insert(profile_id.clone(), document.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ProfileId>, StorageError> {
        Ok(self
            .documents
            .iter()
            .map(|entry| entry.key().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trip_and_list() {
        let store = MemoryDocumentStore::new();
        let id = ProfileId::new("mem".to_string()).unwrap();
        let doc = SiteDocument::default_for(&id);

        store.put(&id, &doc).await.unwrap();
        assert_eq!(store.fetch(&id).await.unwrap(), Some(doc));
        assert_eq!(store.list().await.unwrap(), vec![id]);
    }

    #[tokio::test]
    async fn failing_puts_surface_backend_errors() {
        let store = MemoryDocumentStore::new();
        store.fail_puts(true);
        let id = ProfileId::default();
        let err = store.put(&id, &SiteDocument::default()).await.unwrap_err();
        assert!(matches!(err, StorageError::Backend { .. }));
        assert!(store.is_empty());
    }
}

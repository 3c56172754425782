//! Local-disk document store.
//!
//! Mirrors the bucket layout on disk: `{data_dir}/profiles/{id}.json`.
//! Used for local development when no bucket is configured.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use site_core::{DocumentStore, ProfileId, SiteDocument};

use crate::keys::document_key;
use errors::StorageError;

pub struct LocalDocumentStore {
    data_dir: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn document_path(&self, profile_id: &ProfileId) -> PathBuf {
        self.data_dir.join(document_key(profile_id))
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn fetch(&self, profile_id: &ProfileId) -> Result<Option<SiteDocument>, StorageError> {
        let path = self.document_path(profile_id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::backend("get", e)),
        };

        match serde_json::from_slice::<SiteDocument>(&bytes) {
            Ok(document) => Ok(Some(document)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Stored document failed to parse, using default");
                Ok(None)
            }
        }
    }

    async fn put(
        &self,
        profile_id: &ProfileId,
        document: &SiteDocument,
    ) -> Result<(), StorageError> {
        let path = self.document_path(profile_id);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::backend("put", e))?;
        }

        let body = serde_json::to_vec_pretty(document).map_err(|e| {
            StorageError::Serialization {
                reason: e.to_string(),
            }
        })?;

        tokio::fs::write(&path, body)
            .await
            .map_err(|e| StorageError::backend("put", e))
    }

    async fn list(&self) -> Result<Vec<ProfileId>, StorageError> {
        let dir = self.data_dir.join("profiles");
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::backend("list", e)),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::backend("list", e))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(stem) = name.strip_suffix(".json") {
                if let Some(id) = ProfileId::new(stem.to_string()) {
                    ids.push(id);
                }
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_core::ThemeVariant;

    fn store() -> (tempfile::TempDir, LocalDocumentStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn put_then_fetch_round_trips() {
        let (_dir, store) = store();
        let id = ProfileId::new("roundtrip".to_string()).unwrap();
        let mut doc = SiteDocument::default_for(&id);
        doc.theme = ThemeVariant::Bold;
        doc.profile.tagline = "Bold & Direct".to_string();

        store.put(&id, &doc).await.unwrap();
        let fetched = store.fetch(&id).await.unwrap();
        assert_eq!(fetched, Some(doc));
    }

    #[tokio::test]
    async fn fetch_missing_returns_none() {
        let (_dir, store) = store();
        let id = ProfileId::new("nobody".to_string()).unwrap();
        assert_eq!(store.fetch(&id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn load_or_default_stamps_requested_id() {
        let (_dir, store) = store();
        let id = ProfileId::new("fresh".to_string()).unwrap();
        let doc = store.load_or_default(&id).await.unwrap();
        assert_eq!(doc.id, id);
        assert_eq!(doc.profile.name, "Jane Doe");
    }

    #[tokio::test]
    async fn corrupt_document_falls_back_to_none() {
        let (dir, store) = store();
        let id = ProfileId::new("corrupt".to_string()).unwrap();
        let path = dir.path().join("profiles");
        std::fs::create_dir_all(&path).unwrap();
        std::fs::write(path.join("corrupt.json"), b"{not json").unwrap();

        assert_eq!(store.fetch(&id).await.unwrap(), None);
        let doc = store.load_or_default(&id).await.unwrap();
        assert_eq!(doc, SiteDocument::default_for(&id));
    }

    #[tokio::test]
    async fn list_returns_written_ids_and_skips_strays() {
        let (dir, store) = store();
        for name in ["alpha", "beta"] {
            let id = ProfileId::new(name.to_string()).unwrap();
            store.put(&id, &SiteDocument::default_for(&id)).await.unwrap();
        }
        std::fs::write(dir.path().join("profiles/notes.txt"), b"stray").unwrap();

        let mut ids: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(ProfileId::into_inner)
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["alpha", "beta"]);
    }

    #[tokio::test]
    async fn list_with_no_data_dir_is_empty() {
        let (_dir, store) = store();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn put_overwrites_unconditionally() {
        let (_dir, store) = store();
        let id = ProfileId::new("overwrite".to_string()).unwrap();
        let first = SiteDocument::default_for(&id);
        store.put(&id, &first).await.unwrap();

        let mut second = first.clone();
        second.profile.name = "Second Writer".to_string();
        store.put(&id, &second).await.unwrap();

        let fetched = store.fetch(&id).await.unwrap().unwrap();
        assert_eq!(fetched.profile.name, "Second Writer");
    }
}

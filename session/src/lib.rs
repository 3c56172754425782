//! # Document Session
//!
//! The in-memory state holder that mediates editor reads and optimistic
//! writes of one active document.
//!
//! A `DocumentSession` is an explicitly owned value, created per consumer
//! (a server process, an embedded admin surface, a test); there is no
//! process-wide singleton. Reads never touch the store. Writes merge into
//! the in-memory snapshot synchronously and persist in the background: the
//! caller is never gated on durability, and a failed persist is reported
//! only through the session's error sink. This keeps the editing surface
//! instantaneous while durability stays eventual and unconfirmed.

use std::sync::Arc;

use site_core::{
    AvailabilityInfo, DocumentStore, ImageItem, ProfileId, ProfileInfo, ServiceItem, SiteDocument,
    ThemeVariant,
};
use tokio::task::JoinHandle;

use errors::StorageError;

/// Callback receiving background-persist failures.
pub type ErrorSink = Arc<dyn Fn(StorageError) + Send + Sync>;

/// A shallow patch of top-level document fields.
///
/// Every provided field fully replaces the old value for that key; nested
/// values are never deep-merged. `id` is deliberately absent: it is
/// immutable once a document exists. Merges of disjoint fields commute;
/// same-field merges are last-writer-wins.
#[derive(Debug, Clone, Default)]
pub struct DocumentPatch {
    pub theme: Option<ThemeVariant>,
    pub profile: Option<ProfileInfo>,
    pub services: Option<Vec<ServiceItem>>,
    pub gallery: Option<Vec<ImageItem>>,
    pub availability: Option<AvailabilityInfo>,
    pub hero_image_id: Option<String>,
}

impl DocumentPatch {
    fn apply(self, document: &mut SiteDocument) {
        if let Some(theme) = self.theme {
            document.theme = theme;
        }
        if let Some(profile) = self.profile {
            document.profile = profile;
        }
        if let Some(services) = self.services {
            document.services = services;
        }
        if let Some(gallery) = self.gallery {
            document.gallery = gallery;
        }
        if let Some(availability) = self.availability {
            document.availability = availability;
        }
        if let Some(hero_image_id) = self.hero_image_id {
            document.hero_image_id = Some(hero_image_id);
        }
    }
}

/// Process-local cache of one profile's document.
pub struct DocumentSession {
    profile_id: ProfileId,
    store: Arc<dyn DocumentStore>,
    document: SiteDocument,
    error_sink: ErrorSink,
    pending: Vec<JoinHandle<()>>,
}

impl DocumentSession {
    /// Fetches the current document for `profile_id` and holds it in memory.
    ///
    /// This is the synchronization point between the store and the cache: it
    /// must complete before any read or write. A missing document falls out
    /// to the default; a backend failure propagates.
    pub async fn initialize(
        store: Arc<dyn DocumentStore>,
        profile_id: ProfileId,
    ) -> Result<Self, StorageError> {
        let document = store.load_or_default(&profile_id).await?;
        Ok(Self {
            profile_id,
            store,
            document,
            error_sink: Arc::new(|err| {
                tracing::error!(error = %err, "Background document persist failed");
            }),
            pending: Vec::new(),
        })
    }

    /// Replaces the sink receiving background-persist failures.
    #[must_use]
    pub fn with_error_sink(mut self, sink: ErrorSink) -> Self {
        self.error_sink = sink;
        self
    }

    pub fn profile_id(&self) -> &ProfileId {
        &self.profile_id
    }

    /// The current in-memory snapshot. Never touches the store.
    pub fn document(&self) -> &SiteDocument {
        &self.document
    }

    /// Merges `patch` into the snapshot and schedules a background persist
    /// of the full merged document.
    ///
    /// Returns as soon as the in-memory merge is done; persistence failure
    /// is reported only via the error sink, never to this caller.
    pub fn update(&mut self, patch: DocumentPatch) -> &SiteDocument {
        patch.apply(&mut self.document);
        self.spawn_persist(self.document.clone());
        &self.document
    }

    /// Convenience wrapper: `update` with only the theme set.
    pub fn set_theme(&mut self, theme: ThemeVariant) {
        self.update(DocumentPatch {
            theme: Some(theme),
            ..DocumentPatch::default()
        });
    }

    /// Restores the default document and schedules its persist.
    pub fn reset(&mut self) -> &SiteDocument {
        self.document = SiteDocument::default_for(&self.profile_id);
        self.spawn_persist(self.document.clone());
        &self.document
    }

    /// The named detached-write construct: persistence runs on its own task,
    /// and its failure goes to the error sink. Handles are kept so `flush`
    /// can await stragglers; dropping the session detaches them instead of
    /// aborting.
    fn spawn_persist(&mut self, document: SiteDocument) {
        let store = Arc::clone(&self.store);
        let sink = Arc::clone(&self.error_sink);
        let profile_id = self.profile_id.clone();

        let handle = tokio::spawn(async move {
            if let Err(err) = store.put(&profile_id, &document).await {
                sink(err);
            }
        });

        self.pending.retain(|h| !h.is_finished());
        self.pending.push(handle);
    }

    /// Awaits every outstanding background persist. Test and shutdown hook;
    /// editors never call this on the interactive path.
    pub async fn flush(&mut self) {
        for handle in self.pending.drain(..) {
            let _ = handle.await;
        }
    }
}

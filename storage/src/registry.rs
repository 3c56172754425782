//! Profile registry: enumerates and creates profile identities.

use std::sync::Arc;

use site_core::{DocumentStore, ProfileId, SiteDocument};

use errors::RegistryError;

#[derive(Clone)]
pub struct ProfileRegistry {
    store: Arc<dyn DocumentStore>,
}

impl ProfileRegistry {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Every known profile id, in backend order.
    pub async fn list(&self) -> Result<Vec<ProfileId>, RegistryError> {
        Ok(self.store.list().await?)
    }

    /// Creates a profile: derives the id from the display name and seeds the
    /// default document with `profile.name` set to the original, unsanitized
    /// name.
    ///
    /// No collision check: a name that sanitizes to an existing id silently
    /// overwrites that profile's document.
    pub async fn create(&self, name: &str) -> Result<ProfileId, RegistryError> {
        let profile_id =
            ProfileId::from_display_name(name).ok_or(RegistryError::InvalidName)?;

        let mut document = SiteDocument::default_for(&profile_id);
        document.profile.name = name.to_string();
        self.store.put(&profile_id, &document).await?;

        tracing::info!(%profile_id, "Created profile");
        Ok(profile_id)
    }
}

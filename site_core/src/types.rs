use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Visual theme variant for the public renderer.
///
/// Purely presentational; the backend only stores and round-trips it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, EnumString, Display,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Luxury,
    Bold,
    Soft,
    Minimal,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, EnumString, Display,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    Limited,
    Unavailable,
}

/// Identity of a profile document; also the storage key stem
/// (`profiles/{id}.json`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new(id: String) -> Option<Self> {
        if id.is_empty() || id.len() > 100 {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Derives a profile id from a human-entered display name: lowercased,
    /// with every character outside `[a-z0-9-]` replaced by `-`.
    ///
    /// `"My Site!"` becomes `"my-site-"`.
    pub fn from_display_name(name: &str) -> Option<Self> {
        let id: String = name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        Self::new(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self("default".to_string())
    }
}

impl std::str::FromStr for ProfileId {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string()).ok_or_else(|| anyhow::anyhow!("Invalid profile ID"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct SocialHandles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// Display information for the provider behind a profile site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInfo {
    pub name: String,
    pub tagline: String,
    pub bio: String,
    pub location: String,
    pub contact_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socials: Option<SocialHandles>,
}

/// One offered service. `rate` is free text, not a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl ServiceItem {
    /// Creates a service entry with a generated unique id.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        rate: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            rate: rate.into(),
            duration: None,
        }
    }
}

/// One gallery image, referenced by its public retrieval URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageItem {
    pub id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhanced: Option<bool>,
}

impl ImageItem {
    /// Creates a gallery entry with a generated unique id.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            url: url.into(),
            caption: None,
            tags: None,
            enhanced: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityInfo {
    pub status: AvailabilityStatus,
    /// Free text for now, could be structured later.
    pub schedule: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The sole persisted entity: everything one profile site displays.
///
/// Always read and written whole; there is no partial-field patch semantic
/// at the storage boundary. `id` is immutable once created and equals the
/// storage key stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteDocument {
    pub id: ProfileId,
    pub theme: ThemeVariant,
    pub profile: ProfileInfo,
    pub services: Vec<ServiceItem>,
    pub gallery: Vec<ImageItem>,
    pub availability: AvailabilityInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image_id: Option<String>,
}

impl SiteDocument {
    /// The well-known seed document, stamped with the requested profile id.
    ///
    /// Returned by the read path when a key is absent; callers must not
    /// assume a document equal to this one was ever persisted.
    pub fn default_for(profile_id: &ProfileId) -> Self {
        Self {
            id: profile_id.clone(),
            theme: ThemeVariant::Luxury,
            profile: ProfileInfo {
                name: "Jane Doe".to_string(),
                tagline: "Exclusive & Elegant".to_string(),
                bio: "Professional companion for high-end events and private dinners."
                    .to_string(),
                location: "New York, NY".to_string(),
                contact_email: "jane@example.com".to_string(),
                contact_phone: None,
                whatsapp: None,
                socials: None,
            },
            services: vec![ServiceItem {
                id: "1".to_string(),
                name: "Dinner Date".to_string(),
                description: "A romantic evening at a fine dining establishment.".to_string(),
                rate: "300".to_string(),
                duration: Some("2 hours".to_string()),
            }],
            gallery: Vec::new(),
            availability: AvailabilityInfo {
                status: AvailabilityStatus::Available,
                schedule: "Mon-Fri: 6pm - 12am".to_string(),
                notes: None,
            },
            hero_image_id: None,
        }
    }

    /// Checks per-document invariants: every service and gallery entry has a
    /// non-empty id, unique within its own sequence.
    pub fn validate(&self) -> Result<(), errors::DocumentError> {
        let mut seen = std::collections::HashSet::new();
        for service in &self.services {
            if service.id.is_empty() {
                return Err(errors::DocumentError::EmptyEntryId {
                    collection: "services".to_string(),
                });
            }
            if !seen.insert(service.id.as_str()) {
                return Err(errors::DocumentError::DuplicateServiceId {
                    id: service.id.clone(),
                });
            }
        }

        let mut seen = std::collections::HashSet::new();
        for image in &self.gallery {
            if image.id.is_empty() {
                return Err(errors::DocumentError::EmptyEntryId {
                    collection: "gallery".to_string(),
                });
            }
            if !seen.insert(image.id.as_str()) {
                return Err(errors::DocumentError::DuplicateGalleryId {
                    id: image.id.clone(),
                });
            }
        }

        Ok(())
    }
}

impl Default for SiteDocument {
    fn default() -> Self {
        Self::default_for(&ProfileId::default())
    }
}

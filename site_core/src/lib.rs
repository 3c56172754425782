//! # Vitrine Core
//!
//! Shared types and traits for the Vitrine site builder.
//!
//! This crate provides:
//! - The `SiteDocument` model: everything one profile site displays
//! - `ProfileId`, the document identity and storage key stem
//! - The `DocumentStore` trait implemented by the storage backends
//! - Per-document invariant validation

pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use traits::DocumentStore;
pub use types::{
    AvailabilityInfo, AvailabilityStatus, ImageItem, ProfileId, ProfileInfo, ServiceItem,
    SiteDocument, SocialHandles, ThemeVariant,
};

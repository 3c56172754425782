//! # Configuration System
//!
//! Centralized environment configuration for the Vitrine site builder.
//!
//! Storage settings have accumulated several alias names across hosting
//! providers; this crate collapses them into one canonical struct resolved
//! once at startup, with a documented precedence order. Nothing outside this
//! crate reads storage-related environment variables.

pub mod settings;

pub use settings::{
    ACCESS_KEY_VARS, BUCKET_VARS, BucketSettings, ENDPOINT_VARS, SECRET_KEY_VARS, StorageBackend,
    StorageSettings,
};

//! # Vitrine API
//!
//! HTTP service for the Vitrine site builder: serves and saves profile
//! documents, enumerates and creates profiles, and receives asset uploads.
//!
//! ## Endpoints
//!
//! - `GET /config?profile={id}` - Returns the profile's document (default
//!   profile when unspecified)
//! - `POST /config?profile={id}` - Overwrites the profile's document
//! - `GET /profiles` - Lists known profile ids
//! - `POST /profiles` - Creates a profile from a display name
//! - `POST /upload` - Stores a multipart `file` field, returns its public URL
//! - `GET /health` - Health check endpoint
//! - `GET /debug/env` - Names (never values) of storage-relevant env vars
//!
//! Documents are read whole and written whole; the last writer wins. Reads
//! of never-created profiles return the default document so the admin
//! console always has something to edit.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::SiteApiServer;
pub use state::{ApiConfig, AppState};

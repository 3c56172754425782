//! # Storage Layer
//!
//! Document and asset persistence for the Vitrine site builder.
//!
//! Documents live at `profiles/{id}.json` whichever backend holds them:
//! an S3-compatible bucket, a local data directory, or the in-process map
//! used by tests. Uploaded assets go to the bucket root under generated
//! unique keys.

pub mod assets;
pub mod keys;
pub mod local;
pub mod memory;
pub mod registry;
pub mod s3;

pub use assets::{AssetStore, UploadedAsset};
pub use local::LocalDocumentStore;
pub use memory::MemoryDocumentStore;
pub use registry::ProfileRegistry;
pub use s3::S3DocumentStore;

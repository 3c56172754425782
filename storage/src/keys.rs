//! Storage key layout shared by every document backend.

use site_core::ProfileId;

/// Prefix under which all documents are stored.
pub const PROFILE_PREFIX: &str = "profiles/";

/// Storage key for a profile's document: `profiles/{id}.json`.
pub fn document_key(profile_id: &ProfileId) -> String {
    format!("{PROFILE_PREFIX}{profile_id}.json")
}

/// Recovers the profile id from a storage key, if the key matches the
/// document layout.
pub fn profile_id_from_key(key: &str) -> Option<ProfileId> {
    let stem = key.strip_prefix(PROFILE_PREFIX)?.strip_suffix(".json")?;
    ProfileId::new(stem.to_string())
}

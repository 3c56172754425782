//! HTTP request handlers for the Vitrine API.

use axum::{
    Json,
    extract::{Multipart, Query, State},
};
use serde::{Deserialize, Serialize};

use errors::UploadError;
use site_core::{ProfileId, SiteDocument};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub profile: Option<String>,
}

impl ProfileQuery {
    /// The addressed profile id; absent or empty means `"default"`.
    fn profile_id(&self) -> Result<ProfileId> {
        match self.profile.as_deref().filter(|p| !p.is_empty()) {
            None => Ok(ProfileId::default()),
            Some(raw) => {
                ProfileId::new(raw.to_string()).ok_or(ApiError::InvalidProfileId)
            }
        }
    }
}

/// GET /config?profile={id}
///
/// Returns the document for the addressed profile, falling back to the
/// well-known default when it was never created. Backend failures are 500s;
/// they are not masked as an empty profile.
pub async fn get_config(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<SiteDocument>> {
    let profile_id = query.profile_id()?;
    let document = state.store.load_or_default(&profile_id).await?;
    Ok(Json(document))
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
}

/// POST /config?profile={id}
///
/// Validates and overwrites the whole document at the addressed profile.
/// The stored `id` always equals the storage key, whatever the body said.
pub async fn save_config(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
    Json(document): Json<SiteDocument>,
) -> Result<Json<SaveResponse>> {
    let profile_id = query.profile_id()?;
    document.validate()?;

    let mut document = document;
    document.id = profile_id.clone();
    state.store.put(&profile_id, &document).await?;

    tracing::info!(%profile_id, "Saved document");
    Ok(Json(SaveResponse { success: true }))
}

#[derive(Debug, Serialize)]
pub struct ProfilesResponse {
    pub profiles: Vec<ProfileId>,
}

/// GET /profiles
pub async fn list_profiles(State(state): State<AppState>) -> Result<Json<ProfilesResponse>> {
    let profiles = state.registry.list().await?;
    Ok(Json(ProfilesResponse { profiles }))
}

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileResponse {
    pub success: bool,
    pub profile_id: ProfileId,
}

/// POST /profiles
///
/// Creates a profile from a display name. 400 before any backend call when
/// the name is missing or blank.
pub async fn create_profile(
    State(state): State<AppState>,
    Json(request): Json<CreateProfileRequest>,
) -> Result<Json<CreateProfileResponse>> {
    let name = request
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ApiError::MissingName)?;

    let profile_id = state.registry.create(name).await?;
    Ok(Json(CreateProfileResponse {
        success: true,
        profile_id,
    }))
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub id: String,
}

/// POST /upload
///
/// Multipart form with a `file` field. The payload check comes first (400);
/// an unconfigured bucket fails loudly afterwards (500) rather than
/// pretending the upload went somewhere.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Multipart(e.to_string()))?;
            file = Some((file_name, content_type, bytes));
        }
    }

    let Some((file_name, content_type, bytes)) = file else {
        return Err(ApiError::Upload(UploadError::EmptyPayload));
    };

    let assets = state.assets.as_ref().ok_or(UploadError::Configuration {
        message: "bucket or credentials not set".to_string(),
    })?;
    let asset = assets.upload(bytes, &file_name, &content_type).await?;

    Ok(Json(UploadResponse {
        success: true,
        url: asset.url,
        id: asset.id,
    }))
}

/// Env-var names consulted for storage settings, with presence booleans.
/// Values are never returned.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugEnvResponse {
    pub relevant_keys: Vec<String>,
    pub checks: DebugEnvChecks,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugEnvChecks {
    pub has_access_key: bool,
    pub has_secret_key: bool,
    pub has_bucket: bool,
    pub has_endpoint: bool,
}

/// GET /debug/env
///
/// Deployment aid for the historically-accumulated alias variables: shows
/// which storage-relevant names are set in this environment.
pub async fn debug_env() -> Json<DebugEnvResponse> {
    let mut relevant_keys: Vec<String> = std::env::vars()
        .map(|(key, _)| key)
        .filter(|key| {
            key.starts_with("AWS")
                || key.starts_with("S3")
                || key.starts_with("R2")
                || key.starts_with("MINIO")
                || key.contains("BUCKET")
                || key.contains("ACCESS_KEY")
                || key.contains("SECRET")
        })
        .collect();
    relevant_keys.sort();

    let any_set = |names: &[&str]| names.iter().any(|name| std::env::var(name).is_ok());

    Json(DebugEnvResponse {
        relevant_keys,
        checks: DebugEnvChecks {
            has_access_key: any_set(&config::ACCESS_KEY_VARS),
            has_secret_key: any_set(&config::SECRET_KEY_VARS),
            has_bucket: any_set(&config::BUCKET_VARS),
            has_endpoint: any_set(&config::ENDPOINT_VARS),
        },
    })
}

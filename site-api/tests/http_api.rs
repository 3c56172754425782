//! Route contract tests, driven against the in-memory document store.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use site_api::routes::create_router;
use site_api::state::AppState;
use site_core::{DocumentStore, ProfileId, SiteDocument};
use storage::MemoryDocumentStore;
use tower::ServiceExt;

fn router() -> (MemoryDocumentStore, Router) {
    let store = MemoryDocumentStore::new();
    let state = AppState::with_store(Arc::new(store.clone()), None);
    (store, create_router(state))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn post_multipart(uri: &str, field: &str, file_name: &str, payload: &[u8]) -> Request<Body> {
    let boundary = "vitrine-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; \
             filename=\"{file_name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn health_reports_healthy() {
    let (_store, router) = router();
    let response = router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn get_config_returns_default_document_for_unknown_profile() {
    let (store, router) = router();
    let response = router.oneshot(get("/config")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], "default");
    assert_eq!(body["theme"], "luxury");
    assert_eq!(body["profile"]["name"], "Jane Doe");
    // The default is served, never implicitly persisted.
    assert!(store.is_empty());
}

#[tokio::test]
async fn save_then_get_round_trips() {
    let (_store, router) = router();

    let id = ProfileId::new("studio".to_string()).unwrap();
    let mut doc = SiteDocument::default_for(&id);
    doc.theme = site_core::ThemeVariant::Bold;
    doc.profile.tagline = "Bold & Direct".to_string();
    let body = serde_json::to_value(&doc).unwrap();

    let response = router
        .clone()
        .oneshot(post_json("/config?profile=studio", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    let response = router.oneshot(get("/config?profile=studio")).await.unwrap();
    let fetched = body_json(response).await;
    assert_eq!(fetched["theme"], "bold");
    assert_eq!(fetched["profile"]["tagline"], "Bold & Direct");
}

#[tokio::test]
async fn saved_document_id_always_matches_the_addressed_profile() {
    let (store, router) = router();

    // The body claims a different id; the storage key wins.
    let doc = SiteDocument::default_for(&ProfileId::new("imposter".to_string()).unwrap());
    let body = serde_json::to_value(&doc).unwrap();

    let response = router
        .oneshot(post_json("/config?profile=actual", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let actual = ProfileId::new("actual".to_string()).unwrap();
    let stored = store.fetch(&actual).await.unwrap().unwrap();
    assert_eq!(stored.id, actual);
    let imposter = ProfileId::new("imposter".to_string()).unwrap();
    assert!(store.fetch(&imposter).await.unwrap().is_none());
}

#[tokio::test]
async fn save_rejects_duplicate_service_ids() {
    let (store, router) = router();

    let mut doc = SiteDocument::default();
    let dup = doc.services[0].clone();
    doc.services.push(dup);
    let body = serde_json::to_value(&doc).unwrap();

    let response = router.oneshot(post_json("/config", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "INVALID_DOCUMENT");
    assert_eq!(body["success"], false);
    assert!(store.is_empty());
}

#[tokio::test]
async fn save_rejects_unknown_theme_values() {
    let (_store, router) = router();

    let mut body = serde_json::to_value(SiteDocument::default()).unwrap();
    body["theme"] = json!("gothic");

    let response = router.oneshot(post_json("/config", &body)).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn save_surfaces_backend_failures_as_500() {
    let (store, router) = router();
    store.fail_puts(true);

    let body = serde_json::to_value(SiteDocument::default()).unwrap();
    let response = router.oneshot(post_json("/config", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "STORAGE_ERROR");
}

#[tokio::test]
async fn oversized_profile_id_is_rejected() {
    let (_store, router) = router();
    let uri = format!("/config?profile={}", "x".repeat(200));
    let response = router.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_PROFILE_ID");
}

#[tokio::test]
async fn create_profile_sanitizes_id_and_keeps_name() {
    let (_store, router) = router();

    let response = router
        .clone()
        .oneshot(post_json("/profiles", &json!({"name": "My Site!"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["profileId"], "my-site-");

    let response = router
        .clone()
        .oneshot(get("/config?profile=my-site-"))
        .await
        .unwrap();
    let fetched = body_json(response).await;
    assert_eq!(fetched["profile"]["name"], "My Site!");

    let response = router.oneshot(get("/profiles")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["profiles"], json!(["my-site-"]));
}

#[tokio::test]
async fn create_profile_requires_a_name() {
    let (store, router) = router();

    let response = router
        .clone()
        .oneshot(post_json("/profiles", &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "NAME_REQUIRED");

    let response = router
        .oneshot(post_json("/profiles", &json!({"name": "   "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.is_empty());
}

#[tokio::test]
async fn upload_without_file_field_is_a_validation_error() {
    let (_store, router) = router();

    let response = router
        .oneshot(post_multipart("/upload", "attachment", "photo.jpg", b"bytes"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NO_FILE");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "No file uploaded");
}

#[tokio::test]
async fn upload_without_configured_bucket_fails_loudly() {
    let (_store, router) = router();

    // A real file arrives, but the bucket was never configured: distinct
    // configuration error, not a transport error.
    let response = router
        .oneshot(post_multipart("/upload", "file", "photo.jpg", b"bytes"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], "UPLOAD_NOT_CONFIGURED");
    assert_eq!(body["message"], "Server storage configuration missing");
}

#[tokio::test]
async fn debug_env_reports_names_and_presence_only() {
    let (_store, router) = router();

    let response = router.oneshot(get("/debug/env")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["relevantKeys"].is_array());
    assert!(body["checks"]["hasBucket"].is_boolean());
    assert!(body["checks"]["hasAccessKey"].is_boolean());
}

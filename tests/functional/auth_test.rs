//! Functional tests for API key authentication

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Request, StatusCode},
    Router,
};
use headshot_relay::testing::ScriptedService;
use std::sync::Arc;
use tower::ServiceExt;

use crate::common::{get_request, json_body, multipart_request, test_app, test_settings, PHOTO};

fn create_test_app(keys: &[&str]) -> Router {
    let mut settings = test_settings();
    settings.auth.enabled = true;
    settings.auth.api_keys = keys.iter().map(|k| k.to_string()).collect();
    test_app(settings, Arc::new(ScriptedService::new()), None)
}

fn job_status_request(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/jobs/unknown");
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_auth_with_valid_bearer_token() {
    let app = create_test_app(&["valid-key-1", "valid-key-2"]);

    // Past the auth layer the unknown job is an upstream error, not a 401
    let response = app
        .oneshot(job_status_request(Some("Bearer valid-key-2")))
        .await
        .unwrap();
    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_with_valid_key_no_bearer() {
    let app = create_test_app(&["valid-key-1"]);

    let response = app
        .oneshot(job_status_request(Some("valid-key-1")))
        .await
        .unwrap();
    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_with_invalid_key() {
    let app = create_test_app(&["valid-key-1"]);

    let response = app
        .oneshot(job_status_request(Some("Bearer invalid-key")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json_body(response).await;
    assert_eq!(body["error"]["type"], "authentication_error");
}

#[tokio::test]
async fn test_auth_without_header_rejects_uploads() {
    let app = create_test_app(&["valid-key-1"]);

    let request = multipart_request(
        "/headshots",
        &[("clothing", "Casual"), ("background", "Light Gray"), ("gender", "man")],
        Some(PHOTO),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_paths_bypass_auth() {
    let app = create_test_app(&["valid-key-1"]);

    let response = app.clone().oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/options/casual")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_auth_empty_keys_allows_all() {
    let app = create_test_app(&[]);

    let response = app.oneshot(job_status_request(None)).await.unwrap();
    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
}

//! Shared helpers for functional tests

use axum::{body::Body, http::Request, response::Response, Router};
use headshot_relay::{
    api::routes::create_router,
    catalog::Catalog,
    config::Settings,
    prompt::PromptComposer,
    storage::TemporaryStorage,
    testing::ScriptedService,
    AppState,
};
use serde_json::Value;
use std::sync::Arc;

pub const BOUNDARY: &str = "relay-test-boundary";

/// A tiny JPEG-looking payload
pub const PHOTO: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.generation.api_token = "test-token".to_string();
    settings.generation.poll_interval_ms = 1;
    settings.rate_limit.enabled = false;
    settings
}

pub fn test_app(
    settings: Settings,
    service: Arc<ScriptedService>,
    storage: Option<Arc<dyn TemporaryStorage>>,
) -> Router {
    let composer = PromptComposer::new(Arc::new(Catalog::builtin()));
    let state = AppState::new(settings, composer, service, storage);
    create_router(Arc::new(state))
}

/// Build a multipart body with text fields and an optional `image` file
pub fn multipart_body(fields: &[(&str, &str)], image: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }

    if let Some(image) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"photo.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n",
                BOUNDARY
            )
            .as_bytes(),
        );
        body.extend_from_slice(image);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(uri: &str, fields: &[(&str, &str)], image: Option<&[u8]>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(fields, image)))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

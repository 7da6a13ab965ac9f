//! Functional tests for the HTTP API

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use headshot_relay::{
    backend::JobStatus,
    storage::{LocalTempStorage, TemporaryStorage},
    testing::ScriptedService,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::common::{get_request, json_body, multipart_request, test_app, test_settings, PHOTO};

fn succeeded(service: &ScriptedService, id: &str) {
    service.script(
        id,
        vec![
            ScriptedService::step(JobStatus::Created, None),
            ScriptedService::step(
                JobStatus::Succeeded,
                Some(json!([format!("https://cdn.example.com/{}.jpg", id)])),
            ),
        ],
    );
}

#[tokio::test]
async fn test_health() {
    let app = test_app(test_settings(), Arc::new(ScriptedService::new()), None);
    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_options_for_photo_type() {
    let app = test_app(test_settings(), Arc::new(ScriptedService::new()), None);

    let response = app.oneshot(get_request("/options/medical")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["attire"], json!(["Doctor", "Clinician"]));
    assert!(body["backgrounds"]
        .as_array()
        .unwrap()
        .contains(&json!("Light Gray")));
    assert!(body["colors"]
        .as_array()
        .unwrap()
        .contains(&json!({"name": "Black", "hex": "#000000"})));
}

#[tokio::test]
async fn test_options_unknown_photo_type() {
    let app = test_app(test_settings(), Arc::new(ScriptedService::new()), None);
    let response = app.oneshot(get_request("/options/underwater")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_color_is_rejected() {
    let service = Arc::new(ScriptedService::new());
    let app = test_app(test_settings(), service.clone(), None);

    let request = multipart_request(
        "/headshots",
        &[
            ("clothing", r#"["Casual"]"#),
            ("background", r#"["Light Gray"]"#),
            ("gender", "man"),
            ("color", "Neon Orange"),
        ],
        Some(PHOTO),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Neon Orange"));
    assert!(service.created().is_empty());
}

#[tokio::test]
async fn test_empty_background_list_is_rejected() {
    let app = test_app(test_settings(), Arc::new(ScriptedService::new()), None);

    let request = multipart_request(
        "/headshots",
        &[("clothing", "Casual"), ("background", "[]"), ("gender", "woman")],
        Some(PHOTO),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_attire_is_rejected() {
    let service = Arc::new(ScriptedService::new());
    let app = test_app(test_settings(), service.clone(), None);

    let request = multipart_request(
        "/headshots",
        &[
            ("clothing", r#"["Tuxedo"]"#),
            ("background", r#"["Light Gray"]"#),
            ("gender", "man"),
        ],
        Some(PHOTO),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(service.created().is_empty());
}

#[tokio::test]
async fn test_headshot_batch_continues_after_failure() {
    let service = Arc::new(ScriptedService::new());
    succeeded(&service, "job-1");
    service.script(
        "job-2",
        vec![
            ScriptedService::step(JobStatus::Processing, None),
            ScriptedService::step(JobStatus::Failed, None),
        ],
    );
    succeeded(&service, "job-3");
    succeeded(&service, "job-4");

    let app = test_app(test_settings(), service.clone(), None);
    let request = multipart_request(
        "/headshots",
        &[
            ("clothing", r#"["Business Casual", "Casual"]"#),
            ("background", r#"["Light Gray", "Startup Office"]"#),
            ("gender", "woman"),
            ("profession", "Engineer"),
            ("age", "34"),
        ],
        Some(PHOTO),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 4);

    assert_eq!(images[0]["url"], json!("https://cdn.example.com/job-1.jpg"));
    assert_eq!(images[0]["attire"], json!("Business Casual"));
    assert_eq!(images[0]["background"], json!("Light Gray"));
    assert_eq!(images[0]["color"], json!("Black"));

    assert_eq!(images[1]["url"], json!(null));
    assert_eq!(images[1]["status"], json!("failed"));
    assert_eq!(images[1]["background"], json!("Startup Office"));

    assert_eq!(images[3]["status"], json!("succeeded"));
    assert_eq!(images[3]["attire"], json!("Casual"));

    // Without temporary storage the photo travels inline
    let created = service.created();
    assert_eq!(created.len(), 4);
    let (model, input) = &created[0];
    assert_eq!(model, "black-forest-labs/flux-kontext-pro");
    assert!(input["input_image"]
        .as_str()
        .unwrap()
        .starts_with("data:image/jpeg;base64,"));
    assert_eq!(input["output_format"], json!("jpg"));
    assert!(input["prompt"]
        .as_str()
        .unwrap()
        .starts_with("Put this woman subject in professional studio lighting"));
}

#[tokio::test]
async fn test_variations_produce_five_per_background() {
    let service = Arc::new(ScriptedService::new());
    for i in 0..10 {
        succeeded(&service, &format!("job-{}", i));
    }

    let app = test_app(test_settings(), service.clone(), None);
    let request = multipart_request(
        "/headshots/variations",
        &[
            ("clothing", "Clinician"),
            ("background", r#"["Light Gray", "Natural Outdoors"]"#),
            ("gender", "non-binary"),
            ("color", "Emerald Green"),
        ],
        Some(PHOTO),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 10);
    assert_eq!(
        images
            .iter()
            .filter(|i| i["background"] == json!("Light Gray"))
            .count(),
        5
    );

    for (_, input) in service.created() {
        assert!(input["prompt"]
            .as_str()
            .unwrap()
            .contains("wearing Emerald Green scrubs"));
    }
}

#[tokio::test]
async fn test_variations_require_single_outfit() {
    let app = test_app(test_settings(), Arc::new(ScriptedService::new()), None);
    let request = multipart_request(
        "/headshots/variations",
        &[
            ("clothing", r#"["Casual", "Doctor"]"#),
            ("background", r#"["Light Gray"]"#),
            ("gender", "man"),
        ],
        Some(PHOTO),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_async_job_lifecycle_releases_asset() {
    let dir = tempfile::tempdir().unwrap();
    let storage: Arc<dyn TemporaryStorage> = Arc::new(LocalTempStorage::new(
        dir.path(),
        "http://localhost:8080/temp",
    ));

    let service = Arc::new(ScriptedService::new());
    service.script(
        "job-async",
        vec![
            ScriptedService::step(JobStatus::Created, None),
            ScriptedService::step(JobStatus::Processing, None),
            ScriptedService::step(
                JobStatus::Succeeded,
                Some(json!({"url": "https://cdn.example.com/final.jpg"})),
            ),
        ],
    );

    let mut settings = test_settings();
    settings.storage.enabled = true;
    settings.storage.base_path = dir.path().to_string_lossy().to_string();
    let app = test_app(settings, service.clone(), Some(storage));

    let request = multipart_request(
        "/jobs",
        &[
            ("clothing", "Doctor"),
            ("background", "Corporate Office"),
            ("gender", "man"),
        ],
        Some(PHOTO),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = json_body(response).await;
    assert_eq!(body["id"], json!("job-async"));
    assert_eq!(body["status"], json!("created"));

    // The photo went out as a URL to the stored copy
    let (_, input) = &service.created()[0];
    let image_url = input["input_image"].as_str().unwrap().to_string();
    assert!(image_url.starts_with("http://localhost:8080/temp/uploads/"));
    let stored = dir
        .path()
        .join(image_url.trim_start_matches("http://localhost:8080/temp/"));
    assert!(stored.exists());

    let response = app.clone().oneshot(get_request("/jobs/job-async")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["status"], json!("processing"));
    assert_eq!(body["url"], json!(null));
    assert!(stored.exists());

    let response = app.clone().oneshot(get_request("/jobs/job-async")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["status"], json!("succeeded"));
    assert_eq!(body["url"], json!("https://cdn.example.com/final.jpg"));
    assert!(!stored.exists());
}

#[tokio::test]
async fn test_batch_releases_stored_photo() {
    let dir = tempfile::tempdir().unwrap();
    let storage: Arc<dyn TemporaryStorage> = Arc::new(LocalTempStorage::new(
        dir.path(),
        "http://localhost:8080/temp",
    ));

    let service = Arc::new(ScriptedService::new());
    succeeded(&service, "job-1");

    let mut settings = test_settings();
    settings.storage.enabled = true;
    settings.storage.base_path = dir.path().to_string_lossy().to_string();
    let app = test_app(settings, service, Some(storage));

    let request = multipart_request(
        "/headshots",
        &[
            ("clothing", "Casual"),
            ("background", r#"["Soft Gradient"]"#),
            ("gender", "man"),
        ],
        Some(PHOTO),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let uploads = dir.path().join("uploads");
    let leftover = std::fs::read_dir(&uploads)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftover, 0);
}

#[tokio::test]
async fn test_edit_image() {
    let service = Arc::new(ScriptedService::new());
    succeeded(&service, "edit-1");
    let app = test_app(test_settings(), service.clone(), None);

    let request = Request::builder()
        .method("POST")
        .uri("/edits")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"image_url": "https://cdn.example.com/in.jpg", "edit_type": "blur-bg"}).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["image_url"], json!("https://cdn.example.com/edit-1.jpg"));

    let (_, input) = &service.created()[0];
    assert_eq!(input["prompt"], json!("Apply background blur, keep subject sharp."));
    assert_eq!(input["input_image"], json!("https://cdn.example.com/in.jpg"));
}

#[tokio::test]
async fn test_edit_unknown_type() {
    let app = test_app(test_settings(), Arc::new(ScriptedService::new()), None);

    let request = Request::builder()
        .method("POST")
        .uri("/edits")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"image_url": "https://cdn.example.com/in.jpg", "edit_type": "sharpen"}).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_edit_failed_job_is_server_error() {
    let service = Arc::new(ScriptedService::new());
    service.script("edit-1", vec![ScriptedService::step(JobStatus::Failed, None)]);
    let app = test_app(test_settings(), service, None);

    let request = Request::builder()
        .method("POST")
        .uri("/edits")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"image_url": "https://cdn.example.com/in.jpg", "edit_type": "resize"}).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], json!("job_failed"));
}

fn edit_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/edits")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_malformed_edit_body_is_structured_bad_request() {
    for body in [r#"{not json"#, r#"{"image_url": 5, "edit_type": "resize"}"#] {
        let app = test_app(test_settings(), Arc::new(ScriptedService::new()), None);
        let response = app.oneshot(edit_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);

        let body = json_body(response).await;
        assert_eq!(body["error"]["type"], json!("invalid_request_error"));
        assert!(body["error"]["message"].as_str().unwrap().starts_with("Invalid request"));
    }
}

#[tokio::test]
async fn test_non_multipart_submission_is_structured_bad_request() {
    let service = Arc::new(ScriptedService::new());
    let app = test_app(test_settings(), service.clone(), None);

    let request = Request::builder()
        .method("POST")
        .uri("/headshots")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("clothing=Casual&background=Light+Gray&gender=man"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"]["type"], json!("invalid_request_error"));
    assert!(service.created().is_empty());
}

//! HTTP handlers

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::JsonRejection,
        Multipart, Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::api::form::SubmissionForm;
use crate::backend::JobStatus;
use crate::catalog::PhotoOptions;
use crate::error::{AppError, Result};
use crate::jobs::{InputAsset, JobResult, JobSnapshot};
use crate::prompt::{fanout, EditKind, RequestSpec, Subject};
use crate::storage::data_uri;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HeadshotsResponse {
    pub images: Vec<JobResult>,
}

#[derive(Debug, Serialize)]
pub struct SubmittedJob {
    pub id: String,
    pub status: JobStatus,
}

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub image_url: Option<String>,
    pub edit_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub image_url: String,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn list_options(
    State(state): State<Arc<AppState>>,
    Path(photo_type): Path<String>,
) -> Result<Json<PhotoOptions>> {
    Ok(Json(state.composer.catalog().options(&photo_type)?))
}

/// One job per clothing x background pair, run to completion
pub async fn create_headshots(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<HeadshotsResponse>> {
    let form = read_form(&state, multipart).await?;
    let specs = fanout::combinatorial(&state.composer, &subject(&form), &form.clothing, &form.backgrounds)?;

    info!(requests = specs.len(), gender = %form.gender, "Starting headshot batch");
    run_batch(&state, &form, &specs).await
}

/// Five background variations per selected background for one outfit
pub async fn create_variations(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<HeadshotsResponse>> {
    let form = read_form(&state, multipart).await?;
    let attire = single(&form.clothing, "clothing")?;
    let specs = fanout::fixed_variants(&state.composer, &subject(&form), attire, &form.backgrounds)?;

    info!(requests = specs.len(), attire = %attire, "Starting variation batch");
    run_batch(&state, &form, &specs).await
}

/// Submit one job and return immediately; clients poll `/jobs/:id`
pub async fn submit_job(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<SubmittedJob>)> {
    let form = read_form(&state, multipart).await?;
    let attire = single(&form.clothing, "clothing")?;
    let background = single(&form.backgrounds, "background")?;

    let specs = fanout::combinatorial(
        &state.composer,
        &subject(&form),
        &[attire.to_string()],
        &[background.to_string()],
    )?;
    let prompt = specs
        .first()
        .map(|spec| spec.prompt.clone())
        .ok_or_else(|| AppError::Internal("no prompt composed".to_string()))?;

    let input = stage_input(&state, &form).await?;
    let prediction = state.tracker.submit(&prompt, input).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmittedJob {
            id: prediction.id,
            status: prediction.status,
        }),
    ))
}

pub async fn job_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JobSnapshot>> {
    Ok(Json(state.tracker.status(&id).await?))
}

pub async fn edit_image(
    State(state): State<Arc<AppState>>,
    request: std::result::Result<Json<EditRequest>, JsonRejection>,
) -> Result<Json<EditResponse>> {
    let Json(request) = request?;
    let (Some(image_url), Some(edit_type)) = (request.image_url, request.edit_type) else {
        return Err(AppError::InvalidRequest("image_url and edit_type are required".to_string()));
    };
    let kind = EditKind::parse(&edit_type)
        .ok_or_else(|| AppError::InvalidRequest(format!("Unknown edit type '{}'", edit_type)))?;

    info!(edit = %edit_type, "Editing image");
    let image_url = state.editor.run(kind.prompt(), Some(&image_url)).await?;

    Ok(Json(EditResponse { image_url }))
}

async fn read_form(
    state: &AppState,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<SubmissionForm> {
    let mut form = SubmissionForm::from_multipart(multipart?).await?;
    form.validate(&state.composer.catalog().colors)?;
    Ok(form)
}

fn subject(form: &SubmissionForm) -> Subject {
    Subject {
        presentation: form.gender.clone(),
        color: form.color().to_string(),
    }
}

fn single<'a>(values: &'a [String], field: &str) -> Result<&'a str> {
    match values {
        [value] => Ok(value.as_str()),
        _ => Err(AppError::InvalidSelection(format!(
            "exactly one {} selection is required, got {}",
            field,
            values.len()
        ))),
    }
}

/// Hand the photo to storage when configured, otherwise inline it
async fn stage_input(state: &AppState, form: &SubmissionForm) -> Result<InputAsset> {
    let extension = data_uri::resolve_extension(&form.image, form.file_name.as_deref());

    match &state.storage {
        Some(storage) => {
            let asset = storage
                .upload(&form.image, &state.settings.storage.folder, &extension)
                .await?;
            Ok(InputAsset::uploaded(asset))
        }
        None => Ok(InputAsset::inline(&form.image, &extension)),
    }
}

async fn run_batch(
    state: &AppState,
    form: &SubmissionForm,
    specs: &[RequestSpec],
) -> Result<Json<HeadshotsResponse>> {
    let input = stage_input(state, form).await?;
    let images = state.batches.run_batch(&input, specs).await?;
    Ok(Json(HeadshotsResponse { images }))
}

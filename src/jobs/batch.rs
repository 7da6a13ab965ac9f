//! Sequential execution of a batch of generation requests

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::backend::JobStatus;
use crate::error::Result;
use crate::jobs::{discard_asset, InputAsset, JobRunner};
use crate::prompt::RequestSpec;
use crate::storage::TemporaryStorage;

/// Outcome of one request in a batch
#[derive(Debug, Clone, Serialize)]
pub struct JobResult {
    /// Output URL, `None` unless the job succeeded
    pub url: Option<String>,
    pub attire: String,
    pub background: String,
    pub color: String,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub completed_at: DateTime<Utc>,
}

impl JobResult {
    fn new(spec: &RequestSpec, status: JobStatus) -> Self {
        Self {
            url: None,
            attire: spec.attire.clone(),
            background: spec.background.clone(),
            color: spec.color.clone(),
            status,
            job_id: None,
            error: None,
            completed_at: Utc::now(),
        }
    }
}

/// Runs request specs one after another against a single input photo.
///
/// A job that fails, is canceled, or whose create/poll call errors becomes a
/// failure record and the batch moves on. A succeeded job whose output cannot
/// be read aborts the batch.
pub struct BatchRunner {
    jobs: Arc<JobRunner>,
    storage: Option<Arc<dyn TemporaryStorage>>,
}

impl BatchRunner {
    pub fn new(jobs: Arc<JobRunner>, storage: Option<Arc<dyn TemporaryStorage>>) -> Self {
        Self { jobs, storage }
    }

    pub async fn run_batch(&self, input: &InputAsset, specs: &[RequestSpec]) -> Result<Vec<JobResult>> {
        let outcome = self.run_all(input, specs).await;

        if let Some(public_id) = input.public_id.as_deref() {
            discard_asset(self.storage.as_deref(), public_id).await;
        }

        outcome
    }

    async fn run_all(&self, input: &InputAsset, specs: &[RequestSpec]) -> Result<Vec<JobResult>> {
        let mut results = Vec::with_capacity(specs.len());

        for (index, spec) in specs.iter().enumerate() {
            info!(
                index = index + 1,
                total = specs.len(),
                attire = %spec.attire,
                background = %spec.background,
                prompt = %spec.prompt,
                "Submitting generation job"
            );

            let record = self.run_one(input, spec).await?;
            results.push(record);
        }

        Ok(results)
    }

    /// Only an unreadable output on a succeeded job is an error; every other
    /// failure becomes a record.
    async fn run_one(&self, input: &InputAsset, spec: &RequestSpec) -> Result<JobResult> {
        let created = match self.jobs.submit(&spec.prompt, Some(&input.locator)).await {
            Ok(created) => created,
            Err(e) => {
                warn!(error = %e, "Generation request failed");
                return Ok(JobResult {
                    error: Some(e.to_string()),
                    ..JobResult::new(spec, JobStatus::Failed)
                });
            }
        };

        let job_id = created.id.clone();
        let prediction = match self.jobs.wait(created).await {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!(job_id = %job_id, error = %e, "Polling generation job failed");
                return Ok(JobResult {
                    error: Some(e.to_string()),
                    job_id: Some(job_id),
                    ..JobResult::new(spec, JobStatus::Failed)
                });
            }
        };

        if prediction.status == JobStatus::Succeeded {
            let url = self.jobs.locator(&prediction)?;
            return Ok(JobResult {
                url: Some(url),
                job_id: Some(prediction.id),
                ..JobResult::new(spec, JobStatus::Succeeded)
            });
        }

        warn!(job_id = %prediction.id, status = %prediction.status, "Generation job did not succeed");
        Ok(JobResult {
            error: prediction.error_message(),
            job_id: Some(prediction.id),
            ..JobResult::new(spec, prediction.status)
        })
    }
}

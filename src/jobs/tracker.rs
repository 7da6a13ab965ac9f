//! Fire-and-poll jobs whose status is fetched by the client

use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::backend::{JobStatus, Prediction};
use crate::error::Result;
use crate::jobs::{discard_asset, InputAsset, JobAssetStore, JobRunner};
use crate::storage::TemporaryStorage;

/// Client-facing view of a job
#[derive(Debug, Clone, Serialize)]
pub struct JobSnapshot {
    pub id: String,
    pub status: JobStatus,
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Submits single jobs without waiting and answers status queries.
///
/// The temporary asset of a job is released the first time the job is seen
/// in a terminal state.
pub struct JobTracker {
    runner: Arc<JobRunner>,
    assets: JobAssetStore,
    storage: Option<Arc<dyn TemporaryStorage>>,
}

impl JobTracker {
    pub fn new(
        runner: Arc<JobRunner>,
        assets: JobAssetStore,
        storage: Option<Arc<dyn TemporaryStorage>>,
    ) -> Self {
        Self {
            runner,
            assets,
            storage,
        }
    }

    pub fn assets(&self) -> &JobAssetStore {
        &self.assets
    }

    pub async fn submit(&self, prompt: &str, input: InputAsset) -> Result<Prediction> {
        let prediction = match self.runner.submit(prompt, Some(&input.locator)).await {
            Ok(prediction) => prediction,
            Err(e) => {
                if let Some(public_id) = input.public_id.as_deref() {
                    discard_asset(self.storage.as_deref(), public_id).await;
                }
                return Err(e);
            }
        };

        info!(job_id = %prediction.id, prompt = %prompt, "Submitted asynchronous job");

        if let Some(public_id) = input.public_id {
            if prediction.status.is_terminal() {
                discard_asset(self.storage.as_deref(), &public_id).await;
            } else {
                self.assets.insert(prediction.id.clone(), public_id);
            }
        }

        Ok(prediction)
    }

    /// Poll the service once for a job
    pub async fn status(&self, id: &str) -> Result<JobSnapshot> {
        let prediction = self.runner.service().get(id).await?;

        if prediction.status.is_terminal() {
            if let Some(public_id) = self.assets.take(id) {
                discard_asset(self.storage.as_deref(), &public_id).await;
            }
        }

        let url = match prediction.status {
            JobStatus::Succeeded => Some(self.runner.locator(&prediction)?),
            _ => None,
        };

        Ok(JobSnapshot {
            error: prediction.error_message(),
            id: prediction.id,
            status: prediction.status,
            url,
        })
    }
}

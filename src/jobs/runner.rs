//! Submit-and-poll lifecycle of a single remote job

use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::backend::output::extract_locator;
use crate::backend::{GenerationService, JobStatus, Prediction};
use crate::config::ModelProfile;
use crate::error::{AppError, Result};

/// Runs jobs against one model profile.
///
/// The profile decides which model is called, under which input key the
/// subject image travels and which keys hold the output URL.
pub struct JobRunner {
    service: Arc<dyn GenerationService>,
    profile: ModelProfile,
    poll_interval: Duration,
}

impl JobRunner {
    pub fn new(service: Arc<dyn GenerationService>, profile: ModelProfile, poll_interval: Duration) -> Self {
        Self {
            service,
            profile,
            poll_interval,
        }
    }

    pub fn service(&self) -> &Arc<dyn GenerationService> {
        &self.service
    }

    /// Model inputs for one request
    fn build_input(&self, prompt: &str, image: Option<&str>) -> Result<Value> {
        let mut input: Map<String, Value> = self.profile.extra_input.clone();
        input.insert("prompt".to_string(), Value::from(prompt));

        match image {
            Some(image) => {
                input.insert(self.profile.image_input_key.clone(), Value::from(image));
            }
            None if self.profile.image_required => {
                return Err(AppError::InvalidRequest(format!(
                    "Model '{}' requires an input image",
                    self.profile.model
                )));
            }
            None => {}
        }

        Ok(Value::Object(input))
    }

    /// Create the remote job without waiting for it
    pub async fn submit(&self, prompt: &str, image: Option<&str>) -> Result<Prediction> {
        let input = self.build_input(prompt, image)?;
        let prediction = self.service.create(&self.profile.model, input).await?;
        debug!(job_id = %prediction.id, status = %prediction.status, "Job created");
        Ok(prediction)
    }

    /// Poll at a fixed interval until the job reaches a terminal status
    pub async fn wait(&self, mut prediction: Prediction) -> Result<Prediction> {
        while !prediction.status.is_terminal() {
            tokio::time::sleep(self.poll_interval).await;

            let next = self.service.get(&prediction.id).await?;
            if next.status != prediction.status {
                debug!(job_id = %next.id, from = %prediction.status, to = %next.status, "Job status changed");
            }
            prediction = next;
        }
        Ok(prediction)
    }

    /// Output URL of a succeeded job
    pub fn locator(&self, prediction: &Prediction) -> Result<String> {
        let output = prediction.output.as_ref().unwrap_or(&Value::Null);
        extract_locator(output, &self.profile.output_keys)
            .ok_or_else(|| AppError::UnrecognizedOutputShape(output.to_string()))
    }

    /// Create, wait and return the output URL; any non-success ends in an error
    pub async fn run(&self, prompt: &str, image: Option<&str>) -> Result<String> {
        let prediction = self.submit(prompt, image).await?;
        let prediction = self.wait(prediction).await?;

        if prediction.status != JobStatus::Succeeded {
            return Err(AppError::UpstreamJobFailed {
                id: prediction.id,
                status: prediction.status,
            });
        }

        self.locator(&prediction)
    }
}

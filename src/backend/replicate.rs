//! HTTP client for the Replicate predictions API

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::backend::traits::{GenerationService, Prediction};
use crate::config::GenerationConfig;
use crate::error::{AppError, Result};

/// Replicate-compatible generation service
pub struct ReplicateClient {
    client: Client,
    base_url: String,
    api_token: String,
}

/// Body of a create call
#[derive(Debug, Serialize)]
struct CreatePredictionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    input: Value,
}

/// Where to create a prediction for a model identifier
#[derive(Debug, PartialEq, Eq)]
enum ModelRef<'a> {
    /// `owner/name` - the model's latest deployment
    Official { owner: &'a str, name: &'a str },
    /// `owner/name:version` or a bare version hash
    Version(&'a str),
}

impl<'a> ModelRef<'a> {
    fn parse(model: &'a str) -> Result<Self> {
        if let Some((_, version)) = model.split_once(':') {
            return Ok(Self::Version(version));
        }
        match model.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::Official { owner, name })
            }
            Some(_) => Err(AppError::InvalidRequest(format!(
                "Invalid model identifier '{}'",
                model
            ))),
            None => Ok(Self::Version(model)),
        }
    }
}

impl ReplicateClient {
    /// Create a new client from configuration
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    async fn read_prediction(response: Response) -> Result<Prediction> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Generation service returned {}: {}",
                status, body
            )));
        }

        response
            .json::<Prediction>()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse prediction: {}", e)))
    }
}

#[async_trait]
impl GenerationService for ReplicateClient {
    async fn create(&self, model: &str, input: Value) -> Result<Prediction> {
        let (url, body) = match ModelRef::parse(model)? {
            ModelRef::Official { owner, name } => (
                format!("{}/v1/models/{}/{}/predictions", self.base_url, owner, name),
                CreatePredictionRequest {
                    version: None,
                    input,
                },
            ),
            ModelRef::Version(version) => (
                format!("{}/v1/predictions", self.base_url),
                CreatePredictionRequest {
                    version: Some(version.to_string()),
                    input,
                },
            ),
        };

        debug!(model = %model, url = %url, "Creating prediction");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await?;

        Self::read_prediction(response).await
    }

    async fn get(&self, id: &str) -> Result<Prediction> {
        let url = format!("{}/v1/predictions/{}", self.base_url, id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        Self::read_prediction(response).await
    }
}

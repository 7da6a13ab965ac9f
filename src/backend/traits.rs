//! Common traits and types for the remote generation service

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::Result;

/// Status of a remote generation job.
///
/// `Created -> Processing* -> Succeeded | Failed | Canceled`; nothing leaves a
/// terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[serde(alias = "starting")]
    Created,
    Processing,
    Succeeded,
    Failed,
    #[serde(alias = "cancelled", alias = "aborted")]
    Canceled,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Processing => "processing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A remote job as reported by the generation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Opaque job identifier
    pub id: String,

    pub status: JobStatus,

    /// Raw output; its shape depends on the model
    #[serde(default)]
    pub output: Option<Value>,

    /// Error reported by the service for failed jobs
    #[serde(default)]
    pub error: Option<Value>,

    #[serde(default)]
    pub logs: Option<String>,
}

impl Prediction {
    /// Human readable error, if the service reported one
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Remote create/poll contract for generation jobs
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Start a job for `model` with the given model inputs
    async fn create(&self, model: &str, input: Value) -> Result<Prediction>;

    /// Fetch the current state of a job
    async fn get(&self, id: &str) -> Result<Prediction>;
}

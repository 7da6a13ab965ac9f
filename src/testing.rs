//! Scripted in-memory generation service for tests

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};

use crate::backend::{GenerationService, JobStatus, Prediction};
use crate::error::{AppError, Result};

/// What the service reports at one point of a job's life
#[derive(Debug, Clone)]
pub enum Step {
    Status(JobStatus, Option<Value>),
    Error(String),
}

struct ScriptedJob {
    id: String,
    steps: Vec<Step>,
    cursor: usize,
    polls: usize,
}

impl ScriptedJob {
    fn current(&self) -> Result<Prediction> {
        match &self.steps[self.cursor] {
            Step::Status(status, output) => Ok(Prediction {
                id: self.id.clone(),
                status: *status,
                output: output.clone(),
                error: None,
                logs: None,
            }),
            Step::Error(message) => Err(AppError::Upstream(message.clone())),
        }
    }
}

/// Jobs are handed out in the order they were scripted: each `create` takes
/// the next script and answers with its first step, each `get` advances one
/// step (the last step repeats).
#[derive(Default)]
pub struct ScriptedService {
    pending: Mutex<VecDeque<ScriptedJob>>,
    jobs: Mutex<HashMap<String, ScriptedJob>>,
    created: Mutex<Vec<(String, Value)>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(status: JobStatus, output: Option<Value>) -> Step {
        Step::Status(status, output)
    }

    pub fn error(message: &str) -> Step {
        Step::Error(message.to_string())
    }

    /// Queue the life of the next created job
    pub fn script(&self, id: &str, steps: Vec<Step>) {
        assert!(!steps.is_empty(), "a scripted job needs at least one step");
        self.pending.lock().push_back(ScriptedJob {
            id: id.to_string(),
            steps,
            cursor: 0,
            polls: 0,
        });
    }

    /// Number of `get` calls made for a job
    pub fn poll_count(&self, id: &str) -> usize {
        self.jobs.lock().get(id).map(|job| job.polls).unwrap_or(0)
    }

    /// `(model, input)` of every create call, in order
    pub fn created(&self) -> Vec<(String, Value)> {
        self.created.lock().clone()
    }
}

#[async_trait]
impl GenerationService for ScriptedService {
    async fn create(&self, model: &str, input: Value) -> Result<Prediction> {
        self.created.lock().push((model.to_string(), input));

        let job = self
            .pending
            .lock()
            .pop_front()
            .ok_or_else(|| AppError::Upstream("no scripted job left".to_string()))?;

        let prediction = job.current()?;
        self.jobs.lock().insert(job.id.clone(), job);
        Ok(prediction)
    }

    async fn get(&self, id: &str) -> Result<Prediction> {
        let mut jobs = self.jobs.lock();
        let job = jobs
            .get_mut(id)
            .ok_or_else(|| AppError::Upstream(format!("unknown job {}", id)))?;

        job.polls += 1;
        job.cursor = (job.cursor + 1).min(job.steps.len() - 1);
        job.current()
    }
}

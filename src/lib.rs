//! Headshot generation relay
//!
//! Composes prompts from attire/background/color selections, submits them as
//! jobs to a remote image generation service, polls the jobs to completion
//! and returns the resulting image URLs.

pub mod api;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod error;
pub mod jobs;
pub mod middleware;
pub mod prompt;
pub mod storage;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{AppError, Result};

use std::sync::Arc;
use std::time::Duration;

use backend::GenerationService;
use jobs::{BatchRunner, JobAssetStore, JobRunner, JobTracker};
use prompt::PromptComposer;
use storage::TemporaryStorage;

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Arc<config::Settings>,
    pub composer: Arc<PromptComposer>,
    pub batches: Arc<BatchRunner>,
    pub tracker: Arc<JobTracker>,
    pub editor: Arc<JobRunner>,
    pub storage: Option<Arc<dyn TemporaryStorage>>,
}

impl AppState {
    /// Wire the job runners for both model profiles around one generation
    /// service
    pub fn new(
        settings: config::Settings,
        composer: PromptComposer,
        service: Arc<dyn GenerationService>,
        storage: Option<Arc<dyn TemporaryStorage>>,
    ) -> Self {
        let poll_interval = Duration::from_millis(settings.generation.poll_interval_ms);

        let headshots = Arc::new(JobRunner::new(
            service.clone(),
            settings.generation.headshot.clone(),
            poll_interval,
        ));
        let editor = Arc::new(JobRunner::new(
            service,
            settings.generation.edit.clone(),
            poll_interval,
        ));

        Self {
            batches: Arc::new(BatchRunner::new(headshots.clone(), storage.clone())),
            tracker: Arc::new(JobTracker::new(headshots, JobAssetStore::new(), storage.clone())),
            editor,
            storage,
            composer: Arc::new(composer),
            settings: Arc::new(settings),
        }
    }
}

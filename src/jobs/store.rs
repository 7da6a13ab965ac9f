//! Job id -> temporary asset side table

use dashmap::DashMap;
use std::sync::Arc;

/// Remembers which temporary asset belongs to which in-flight job, so the
/// asset can be deleted once the job is seen in a terminal state.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct JobAssetStore {
    entries: Arc<DashMap<String, String>>,
}

impl JobAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, job_id: impl Into<String>, public_id: impl Into<String>) {
        self.entries.insert(job_id.into(), public_id.into());
    }

    /// Remove and return the asset recorded for a job
    pub fn take(&self, job_id: &str) -> Option<String> {
        self.entries.remove(job_id).map(|(_, public_id)| public_id)
    }

    pub fn contains(&self, job_id: &str) -> bool {
        self.entries.contains_key(job_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Generation jobs - single-job runner, sequential batches, tracked async jobs

pub mod batch;
pub mod runner;
pub mod store;
pub mod tracker;

use tracing::{debug, warn};

use crate::storage::{data_uri, StoredAsset, TemporaryStorage};

pub use batch::{BatchRunner, JobResult};
pub use runner::JobRunner;
pub use store::JobAssetStore;
pub use tracker::{JobSnapshot, JobTracker};

/// The subject photo as the generation service will receive it
#[derive(Debug, Clone)]
pub struct InputAsset {
    /// URL or data URI
    pub locator: String,
    /// Temporary asset to delete once the photo is no longer needed
    pub public_id: Option<String>,
}

impl InputAsset {
    /// Photo bytes inlined as a data URI
    pub fn inline(data: &[u8], extension: &str) -> Self {
        Self {
            locator: data_uri::create_data_uri(data, extension),
            public_id: None,
        }
    }

    /// Photo already uploaded to temporary storage
    pub fn uploaded(asset: StoredAsset) -> Self {
        Self {
            locator: asset.url,
            public_id: Some(asset.public_id),
        }
    }

    /// Photo hosted elsewhere; nothing to clean up
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            locator: url.into(),
            public_id: None,
        }
    }
}

/// Best-effort delete of a temporary asset. Failures are logged only.
pub(crate) async fn discard_asset(storage: Option<&dyn TemporaryStorage>, public_id: &str) {
    let Some(storage) = storage else {
        return;
    };

    match storage.delete(public_id).await {
        Ok(()) => debug!(public_id = %public_id, "Released temporary asset"),
        Err(e) => warn!(public_id = %public_id, error = %e, "Failed to delete temporary asset"),
    }
}

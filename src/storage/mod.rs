//! Temporary storage for uploaded subject photos

pub mod data_uri;
pub mod local;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

pub use local::LocalTempStorage;

/// An asset stored for the lifetime of one or more generation jobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredAsset {
    /// Publicly reachable URL handed to the generation service
    pub url: String,
    /// Identifier used to delete the asset again
    pub public_id: String,
}

/// Short-lived object storage
#[async_trait]
pub trait TemporaryStorage: Send + Sync {
    async fn upload(&self, data: &[u8], folder: &str, extension: &str) -> Result<StoredAsset>;

    /// Delete an asset; a missing asset is not an error
    async fn delete(&self, public_id: &str) -> Result<()>;
}

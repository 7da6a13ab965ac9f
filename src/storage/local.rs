//! Local directory storage served back over HTTP under `/temp`

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::storage::{StoredAsset, TemporaryStorage};

/// Stores assets as files below `base_path`; URLs are `url_prefix/<public_id>`
pub struct LocalTempStorage {
    base_path: PathBuf,
    url_prefix: String,
}

impl LocalTempStorage {
    pub fn new(base_path: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a public id to a path, refusing anything outside `base_path`
    fn path_for(&self, public_id: &str) -> Result<PathBuf> {
        let relative = Path::new(public_id);
        let safe = !public_id.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(AppError::Storage(format!("Invalid asset id '{}'", public_id)));
        }
        Ok(self.base_path.join(relative))
    }
}

#[async_trait]
impl TemporaryStorage for LocalTempStorage {
    async fn upload(&self, data: &[u8], folder: &str, extension: &str) -> Result<StoredAsset> {
        let filename = format!("{}.{}", Uuid::new_v4(), extension);
        let public_id = if folder.is_empty() {
            filename
        } else {
            format!("{}/{}", folder.trim_matches('/'), filename)
        };

        let file_path = self.path_for(&public_id)?;
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&file_path, data).await?;

        debug!(path = ?file_path, size = data.len(), "Stored temporary asset");

        Ok(StoredAsset {
            url: format!("{}/{}", self.url_prefix, public_id),
            public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<()> {
        let file_path = self.path_for(public_id)?;
        match fs::remove_file(&file_path).await {
            Ok(()) => {
                debug!(path = ?file_path, "Deleted temporary asset");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}
